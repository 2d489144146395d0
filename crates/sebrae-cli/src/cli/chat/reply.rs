//! Assembly of the complete reply text from a chat response envelope.
//!
//! Order is fixed: base answer, consultants block (when present),
//! documents-consulted block (when present), then one source-attribution
//! line. The assembled string is what the typewriter reveals and what the
//! transcript stores.

use sebrae_types::chat::{ChatResponse, Consultant};
use sebrae_types::document;

/// Build the full reply text for rendering.
pub fn assemble(response: &ChatResponse) -> String {
    let mut texto = response.resposta.clone();

    if !response.consultores.is_empty() {
        texto.push_str("\n\n");
        texto.push_str(&format_consultants(&response.consultores));
    }

    if !response.documentos.is_empty() {
        texto.push_str("\n\n");
        texto.push_str(&format_documents(&response.documentos));
    }

    if response.usado_internet {
        texto.push_str("\n\n🌐 **Informação complementar da internet incluída**");
    } else {
        texto.push_str("\n\n📚 **Resposta baseada na base local do Sebrae**");
    }

    texto
}

fn format_consultants(consultores: &[Consultant]) -> String {
    let mut out = String::from("---\n\n**👥 CONSULTORES ESPECIALIZADOS ENCONTRADOS**\n\n");

    for (index, consultor) in consultores.iter().enumerate() {
        out.push_str(&format!("**🔹 Consultor {}**\n\n", index + 1));

        if let Some(nome) = &consultor.nome {
            out.push_str(&format!("**👤 Nome:** {nome}\n\n"));
        } else if let Some(razao_social) = &consultor.razao_social {
            out.push_str(&format!("**🏢 Empresa:** {razao_social}\n\n"));
        }

        if let Some(area) = &consultor.area_principal {
            out.push_str(&format!("**🎯 Área Principal:** {area}\n\n"));
        }

        if let Some(sub) = &consultor.subespecialidade {
            out.push_str(&format!("**📋 Subespecialidade:** {sub}\n\n"));
        }

        if let (Some(cidade), Some(estado)) = (&consultor.cidade, &consultor.estado) {
            out.push_str(&format!("**📍 Localização:** {cidade}, {estado}\n\n"));
        }

        if let Some(telefone) = &consultor.telefone {
            out.push_str(&format!("**📞 Telefone:** {telefone}\n\n"));
        }

        if let Some(email) = &consultor.email {
            out.push_str(&format!("**📧 Email:** {email}\n\n"));
        }

        out.push('\n');
    }

    out.push_str("💡 **Como proceder:**\n");
    out.push_str("1. Entre em contato diretamente com o consultor de sua preferência\n");
    out.push_str("2. Mencione que encontrou o contato via sistema Sebrae\n");
    out.push_str("3. Discuta suas necessidades específicas de consultoria\n");

    out
}

fn format_documents(documentos: &[String]) -> String {
    let mut out = String::from("---\n\n**📚 DOCUMENTOS CONSULTADOS**\n\n");
    out.push_str("*As informações acima foram extraídas dos seguintes documentos oficiais do Sebrae:*\n\n");

    for doc in documentos {
        let nome = document::display_name(doc);
        let icone = document::icon(doc);
        out.push_str(&format!("- {icone} **{nome}**\n"));
        out.push_str(&format!("  *Documento oficial do Sebrae - {doc}*\n\n"));
    }

    out.push_str("💾 **Para baixar os documentos:** Visite o portal oficial do Sebrae\n");
    out.push_str("🔗 **Portal:** www.sebrae.com.br\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_response() -> ChatResponse {
        serde_json::from_str(
            r#"{"resposta": "Resposta base.", "fonte": "base_local", "usado_internet": false}"#,
        )
        .unwrap()
    }

    #[test]
    fn plain_answer_gets_only_attribution() {
        let texto = assemble(&base_response());
        assert!(texto.starts_with("Resposta base."));
        assert!(texto.ends_with("📚 **Resposta baseada na base local do Sebrae**"));
        assert!(!texto.contains("CONSULTORES"));
        assert!(!texto.contains("DOCUMENTOS"));
    }

    #[test]
    fn internet_attribution_when_flagged() {
        let mut response = base_response();
        response.usado_internet = true;
        let texto = assemble(&response);
        assert!(texto.ends_with("🌐 **Informação complementar da internet incluída**"));
    }

    #[test]
    fn consultant_block_prefers_name_over_company() {
        let mut response = base_response();
        response.consultores = vec![
            Consultant {
                nome: Some("Maria Silva".into()),
                razao_social: Some("Silva Consultoria".into()),
                area_principal: Some("Finanças".into()),
                ..Default::default()
            },
            Consultant {
                razao_social: Some("ACME Ltda".into()),
                cidade: Some("Recife".into()),
                estado: Some("PE".into()),
                ..Default::default()
            },
        ];
        let texto = assemble(&response);
        assert!(texto.contains("**👤 Nome:** Maria Silva"));
        assert!(!texto.contains("Silva Consultoria"));
        assert!(texto.contains("**🏢 Empresa:** ACME Ltda"));
        assert!(texto.contains("**📍 Localização:** Recife, PE"));
        assert!(texto.contains("**🔹 Consultor 2**"));
    }

    #[test]
    fn location_needs_both_city_and_state() {
        let mut response = base_response();
        response.consultores = vec![Consultant {
            nome: Some("João".into()),
            cidade: Some("Natal".into()),
            ..Default::default()
        }];
        let texto = assemble(&response);
        assert!(!texto.contains("Localização"));
    }

    #[test]
    fn documents_block_uses_display_names_and_icons() {
        let mut response = base_response();
        response.documentos = vec!["Guia_MEI.pdf".into(), "Planilha_Custos.xlsx".into()];
        let texto = assemble(&response);
        assert!(texto.contains("- 📄 **Guia MEI**"));
        assert!(texto.contains("- 📊 **Planilha Custos**"));
        assert!(texto.contains("Documento oficial do Sebrae - Guia_MEI.pdf"));
    }
}
