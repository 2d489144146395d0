//! Knowledge-base document listing command.

use anyhow::Result;
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use console::style;

use sebrae_types::document;

use crate::state::AppState;

/// List the documents currently in the knowledge base.
pub async fn list_documents(state: &AppState, json: bool) -> Result<()> {
    let list = state.client.documents().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&list.documentos)?);
        return Ok(());
    }

    if list.documentos.is_empty() {
        println!();
        println!(
            "  {}",
            style("Nenhum documento carregado ainda.").dim()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["", "Documento", "Tamanho", "Pasta"]);

    for doc in &list.documentos {
        table.add_row(vec![
            document::icon(&doc.nome).to_string(),
            doc.nome.clone(),
            document::format_kb(doc.tamanho),
            doc.pasta.clone(),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} documento(s) na base de conhecimento",
        style(list.documentos.len()).bold()
    );
    println!();

    Ok(())
}
