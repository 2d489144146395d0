//! Knowledge-base administration commands.
//!
//! Statistics, incremental directory processing, and the wipe operation.
//! Wiping is gated by a two-step confirmation: a yes/no prompt followed
//! by a typed literal match. Both admin operations surface a privilege
//! notice on 403 and leave all state unchanged.

use anyhow::Result;
use chrono::{DateTime, Local};
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use sebrae_client::ApiError;
use sebrae_types::document;

use crate::state::AppState;

/// Literal the user must type to authorize a wipe.
const WIPE_CONFIRMATION: &str = "CONFIRMAR";

fn admin_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Show knowledge-base statistics and the processed-file listing.
pub async fn stats(state: &AppState, json: bool) -> Result<()> {
    let stats = state.client.base_stats().await?;

    if json {
        let value = serde_json::json!({
            "total_chunks": stats.total_chunks,
            "total_arquivos": stats.total_arquivos,
            "ultima_atualizacao": stats.ultima_atualizacao,
            "arquivos": stats.arquivos.iter().map(|f| serde_json::json!({
                "caminho": f.caminho,
                "data": f.data,
                "chunks": f.chunks,
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("── Base de conhecimento ──").dim());
    println!("  Chunks:   {}", style(stats.total_chunks).bold());
    println!("  Arquivos: {}", style(stats.total_arquivos).bold());
    println!(
        "  Última atualização: {}",
        style(format_update(&stats.ultima_atualizacao)).dim()
    );
    println!();

    if stats.arquivos.is_empty() {
        println!("  {}", style("Nenhum arquivo processado ainda.").dim());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["", "Arquivo", "Chunks", "Data"]);
    for file in &stats.arquivos {
        let name = file.file_name();
        table.add_row(vec![
            document::icon(name).to_string(),
            name.to_string(),
            file.chunks.to_string(),
            format_update(&file.data),
        ]);
    }
    println!("{table}");
    println!();

    Ok(())
}

/// "N/A" means the base was never updated; anything else is an ISO date.
fn format_update(raw: &str) -> String {
    if raw.is_empty() || raw == "N/A" {
        return "Nunca".to_string();
    }
    match raw.parse::<DateTime<Local>>() {
        Ok(date) => date.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Incrementally process new documents in the server's directory.
pub async fn process_directory(state: &AppState, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(
                "Processar todos os novos documentos do diretório? \
                 Apenas arquivos novos ou modificados serão processados.",
            )
            .default(true)
            .interact()?;
        if !confirmed {
            println!("  {}", style("Operação cancelada").dim());
            return Ok(());
        }
    }

    let spinner = admin_spinner("processando diretório...");
    let result = state.client.process_directory().await;
    spinner.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(ApiError::Forbidden) => {
            println!();
            println!(
                "  {} Você precisa ser administrador para processar o diretório",
                style("✗").red().bold()
            );
            println!();
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!();
    println!("  {} {}", style("✓").green().bold(), report.mensagem);
    println!("  Novos processados: {}", style(report.novos_processados).green());
    println!("  Pulados: {}", style(report.pulados).yellow());
    if report.erros > 0 {
        println!("  Erros: {}", style(report.erros).red());
    }

    if !report.detalhes.processados.is_empty() {
        println!();
        println!("  {}", style("Arquivos processados:").bold());
        for item in &report.detalhes.processados {
            println!(
                "  {} {} {}",
                style("✓").green(),
                item.arquivo,
                style(format!("({} chunks)", item.chunks)).dim()
            );
        }
    }

    if !report.detalhes.erros.is_empty() {
        println!();
        println!("  {}", style("Erros encontrados:").red().bold());
        for failure in &report.detalhes.erros {
            println!("  {} {}: {}", style("✗").red(), failure.arquivo, failure.erro);
        }
    }
    println!();

    Ok(())
}

/// Wipe the knowledge base after double confirmation.
pub async fn wipe(state: &AppState) -> Result<()> {
    println!();
    println!(
        "  {} Esta ação irá {} a base de conhecimento.",
        style("⚠").yellow().bold(),
        style("APAGAR COMPLETAMENTE").red().bold()
    );
    println!("  Todos os documentos processados serão removidos.");
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Deseja realmente continuar?")
        .default(false)
        .interact()?;
    if !confirmed {
        println!("  {}", style("Operação cancelada").dim());
        return Ok(());
    }

    let typed: String = Input::new()
        .with_prompt(format!("Digite \"{WIPE_CONFIRMATION}\" (em maiúsculas) para prosseguir"))
        .allow_empty(true)
        .interact_text()?;
    if typed != WIPE_CONFIRMATION {
        println!("  {}", style("Operação cancelada").dim());
        return Ok(());
    }

    let spinner = admin_spinner("limpando base de conhecimento...");
    let result = state.client.wipe_base().await;
    spinner.finish_and_clear();

    match result {
        Ok(_) => {
            println!();
            println!(
                "  {} Base de conhecimento limpa com sucesso!",
                style("✓").green().bold()
            );
            println!();
        }
        Err(ApiError::Forbidden) => {
            println!();
            println!(
                "  {} Você precisa ser administrador para limpar a base",
                style("✗").red().bold()
            );
            println!();
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_update_handles_sentinels() {
        assert_eq!(format_update("N/A"), "Nunca");
        assert_eq!(format_update(""), "Nunca");
        // Unparseable dates pass through.
        assert_eq!(format_update("ontem"), "ontem");
    }
}
