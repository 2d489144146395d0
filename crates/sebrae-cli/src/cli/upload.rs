//! Document upload command.
//!
//! Applies the client-side extension allow-list before anything touches
//! the network: a batch with zero qualifying files is rejected outright
//! with a warning; in a mixed batch the disallowed names are dropped
//! silently and only the qualifying subset is sent.

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use sebrae_client::ApiError;
use sebrae_client::api::UploadFile;
use sebrae_types::document;
use sebrae_types::knowledge::UploadReport;

use crate::state::AppState;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub async fn upload(state: &AppState, paths: &[PathBuf], yes: bool) -> Result<()> {
    let accepted: Vec<&PathBuf> = paths
        .iter()
        .filter(|p| document::is_allowed(&file_name(p)))
        .collect();

    if accepted.is_empty() {
        println!();
        println!(
            "  {} Apenas arquivos PDF, DOCX e XLSX são aceitos",
            style("!").yellow().bold()
        );
        println!();
        return Ok(());
    }

    // Stage the qualifying files, surfacing unreadable paths before upload.
    let mut files = Vec::with_capacity(accepted.len());
    println!();
    for path in &accepted {
        let name = file_name(path);
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            anyhow::anyhow!("não foi possível ler {}: {err}", path.display())
        })?;
        println!(
            "  {} {} {}",
            document::icon(&name),
            name,
            style(format!("({})", document::format_kb(bytes.len() as u64))).dim()
        );
        files.push(UploadFile { name, bytes });
    }
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Enviar {} arquivo(s) para a base?", files.len()))
            .default(true)
            .interact()?;
        if !confirmed {
            println!("  {}", style("Operação cancelada").dim());
            return Ok(());
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("processando...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.client.upload(files).await;
    spinner.finish_and_clear();

    match result {
        Ok(UploadReport::Incremental {
            total_novos,
            total_pulados,
        }) => {
            let mut message = format!("{total_novos} novo(s) arquivo(s) adicionado(s)");
            if total_pulados > 0 {
                message.push_str(&format!(", {total_pulados} pulado(s) (já processados)"));
            }
            println!("  {} {message}", style("✓").green().bold());
        }
        Ok(UploadReport::Message { mensagem }) => {
            println!("  {} {mensagem}", style("✓").green().bold());
        }
        Err(err @ ApiError::Unauthorized) => return Err(err.into()),
        Err(err) => {
            println!(
                "  {} Erro ao fazer upload dos documentos: {err}",
                style("✗").red().bold()
            );
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_takes_final_component() {
        assert_eq!(file_name(Path::new("dados/docs/Ficha.pdf")), "Ficha.pdf");
        assert_eq!(file_name(Path::new("Ficha.pdf")), "Ficha.pdf");
    }
}
