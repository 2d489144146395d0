//! System status and metrics dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display the system status dashboard.
///
/// Shows the backend status, model, document and consultant counts, and
/// today's usage metrics.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let system = state.client.system_status().await?;
    let metrics = state.client.metrics().await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "api_url": state.client.base_url(),
            "status": system.status,
            "modelo": system.modelo,
            "documentos_em_memoria": system.documentos_em_memoria,
            "metricas": {
                "documentos_carregados": metrics.documentos_carregados,
                "consultores_disponiveis": metrics.consultores_disponiveis,
                "consultas_hoje": metrics.consultas_hoje,
                "sessoes_ativas": metrics.sessoes_ativas,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Sebrae AI Assistant v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Sistema ──").dim());
    if system.is_online() {
        println!("  Status:   {}", style("🟢 Online").green());
    } else {
        println!("  Status:   {}", style("🔴 Offline").red());
    }
    println!("  Modelo:   {}", style(&system.modelo).dim());
    println!(
        "  Memória:  {}",
        if system.documentos_em_memoria {
            style("documentos carregados").green()
        } else {
            style("aguardando primeira consulta").dim()
        }
    );
    println!();

    println!("  {}", style("── Métricas ──").dim());
    println!(
        "  Documentos:  {}",
        style(metrics.documentos_carregados).bold()
    );
    println!(
        "  Consultores: {}",
        style(format_count(metrics.consultores_disponiveis)).bold()
    );
    println!("  Consultas hoje: {}", metrics.consultas_hoje);
    if metrics.sessoes_ativas > 0 {
        println!("  Sessões ativas: {}", metrics.sessoes_ativas);
    }
    println!();

    println!("  {}", style("── Sessão ──").dim());
    println!(
        "  Usuário: {}",
        style(state.user_name().unwrap_or("desconhecido")).cyan()
    );
    println!("  API:     {}", style(state.client.base_url()).dim());
    println!();

    Ok(())
}

fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}
