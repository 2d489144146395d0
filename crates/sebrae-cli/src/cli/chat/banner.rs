//! Welcome banner for chat sessions.

use console::style;

use sebrae_types::knowledge::SystemStatus;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(user_name: Option<&str>, status: Option<&SystemStatus>) {
    println!();
    println!(
        "  {} {}",
        style("🤖").bold(),
        style("Consultor Virtual do Sebrae").cyan().bold()
    );
    println!(
        "  {}",
        style("Assistente de IA para empreendedores e pequenos negócios").dim()
    );
    println!();

    if let Some(name) = user_name {
        println!("  {}  {}", style("Usuário:").bold(), style(name).dim());
    }

    match status {
        Some(status) if status.is_online() => {
            println!("  {}   {}", style("Status:").bold(), style("🟢 Online").green());
            if !status.modelo.is_empty() {
                println!("  {}   {}", style("Modelo:").bold(), style(&status.modelo).dim());
            }
        }
        Some(_) => {
            println!("  {}   {}", style("Status:").bold(), style("🔴 Offline").red());
        }
        None => {
            println!(
                "  {}   {}",
                style("Status:").bold(),
                style("desconhecido").dim()
            );
        }
    }

    println!();
    println!(
        "  {}",
        style("Digite /ajuda para comandos, Ctrl+D para sair").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
