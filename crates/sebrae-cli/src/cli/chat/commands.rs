//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the session without leaving the
//! prompt.

use console::style;

/// Available slash commands.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the transcript and re-seed the greeting.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Show the local transcript.
    History,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    match trimmed.split_whitespace().next().unwrap_or(trimmed).to_lowercase().as_str() {
        "/help" | "/ajuda" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/limpar" => Some(ChatCommand::Clear),
        "/exit" | "/sair" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" | "/historico" => Some(ChatCommand::History),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Comandos disponíveis:").bold());
    println!();
    println!("  {}      {}", style("/ajuda").cyan(), "Mostra esta mensagem");
    println!(
        "  {}     {}",
        style("/limpar").cyan(),
        "Limpa o histórico e inicia nova conversa"
    );
    println!(
        "  {}  {}",
        style("/historico").cyan(),
        "Mostra a conversa atual"
    );
    println!("  {}       {}", style("/sair").cyan(), "Encerra a sessão");
    println!();
    println!("  {}", style("Ctrl+D para sair").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_help_aliases() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/ajuda"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn parse_exit_aliases() {
        assert_eq!(parse("/sair"), Some(ChatCommand::Exit));
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn parse_clear_and_history() {
        assert_eq!(parse("/limpar"), Some(ChatCommand::Clear));
        assert_eq!(parse("/historico"), Some(ChatCommand::History));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(parse("/SAIR"), Some(ChatCommand::Exit));
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse("como abrir um MEI?"), None);
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
