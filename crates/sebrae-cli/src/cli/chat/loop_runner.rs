//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: welcome banner, seeded
//! greeting, input loop, slash commands, the chat API round-trip with a
//! thinking spinner, and the typed reveal of each reply. Only the newest
//! user message is sent per request; the transcript stays local.

use console::style;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use tokio_util::sync::CancellationToken;

use sebrae_client::ApiError;
use sebrae_types::chat::{Role, Transcript, TranscriptEntry};

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::reply;
use super::terminal::{TerminalMessage, print_entry};
use super::typewriter::Typewriter;

/// Greeting seeded as the first transcript entry of every session.
const GREETING: &str = "👋 **Olá! Seja bem-vindo(a) ao Consultor Virtual do Sebrae!**\n\
\n\
Estou aqui para ajudá-lo(a) a encontrar informações, produtos, serviços e profissionais qualificados do Sebrae.\n\
\n\
**📚 Para consultar a base de documentos Sebrae, digite: 1 + sua pergunta**\n\
*Busca em documentos oficiais, fichas técnicas, cursos e indicação de consultores.*\n\
\n\
**💬 Para conversa livre com a IA, digite: 2 + sua pergunta**\n\
*Dicas gerais de negócios, estratégias e brainstorming, sem buscar na base local.*\n\
\n\
🎯 **Aguardando sua escolha...**";

/// Error notice appended to the transcript when a request fails.
const REQUEST_FAILED: &str =
    "❌ Desculpe, ocorreu um erro ao processar sua mensagem. Por favor, tente novamente.";

/// Whether a terminal event is the reveal-skip chord (Ctrl+C).
///
/// The input handler keeps the terminal in raw mode for the whole
/// session, so Ctrl+C arrives as a key event, not a SIGINT.
fn is_cancel_key(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Watch for Ctrl+C while a reveal is running, cancelling the token.
///
/// Polls so the task also exits promptly once the reveal cancels the
/// token itself; the caller awaits the handle before reading input again
/// so no keystroke is consumed by a stale watcher.
fn spawn_cancel_watcher(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !cancel.is_cancelled() {
            match event::poll(std::time::Duration::from_millis(50)) {
                Ok(true) => {
                    if let Ok(event) = event::read() {
                        if is_cancel_key(&event) {
                            cancel.cancel();
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    })
}

/// Wipe the transcript and re-seed (and display) the greeting.
fn seed_greeting(transcript: &mut Transcript) {
    transcript.reset_with_greeting(GREETING);
    print_entry(&transcript.entries()[0]);
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let status = state.client.system_status().await.ok();
    print_welcome_banner(state.user_name(), status.as_ref());

    let mut transcript = Transcript::new();
    seed_greeting(&mut transcript);

    let prompt = format!("  {} ", style("Você >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Sessão encerrada.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Ctrl+D para sair, ou continue conversando.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    println!("  {}", style("Digite uma mensagem").yellow());
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => {
                            commands::print_help();
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                            seed_greeting(&mut transcript);
                            println!(
                                "  {}",
                                style("Histórico limpo! Nova conversa iniciada.").dim()
                            );
                            println!();
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Sessão encerrada.").dim());
                            break;
                        }
                        ChatCommand::History => {
                            print_history(&transcript);
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Comando desconhecido: {}. Digite /ajuda.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                // Echo the user turn immediately.
                println!();
                let entry = TranscriptEntry::now(Role::User, text.clone());
                print_entry(&entry);
                transcript.push(entry);

                // Thinking spinner while the request is in flight.
                let spinner = indicatif::ProgressBar::new_spinner();
                spinner.set_style(
                    indicatif::ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .unwrap(),
                );
                spinner.set_message("pensando...");
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));

                let result = state.client.chat(&text).await;
                spinner.finish_and_clear();

                let response = match result {
                    Ok(response) => response,
                    Err(ApiError::Unauthorized) => {
                        state.store.clear().await?;
                        println!(
                            "\n  {} Sessão expirada. Execute {} novamente.",
                            style("✗").red().bold(),
                            style("sebrae login").cyan()
                        );
                        break;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "chat request failed");
                        let entry = TranscriptEntry::now(Role::Assistant, REQUEST_FAILED);
                        print_entry(&entry);
                        transcript.push(entry);
                        continue;
                    }
                };

                let texto = reply::assemble(&response);

                // Ctrl+C during the reveal skips the animation; the reply
                // is still committed in full.
                let cancel = CancellationToken::new();
                let watcher = spawn_cancel_watcher(cancel.clone());

                let mut sink = TerminalMessage::new(&mut transcript);
                sink.print_header(Role::Assistant);
                Typewriter::default()
                    .with_cancellation(cancel.clone())
                    .reveal(Role::Assistant, &texto, &mut sink)
                    .await;

                cancel.cancel();
                let _ = watcher.await;
            }
        }
    }

    Ok(())
}

/// Show a one-line preview of each transcript turn.
fn print_history(transcript: &Transcript) {
    println!();
    for entry in transcript.entries() {
        let label = match entry.role {
            Role::User => format!("{}", style("Você").green().bold()),
            Role::Assistant => format!("{}", style("Consultor IA").cyan().bold()),
        };
        let flat = entry.content.replace('\n', " ");
        let preview: String = if flat.chars().count() > 100 {
            let truncated: String = flat.chars().take(97).collect();
            format!("{truncated}...")
        } else {
            flat
        };
        println!("  {label} {preview}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn ctrl_c_key_event_cancels_the_reveal() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(is_cancel_key(&ctrl_c));

        // A plain 'c' or another control chord must not skip the reveal.
        let plain_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!is_cancel_key(&plain_c));
        let ctrl_d = Event::Key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(!is_cancel_key(&ctrl_d));
    }

    #[tokio::test]
    async fn cancel_watcher_exits_once_the_token_is_cancelled() {
        let cancel = CancellationToken::new();
        let watcher = spawn_cancel_watcher(cancel.clone());
        cancel.cancel();
        // Must resolve on its own instead of hanging on the event queue.
        watcher.await.unwrap();
    }

    #[test]
    fn clear_reseeds_exactly_one_greeting_entry() {
        let mut transcript = Transcript::new();
        seed_greeting(&mut transcript);
        transcript.push(TranscriptEntry::now(Role::User, "1 como abrir MEI?"));
        transcript.push(TranscriptEntry::now(Role::Assistant, "Para abrir..."));

        seed_greeting(&mut transcript);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0].role, Role::Assistant);
        assert_eq!(transcript.entries()[0].content, GREETING);
    }
}
