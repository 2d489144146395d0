//! Sebrae assistant terminal client entry point.
//!
//! Binary name: `sebrae`
//!
//! Parses CLI arguments, bootstraps the authenticated session, then
//! dispatches to the appropriate command handler. `login`, `logout`, and
//! shell completions run before bootstrap because they must work without
//! a valid session.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use console::style;
use tracing_subscriber::EnvFilter;

use sebrae_client::ApiError;
use sebrae_client::credentials::CredentialStore;

use cli::{BaseCommand, Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,sebrae=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => Ok(()),
        // A 401 on any authenticated call is terminal for the session:
        // clear the stored credentials once and point at login.
        Err(err) if matches!(err.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized)) => {
            let _ = CredentialStore::default_location().clear().await;
            eprintln!(
                "  {} Sessão expirada. Execute {} novamente.",
                style("✗").red().bold(),
                style("sebrae login").cyan()
            );
            std::process::exit(1);
        }
        Err(err) => Err(err),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need a session
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "sebrae", &mut std::io::stdout());
        return Ok(());
    }

    match cli.command {
        Commands::Login { token, email } => {
            cli::login::login(&cli.api_url, token, email).await?;
        }

        Commands::Logout => {
            cli::login::logout().await?;
        }

        Commands::Chat => {
            let state = AppState::bootstrap(&cli.api_url).await?;
            cli::chat::loop_runner::run_chat_loop(&state).await?;
        }

        Commands::Status => {
            let state = AppState::bootstrap(&cli.api_url).await?;
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Docs => {
            let state = AppState::bootstrap(&cli.api_url).await?;
            cli::docs::list_documents(&state, cli.json).await?;
        }

        Commands::Upload { paths, yes } => {
            let state = AppState::bootstrap(&cli.api_url).await?;
            cli::upload::upload(&state, &paths, yes).await?;
        }

        Commands::Base { action } => {
            let state = AppState::bootstrap(&cli.api_url).await?;
            match action {
                BaseCommand::Stats => cli::base::stats(&state, cli.json).await?,
                BaseCommand::Processar { yes } => cli::base::process_directory(&state, yes).await?,
                BaseCommand::Limpar => cli::base::wipe(&state).await?,
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
