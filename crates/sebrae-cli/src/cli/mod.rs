//! CLI command definitions and dispatch for the `sebrae` binary.
//!
//! Uses clap derive macros for argument parsing. Authenticated commands
//! (chat, status, docs, upload, base) go through `AppState::bootstrap`;
//! login/logout and completions do not.

pub mod base;
pub mod chat;
pub mod docs;
pub mod login;
pub mod status;
pub mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Consultor virtual do Sebrae no terminal.
#[derive(Parser)]
#[command(name = "sebrae", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the assistant API.
    #[arg(long, global = true, env = "SEBRAE_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate and store the session token.
    Login {
        /// Store a pre-issued bearer token instead of logging in.
        #[arg(long)]
        token: Option<String>,

        /// Email for interactive login (prompted when omitted).
        #[arg(long)]
        email: Option<String>,
    },

    /// Clear the stored session.
    Logout,

    /// Start an interactive chat with the consultor virtual.
    Chat,

    /// Show system status and metrics.
    Status,

    /// List documents in the knowledge base.
    #[command(alias = "documentos")]
    Docs,

    /// Upload documents to the knowledge base (PDF, DOCX, XLSX).
    Upload {
        /// Files to upload.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Knowledge-base administration (requires admin privilege).
    Base {
        #[command(subcommand)]
        action: BaseCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum BaseCommand {
    /// Show knowledge-base statistics and processed files.
    Stats,

    /// Process new documents in the server directory incrementally.
    Processar {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Wipe the knowledge base (double confirmation required).
    Limpar,
}
