//! CLI command definitions for the `supportdesk` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod config;
pub mod history;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Customer-support chat backend: HTTP server plus operator tools.
#[derive(Parser)]
#[command(name = "supportdesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (chat widget + JSON API).
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000", env = "SUPPORTDESK_PORT")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1", env = "SUPPORTDESK_HOST")]
        host: String,
    },

    /// Send one message through the support agent and print the reply.
    Send {
        /// The customer message.
        message: String,

        /// Continue an existing conversation.
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Show the messages of a conversation.
    History {
        /// Conversation (session) id.
        session_id: String,
    },

    /// Data dir, provider, and store counts.
    Status {
        /// Also send a tiny completion request to verify the provider.
        #[arg(long)]
        check: bool,
    },

    /// Print the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send_with_session() {
        let cli = Cli::try_parse_from([
            "supportdesk",
            "send",
            "Where is my order?",
            "--session",
            "0190a4b2-0000-7000-8000-000000000000",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Send { message, session } => {
                assert_eq!(message, "Where is my order?");
                assert!(session.is_some());
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["supportdesk", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { port, host } => {
                if std::env::var("SUPPORTDESK_PORT").is_err() {
                    assert_eq!(port, 3000);
                }
                if std::env::var("SUPPORTDESK_HOST").is_err() {
                    assert_eq!(host, "127.0.0.1");
                }
            }
            _ => panic!("expected serve"),
        }
    }
}
