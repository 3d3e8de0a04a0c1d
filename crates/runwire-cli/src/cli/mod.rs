//! CLI argument definitions for runwire.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Runwire CLI
#[derive(Parser, Debug)]
#[command(name = "runwire", version, about = "Stream agent runs over websockets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the websocket server with the demo echo graph
    Serve(ServeArgs),
    /// Send one message and print the run's events until it ends
    Send(SendArgs),
}

/// Arguments for `runwire serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// Settings file (defaults to the platform config dir)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for `runwire send`.
#[derive(Parser, Debug)]
pub struct SendArgs {
    /// Server url (overrides config)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Conversation thread id
    #[arg(short, long, default_value = "default")]
    pub thread: String,

    /// Approve every approval request automatically
    #[arg(long)]
    pub auto_approve: bool,

    /// Settings file (defaults to the platform config dir)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Message to send (positional)
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_send_with_flags() {
        let cli = Cli::parse_from([
            "runwire",
            "send",
            "--url",
            "ws://127.0.0.1:9000",
            "--thread",
            "t-1",
            "--auto-approve",
            "/approve ship it",
        ]);
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.url.as_deref(), Some("ws://127.0.0.1:9000"));
                assert_eq!(args.thread, "t-1");
                assert!(args.auto_approve);
                assert_eq!(args.message, "/approve ship it");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_bind() {
        let cli = Cli::parse_from(["runwire", "serve", "--bind", "0.0.0.0:9000"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
                assert!(args.config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
