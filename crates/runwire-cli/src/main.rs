//! Runwire CLI binary entry point.

mod cli;
mod errors;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use runwire::client::{ClientEvent, ConnectionManager, ConnectionStatus};
use runwire::config::RunwireSettings;
use runwire::error::RunwireError;
use runwire::event::{ApprovalDecision, ClientMessage, EventPayload};
use runwire::server::{EchoGraph, InMemoryCheckpointStore, RunCoordinator, RunManager, RunwireServer};
use runwire::tools::{sleep_tool, ToolSet};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, SendArgs, ServeArgs};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runwire=info,runwire_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Send(args) => handle_send(args).await,
    };

    if let Err(err) = result {
        eprintln!("Error: {}", errors::format_error_help(&err));
        std::process::exit(1);
    }
}

fn load_settings(path: Option<&Path>) -> Result<RunwireSettings, RunwireError> {
    let settings = match path {
        Some(path) => RunwireSettings::load(path)?,
        None => RunwireSettings::load_default()?,
    };
    settings.with_env()
}

async fn handle_serve(args: ServeArgs) -> Result<(), RunwireError> {
    let settings = load_settings(args.config.as_deref())?;
    let mut config = settings.server_config()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let coordinator = RunCoordinator::new(
        Arc::new(EchoGraph::new()),
        ToolSet::new().with(sleep_tool()),
        Arc::new(InMemoryCheckpointStore::new()),
        config.run.clone(),
    )?;
    let manager = RunManager::new(Arc::new(coordinator));
    let server = RunwireServer::bind(&config, manager).await?;
    println!("listening on ws://{}", server.local_addr());

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
        }
        trigger.cancel();
    });
    server.serve(shutdown).await
}

async fn handle_send(args: SendArgs) -> Result<(), RunwireError> {
    let settings = load_settings(args.config.as_deref())?;
    let mut config = settings.connection_config()?;
    if let Some(url) = args.url {
        config.url = url;
    }

    let manager = ConnectionManager::new(config)?;
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let _subscription = manager.subscribe(move |event| {
        let _ = events_tx.send(event.clone());
    });
    manager.connect().await?;
    if !manager.send(&ClientMessage::user_message(&args.thread, &args.message)) {
        return Err(RunwireError::Connection("failed to send message".into()));
    }

    let result = loop {
        let Some(event) = events_rx.recv().await else {
            break Err(RunwireError::Connection("event stream ended".into()));
        };
        match event {
            ClientEvent::Event(event) => {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(err) => tracing::warn!(error = %err, "failed to print event"),
                }
                if let EventPayload::ApprovalRequested { request_id, .. } = &event.payload {
                    if args.auto_approve {
                        manager.send(&ClientMessage::approval_response(
                            request_id.clone(),
                            ApprovalDecision::Approve,
                            None,
                        ));
                    } else {
                        eprintln!("approval requested ({request_id}); rerun with --auto-approve");
                    }
                }
                if event.is_terminal() {
                    break Ok(());
                }
            }
            ClientEvent::ConnectionStatus(change) => {
                tracing::info!(status = %change.status, attempt = change.reconnect_attempt, "connection");
                // The server cancels every run of a lost connection, so ours is gone.
                let lost = matches!(
                    change.status,
                    ConnectionStatus::Reconnecting | ConnectionStatus::Disconnected
                );
                if lost || change.terminal {
                    break Err(RunwireError::Connection(format!(
                        "{}; run cancelled by the server",
                        change.reason.unwrap_or_else(|| "connection lost".into())
                    )));
                }
            }
            ClientEvent::MessageRejected { thread_id, reason } if thread_id == args.thread => {
                break Err(RunwireError::InvalidState(format!(
                    "message rejected for thread {thread_id}: {reason}"
                )));
            }
            ClientEvent::MessageRejected { .. } => {}
        }
    };
    manager.disconnect();
    result
}
