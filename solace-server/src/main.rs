//! Server entry point for solace

use anyhow::Result;
use clap::Parser;
use solace_chat::{ChatConfig, ChatService};
use solace_core::config::ConfigLoader;
use solace_core::logging::init_logging;
use solace_core::session::SessionManager;
use solace_core::transcript::TranscriptStore;
use solace_responder::{ChatClient, FallbackResponder, Responder, ScriptedResponder};
use solace_server::{run_server, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;

#[derive(Parser)]
#[command(name = "solace-server")]
#[command(about = "Companion chat backend: sessions, turns, transcripts")]
#[command(version)]
struct Cli {
    /// Configuration directory
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Bind host override
    #[arg(long)]
    host: Option<String>,

    /// Bind port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Answer from the scripted responder only (no upstream API)
    #[arg(long)]
    scripted_only: bool,
}

/// Expand tilde in path
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    let _guard = init_logging(&config.logging);

    let workspace = expand_tilde(&config.storage.workspace);
    let sessions = Arc::new(SessionManager::new(config.session.ttl_secs));
    let transcripts = Arc::new(TranscriptStore::new(&workspace));
    info!(
        "Workspace {} holds transcripts for {} users",
        workspace.display(),
        transcripts.list_users().len()
    );

    let responder: Arc<dyn Responder> = if cli.scripted_only {
        info!("Using scripted responder only");
        Arc::new(ScriptedResponder::with_replies(
            config.responder.fallback_replies.clone(),
        ))
    } else {
        let client = ChatClient::new(
            non_empty(&config.responder.api_key),
            non_empty(&config.responder.api_base),
            config.responder.model.clone(),
            config.responder.max_tokens,
            f64::from(config.responder.temperature),
        );
        Arc::new(FallbackResponder::with_replies(
            Arc::new(client),
            config.responder.fallback_replies.clone(),
        ))
    };

    let chat_config = ChatConfig {
        context_turns: config.responder.context_turns,
        generation_timeout: Duration::from_secs(config.responder.timeout_secs),
        system_prompt: non_empty(&config.responder.system_prompt),
    };
    let chat = Arc::new(ChatService::new(
        sessions.clone(),
        transcripts,
        responder,
        chat_config,
    ));

    let state = AppState { sessions, chat };

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("Ctrl-C received, shutting down");
        let _ = shutdown_tx.send(());
    });

    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    run_server(state, &host, port, shutdown_rx).await
}
