//! # Swoosh Server
//!
//! Serves the bot setup wizard, its JSON API and every generated bot
//! website from one process. Bots are kept in SQL when `database.url` is
//! set and in memory otherwise.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use swoosh_api::{build_router, AppState};
use swoosh_db::{BotStore, Database, MemoryStore, SqlStore};

#[derive(Parser, Debug)]
#[command(name = "swoosh", version, about = "Swoosh Bots - landing pages for Discord bots")]
struct Args {
    /// Address to bind (overrides server.host)
    #[arg(long, env = "SWOOSH_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long, env = "SWOOSH_PORT")]
    port: Option<u16>,

    /// sqlite: or postgres: URL; omit to keep bots in memory
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = swoosh_common::config::init()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.database_url.is_some() {
        config.database.url = args.database_url;
    }

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swoosh=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    tracing::info!("Starting Swoosh Bots v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn BotStore> = match config.database.url {
        Some(_) => {
            let db = Database::connect(&config.database).await?;
            db.migrate().await?;
            Arc::new(SqlStore::new(db))
        }
        None => {
            tracing::warn!("database.url is not set; bots are kept in memory and lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    tracing::info!(backend = store.backend(), "Bot store ready");

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let public_url = config.server.public_url.clone();

    let state = AppState::new(config, store);
    state.logos.ensure_dir().await?;
    tracing::info!(dir = %state.logos.dir().display(), "Logo uploads ready");

    let app = build_router(state);

    tracing::info!("Listening on http://{addr} (public URL {public_url})");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping gracefully...");
}
