//! viewbadge server
//!
//! Serves a shields.io endpoint badge that counts profile views.
//! - Badge: any method on `/` and `server.route`
//! - Ops: `/healthz`, `/readyz`, `/metrics`
//! - `viewbadge-server print-sql` prints the DDL for the atomic increment
//!   function used by `counter.increment_mode: atomic`
//!
//! Logs go to stderr so stdout carries only command output.

use std::process::ExitCode;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use viewbadge_core::error::{Result, ViewBadgeError};
use viewbadge_server::cli::{self, Cli, Command};
use viewbadge_server::config::{self, StoreSettings};
use viewbadge_server::{app_state::AppState, router};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "viewbadge-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<()> {
    let cfg = config::load(args.config.as_deref())?;
    let settings = StoreSettings::from_env();

    if args.command == Some(Command::PrintSql) {
        return cli::write_increment_sql(&cfg, &settings, &mut std::io::stdout().lock());
    }

    let listen = cfg.server.listen_addr()?;
    let state = AppState::new(cfg, &settings)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "viewbadge-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ViewBadgeError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ViewBadgeError::Internal(format!("server failed: {e}")))?;

    tracing::info!("viewbadge-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
}
