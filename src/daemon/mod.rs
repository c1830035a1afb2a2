//! Daemon for the Pomodoro timer.
//!
//! - `timer`: engine combining the session sequencer and the countdown
//! - `ipc`: Unix socket server and request dispatch
//!
//! [`run`] wires them together: a single one-second interval task
//! drives the engine (the only tick source in the process) while the
//! main task serves IPC clients until interrupted.

pub mod ipc;
pub mod timer;

pub use ipc::{IpcServer, RequestHandler};
pub use timer::{TimerEngine, TimerEvent};

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::notify;

/// Runs the daemon until interrupted.
///
/// # Errors
///
/// Returns an error if the socket cannot be bound.
pub async fn run(socket_path: &Path) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = Arc::new(Mutex::new(TimerEngine::new(event_tx)));

    let server = IpcServer::new(socket_path)?;
    let handler = RequestHandler::new(engine.clone());

    // The single tick source. Ticks arriving while the countdown is
    // idle are dropped by the engine, so reset never races a stale one.
    let tick_engine = engine.clone();
    let tick_task = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if let Err(e) = tick_engine.lock().await.on_tick() {
                tracing::error!("Tick handling failed: {e}");
            }
        }
    });

    let notify_task = tokio::spawn(notify::run(event_rx));

    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .context("Failed to install SIGTERM handler")?;

    tracing::info!(path = %socket_path.display(), "Daemon listening");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            _ = sigterm.recv() => {
                tracing::info!("Shutting down");
                break;
            }
            accepted = server.accept() => {
                match accepted {
                    Ok(mut stream) => {
                        let request = match IpcServer::receive_request(&mut stream).await {
                            Ok(request) => request,
                            Err(e) => {
                                tracing::warn!("Bad request: {e}");
                                continue;
                            }
                        };

                        tracing::debug!(?request, "Handling request");
                        let response = handler.handle(request).await;

                        if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
                            tracing::warn!("Failed to send response: {e}");
                        }
                    }
                    Err(e) => tracing::warn!("Accept failed: {e}"),
                }
            }
        }
    }

    tick_task.abort();
    notify_task.abort();

    Ok(())
}
