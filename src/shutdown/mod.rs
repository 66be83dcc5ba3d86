//! Shutdown Module
//!
//! Two-stage interrupt handling: the first interrupt asks the process to
//! stop gracefully, the second gives up on it.

mod process;

pub use process::{MockProcess, Process};

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

// == Shutdown State ==
/// Running → GracefulStopRequested → StoppedCleanly | KilledByForce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    GracefulStopRequested,
    StoppedCleanly,
    KilledByForce,
}

impl ShutdownState {
    pub fn on_interrupt(self) -> Self {
        match self {
            ShutdownState::Running => ShutdownState::GracefulStopRequested,
            ShutdownState::GracefulStopRequested => ShutdownState::KilledByForce,
            terminal => terminal,
        }
    }

    pub fn on_process_exit(self) -> Self {
        match self {
            ShutdownState::Running | ShutdownState::GracefulStopRequested => {
                ShutdownState::StoppedCleanly
            }
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ShutdownState::StoppedCleanly | ShutdownState::KilledByForce
        )
    }
}

// == Supervise ==
/// Runs `process` until it exits or two interrupts arrive.
///
/// The first interrupt spawns `stop()` without waiting for it. The second
/// returns [`ShutdownState::KilledByForce`] immediately; the caller is
/// expected to terminate the program.
pub async fn supervise<P: Process>(
    process: Arc<P>,
    mut interrupts: mpsc::Receiver<()>,
) -> ShutdownState {
    let mut state = ShutdownState::Running;
    let mut listening = true;

    let run = process.run();
    tokio::pin!(run);

    while !state.is_terminal() {
        tokio::select! {
            () = &mut run => {
                state = state.on_process_exit();
                info!("process stopped cleanly");
            }
            received = interrupts.recv(), if listening => match received {
                Some(()) => {
                    state = state.on_interrupt();
                    match state {
                        ShutdownState::GracefulStopRequested => {
                            info!("gracefully stopping the process, interrupt again to force");
                            let process = Arc::clone(&process);
                            tokio::spawn(async move { process.stop().await });
                        }
                        ShutdownState::KilledByForce => warn!("forcefully terminating"),
                        _ => {}
                    }
                }
                None => listening = false,
            },
        }
    }

    state
}

// == Signal Forwarding ==
/// Forwards every SIGINT into `interrupts` until the receiver is dropped.
#[cfg(unix)]
pub fn forward_interrupts(interrupts: mpsc::Sender<()>) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    Ok(tokio::spawn(async move {
        while sigint.recv().await.is_some() {
            if interrupts.send(()).await.is_err() {
                break;
            }
        }
    }))
}

/// Forwards every Ctrl+C into `interrupts` until the receiver is dropped.
#[cfg(not(unix))]
pub fn forward_interrupts(interrupts: mpsc::Sender<()>) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        loop {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for Ctrl+C");
                break;
            }
            if interrupts.send(()).await.is_err() {
                break;
            }
        }
    }))
}
