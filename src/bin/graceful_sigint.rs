//! Graceful SIGINT
//!
//! First Ctrl+C asks the process to stop; a second one kills the program.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;

use concurrency_exercises::shutdown::{forward_interrupts, supervise, MockProcess, ShutdownState};
use concurrency_exercises::{telemetry, ShutdownConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = ShutdownConfig::from_env();
    let process = Arc::new(MockProcess::new(config.stop_delay));

    let (tx, rx) = mpsc::channel(2);
    let _listener = forward_interrupts(tx).context("failed to install SIGINT handler")?;

    match supervise(process, rx).await {
        ShutdownState::KilledByForce => {
            info!("Forcefully terminating the program");
            std::process::exit(1);
        }
        state => info!(?state, "Program exited"),
    }
    Ok(())
}
