//! Long-running process driven by the shutdown supervisor.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

// == Process Trait ==
pub trait Process: Send + Sync + 'static {
    /// Runs until the process has been stopped.
    fn run(&self) -> impl Future<Output = ()> + Send;

    /// Requests a graceful stop. May take a while to complete.
    fn stop(&self) -> impl Future<Output = ()> + Send;
}

// == Mock Process ==
/// Prints a heartbeat until stopped; stopping takes `stop_delay`.
#[derive(Debug)]
pub struct MockProcess {
    stop_delay: Duration,
    heartbeat: Duration,
    stop_requested: AtomicBool,
    stopped: watch::Sender<bool>,
}

impl MockProcess {
    pub fn new(stop_delay: Duration) -> Self {
        Self {
            stop_delay,
            heartbeat: Duration::from_secs(1),
            stop_requested: AtomicBool::new(false),
            stopped: watch::Sender::new(false),
        }
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }
}

impl Process for MockProcess {
    async fn run(&self) {
        let mut stopped = self.stopped.subscribe();
        info!("process running, press Ctrl+C to stop");
        loop {
            let done = *stopped.borrow_and_update();
            if done {
                break;
            }
            tokio::select! {
                changed = stopped.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.heartbeat) => info!("process still running"),
            }
        }
        info!("process exited");
    }

    async fn stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
        info!(delay = ?self.stop_delay, "stopping process");
        tokio::time::sleep(self.stop_delay).await;
        self.stopped.send_replace(true);
        info!("process stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_after_stop() {
        let process = Arc::new(MockProcess::new(Duration::from_secs(2)));
        let runner = Arc::clone(&process);
        let handle = tokio::spawn(async move { runner.run().await });

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!handle.is_finished());

        process.stop().await;
        handle.await.unwrap();
        assert!(process.is_stopped());
    }
}
