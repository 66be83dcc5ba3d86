//! Session Sweep Task
//!
//! Background task that periodically removes idle sessions.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::session::{Session, SessionTable};

/// Spawns the sweeper for `sessions`.
///
/// Every `interval` the task takes the write lock once and removes each
/// session idle for longer than `expiry`, so a session is gone at most one
/// interval (plus scheduling delay) after it expires. The task ends when
/// `stop` fires or its sender is dropped.
///
/// # Example
/// ```ignore
/// let (stop_tx, stop_rx) = oneshot::channel();
/// let handle = spawn_session_sweeper(sessions, Duration::from_secs(1), Duration::from_secs(5), stop_rx);
/// // Later, during shutdown:
/// let _ = stop_tx.send(());
/// handle.await?;
/// ```
pub fn spawn_session_sweeper(
    sessions: SessionTable,
    interval: Duration,
    expiry: Duration,
    mut stop: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    let interval = interval.max(Duration::from_millis(1));

    tokio::spawn(async move {
        info!(?interval, ?expiry, "starting session sweeper");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = sweep_expired(&sessions, expiry).await;
                    if removed > 0 {
                        info!("session sweep: removed {} expired sessions", removed);
                    } else {
                        debug!("session sweep: nothing to remove");
                    }
                }
                _ = &mut stop => {
                    debug!("session sweeper stopping");
                    break;
                }
            }
        }
    })
}

/// Removes every session idle for longer than `expiry`; returns how many.
pub async fn sweep_expired(sessions: &RwLock<HashMap<String, Session>>, expiry: Duration) -> usize {
    let mut table = sessions.write().await;
    let before = table.len();
    table.retain(|id, session| {
        let keep = !session.is_expired(expiry);
        if !keep {
            info!(session = %id, "session deleted");
        }
        keep
    });
    before - table.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::session::SessionData;

    fn table_with(ids: &[&str]) -> SessionTable {
        let map = ids
            .iter()
            .map(|id| (id.to_string(), Session::new(SessionData::new())))
            .collect();
        Arc::new(RwLock::new(map))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_expired() {
        let sessions = table_with(&["old"]);
        tokio::time::advance(Duration::from_secs(6)).await;
        sessions
            .write()
            .await
            .insert("fresh".to_string(), Session::new(SessionData::new()));

        let removed = sweep_expired(&sessions, Duration::from_secs(5)).await;

        assert_eq!(removed, 1);
        let table = sessions.read().await;
        assert!(table.contains_key("fresh"));
        assert!(!table.contains_key("old"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_task_removes_expired_sessions() {
        let sessions = table_with(&["a", "b"]);
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = spawn_session_sweeper(
            Arc::clone(&sessions),
            Duration::from_secs(1),
            Duration::from_secs(5),
            stop_rx,
        );

        tokio::time::sleep(Duration::from_millis(7500)).await;
        assert!(sessions.read().await.is_empty());

        let _ = stop_tx.send(());
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_sender_dropped() {
        let sessions = table_with(&[]);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let handle = spawn_session_sweeper(sessions, Duration::from_secs(1), Duration::from_secs(5), stop_rx);

        drop(stop_tx);

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop")
            .unwrap();
    }
}
