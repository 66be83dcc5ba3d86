//! Session Module
//!
//! In-memory session store. A background sweeper, owned by the manager,
//! removes sessions that have not been updated within the expiry window.

mod entry;

pub use entry::{Session, SessionData};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::tasks::spawn_session_sweeper;

/// Session map shared between the manager and its sweeper.
pub type SessionTable = Arc<RwLock<HashMap<String, Session>>>;

struct Sweeper {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

// == Session Manager ==
/// Tracks sessions from creation through updates to expiry.
///
/// Must be created inside a tokio runtime; the sweeper starts immediately
/// and stops on [`SessionManager::shutdown`] or when the manager is dropped.
pub struct SessionManager {
    sessions: SessionTable,
    sweeper: Option<Sweeper>,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        let sessions: SessionTable = Arc::new(RwLock::new(HashMap::new()));
        let (stop, stop_rx) = oneshot::channel();
        let handle = spawn_session_sweeper(
            Arc::clone(&sessions),
            config.sweep_interval,
            config.expiry,
            stop_rx,
        );

        Self {
            sessions,
            sweeper: Some(Sweeper { stop, handle }),
        }
    }

    // == Create ==
    /// Stores a new empty session and returns its ID.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Session::new(SessionData::new()));
        debug!(session = %id, "session created");
        id
    }

    // == Read ==
    /// Returns a copy of the data stored for `id`.
    pub async fn get_session_data(&self, id: &str) -> SessionResult<SessionData> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .map(|session| session.data.clone())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    // == Update ==
    /// Replaces the data of `id` and resets its idle timer.
    pub async fn update_session_data(&self, id: &str, data: SessionData) -> SessionResult<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        *session = Session::new(data);
        Ok(())
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // == Shutdown ==
    /// Stops the sweeper and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            let _ = sweeper.stop.send(());
            if let Err(err) = sweeper.handle.await {
                debug!(error = %err, "session sweeper ended abnormally");
            }
            info!("session manager shut down");
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            let _ = sweeper.stop.send(());
        }
    }
}
