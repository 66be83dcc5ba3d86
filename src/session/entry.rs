//! Session Entry Module
//!
//! A single stored session and its idle-time check.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

/// Opaque key/value payload attached to a session.
pub type SessionData = HashMap<String, Value>;

// == Session ==
#[derive(Debug, Clone)]
pub struct Session {
    pub data: SessionData,
    /// Last time the session was created or updated
    pub updated_at: Instant,
}

impl Session {
    pub fn new(data: SessionData) -> Self {
        Self {
            data,
            updated_at: Instant::now(),
        }
    }

    /// Time since the last update.
    pub fn idle(&self) -> Duration {
        self.updated_at.elapsed()
    }

    // == Is Expired ==
    /// True once the session has been idle for strictly longer than `expiry`.
    pub fn is_expired(&self, expiry: Duration) -> bool {
        self.idle() > expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_session_expiry_boundary() {
        let session = Session::new(SessionData::new());
        let expiry = Duration::from_secs(5);

        tokio::time::advance(expiry).await;
        assert!(!session.is_expired(expiry), "exactly at the threshold is still live");

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(session.is_expired(expiry));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_keeps_data() {
        let mut data = SessionData::new();
        data.insert("website".to_string(), json!("longhoang.de"));

        let session = Session::new(data);

        assert_eq!(session.data["website"], json!("longhoang.de"));
        assert_eq!(session.idle(), Duration::ZERO);
    }
}
