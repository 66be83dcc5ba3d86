//! Session cleaner
//!
//! Creates a session, updates it, reads it back, then lets the background
//! sweeper remove it once it has been idle too long.

use serde_json::json;
use tracing::info;

use concurrency_exercises::session::{SessionData, SessionManager};
use concurrency_exercises::{telemetry, SessionConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = SessionConfig::from_env();
    let manager = SessionManager::new(&config);

    let id = manager.create_session().await;
    info!("Created new session with ID {}", id);

    let mut data = SessionData::new();
    data.insert("website".to_string(), json!("longhoang.de"));
    manager.update_session_data(&id, data).await?;
    info!("Updated session data, set website to longhoang.de");

    let stored = manager.get_session_data(&id).await?;
    info!("Get session data: {:?}", stored);

    // Wait out the expiry plus one sweep so the cleanup is visible.
    tokio::time::sleep(config.expiry + config.sweep_interval * 2).await;
    match manager.get_session_data(&id).await {
        Ok(_) => info!("Session {} still present", id),
        Err(err) => info!("Session gone after inactivity: {}", err),
    }

    manager.shutdown().await;
    Ok(())
}
