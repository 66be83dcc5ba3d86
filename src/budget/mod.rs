//! Budget Module
//!
//! Freemium processing service: every request gets a wall-clock limit, and
//! free users are turned away once their accumulated usage reaches the free
//! tier. Work that overruns keeps running on its worker thread; only the
//! caller stops waiting for it.

mod server;

pub use server::{run_mock_server, UserSummary};

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::BudgetConfig;

// == User ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub is_premium: bool,
    /// Processing time charged so far
    pub time_used: Duration,
}

impl User {
    pub fn new(id: u64, is_premium: bool) -> Self {
        Self {
            id,
            is_premium,
            time_used: Duration::ZERO,
        }
    }
}

// == Policy ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetPolicy {
    /// Deadline for a single request; also what an overrun is charged
    pub max_request_time: Duration,
    /// Usage at which non-premium users are rejected
    pub free_tier_limit: Duration,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self::from(&BudgetConfig::default())
    }
}

impl From<&BudgetConfig> for BudgetPolicy {
    fn from(config: &BudgetConfig) -> Self {
        Self {
            max_request_time: config.max_request_time,
            free_tier_limit: config.free_tier_limit,
        }
    }
}

// == Outcome ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Work finished within the deadline
    Completed { elapsed: Duration },
    /// Deadline passed; the work may still be running
    TimedOut,
    /// Free tier exhausted; no work was started
    Rejected,
    /// The work panicked
    Failed,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Completed { .. })
    }
}

// == Handle Request ==
/// Runs `process` for `user` under `policy` and charges the user for it.
///
/// Completed work is charged its measured duration; an overrun is charged
/// `max_request_time`.
pub async fn handle_request<F>(process: F, user: &mut User, policy: &BudgetPolicy) -> RequestOutcome
where
    F: FnOnce() + Send + 'static,
{
    if !user.is_premium && user.time_used >= policy.free_tier_limit {
        info!(user = user.id, used = ?user.time_used, "free tier exhausted, request rejected");
        return RequestOutcome::Rejected;
    }

    let started = tokio::time::Instant::now();
    let worker = tokio::task::spawn_blocking(move || {
        let start = std::time::Instant::now();
        process();
        start.elapsed()
    });

    match tokio::time::timeout(policy.max_request_time, worker).await {
        Ok(Ok(elapsed)) => {
            user.time_used += elapsed;
            debug!(user = user.id, ?elapsed, used = ?user.time_used, "request completed");
            RequestOutcome::Completed { elapsed }
        }
        Ok(Err(join_error)) => {
            user.time_used += started.elapsed();
            warn!(user = user.id, error = %join_error, "request panicked");
            RequestOutcome::Failed
        }
        Err(_) => {
            user.time_used += policy.max_request_time;
            warn!(user = user.id, used = ?user.time_used, "request exceeded its time limit");
            RequestOutcome::TimedOut
        }
    }
}
