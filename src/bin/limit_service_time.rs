//! Time-limited requests
//!
//! Free users get a fixed amount of processing time; every request is cut off
//! at the per-request limit.

use std::time::Duration;

use tracing::info;

use concurrency_exercises::budget::{run_mock_server, BudgetPolicy};
use concurrency_exercises::{telemetry, BudgetConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = BudgetConfig::from_env();
    let policy = BudgetPolicy::from(&config);
    info!(
        "Max {:?} per request, {:?} free per user",
        policy.max_request_time, policy.free_tier_limit
    );

    for summary in run_mock_server(policy, Duration::from_secs(1)).await {
        let succeeded = summary.outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            user = summary.user.id,
            premium = summary.user.is_premium,
            used = ?summary.user.time_used,
            succeeded,
            total = summary.outcomes.len(),
            "user summary"
        );
    }
    Ok(())
}
