//! Mock clients for the budget service.

use std::thread;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{info, warn};

use super::{handle_request, BudgetPolicy, RequestOutcome, User};

/// What happened to one user's requests.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub user: User,
    pub outcomes: Vec<RequestOutcome>,
}

/// Users and the length of each job they submit, in multiples of `unit`.
fn workload() -> Vec<(User, Vec<u32>)> {
    vec![
        // Runs out of free time on the third job.
        (User::new(1, false), vec![3, 4, 5, 2]),
        // Premium: the overrun is cut off but the next job still runs.
        (User::new(2, true), vec![5, 12, 3]),
        // One overrun exhausts the free tier in a single request.
        (User::new(3, false), vec![12, 1]),
    ]
}

/// Drives every user concurrently, each submitting its jobs in sequence.
///
/// Results are returned in user-id order.
pub async fn run_mock_server(policy: BudgetPolicy, unit: Duration) -> Vec<UserSummary> {
    let mut set = JoinSet::new();

    for (mut user, jobs) in workload() {
        set.spawn(async move {
            let mut outcomes = Vec::with_capacity(jobs.len());
            for units in jobs {
                let work = unit * units;
                let outcome = handle_request(move || thread::sleep(work), &mut user, &policy).await;
                info!(user = user.id, premium = user.is_premium, ?work, ?outcome, "request handled");
                outcomes.push(outcome);
            }
            UserSummary { user, outcomes }
        });
    }

    let mut summaries = Vec::new();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(summary) => summaries.push(summary),
            Err(err) => warn!(error = %err, "user task panicked"),
        }
    }
    summaries.sort_by_key(|s| s.user.id);
    summaries
}
