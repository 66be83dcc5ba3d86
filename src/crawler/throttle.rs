//! Shared time gate for the crawler.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

// == Throttle ==
/// Releases at most one waiter per period.
///
/// The first release happens one full period after construction. Ticks that
/// nobody waited for are not banked, so a burst of waiters after a quiet
/// spell still gets spaced out.
#[derive(Debug)]
pub struct Throttle {
    ticks: Mutex<Interval>,
}

impl Throttle {
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let mut ticks = time::interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            ticks: Mutex::new(ticks),
        }
    }

    /// Waits for the next release.
    pub async fn wait(&self) {
        self.ticks.lock().await.tick().await;
    }
}
