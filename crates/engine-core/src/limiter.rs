use crate::error::LimiterError;
use std::time::Duration;
use tokio::{
    sync::Mutex,
    time::{self, Instant},
};

/// Global admission gate for row fetches.
///
/// Every worker shares one limiter. Each `take` reserves the next free slot
/// on an evenly spaced schedule (`1s / rate` apart) and sleeps until that
/// slot, so the aggregate fetch rate never exceeds `rate` over any window
/// longer than one interval. There is no fairness between callers and no
/// timeout.
#[derive(Debug)]
pub struct ThroughputLimiter {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl ThroughputLimiter {
    pub fn new(rows_per_second: u32) -> Result<Self, LimiterError> {
        if rows_per_second == 0 {
            return Err(LimiterError::InvalidRate(rows_per_second));
        }

        Ok(Self {
            interval: Duration::from_secs(1) / rows_per_second,
            next_slot: Mutex::new(Instant::now()),
        })
    }

    /// Spacing between two consecutive admissions.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until the caller may issue its next fetch.
    pub async fn take(&self) {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            // Idle time is not banked: a limiter that sat unused does not
            // allow a burst afterwards.
            let slot = if *next > now { *next } else { now };
            *next = slot + self.interval;
            slot
        };

        time::sleep_until(slot).await;
    }
}
