use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::errors::AppError;

/// Sliding-window submission limiter keyed by client address. State lives in
/// memory; restarting the process resets all windows.
#[derive(Clone)]
pub struct SubmissionLimiter {
    quota: usize,
    window: Duration,
    hits: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl SubmissionLimiter {
    pub fn new(quota: usize, window: Duration) -> Self {
        Self {
            quota,
            window,
            hits: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Records one submission attempt from `addr`. Fails once the address has
    /// already used its quota within the window; rejected attempts are not
    /// counted against the quota. Addresses whose hits have all aged out of
    /// the window are dropped from the map so it does not grow unbounded.
    pub fn check(&self, addr: IpAddr) -> Result<(), AppError> {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        hits.retain(|_, entry| {
            entry.retain(|hit| now.duration_since(*hit) < self.window);
            !entry.is_empty()
        });
        let entry = hits.entry(addr).or_default();
        if entry.len() >= self.quota {
            tracing::warn!("rate limit hit for {}", addr);
            return Err(AppError::RateLimited);
        }
        entry.push(now);
        Ok(())
    }
}
