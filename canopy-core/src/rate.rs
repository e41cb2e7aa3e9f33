//! Windowed rate calculation for pulse channels
//!
//! Converts two timestamped counter snapshots into an instantaneous rate in
//! events per second. One sampler per physical pulse channel; samplers
//! share no state.

use crate::time::Timestamp;

/// Reference sample retained between updates
#[derive(Debug, Clone, Copy)]
struct Reference {
    at_ms: Timestamp,
    count: u64,
}

/// Converts successive counter snapshots into events-per-second rates
///
/// The first call establishes the reference and reports 0.0; every later
/// call reports the rate over the window since the previous call and then
/// replaces the reference, so each window is measured exactly once.
#[derive(Debug, Clone, Default)]
pub struct RateSampler {
    reference: Option<Reference>,
}

impl RateSampler {
    /// Create a sampler with no reference sample
    pub const fn new() -> Self {
        Self { reference: None }
    }

    /// Fold in a new snapshot and return the rate over the elapsed window
    ///
    /// Returns 0.0 on the first call, and 0.0 whenever the clock has not
    /// advanced past the reference (first sample, duplicate tick, or a
    /// stalled/backwards clock); the division is never attempted in those
    /// cases. The reference always moves to `(now_ms, count)` regardless,
    /// so a stall costs one window, not a poisoned sampler.
    pub fn update(&mut self, now_ms: Timestamp, count: u64) -> f32 {
        let rate = match self.reference {
            None => 0.0,
            Some(prev) if now_ms <= prev.at_ms => 0.0,
            Some(prev) => {
                let pulses = count.saturating_sub(prev.count);
                let elapsed_ms = now_ms - prev.at_ms;
                pulses as f32 * 1000.0 / elapsed_ms as f32
            }
        };

        self.reference = Some(Reference { at_ms: now_ms, count });
        rate
    }
}
