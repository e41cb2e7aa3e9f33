//! Interrupt-driven pulse accumulation
//!
//! Anemometer-style sensors signal one edge per revolution fraction; the
//! edge handler runs in interrupt context and must finish in bounded time.
//! `PulseCounter` gives that handler exactly one atomic increment and gives
//! the sampling loop an untorn snapshot, which is the only synchronization
//! point between interrupt and loop context in the whole system.
//!
//! The counter is monotonic and never reset; rate calculations work on
//! deltas between snapshots (see [`crate::rate::RateSampler`]). Wraparound
//! of the 64-bit count is out of scope at realistic pulse rates.
//!
//! On targets without native 64-bit atomics the load/increment pair below
//! must be replaced by a masked critical section covering only the read;
//! that port lives with the platform layer, not here.

use core::sync::atomic::{AtomicU64, Ordering};

/// Monotonic pulse-edge counter shared between an ISR and the main loop
///
/// `const fn new()` allows `static` placement so interrupt handlers can
/// reach the counter without allocation or runtime registration:
///
/// ```
/// use canopy_core::PulseCounter;
///
/// static ANEMO_1: PulseCounter = PulseCounter::new();
///
/// // ISR context:
/// ANEMO_1.on_edge();
///
/// // Loop context:
/// let count = ANEMO_1.snapshot();
/// assert_eq!(count, 1);
/// ```
#[derive(Debug)]
pub struct PulseCounter {
    count: AtomicU64,
}

impl PulseCounter {
    /// Create a counter at zero
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Record one pulse edge
    ///
    /// Safe to call from interrupt context: a single atomic add, no
    /// blocking, no allocation.
    #[inline]
    pub fn on_edge(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current count without tearing
    ///
    /// Callable from normal context only; pairs with `on_edge` so a
    /// snapshot concurrent with N edges observes a value in
    /// `[before, before + N]`.
    pub fn snapshot(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_edges() {
        let counter = PulseCounter::new();
        assert_eq!(counter.snapshot(), 0);

        counter.on_edge();
        counter.on_edge();
        counter.on_edge();
        assert_eq!(counter.snapshot(), 3);
    }

    #[test]
    fn static_placement() {
        static COUNTER: PulseCounter = PulseCounter::new();
        COUNTER.on_edge();
        assert!(COUNTER.snapshot() >= 1);
    }

    #[cfg(feature = "std")]
    #[test]
    fn snapshot_bounded_under_concurrent_edges() {
        const EDGES: u64 = 10_000;

        let counter = PulseCounter::new();
        let before = counter.snapshot();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..EDGES {
                    counter.on_edge();
                }
            });

            // Sample while the "ISR" thread hammers the counter; every
            // observation must stay within [before, before + EDGES].
            for _ in 0..1000 {
                let seen = counter.snapshot();
                assert!(seen >= before);
                assert!(seen <= before + EDGES);
            }
        });

        assert_eq!(counter.snapshot(), before + EDGES);
    }
}
