//! The reporting loop
//!
//! ## Overview
//!
//! A single cooperative loop drives the whole node: every tick it checks
//! the link, and once per interval it runs one full reporting cycle:
//! acquire every channel, then deliver the set. The two phases never
//! interleave across cycles; acquisition always completes before delivery
//! starts.
//!
//! ## Failure policy
//!
//! There is no fatal path. A down link skips the tick after a reconnect
//! attempt; a failed delivery is logged with its classified reason and the
//! cycle's readings are simply dropped; the next interval re-samples
//! everything, so the natural retry costs nothing. No backoff is applied:
//! at a 30-second-or-longer cadence a fixed retry interval cannot congest
//! anything, and the simplicity buys predictable unattended operation.

use crate::acquire::SensorRig;
use crate::config::NodeConfig;
use crate::link::{LinkState, NetworkLink};
use crate::outcome::{Deliverer, DeliveryError, DeliveryOutcome};
use crate::time::{Clock, Timestamp};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Where the loop currently is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Waiting out the interval cooldown
    Idle,
    /// Reading sensors
    Sampling,
    /// Pushing the reading set out
    Delivering,
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Link was down; a reconnect was attempted and the tick skipped
    LinkDown,
    /// Cooldown not elapsed; nothing to do
    Idle,
    /// A full acquire-and-deliver cycle ran
    Completed(DeliveryOutcome),
}

/// Counters for unattended-operation diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct LoopStats {
    /// Completed reporting cycles
    pub cycles: u32,
    /// Cycles whose delivery was acknowledged
    pub delivered: u32,
    /// Cycles whose delivery failed
    pub failed: u32,
    /// Ticks skipped because the link was down
    pub link_drops: u32,
}

/// Periodic sense-and-report orchestrator
///
/// Owns its collaborators; generic so tests can substitute scripted
/// clocks, links, rigs, and deliverers.
pub struct ReportingLoop<C, L, R, D> {
    config: NodeConfig,
    clock: C,
    link: L,
    rig: R,
    deliverer: D,
    last_send: Timestamp,
    phase: LoopPhase,
    stats: LoopStats,
}

impl<C, L, R, D> ReportingLoop<C, L, R, D>
where
    C: Clock,
    L: NetworkLink,
    R: SensorRig,
    D: Deliverer,
{
    /// Assemble the loop; the first cycle runs once the interval has
    /// elapsed from construction time
    pub fn new(config: NodeConfig, clock: C, link: L, rig: R, deliverer: D) -> Self {
        Self {
            config,
            clock,
            link,
            rig,
            deliverer,
            last_send: 0,
            phase: LoopPhase::Idle,
            stats: LoopStats::default(),
        }
    }

    /// Current phase (always `Idle` between ticks)
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Diagnostic counters
    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// Run one scheduler tick
    ///
    /// The connectivity guard runs every tick, independent of the interval
    /// cooldown; a down link consumes the tick with a reconnect attempt.
    pub fn tick(&mut self) -> TickOutcome {
        if self.link.status() == LinkState::Disconnected {
            self.stats.link_drops += 1;
            log_warn!("link down, attempting reconnect");
            if self.link.connect(self.config.ssid, self.config.password) {
                log_info!("link restored");
            } else {
                log_warn!("reconnect failed, retrying next tick");
            }
            return TickOutcome::LinkDown;
        }

        let now = self.clock.now_ms();
        if now.saturating_sub(self.last_send) <= self.config.interval_ms {
            return TickOutcome::Idle;
        }

        self.phase = LoopPhase::Sampling;
        let set = self.rig.acquire(now);

        self.phase = LoopPhase::Delivering;
        let outcome = self.deliverer.deliver(LinkState::Connected, &set);

        self.stats.cycles += 1;
        match outcome {
            DeliveryOutcome::Success { status } => {
                self.stats.delivered += 1;
                log_info!("cycle {}: delivered (HTTP {})", self.stats.cycles, status);
            }
            DeliveryOutcome::Failure(err) => {
                self.stats.failed += 1;
                log_warn!("cycle {}: delivery failed: {}", self.stats.cycles, err);
                if err == DeliveryError::NotConnected {
                    // The transport saw the link drop under us; try to
                    // bring it back before the next cycle is due.
                    self.link.connect(self.config.ssid, self.config.password);
                }
            }
        }

        // Stamp after the attempt, success or not: retry happens at the
        // natural next interval with freshly sampled values.
        self.last_send = self.clock.now_ms();
        self.phase = LoopPhase::Idle;

        TickOutcome::Completed(outcome)
    }

    /// Drive ticks forever, sleeping one tick period between them
    ///
    /// The sleep is the loop's only suspension point; there is no
    /// cancellation path by design.
    #[cfg(feature = "std")]
    pub fn run(&mut self) -> ! {
        self.rig.begin();
        loop {
            self.tick();
            std::thread::sleep(std::time::Duration::from_millis(self.config.tick_ms));
        }
    }
}
