//! Core sampling and reporting engine for Canopy telemetry nodes
//!
//! Implements the sense-and-report cycle for field-deployed environmental
//! monitors: interrupt-counted wind pulses, periodic acquisition of soil
//! temperature / air humidity / UV channels, and best-effort delivery of
//! each reading set through a pluggable connector.
//!
//! Key constraints:
//! - No heap allocation on the acquisition path
//! - Interrupt handlers touch a single atomic per pulse
//! - Delivery failures never halt the loop; a missed upload is retried
//!   naturally on the next cycle
//!
//! ```
//! use canopy_core::{PulseCounter, RateSampler};
//!
//! static ANEMOMETER: PulseCounter = PulseCounter::new();
//!
//! // The pulse ISR calls on_edge(); the sampling loop reads a snapshot.
//! ANEMOMETER.on_edge();
//!
//! let mut sampler = RateSampler::new();
//! assert_eq!(sampler.update(0, ANEMOMETER.snapshot()), 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod acquire;
pub mod config;
pub mod link;
pub mod outcome;
pub mod pulse;
pub mod rate;
pub mod reading;
pub mod report;
pub mod sensors;
pub mod time;

// Public API
pub use config::{DeviceIdSource, NodeConfig};
pub use link::{LinkState, NetworkLink};
pub use outcome::{Deliverer, DeliveryError, DeliveryOutcome};
pub use pulse::PulseCounter;
pub use rate::RateSampler;
pub use reading::{ChannelId, DeviceId, ReadingSet, SensorKind, SensorReading};
pub use report::{LoopPhase, ReportingLoop, TickOutcome};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
