//! HTTP delivery connectors for Canopy telemetry nodes
//!
//! ## Overview
//!
//! This crate carries a reading set from the core engine onto the wire:
//!
//! - **Primary delivery**: one JSON POST per cycle to the ingestion
//!   endpoint, in either the named dialect (`ds18b20_1`, `wind_2`, ...)
//!   or the legacy indexed dialect (`sensor1`..`sensor13`).
//! - **Auxiliary fan-out**: optional ThingSpeak updates, GET with
//!   query-encoded `field1..field8`, each channel attempted and judged
//!   independently of the primary and of each other.
//!
//! The actual HTTP client hides behind [`HttpTransport`], so delivery
//! logic is testable with a scripted transport; [`UreqTransport`] is the
//! real implementation.
//!
//! ## Delivery contract
//!
//! `DeliveryClient` performs exactly one request attempt per cycle and
//! never retries internally: the reporting loop re-samples and re-sends on
//! its own cadence, which is the retry policy. Outcomes are classified
//! into the core taxonomy, never raised.

pub mod delivery;
pub mod diag;
pub mod payload;
pub mod thingspeak;
pub mod transport;

pub use delivery::{DeliveryClient, DeliveryStats, PayloadFormat};
pub use thingspeak::{FieldMap, ThingSpeakChannel, THINGSPEAK_UPDATE_URL};
pub use transport::{HttpResponse, HttpTransport, TransportError, UreqTransport};
