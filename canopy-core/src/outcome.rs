//! Delivery outcome classification
//!
//! ## Design
//!
//! Every delivery attempt resolves to exactly one [`DeliveryOutcome`], and
//! every failure carries a classified reason. The enum is small and `Copy`:
//! outcomes travel through the loop's hot path and may be stored in
//! diagnostics, so no heap data rides along. The response body is logged
//! at the connector boundary rather than carried here.
//!
//! Nothing in this taxonomy is fatal by design. The loop logs the reason
//! and moves on; a failed upload is re-attempted on the next cycle with
//! freshly sampled values.

use thiserror_no_std::Error;

use crate::link::LinkState;
use crate::reading::ReadingSet;

/// Classified reason a delivery attempt failed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// Transport reported the connection dropped mid-exchange
    #[error("connection lost")]
    ConnectionLost,

    /// Request headers could not be written
    #[error("failed to send request headers")]
    HeaderSendFailed,

    /// Request body could not be written
    #[error("failed to send request payload")]
    PayloadSendFailed,

    /// No link at send time; nothing was attempted
    #[error("link down, delivery not attempted")]
    NotConnected,

    /// Server accepted the connection but never answered in time
    #[error("timed out waiting for response")]
    ReadTimeout,

    /// Server answered with a non-success status
    #[error("server rejected request with status {0}")]
    ServerRejected(u16),

    /// Unclassified transport failure
    #[error("transport failure, code {0}")]
    Unknown(i32),
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeliveryError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ConnectionLost => defmt::write!(fmt, "connection lost"),
            Self::HeaderSendFailed => defmt::write!(fmt, "header send failed"),
            Self::PayloadSendFailed => defmt::write!(fmt, "payload send failed"),
            Self::NotConnected => defmt::write!(fmt, "link down"),
            Self::ReadTimeout => defmt::write!(fmt, "read timeout"),
            Self::ServerRejected(code) => defmt::write!(fmt, "server rejected ({})", code),
            Self::Unknown(code) => defmt::write!(fmt, "transport failure ({})", code),
        }
    }
}

/// Result of one delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Server acknowledged with a success status
    Success {
        /// HTTP status code of the acknowledgement
        status: u16,
    },
    /// Attempt failed for a classified reason
    Failure(DeliveryError),
}

impl DeliveryOutcome {
    /// Whether the payload was acknowledged
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Success { .. })
    }

    /// The failure reason, if any
    pub fn failure(&self) -> Option<DeliveryError> {
        match self {
            DeliveryOutcome::Failure(err) => Some(*err),
            DeliveryOutcome::Success { .. } => None,
        }
    }
}

impl core::fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DeliveryOutcome::Success { status } => write!(f, "delivered (HTTP {status})"),
            DeliveryOutcome::Failure(err) => write!(f, "delivery failed: {err}"),
        }
    }
}

/// Consumes one reading set per cycle and reports what happened
///
/// The loop has already observed the link this tick and passes its state
/// down; a deliverer must return [`DeliveryError::NotConnected`] without
/// touching the network when the link is down.
pub trait Deliverer {
    /// Attempt delivery of one cycle's readings
    fn deliver(&mut self, link: LinkState, set: &ReadingSet) -> DeliveryOutcome;
}
