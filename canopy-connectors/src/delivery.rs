//! Best-effort delivery of one reading set per cycle
//!
//! ## Contract
//!
//! - The caller (the reporting loop) has already observed the link this
//!   tick and passes its state down; a down link returns
//!   `Failure(NotConnected)` before any transport call.
//! - Exactly one primary POST per cycle. No internal retry loop: the
//!   reporting loop's next interval is the retry, with fresh samples.
//! - 2xx acknowledges the cycle; any transport failure maps onto the core
//!   taxonomy; any other status is `ServerRejected`.
//! - Auxiliary channels are attempted after the primary, each
//!   independently: an auxiliary failure never blocks the primary outcome,
//!   the other auxiliaries, or the loop. Their outcomes are logged, never
//!   aggregated.

use canopy_core::{Deliverer, DeliveryError, DeliveryOutcome, LinkState, ReadingSet};

use crate::payload::{IndexedPayload, NamedPayload};
use crate::thingspeak::{encode_update_url, ThingSpeakChannel, THINGSPEAK_UPDATE_URL};
use crate::transport::HttpTransport;

/// Which primary dialect goes on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// `ds18b20_1`-style named keys plus the `monitoring` class literal
    Named,
    /// Legacy `sensor1`..`sensor13` keys
    Indexed,
}

/// Delivery counters, one set per client
#[derive(Debug, Default, Clone, Copy)]
pub struct DeliveryStats {
    /// Primary payloads acknowledged
    pub sent: u64,
    /// Primary attempts that failed
    pub failed: u64,
    /// Auxiliary updates acknowledged
    pub aux_sent: u64,
    /// Auxiliary attempts that failed
    pub aux_failed: u64,
}

/// HTTP delivery client for one node
pub struct DeliveryClient<T> {
    transport: T,
    endpoint: String,
    format: PayloadFormat,
    device_class: String,
    auxiliaries: Vec<ThingSpeakChannel>,
    aux_base: String,
    stats: DeliveryStats,
}

impl<T: HttpTransport> DeliveryClient<T> {
    /// Client POSTing the indexed dialect to `endpoint`
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            format: PayloadFormat::Indexed,
            device_class: String::from("brise"),
            auxiliaries: Vec::new(),
            aux_base: String::from(THINGSPEAK_UPDATE_URL),
            stats: DeliveryStats::default(),
        }
    }

    /// Select the primary dialect
    pub fn format(mut self, format: PayloadFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the device-class literal for the named dialect
    pub fn device_class(mut self, device_class: impl Into<String>) -> Self {
        self.device_class = device_class.into();
        self
    }

    /// Add an auxiliary ThingSpeak channel
    pub fn auxiliary(mut self, channel: ThingSpeakChannel) -> Self {
        self.auxiliaries.push(channel);
        self
    }

    /// Override the auxiliary base URL (tests, private ingests)
    pub fn aux_base_url(mut self, base: impl Into<String>) -> Self {
        self.aux_base = base.into();
        self
    }

    /// Delivery counters
    pub fn stats(&self) -> &DeliveryStats {
        &self.stats
    }

    /// Borrow the transport (tests)
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send_primary(&mut self, set: &ReadingSet) -> DeliveryOutcome {
        let body = match self.format {
            PayloadFormat::Named => {
                serde_json::to_string(&NamedPayload::from_set(set, &self.device_class))
            }
            PayloadFormat::Indexed => serde_json::to_string(&IndexedPayload::from_set(set)),
        };
        let body = match body {
            Ok(body) => body,
            Err(err) => {
                // Flat float payloads cannot normally fail to serialize;
                // treat it as an unclassified local fault if they do.
                log::error!("payload serialization failed: {err}");
                return DeliveryOutcome::Failure(DeliveryError::Unknown(-1));
            }
        };

        match self
            .transport
            .post(&self.endpoint, &[("Content-Type", "application/json")], &body)
        {
            Ok(resp) if resp.is_success() => {
                if !resp.body.is_empty() {
                    log::debug!("server response: {}", resp.body.trim_end());
                }
                DeliveryOutcome::Success {
                    status: resp.status,
                }
            }
            Ok(resp) => {
                if !resp.body.is_empty() {
                    log::debug!("server error response: {}", resp.body.trim_end());
                }
                DeliveryOutcome::Failure(DeliveryError::ServerRejected(resp.status))
            }
            Err(err) => DeliveryOutcome::Failure(err.to_delivery_error()),
        }
    }

    fn send_auxiliaries(&mut self, set: &ReadingSet) {
        for index in 0..self.auxiliaries.len() {
            let url = encode_update_url(&self.aux_base, &self.auxiliaries[index], set);
            match self.transport.get(&url) {
                Ok(resp) if resp.is_success() => {
                    self.stats.aux_sent += 1;
                    log::info!("auxiliary channel {}: HTTP {}", index + 1, resp.status);
                }
                Ok(resp) => {
                    self.stats.aux_failed += 1;
                    log::warn!(
                        "auxiliary channel {}: rejected with HTTP {}",
                        index + 1,
                        resp.status
                    );
                }
                Err(err) => {
                    self.stats.aux_failed += 1;
                    log::warn!("auxiliary channel {}: {err}", index + 1);
                }
            }
        }
    }
}

impl<T: HttpTransport> Deliverer for DeliveryClient<T> {
    fn deliver(&mut self, link: LinkState, set: &ReadingSet) -> DeliveryOutcome {
        if link != LinkState::Connected {
            self.stats.failed += 1;
            return DeliveryOutcome::Failure(DeliveryError::NotConnected);
        }

        let outcome = self.send_primary(set);
        match outcome {
            DeliveryOutcome::Success { .. } => self.stats.sent += 1,
            DeliveryOutcome::Failure(_) => self.stats.failed += 1,
        }

        // Fan-out runs regardless of the primary outcome.
        self.send_auxiliaries(set);

        outcome
    }
}
