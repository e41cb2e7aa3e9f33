//! Node configuration
//!
//! One immutable structure handed to the loop at construction. Parameters
//! are compile-time constants on a deployed node, so everything is
//! `&'static str` and the whole config is `Copy`. No globals, no runtime
//! mutation.

use crate::link::NetworkLink;
use crate::reading::DeviceId;

/// Where the reported device identity comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceIdSource {
    /// Use the link collaborator's hardware address
    LinkLayer,
    /// Use a fixed identity string
    Fixed(&'static str),
}

/// Immutable node parameters
#[derive(Debug, Clone, Copy)]
pub struct NodeConfig {
    /// Network name for association
    pub ssid: &'static str,
    /// Network credential
    pub password: &'static str,
    /// Primary ingestion endpoint (JSON POST)
    pub primary_endpoint: &'static str,
    /// Cooldown between reporting cycles in milliseconds
    pub interval_ms: u64,
    /// Scheduler tick period in milliseconds
    pub tick_ms: u64,
    /// Device-class literal included in the named payload
    pub device_class: &'static str,
    /// Device identity source
    pub device_id_source: DeviceIdSource,
}

impl NodeConfig {
    /// Config with the reference deployment's defaults: 30 s interval,
    /// 1 s tick, link-layer identity
    pub const fn new(
        ssid: &'static str,
        password: &'static str,
        primary_endpoint: &'static str,
    ) -> Self {
        Self {
            ssid,
            password,
            primary_endpoint,
            interval_ms: 30_000,
            tick_ms: 1_000,
            device_class: "brise",
            device_id_source: DeviceIdSource::LinkLayer,
        }
    }

    /// Set the reporting interval
    pub const fn interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the scheduler tick period
    pub const fn tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Set the device-class literal
    pub const fn device_class(mut self, device_class: &'static str) -> Self {
        self.device_class = device_class;
        self
    }

    /// Report under a fixed identity instead of the hardware address
    pub const fn fixed_device_id(mut self, id: &'static str) -> Self {
        self.device_id_source = DeviceIdSource::Fixed(id);
        self
    }

    /// Resolve the device identity against the link collaborator
    pub fn resolve_device_id(&self, link: &impl NetworkLink) -> DeviceId {
        match self.device_id_source {
            DeviceIdSource::LinkLayer => link.hardware_address(),
            DeviceIdSource::Fixed(id) => DeviceId::try_from(id).unwrap_or_default(),
        }
    }
}
