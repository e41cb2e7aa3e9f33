//! Channel model and per-cycle reading sets
//!
//! ## Overview
//!
//! Every reporting cycle produces exactly one [`ReadingSet`]: one
//! [`SensorReading`] per configured channel plus device identity and a
//! battery percentage. A channel that fails to read is *kept* in the set
//! with `valid = false` and its value normalized to 0.0: downstream
//! encoders transmit the placeholder, diagnostics keep the flag. Partial
//! sets do not exist.
//!
//! Channel identities are a closed enum rather than strings: the wire keys
//! for both supported payload dialects are `const` data on [`ChannelId`],
//! so an encoder can never invent or misspell a key at runtime.

use heapless::Vec;

/// Maximum channels a reading set can carry
pub const MAX_CHANNELS: usize = 16;

/// Link-layer hardware address, e.g. `"24:6F:28:AE:52:7C"`
pub type DeviceId = heapless::String<23>;

/// Broad sensor families, used for units and simulation envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Buried one-wire temperature probe
    SoilTemperature,
    /// Combined hygrometer, humidity output
    AirHumidity,
    /// Combined hygrometer, temperature output
    AirTemperature,
    /// UV photodiode read as an analog voltage
    Ultraviolet,
    /// Pulse-counting anemometer
    Wind,
}

impl SensorKind {
    /// Human-readable family name
    pub const fn name(&self) -> &'static str {
        match self {
            SensorKind::SoilTemperature => "soil temperature",
            SensorKind::AirHumidity => "air humidity",
            SensorKind::AirTemperature => "air temperature",
            SensorKind::Ultraviolet => "uv",
            SensorKind::Wind => "wind",
        }
    }

    /// Unit of measurement on the wire
    pub const fn unit(&self) -> &'static str {
        match self {
            SensorKind::SoilTemperature => "°C",
            SensorKind::AirHumidity => "%",
            SensorKind::AirTemperature => "°C",
            SensorKind::Ultraviolet => "V",
            SensorKind::Wind => "pulses/s",
        }
    }
}

/// One physical sensor input
///
/// The full field deployment carries fifteen channels; the legacy indexed
/// payload predates the hygrometer temperature outputs and carries
/// thirteen (see [`ChannelId::indexed_key`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ChannelId {
    SoilTemp1,
    SoilTemp2,
    SoilTemp3,
    SoilTemp4,
    SoilTemp5,
    SoilTemp6,
    AirHum1,
    AirHum2,
    AirHum3,
    AirTemp1,
    AirTemp2,
    Uv1,
    Uv2,
    Wind1,
    Wind2,
}

impl ChannelId {
    /// Every channel of the field deployment, in acquisition order
    pub const FIELD_CHANNELS: [ChannelId; 15] = [
        ChannelId::SoilTemp1,
        ChannelId::SoilTemp2,
        ChannelId::SoilTemp3,
        ChannelId::SoilTemp4,
        ChannelId::SoilTemp5,
        ChannelId::SoilTemp6,
        ChannelId::AirHum1,
        ChannelId::AirHum2,
        ChannelId::AirHum3,
        ChannelId::AirTemp1,
        ChannelId::AirTemp2,
        ChannelId::Uv1,
        ChannelId::Uv2,
        ChannelId::Wind1,
        ChannelId::Wind2,
    ];

    /// The thirteen channels of the legacy indexed payload, in slot order
    pub const LEGACY_CHANNELS: [ChannelId; 13] = [
        ChannelId::SoilTemp1,
        ChannelId::SoilTemp2,
        ChannelId::SoilTemp3,
        ChannelId::SoilTemp4,
        ChannelId::SoilTemp5,
        ChannelId::SoilTemp6,
        ChannelId::AirHum1,
        ChannelId::AirHum2,
        ChannelId::AirHum3,
        ChannelId::Uv1,
        ChannelId::Uv2,
        ChannelId::Wind1,
        ChannelId::Wind2,
    ];

    /// Sensor family this channel belongs to
    pub const fn kind(&self) -> SensorKind {
        match self {
            ChannelId::SoilTemp1
            | ChannelId::SoilTemp2
            | ChannelId::SoilTemp3
            | ChannelId::SoilTemp4
            | ChannelId::SoilTemp5
            | ChannelId::SoilTemp6 => SensorKind::SoilTemperature,
            ChannelId::AirHum1 | ChannelId::AirHum2 | ChannelId::AirHum3 => SensorKind::AirHumidity,
            ChannelId::AirTemp1 | ChannelId::AirTemp2 => SensorKind::AirTemperature,
            ChannelId::Uv1 | ChannelId::Uv2 => SensorKind::Ultraviolet,
            ChannelId::Wind1 | ChannelId::Wind2 => SensorKind::Wind,
        }
    }

    /// Key in the named JSON dialect (`ds18b20_1`, `dht11_1_hum`, ...)
    pub const fn named_key(&self) -> &'static str {
        match self {
            ChannelId::SoilTemp1 => "ds18b20_1",
            ChannelId::SoilTemp2 => "ds18b20_2",
            ChannelId::SoilTemp3 => "ds18b20_3",
            ChannelId::SoilTemp4 => "ds18b20_4",
            ChannelId::SoilTemp5 => "ds18b20_5",
            ChannelId::SoilTemp6 => "ds18b20_6",
            ChannelId::AirHum1 => "dht11_1_hum",
            ChannelId::AirHum2 => "dht11_2_hum",
            ChannelId::AirHum3 => "dht11_3_hum",
            ChannelId::AirTemp1 => "dht11_1_temp",
            ChannelId::AirTemp2 => "dht11_2_temp",
            ChannelId::Uv1 => "uv_1",
            ChannelId::Uv2 => "uv_2",
            ChannelId::Wind1 => "wind_1",
            ChannelId::Wind2 => "wind_2",
        }
    }

    /// Key in the legacy indexed dialect (`sensor1`..`sensor13`)
    ///
    /// The hygrometer temperature outputs have no legacy slot and return
    /// `None`.
    pub const fn indexed_key(&self) -> Option<&'static str> {
        match self {
            ChannelId::SoilTemp1 => Some("sensor1"),
            ChannelId::SoilTemp2 => Some("sensor2"),
            ChannelId::SoilTemp3 => Some("sensor3"),
            ChannelId::SoilTemp4 => Some("sensor4"),
            ChannelId::SoilTemp5 => Some("sensor5"),
            ChannelId::SoilTemp6 => Some("sensor6"),
            ChannelId::AirHum1 => Some("sensor7"),
            ChannelId::AirHum2 => Some("sensor8"),
            ChannelId::AirHum3 => Some("sensor9"),
            ChannelId::AirTemp1 | ChannelId::AirTemp2 => None,
            ChannelId::Uv1 => Some("sensor10"),
            ChannelId::Uv2 => Some("sensor11"),
            ChannelId::Wind1 => Some("sensor12"),
            ChannelId::Wind2 => Some("sensor13"),
        }
    }
}

/// One channel's reading for one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Channel that produced the value
    pub channel: ChannelId,
    /// Measured value, 0.0 when invalid
    pub value: f32,
    /// Whether the acquisition succeeded
    pub valid: bool,
}

impl SensorReading {
    /// Build a reading, normalizing non-finite values to an invalid 0.0
    pub fn checked(channel: ChannelId, value: f32) -> Self {
        if value.is_finite() {
            Self {
                channel,
                value,
                valid: true,
            }
        } else {
            Self::invalid(channel)
        }
    }

    /// Placeholder reading for a failed acquisition
    pub const fn invalid(channel: ChannelId) -> Self {
        Self {
            channel,
            value: 0.0,
            valid: false,
        }
    }
}

/// One cycle's readings plus device identity and battery state
///
/// Created fresh each cycle, handed to the deliverer immutably, then
/// discarded. Fixed cardinality: one entry per configured channel.
#[derive(Debug, Clone)]
pub struct ReadingSet {
    readings: Vec<SensorReading, MAX_CHANNELS>,
    device_id: DeviceId,
    battery_pct: f32,
}

impl ReadingSet {
    /// Start an empty set for one cycle
    ///
    /// Battery percentage is clamped to `[0, 100]`; a non-finite battery
    /// figure degrades to 0.0 rather than poisoning the payload.
    pub fn new(device_id: DeviceId, battery_pct: f32) -> Self {
        let battery_pct = if battery_pct.is_finite() {
            battery_pct.clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            readings: Vec::new(),
            device_id,
            battery_pct,
        }
    }

    /// Append a channel reading; returns false if the set is full
    pub fn push(&mut self, reading: SensorReading) -> bool {
        self.readings.push(reading).is_ok()
    }

    /// Look up one channel's reading
    pub fn get(&self, channel: ChannelId) -> Option<&SensorReading> {
        self.readings.iter().find(|r| r.channel == channel)
    }

    /// Transmitted value for a channel: 0.0 when absent or invalid
    pub fn value_of(&self, channel: ChannelId) -> f32 {
        match self.get(channel) {
            Some(reading) if reading.valid => reading.value,
            _ => 0.0,
        }
    }

    /// Iterate readings in acquisition order
    pub fn iter(&self) -> core::slice::Iter<'_, SensorReading> {
        self.readings.iter()
    }

    /// Number of channels in the set
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the set holds no readings yet
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Device identity included with the payload
    pub fn device_id(&self) -> &str {
        self.device_id.as_str()
    }

    /// Battery charge in percent, clamped to `[0, 100]`
    pub fn battery_pct(&self) -> f32 {
        self.battery_pct
    }
}
