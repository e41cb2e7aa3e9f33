//! ThingSpeak auxiliary telemetry
//!
//! ThingSpeak ingests via GET with query-encoded fields, at most eight per
//! channel. Which reading lands in which field is explicit data (a
//! [`FieldMap`]), so a channel's mapping can be audited at a glance and
//! never drifts with array index arithmetic.
//!
//! Values are formatted to two decimals; unmapped slots and non-finite
//! values encode as `0.00`.

use std::fmt::Write as _;

use canopy_core::{ChannelId, ReadingSet};

/// ThingSpeak's update endpoint
pub const THINGSPEAK_UPDATE_URL: &str = "http://api.thingspeak.com/update";

/// Fields per ThingSpeak channel
pub const MAX_FIELDS: usize = 8;

/// Which reading feeds `field1..field8`; `None` slots encode as `0.00`
pub type FieldMap = [Option<ChannelId>; MAX_FIELDS];

/// One auxiliary ingestion channel
#[derive(Debug, Clone)]
pub struct ThingSpeakChannel {
    /// Write API key for the channel
    pub api_key: String,
    /// Field assignments
    pub fields: FieldMap,
}

impl ThingSpeakChannel {
    /// Channel with an explicit field map
    pub fn new(api_key: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            api_key: api_key.into(),
            fields,
        }
    }

    /// The reference deployment's air panel: humidity 1–2, UV, wind
    pub fn air_panel(api_key: impl Into<String>) -> Self {
        Self::new(
            api_key,
            [
                Some(ChannelId::AirHum1),
                Some(ChannelId::AirHum2),
                Some(ChannelId::Uv1),
                Some(ChannelId::Uv2),
                Some(ChannelId::Wind1),
                Some(ChannelId::Wind2),
                None,
                None,
            ],
        )
    }

    /// The reference deployment's spillover panel: humidity 3 plus the
    /// UV and wind channels again
    pub fn spillover_panel(api_key: impl Into<String>) -> Self {
        Self::new(
            api_key,
            [
                Some(ChannelId::AirHum3),
                Some(ChannelId::Uv1),
                Some(ChannelId::Uv2),
                Some(ChannelId::Wind1),
                Some(ChannelId::Wind2),
                None,
                None,
                None,
            ],
        )
    }
}

/// Build the update URL for one channel and one cycle's readings
pub fn encode_update_url(base: &str, channel: &ThingSpeakChannel, set: &ReadingSet) -> String {
    let mut url = format!("{}?api_key={}", base, channel.api_key);

    for (slot, assignment) in channel.fields.iter().enumerate() {
        let value = assignment.map(|ch| set.value_of(ch)).unwrap_or(0.0);
        let value = if value.is_finite() { value } else { 0.0 };
        // Writing to a String cannot fail.
        let _ = write!(url, "&field{}={:.2}", slot + 1, value);
    }

    url
}
