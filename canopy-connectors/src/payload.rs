//! Primary wire formats
//!
//! Two flat JSON dialects, both one level deep with numeric sensor values
//! plus `device_id` and `battery` metadata. Field names are spelled out as
//! struct fields so the wire schema is the type: there is no runtime key
//! construction to drift.
//!
//! Invalid channels were already normalized to 0.0 when the reading set
//! was built; the encoders transmit the placeholder rather than dropping
//! the key, so the server always sees the full schema.

use canopy_core::{ChannelId, ReadingSet};
use serde::Serialize;

/// Named dialect used by the field deployment
///
/// Sensor keys carry the driver family (`ds18b20_1`, `dht11_1_hum`, ...),
/// `monitoring` identifies the device class, and battery is rounded to an
/// integer percent.
#[derive(Debug, Serialize)]
pub struct NamedPayload<'a> {
    monitoring: &'a str,
    ds18b20_1: f32,
    ds18b20_2: f32,
    ds18b20_3: f32,
    ds18b20_4: f32,
    ds18b20_5: f32,
    ds18b20_6: f32,
    dht11_1_temp: f32,
    dht11_1_hum: f32,
    dht11_2_temp: f32,
    dht11_2_hum: f32,
    uv_1: f32,
    uv_2: f32,
    wind_1: f32,
    wind_2: f32,
    device_id: &'a str,
    battery: i32,
}

impl<'a> NamedPayload<'a> {
    /// Encode one cycle's readings under the given device class
    pub fn from_set(set: &'a ReadingSet, device_class: &'a str) -> Self {
        Self {
            monitoring: device_class,
            ds18b20_1: set.value_of(ChannelId::SoilTemp1),
            ds18b20_2: set.value_of(ChannelId::SoilTemp2),
            ds18b20_3: set.value_of(ChannelId::SoilTemp3),
            ds18b20_4: set.value_of(ChannelId::SoilTemp4),
            ds18b20_5: set.value_of(ChannelId::SoilTemp5),
            ds18b20_6: set.value_of(ChannelId::SoilTemp6),
            dht11_1_temp: set.value_of(ChannelId::AirTemp1),
            dht11_1_hum: set.value_of(ChannelId::AirHum1),
            dht11_2_temp: set.value_of(ChannelId::AirTemp2),
            dht11_2_hum: set.value_of(ChannelId::AirHum2),
            uv_1: set.value_of(ChannelId::Uv1),
            uv_2: set.value_of(ChannelId::Uv2),
            wind_1: set.value_of(ChannelId::Wind1),
            wind_2: set.value_of(ChannelId::Wind2),
            device_id: set.device_id(),
            battery: set.battery_pct().round() as i32,
        }
    }
}

/// Legacy indexed dialect (`sensor1`..`sensor13`)
#[derive(Debug, Serialize)]
pub struct IndexedPayload<'a> {
    sensor1: f32,
    sensor2: f32,
    sensor3: f32,
    sensor4: f32,
    sensor5: f32,
    sensor6: f32,
    sensor7: f32,
    sensor8: f32,
    sensor9: f32,
    sensor10: f32,
    sensor11: f32,
    sensor12: f32,
    sensor13: f32,
    device_id: &'a str,
    battery: f32,
}

impl<'a> IndexedPayload<'a> {
    /// Encode one cycle's readings into the thirteen legacy slots
    pub fn from_set(set: &'a ReadingSet) -> Self {
        Self {
            sensor1: set.value_of(ChannelId::SoilTemp1),
            sensor2: set.value_of(ChannelId::SoilTemp2),
            sensor3: set.value_of(ChannelId::SoilTemp3),
            sensor4: set.value_of(ChannelId::SoilTemp4),
            sensor5: set.value_of(ChannelId::SoilTemp5),
            sensor6: set.value_of(ChannelId::SoilTemp6),
            sensor7: set.value_of(ChannelId::AirHum1),
            sensor8: set.value_of(ChannelId::AirHum2),
            sensor9: set.value_of(ChannelId::AirHum3),
            sensor10: set.value_of(ChannelId::Uv1),
            sensor11: set.value_of(ChannelId::Uv2),
            sensor12: set.value_of(ChannelId::Wind1),
            sensor13: set.value_of(ChannelId::Wind2),
            device_id: set.device_id(),
            battery: set.battery_pct(),
        }
    }
}
