//! Per-cycle sensor acquisition
//!
//! ## Overview
//!
//! Acquisition turns the configured channels into one [`ReadingSet`] per
//! cycle. The contract is strict: the call is infallible, every configured
//! channel appears in the result exactly once, and a failed read degrades
//! to an invalid placeholder for that channel only; a dead probe never
//! costs the cycle.
//!
//! Wind channels are the one asynchronous input: an interrupt handler
//! accumulates edges into a [`PulseCounter`] while the loop runs, and
//! acquisition converts the counter delta into a rate. The counter read is
//! a single atomic snapshot per channel: the critical section is exactly
//! one load, nothing more.

use crate::pulse::PulseCounter;
use crate::rate::RateSampler;
use crate::reading::{ChannelId, DeviceId, ReadingSet, SensorReading};
use crate::sensors::{
    uv_volts, AnalogInput, BatterySource, HygroSensor, TemperatureBus, SOIL_PROBE_DISCONNECTED_C,
};
use crate::time::Timestamp;

/// A complete set of sensors read once per reporting cycle
pub trait SensorRig {
    /// One-time hardware bring-up; default is a no-op
    fn begin(&mut self) {}

    /// Read every configured channel
    ///
    /// Always returns a fully populated set; per-channel failures are
    /// recorded as invalid readings, never raised.
    fn acquire(&mut self, now_ms: Timestamp) -> ReadingSet;
}

/// One anemometer input: a shared pulse counter plus its rate window
///
/// The counter lives in a `static` so the platform's edge ISR can reach
/// it; the sampler state is private to the rig.
#[derive(Debug)]
pub struct WindChannel {
    channel: ChannelId,
    counter: &'static PulseCounter,
    sampler: RateSampler,
}

impl WindChannel {
    /// Bind a wind channel to its interrupt-fed counter
    pub const fn new(channel: ChannelId, counter: &'static PulseCounter) -> Self {
        Self {
            channel,
            counter,
            sampler: RateSampler::new(),
        }
    }

    /// Snapshot the counter and fold it into the rate window
    pub fn sample(&mut self, now_ms: Timestamp) -> SensorReading {
        let count = self.counter.snapshot();
        SensorReading::checked(self.channel, self.sampler.update(now_ms, count))
    }
}

/// Number of soil probes on the one-wire bus
pub const SOIL_PROBES: usize = 6;
/// Number of combined hygrometers
pub const HYGRO_SENSORS: usize = 3;
/// Number of UV analog inputs
pub const UV_INPUTS: usize = 2;
/// Number of anemometer channels
pub const WIND_CHANNELS: usize = 2;

/// The full field deployment: six soil probes, three hygrometers, two UV
/// photodiodes, two anemometers, one battery source
///
/// Generic over the driver seams so tests and bench rigs can substitute
/// scripted drivers for the real buses.
pub struct FieldRig<B, H, A, P> {
    device_id: DeviceId,
    soil_bus: B,
    hygros: [H; HYGRO_SENSORS],
    uv_inputs: [A; UV_INPUTS],
    wind: [WindChannel; WIND_CHANNELS],
    battery: P,
}

impl<B, H, A, P> FieldRig<B, H, A, P>
where
    B: TemperatureBus,
    H: HygroSensor,
    A: AnalogInput,
    P: BatterySource,
{
    /// Assemble a rig from its driver collaborators
    pub fn new(
        device_id: DeviceId,
        soil_bus: B,
        hygros: [H; HYGRO_SENSORS],
        uv_inputs: [A; UV_INPUTS],
        wind: [WindChannel; WIND_CHANNELS],
        battery: P,
    ) -> Self {
        Self {
            device_id,
            soil_bus,
            hygros,
            uv_inputs,
            wind,
            battery,
        }
    }
}

const SOIL_CHANNELS: [ChannelId; SOIL_PROBES] = [
    ChannelId::SoilTemp1,
    ChannelId::SoilTemp2,
    ChannelId::SoilTemp3,
    ChannelId::SoilTemp4,
    ChannelId::SoilTemp5,
    ChannelId::SoilTemp6,
];

const HUM_CHANNELS: [ChannelId; HYGRO_SENSORS] =
    [ChannelId::AirHum1, ChannelId::AirHum2, ChannelId::AirHum3];

// Only the first two hygrometers expose a temperature key on the wire.
const AIR_TEMP_CHANNELS: [ChannelId; 2] = [ChannelId::AirTemp1, ChannelId::AirTemp2];

const UV_CHANNELS: [ChannelId; UV_INPUTS] = [ChannelId::Uv1, ChannelId::Uv2];

impl<B, H, A, P> SensorRig for FieldRig<B, H, A, P>
where
    B: TemperatureBus,
    H: HygroSensor,
    A: AnalogInput,
    P: BatterySource,
{
    fn acquire(&mut self, now_ms: Timestamp) -> ReadingSet {
        let mut set = ReadingSet::new(self.device_id.clone(), self.battery.level_pct());

        // Soil probes share one conversion request.
        self.soil_bus.request_temperatures();
        for (index, channel) in SOIL_CHANNELS.into_iter().enumerate() {
            let celsius = self.soil_bus.temp_c(index);
            if celsius == SOIL_PROBE_DISCONNECTED_C {
                set.push(SensorReading::invalid(channel));
            } else {
                set.push(SensorReading::checked(channel, celsius));
            }
        }

        for (hygro, channel) in self.hygros.iter_mut().zip(HUM_CHANNELS) {
            set.push(SensorReading::checked(channel, hygro.read_humidity()));
        }
        for (hygro, channel) in self.hygros.iter_mut().zip(AIR_TEMP_CHANNELS) {
            set.push(SensorReading::checked(channel, hygro.read_temperature()));
        }

        for (input, channel) in self.uv_inputs.iter_mut().zip(UV_CHANNELS) {
            set.push(SensorReading::checked(channel, uv_volts(input.read_raw())));
        }

        for wind in &mut self.wind {
            let reading = wind.sample(now_ms);
            set.push(reading);
        }

        set
    }
}
