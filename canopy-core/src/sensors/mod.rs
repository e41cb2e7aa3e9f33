//! Driver collaborator seams
//!
//! The core never talks to a sensor bus directly: each driver family is a
//! small trait whose contract mirrors the vendor driver it stands in for,
//! including the sentinel each driver uses to signal a failed read. The
//! acquisition layer translates those sentinels into invalid readings; bus
//! wire protocols stay entirely behind the seam.

pub mod sim;

pub use sim::{SimulatedBattery, SimulatedRig};

/// Sentinel a one-wire temperature bus returns for a missing probe
pub const SOIL_PROBE_DISCONNECTED_C: f32 = -127.0;

/// ADC full-scale count (12-bit conversion)
pub const ADC_FULL_SCALE: f32 = 4095.0;

/// ADC reference voltage
pub const ADC_REF_VOLTS: f32 = 3.3;

/// One-wire temperature bus carrying several probes
///
/// `request_temperatures` starts a conversion on every probe;
/// `temp_c` then reads probe `index`, returning
/// [`SOIL_PROBE_DISCONNECTED_C`] when the probe is absent or unreadable.
pub trait TemperatureBus {
    /// Kick off a conversion on all probes
    fn request_temperatures(&mut self);

    /// Read probe `index` in Celsius; sentinel on failure
    fn temp_c(&mut self, index: usize) -> f32;
}

/// Combined humidity/temperature sensor
///
/// Both reads return NaN on failure, matching the common DHT-class driver
/// contract.
pub trait HygroSensor {
    /// Relative humidity in percent, NaN on failure
    fn read_humidity(&mut self) -> f32;

    /// Air temperature in Celsius, NaN on failure
    fn read_temperature(&mut self) -> f32;
}

/// Raw analog input channel
pub trait AnalogInput {
    /// Latest conversion result, `0..=4095`
    fn read_raw(&mut self) -> u16;
}

/// Convert a raw ADC count to volts
pub fn uv_volts(raw: u16) -> f32 {
    raw as f32 * (ADC_REF_VOLTS / ADC_FULL_SCALE)
}

/// Battery charge estimation
///
/// Battery sourcing is deliberately a collaborator: field hardware may read
/// a fuel gauge, a voltage divider, or nothing at all. The core only asks
/// for a percentage once per cycle.
pub trait BatterySource {
    /// Estimated charge in percent
    fn level_pct(&mut self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adc_conversion_spans_reference() {
        assert_eq!(uv_volts(0), 0.0);
        assert!((uv_volts(4095) - 3.3).abs() < 1e-6);
        // Mid-scale lands at half the reference.
        assert!((uv_volts(2048) - 1.65).abs() < 0.01);
    }
}
