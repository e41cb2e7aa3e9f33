//! Simulated sensors for bench-top nodes and tests
//!
//! Mirrors the bring-up firmware that ships before real probes are wired:
//! every channel produces a plausible value inside its family's envelope,
//! derived deterministically from the sample timestamp so test runs are
//! repeatable.

use crate::acquire::SensorRig;
use crate::reading::{ChannelId, DeviceId, ReadingSet, SensorKind, SensorReading};
use crate::sensors::BatterySource;
use crate::time::Timestamp;

/// Deterministic battery stand-in
///
/// Discharges from 100% to 30% in half-percent steps, then recharges,
/// covering the whole envelope the real pack is expected to report.
#[derive(Debug, Clone)]
pub struct SimulatedBattery {
    level: f32,
    step: f32,
}

impl SimulatedBattery {
    /// Start fully charged, discharging
    pub const fn new() -> Self {
        Self {
            level: 100.0,
            step: -0.5,
        }
    }
}

impl Default for SimulatedBattery {
    fn default() -> Self {
        Self::new()
    }
}

impl BatterySource for SimulatedBattery {
    fn level_pct(&mut self) -> f32 {
        let current = self.level;
        self.level += self.step;
        if self.level <= 30.0 || self.level >= 100.0 {
            self.step = -self.step;
            self.level = self.level.clamp(30.0, 100.0);
        }
        current
    }
}

/// Simulated thirteen-channel rig (legacy channel table)
///
/// Values ripple slowly inside each family's band:
/// soil 20–23.5 °C, humidity 50–64 %, UV 1.0–2.1 V, wind 0.5–1.7 pulses/s.
#[derive(Debug, Clone)]
pub struct SimulatedRig {
    device_id: DeviceId,
    battery: SimulatedBattery,
}

impl SimulatedRig {
    /// Create a rig reporting under the given device identity
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            battery: SimulatedBattery::new(),
        }
    }

    fn synth(channel: ChannelId, ordinal: f32, now_ms: Timestamp) -> f32 {
        // One slow period every ~100 s, phase-shifted per channel so the
        // channels never move in lockstep.
        let t = now_ms as f32 / 1000.0;
        let ripple = 0.5 * (1.0 + libm::sinf(t * 0.063 + ordinal));

        match channel.kind() {
            SensorKind::SoilTemperature => 20.0 + ordinal * 0.5 + ripple,
            SensorKind::AirHumidity => 50.0 + ordinal * 2.0 + 10.0 * ripple,
            SensorKind::AirTemperature => 18.0 + ordinal * 0.5 + 2.0 * ripple,
            SensorKind::Ultraviolet => 1.0 + ordinal * 0.3 + 0.5 * ripple,
            SensorKind::Wind => 0.5 + ordinal * 0.2 + 0.8 * ripple,
        }
    }
}

impl SensorRig for SimulatedRig {
    fn acquire(&mut self, now_ms: Timestamp) -> ReadingSet {
        let mut set = ReadingSet::new(self.device_id.clone(), self.battery.level_pct());

        let mut prev_kind: Option<SensorKind> = None;
        let mut ordinal = 0.0f32;
        for channel in ChannelId::LEGACY_CHANNELS {
            // Ordinal restarts per family so each band stays in range.
            if prev_kind != Some(channel.kind()) {
                prev_kind = Some(channel.kind());
                ordinal = 0.0;
            }
            set.push(SensorReading::checked(
                channel,
                Self::synth(channel, ordinal, now_ms),
            ));
            ordinal += 1.0;
        }

        set
    }
}
