//! Field Node Example
//!
//! The full deployment shape: six soil probes on a one-wire bus, three
//! hygrometers, two UV inputs, two interrupt-fed anemometers, the named
//! JSON dialect on the primary endpoint, and two ThingSpeak channels
//! fanned out after every primary attempt.
//!
//! The drivers here are bench stubs standing in for the real bus
//! bindings; one soil probe is left "disconnected" and one hygrometer
//! returns NaN so the invalid-reading path is visible in the payloads. A
//! background thread plays the anemometer ISR, pulsing the shared
//! counters the way the real edge interrupt would.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_field_node
//! ```

use std::thread;
use std::time::Duration;

use canopy_connectors::{diag, DeliveryClient, PayloadFormat, ThingSpeakChannel, UreqTransport};
use canopy_core::acquire::{FieldRig, WindChannel};
use canopy_core::sensors::{
    AnalogInput, HygroSensor, SimulatedBattery, TemperatureBus, SOIL_PROBE_DISCONNECTED_C,
};
use canopy_core::time::SystemClock;
use canopy_core::{
    ChannelId, DeviceId, LinkState, NetworkLink, NodeConfig, PulseCounter, ReportingLoop,
};

static ANEMO_1: PulseCounter = PulseCounter::new();
static ANEMO_2: PulseCounter = PulseCounter::new();

struct HostLink;

impl NetworkLink for HostLink {
    fn status(&mut self) -> LinkState {
        LinkState::Connected
    }

    fn connect(&mut self, _ssid: &str, _password: &str) -> bool {
        true
    }

    fn hardware_address(&self) -> DeviceId {
        DeviceId::try_from("24:6F:28:AE:52:7C").unwrap_or_default()
    }
}

/// One-wire bus stub: probe 6 is unplugged
struct BenchOneWireBus;

impl TemperatureBus for BenchOneWireBus {
    fn request_temperatures(&mut self) {}

    fn temp_c(&mut self, index: usize) -> f32 {
        if index == 5 {
            SOIL_PROBE_DISCONNECTED_C
        } else {
            20.5 + index as f32 * 0.4
        }
    }
}

/// Hygrometer stub; the third unit is "wired but failing"
struct BenchHygro {
    humidity: f32,
    temperature: f32,
}

impl HygroSensor for BenchHygro {
    fn read_humidity(&mut self) -> f32 {
        self.humidity
    }

    fn read_temperature(&mut self) -> f32 {
        self.temperature
    }
}

/// Fixed mid-scale UV input
struct BenchAdc(u16);

impl AnalogInput for BenchAdc {
    fn read_raw(&mut self) -> u16 {
        self.0
    }
}

fn main() {
    const CONFIG: NodeConfig =
        NodeConfig::new("field-ap", "field-secret", "http://10.5.1.100:8000/api/receive/")
            .device_class("brise");

    println!("Canopy Field Node");
    println!("=================\n");

    let link = HostLink;
    let device_id = CONFIG.resolve_device_id(&link);
    println!("Device id:  {}", device_id.as_str());
    println!("Endpoint:   {}", CONFIG.primary_endpoint);
    println!("Interval:   {} s\n", CONFIG.interval_ms / 1000);

    let mut transport = UreqTransport::new();
    match diag::probe_endpoint(&mut transport, CONFIG.primary_endpoint) {
        Some(status) => println!("Endpoint probe: HTTP {status}"),
        None => println!("Endpoint probe failed; the loop will retry every cycle"),
    }

    // Stand-in for the anemometer edge interrupts: ~12 pulses/minute on
    // channel 1, ~6 on channel 2.
    thread::spawn(|| loop {
        ANEMO_1.on_edge();
        thread::sleep(Duration::from_millis(5_000));
        ANEMO_2.on_edge();
        thread::sleep(Duration::from_millis(5_000));
    });

    let rig = FieldRig::new(
        device_id,
        BenchOneWireBus,
        [
            BenchHygro {
                humidity: 58.0,
                temperature: 19.2,
            },
            BenchHygro {
                humidity: 61.5,
                temperature: 18.9,
            },
            BenchHygro {
                humidity: f32::NAN,
                temperature: f32::NAN,
            },
        ],
        [BenchAdc(1860), BenchAdc(1240)],
        [
            WindChannel::new(ChannelId::Wind1, &ANEMO_1),
            WindChannel::new(ChannelId::Wind2, &ANEMO_2),
        ],
        SimulatedBattery::new(),
    );

    let client = DeliveryClient::new(transport, CONFIG.primary_endpoint)
        .format(PayloadFormat::Named)
        .device_class(CONFIG.device_class)
        .auxiliary(ThingSpeakChannel::air_panel("REPLACE_WITH_CHANNEL1_KEY"))
        .auxiliary(ThingSpeakChannel::spillover_panel("REPLACE_WITH_CHANNEL2_KEY"));

    let mut node = ReportingLoop::new(CONFIG, SystemClock::new(), link, rig, client);
    println!("\nReporting every {} s; Ctrl-C to stop.", CONFIG.interval_ms / 1000);
    node.run();
}
