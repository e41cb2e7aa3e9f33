//! Simulated Node Example
//!
//! The bench-top variant: every sensor is simulated, and each cycle POSTs
//! the legacy indexed payload (`sensor1`..`sensor13`) to a local ingestion
//! endpoint every 30 seconds.
//!
//! ## What You'll Learn
//!
//! - Wiring a `ReportingLoop` from config, clock, link, rig, and deliverer
//! - Probing the endpoint before the loop starts
//! - How delivery failures surface without stopping the loop
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_node
//! ```
//!
//! Point a receiver at 127.0.0.1:8000 (or just watch the probe fail and
//! the loop keep trying; failures are the expected steady state on a
//! bench with no server).

use canopy_connectors::{diag, DeliveryClient, UreqTransport};
use canopy_core::sensors::SimulatedRig;
use canopy_core::time::SystemClock;
use canopy_core::{DeviceId, LinkState, NetworkLink, NodeConfig, ReportingLoop};

/// Link stand-in: on a hosted target the OS owns association, so the
/// link is simply always up and identity comes from a fixed address.
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

fn main() {
    const CONFIG: NodeConfig =
        NodeConfig::new("bench", "", "http://127.0.0.1:8000/api/receive/").interval_ms(30_000);

    println!("Canopy Simulated Node");
    println!("=====================\n");

    let link = HostLink;
    let device_id = CONFIG.resolve_device_id(&link);
    println!("Device id:  {}", device_id.as_str());
    println!("Endpoint:   {}", CONFIG.primary_endpoint);
    println!("Interval:   {} s\n", CONFIG.interval_ms / 1000);

    // Boot-time reachability check; advisory only.
    let mut transport = UreqTransport::new();
    match diag::probe_endpoint(&mut transport, CONFIG.primary_endpoint) {
        Some(status) => println!("Endpoint probe: HTTP {status}"),
        None => println!("Endpoint probe failed; the loop will retry every cycle"),
    }

    let rig = SimulatedRig::new(device_id);
    let client = DeliveryClient::new(transport, CONFIG.primary_endpoint);

    let mut node = ReportingLoop::new(CONFIG, SystemClock::new(), link, rig, client);
    println!("\nReporting every {} s; Ctrl-C to stop.", CONFIG.interval_ms / 1000);
    node.run();
}
