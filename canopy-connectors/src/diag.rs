//! Startup diagnostics
//!
//! Field nodes run headless; the only bring-up feedback is the log. The
//! banner and the endpoint probe both exist to make a misconfigured
//! deployment obvious in the first minute instead of the first missed
//! upload. Both are strictly non-fatal.

use canopy_core::NodeConfig;

use crate::transport::HttpTransport;

/// Log the node's identity and reporting parameters
pub fn startup_banner(config: &NodeConfig, device_id: &str) {
    log::info!("device id: {device_id}");
    log::info!("primary endpoint: {}", config.primary_endpoint);
    log::info!(
        "reporting interval: {} s (tick {} ms)",
        config.interval_ms / 1000,
        config.tick_ms
    );
}

/// Probe the primary endpoint once and log what came back
///
/// Returns the status code if any response arrived. A failed probe is
/// advisory only; the loop starts regardless.
pub fn probe_endpoint<T: HttpTransport>(transport: &mut T, url: &str) -> Option<u16> {
    match transport.get(url) {
        Ok(resp) => {
            log::info!("endpoint probe: HTTP {} from {}", resp.status, url);
            Some(resp.status)
        }
        Err(err) => {
            log::warn!("endpoint probe failed for {url}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, TransportError};

    struct OneShot(Result<u16, ()>);

    impl HttpTransport for OneShot {
        fn post(
            &mut self,
            _url: &str,
            _headers: &[(&str, &str)],
            _body: &str,
        ) -> Result<HttpResponse, TransportError> {
            unreachable!("probe never posts")
        }

        fn get(&mut self, _url: &str) -> Result<HttpResponse, TransportError> {
            match self.0 {
                Ok(status) => Ok(HttpResponse {
                    status,
                    body: String::new(),
                }),
                Err(()) => Err(TransportError::ConnectionLost),
            }
        }
    }

    #[test]
    fn probe_reports_status_or_none() {
        assert_eq!(
            probe_endpoint(&mut OneShot(Ok(405)), "http://host/api/receive/"),
            Some(405)
        );
        assert_eq!(
            probe_endpoint(&mut OneShot(Err(())), "http://host/api/receive/"),
            None
        );
    }
}
