//! Synchronous HTTP transport seam
//!
//! The delivery layer only needs two verbs, both blocking with a bounded
//! timeout. Keeping them behind a trait keeps `ureq` out of the delivery
//! logic and lets tests script every transport behavior, including the
//! failure modes `ureq` cannot produce on demand.

use std::time::Duration;

use canopy_core::DeliveryError;
use thiserror::Error;

/// A completed HTTP exchange
///
/// Non-success statuses are still *responses*: classification into
/// accept/reject happens in the delivery layer, not here.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response body, empty when unreadable
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx success class
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-layer failure: no response was obtained at all
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, reset, or dropped mid-exchange
    #[error("connection lost")]
    ConnectionLost,

    /// Request headers could not be written
    #[error("failed to send request headers")]
    HeaderSend,

    /// Request body could not be written
    #[error("failed to send request payload")]
    PayloadSend,

    /// No response within the transport's timeout
    #[error("timed out waiting for response")]
    Timeout,

    /// Anything the transport could not classify
    #[error("transport failure: {0}")]
    Other(String),
}

impl TransportError {
    /// Map onto the core delivery taxonomy
    pub fn to_delivery_error(&self) -> DeliveryError {
        match self {
            TransportError::ConnectionLost => DeliveryError::ConnectionLost,
            TransportError::HeaderSend => DeliveryError::HeaderSendFailed,
            TransportError::PayloadSend => DeliveryError::PayloadSendFailed,
            TransportError::Timeout => DeliveryError::ReadTimeout,
            // The reference firmware reports unclassified transport
            // failures as code -1.
            TransportError::Other(_) => DeliveryError::Unknown(-1),
        }
    }
}

/// Blocking HTTP collaborator
pub trait HttpTransport {
    /// POST `body` with the given headers; exactly one attempt
    fn post(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError>;

    /// GET `url`; exactly one attempt
    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// Real transport backed by a `ureq` agent
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Agent with the default 10-second timeout
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    /// Agent with an explicit overall timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(&format!("canopy/{}", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn read_response(resp: ureq::Response) -> HttpResponse {
    let status = resp.status();
    HttpResponse {
        status,
        body: resp.into_string().unwrap_or_default(),
    }
}

fn classify(err: ureq::Transport) -> TransportError {
    match err.kind() {
        ureq::ErrorKind::Dns | ureq::ErrorKind::ConnectionFailed => TransportError::ConnectionLost,
        ureq::ErrorKind::Io => {
            let message = err.to_string();
            if message.contains("timed out") || message.contains("timeout") {
                TransportError::Timeout
            } else {
                TransportError::Other(message)
            }
        }
        _ => TransportError::Other(err.to_string()),
    }
}

impl HttpTransport for UreqTransport {
    fn post(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.post(url);
        for &(name, value) in headers {
            request = request.set(name, value);
        }

        match request.send_string(body) {
            Ok(resp) => Ok(read_response(resp)),
            Err(ureq::Error::Status(status, resp)) => Ok(HttpResponse {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(classify(t)),
        }
    }

    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError> {
        match self.agent.get(url).call() {
            Ok(resp) => Ok(read_response(resp)),
            Err(ureq::Error::Status(status, resp)) => Ok(HttpResponse {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(classify(t)),
        }
    }
}
