//! Integration tests for the delivery client
//!
//! A scripted transport records every request so the tests can verify the
//! one-attempt contract, the disconnected precondition, and the
//! independence of auxiliary fan-out from the primary outcome.

use std::cell::RefCell;
use std::rc::Rc;

use canopy_connectors::{
    DeliveryClient, HttpResponse, HttpTransport, PayloadFormat, ThingSpeakChannel, TransportError,
};
use canopy_core::{
    ChannelId, Deliverer, DeliveryError, DeliveryOutcome, DeviceId, LinkState, ReadingSet,
    SensorReading,
};

#[derive(Debug, Clone, PartialEq)]
enum Request {
    Post { url: String, body: String },
    Get { url: String },
}

#[derive(Clone)]
struct ScriptedTransport {
    requests: Rc<RefCell<Vec<Request>>>,
    post_result: Rc<RefCell<Result<u16, &'static str>>>,
    get_status: u16,
}

impl ScriptedTransport {
    fn new(post_status: u16) -> Self {
        Self {
            requests: Rc::new(RefCell::new(Vec::new())),
            post_result: Rc::new(RefCell::new(Ok(post_status))),
            get_status: 200,
        }
    }

    fn failing(kind: &'static str) -> Self {
        let t = Self::new(200);
        *t.post_result.borrow_mut() = Err(kind);
        t
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    fn post(
        &mut self,
        url: &str,
        _headers: &[(&str, &str)],
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(Request::Post {
            url: url.into(),
            body: body.into(),
        });
        match *self.post_result.borrow() {
            Ok(status) => Ok(HttpResponse {
                status,
                body: String::from("ok"),
            }),
            Err("timeout") => Err(TransportError::Timeout),
            Err("lost") => Err(TransportError::ConnectionLost),
            Err(other) => Err(TransportError::Other(other.into())),
        }
    }

    fn get(&mut self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(Request::Get { url: url.into() });
        Ok(HttpResponse {
            status: self.get_status,
            body: String::new(),
        })
    }
}

fn reading_set() -> ReadingSet {
    let mut set = ReadingSet::new(DeviceId::try_from("24:6F:28:AE:52:7C").unwrap(), 82.0);
    for channel in ChannelId::FIELD_CHANNELS {
        set.push(SensorReading::checked(channel, 2.25));
    }
    set
}

#[test]
fn disconnected_precondition_makes_zero_network_calls() {
    let transport = ScriptedTransport::new(200);
    let probe = transport.clone();
    let mut client = DeliveryClient::new(transport, "http://host/api/receive/")
        .auxiliary(ThingSpeakChannel::air_panel("KEY"));

    let outcome = client.deliver(LinkState::Disconnected, &reading_set());

    assert_eq!(
        outcome,
        DeliveryOutcome::Failure(DeliveryError::NotConnected)
    );
    assert!(probe.requests().is_empty());
}

#[test]
fn success_is_one_post_no_retry() {
    let transport = ScriptedTransport::new(200);
    let probe = transport.clone();
    let mut client = DeliveryClient::new(transport, "http://host/api/receive/");

    let outcome = client.deliver(LinkState::Connected, &reading_set());

    assert_eq!(outcome, DeliveryOutcome::Success { status: 200 });
    let requests = probe.requests();
    assert_eq!(requests.len(), 1);
    assert!(
        matches!(&requests[0], Request::Post { url, .. } if url.as_str() == "http://host/api/receive/")
    );
}

#[test]
fn non_2xx_classifies_as_server_rejected() {
    let transport = ScriptedTransport::new(500);
    let probe = transport.clone();
    let mut client = DeliveryClient::new(transport, "http://host/api/receive/");

    let outcome = client.deliver(LinkState::Connected, &reading_set());

    assert_eq!(
        outcome,
        DeliveryOutcome::Failure(DeliveryError::ServerRejected(500))
    );
    // Still exactly one attempt: rejection does not trigger a retry.
    assert_eq!(probe.requests().len(), 1);
}

#[test]
fn transport_failures_map_onto_taxonomy() {
    let transport = ScriptedTransport::failing("timeout");
    let mut client = DeliveryClient::new(transport, "http://host/api/receive/");
    assert_eq!(
        client.deliver(LinkState::Connected, &reading_set()),
        DeliveryOutcome::Failure(DeliveryError::ReadTimeout)
    );

    let transport = ScriptedTransport::failing("lost");
    let mut client = DeliveryClient::new(transport, "http://host/api/receive/");
    assert_eq!(
        client.deliver(LinkState::Connected, &reading_set()),
        DeliveryOutcome::Failure(DeliveryError::ConnectionLost)
    );
}

#[test]
fn rejected_primary_does_not_block_auxiliaries() {
    let transport = ScriptedTransport::new(500);
    let probe = transport.clone();
    let mut client = DeliveryClient::new(transport, "http://host/api/receive/")
        .format(PayloadFormat::Named)
        .aux_base_url("http://aux/update")
        .auxiliary(ThingSpeakChannel::air_panel("KEY_A"))
        .auxiliary(ThingSpeakChannel::spillover_panel("KEY_B"));

    let outcome = client.deliver(LinkState::Connected, &reading_set());
    assert_eq!(
        outcome,
        DeliveryOutcome::Failure(DeliveryError::ServerRejected(500))
    );

    // Both auxiliaries were still attempted, each with its own key.
    let requests = probe.requests();
    assert_eq!(requests.len(), 3);
    assert!(
        matches!(&requests[1], Request::Get { url } if url.starts_with("http://aux/update?api_key=KEY_A"))
    );
    assert!(
        matches!(&requests[2], Request::Get { url } if url.starts_with("http://aux/update?api_key=KEY_B"))
    );
    assert_eq!(client.stats().aux_sent, 2);
    assert_eq!(client.stats().failed, 1);
}

#[test]
fn named_payload_rides_the_wire() {
    let transport = ScriptedTransport::new(200);
    let probe = transport.clone();
    let mut client = DeliveryClient::new(transport, "http://host/api/receive/")
        .format(PayloadFormat::Named)
        .device_class("brise");

    client.deliver(LinkState::Connected, &reading_set());

    let requests = probe.requests();
    let Request::Post { body, .. } = &requests[0] else {
        panic!("expected a POST");
    };
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["monitoring"], "brise");
    assert_eq!(json["ds18b20_1"], 2.25);
    assert_eq!(json["wind_2"], 2.25);
    assert_eq!(json["device_id"], "24:6F:28:AE:52:7C");
    assert_eq!(json["battery"], 82);
}
