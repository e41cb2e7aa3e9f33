//! Network association collaborator
//!
//! Association mechanics (scan, auth, DHCP, retry pacing) belong to the
//! platform's network stack; the core only asks two questions each tick:
//! are we up, and if not, try to come up.

use crate::reading::DeviceId;

/// Link-layer connectivity state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Associated and able to carry traffic
    Connected,
    /// No usable link
    Disconnected,
}

/// The network association collaborator
pub trait NetworkLink {
    /// Current link state; polled every loop tick
    fn status(&mut self) -> LinkState;

    /// Attempt association with the given credentials
    ///
    /// Blocking, with a bounded number of attempts inside the collaborator
    /// (the reference stack probes twenty times at 500 ms). Returns
    /// whether the link came up.
    fn connect(&mut self, ssid: &str, password: &str) -> bool;

    /// Link-layer hardware address, used as the default device identity
    fn hardware_address(&self) -> DeviceId;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakyLink {
        up_after: u32,
        attempts: u32,
    }

    impl NetworkLink for FlakyLink {
        fn status(&mut self) -> LinkState {
            if self.attempts >= self.up_after {
                LinkState::Connected
            } else {
                LinkState::Disconnected
            }
        }

        fn connect(&mut self, _ssid: &str, _password: &str) -> bool {
            self.attempts += 1;
            self.attempts >= self.up_after
        }

        fn hardware_address(&self) -> DeviceId {
            DeviceId::try_from("02:00:00:00:00:01").unwrap_or_default()
        }
    }

    #[test]
    fn link_comes_up_after_retries() {
        let mut link = FlakyLink {
            up_after: 3,
            attempts: 0,
        };

        assert_eq!(link.status(), LinkState::Disconnected);
        assert!(!link.connect("ssid", "pw"));
        assert!(!link.connect("ssid", "pw"));
        assert!(link.connect("ssid", "pw"));
        assert_eq!(link.status(), LinkState::Connected);
    }
}
