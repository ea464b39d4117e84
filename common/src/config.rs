use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Upper bound for a single echo round trip.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Well-known public resolver used to learn which local address the OS routes through.
pub const DEFAULT_DISCOVERY_ENDPOINT: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How long a probe waits for its echo reply before the sample is dropped.
    pub probe_timeout: Duration,
    /// Endpoint the discovery socket is connected to.
    ///
    /// No datagram is ever sent to it.
    pub discovery_endpoint: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            discovery_endpoint: DEFAULT_DISCOVERY_ENDPOINT,
        }
    }
}
