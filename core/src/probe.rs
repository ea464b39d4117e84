//! Single latency measurements.
//!
//! A probe sends one ICMP echo request to one target and reports the round trip
//! in milliseconds. Failures are ordinary values: the scanners drop the sample
//! and carry on, nothing is retried.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use surge_ping::{Client, Config, PingIdentifier, PingSequence, SurgeError};
use surveyor_common::network::target::Target;
use thiserror::Error;
use tokio::time::timeout;
use tracing::trace;

/// Echo payload, the classic 56 data bytes of `ping`.
const PAYLOAD: [u8; 56] = [0; 56];

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not resolve {host}: {reason}")]
    Resolution { host: String, reason: String },
    #[error("{0} is an IPv6 address, only IPv4 targets are probed")]
    Unsupported(IpAddr),
    #[error("failed to open an ICMP socket: {0}")]
    Socket(#[source] io::Error),
    #[error("no echo reply within {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("echo request failed: {0}")]
    Unreachable(String),
}

/// Anything able to measure the round trip to a target.
///
/// Each call is independent: implementations must not reuse earlier samples.
#[async_trait]
pub trait Prober: Send {
    /// Latency in milliseconds, or why there is none.
    async fn probe(&mut self, target: &Target) -> Result<f64, ProbeError>;
}

/// ICMP echo prober backed by `surge-ping`.
///
/// Every probe opens its own client, so a failed socket (typically missing
/// privileges) only fails that probe. The timeout bounds the whole probe,
/// name resolution included.
pub struct IcmpProber {
    timeout: Duration,
}

impl IcmpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn echo(&self, target: &Target) -> Result<f64, ProbeError> {
        let addr = resolve_ipv4(target.as_str()).await?;
        let client = Client::new(&Config::default()).map_err(ProbeError::Socket)?;

        let mut pinger = client
            .pinger(IpAddr::V4(addr), PingIdentifier(rand::random()))
            .await;
        pinger.timeout(self.timeout);

        match pinger.ping(PingSequence(0), &PAYLOAD).await {
            Ok((_, rtt)) => {
                let latency_ms = rtt.as_secs_f64() * 1000.0;
                trace!(host = %target, %addr, latency_ms, "Echo reply received");
                Ok(latency_ms)
            }
            Err(SurgeError::Timeout { .. }) => Err(ProbeError::Timeout(self.timeout)),
            Err(e) => Err(ProbeError::Unreachable(e.to_string())),
        }
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&mut self, target: &Target) -> Result<f64, ProbeError> {
        within(self.timeout, self.echo(target)).await
    }
}

/// Runs `probe` under a single deadline.
async fn within<F>(limit: Duration, probe: F) -> Result<f64, ProbeError>
where
    F: Future<Output = Result<f64, ProbeError>>,
{
    timeout(limit, probe)
        .await
        .unwrap_or(Err(ProbeError::Timeout(limit)))
}

/// Resolves `host` to its first IPv4 address.
async fn resolve_ipv4(host: &str) -> Result<Ipv4Addr, ProbeError> {
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => return Ok(v4),
        Ok(ip) => return Err(ProbeError::Unsupported(ip)),
        Err(_) => {}
    }

    let resolution_error = |reason: String| ProbeError::Resolution {
        host: host.to_string(),
        reason,
    };

    let addrs = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| resolution_error(e.to_string()))?;

    addrs
        .filter_map(|addr| match addr.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| resolution_error("no IPv4 address found".to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
