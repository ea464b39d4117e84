//! Discovery of the local outbound address.
//!
//! Connecting a UDP socket never puts a datagram on the wire, but it makes the
//! kernel pick a route and bind the socket to the source address of that route.
//! Reading the socket's local endpoint back gives the address other hosts see us as.

use std::io;
use std::net::{IpAddr, SocketAddr, UdpSocket};

use pnet::datalink::{self, NetworkInterface};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LocalAddressError {
    #[error("failed to open a datagram socket: {0}")]
    Bind(#[source] io::Error),
    #[error("no route towards {endpoint}: {source}")]
    Route {
        endpoint: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to read the local endpoint: {0}")]
    LocalEndpoint(#[source] io::Error),
    #[error("the operating system assigned an unspecified local address")]
    Unspecified,
}

/// The address this host routes through, plus the interface carrying it when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAddress {
    pub ip: IpAddr,
    pub interface: Option<String>,
}

/// Finds the local address used to reach `endpoint`.
pub fn discover(endpoint: SocketAddr) -> Result<LocalAddress, LocalAddressError> {
    let ip = resolve_route_source_ip(endpoint)?;
    let interfaces = datalink::interfaces();
    let interface = owning_interface(&interfaces, ip).map(|intf| intf.name.clone());

    debug!(%ip, interface = interface.as_deref().unwrap_or("unknown"), "Local address resolved");
    Ok(LocalAddress { ip, interface })
}

fn resolve_route_source_ip(endpoint: SocketAddr) -> Result<IpAddr, LocalAddressError> {
    let bind_addr = if endpoint.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
    let socket = UdpSocket::bind(bind_addr).map_err(LocalAddressError::Bind)?;

    socket
        .connect(endpoint)
        .map_err(|source| LocalAddressError::Route { endpoint, source })?;

    let ip = socket
        .local_addr()
        .map_err(LocalAddressError::LocalEndpoint)?
        .ip();

    if ip.is_unspecified() {
        return Err(LocalAddressError::Unspecified);
    }
    Ok(ip)
}

fn owning_interface(interfaces: &[NetworkInterface], ip: IpAddr) -> Option<&NetworkInterface> {
    interfaces
        .iter()
        .filter(|intf| intf.is_up() && !intf.is_loopback())
        .find(|intf| intf.ips.iter().any(|net| net.ip() == ip))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
