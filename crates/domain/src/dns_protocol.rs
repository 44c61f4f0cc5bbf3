use std::fmt;
use std::net::SocketAddr;

/// Channel used for one attempt against a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsProtocol {
    Udp { addr: SocketAddr },
    Tcp { addr: SocketAddr },
}

impl DnsProtocol {
    pub fn socket_addr(&self) -> SocketAddr {
        match self {
            DnsProtocol::Udp { addr } | DnsProtocol::Tcp { addr } => *addr,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            DnsProtocol::Udp { .. } => "UDP",
            DnsProtocol::Tcp { .. } => "TCP",
        }
    }

    /// Same resolver over TCP, used after a truncated UDP answer.
    pub fn to_tcp(&self) -> Self {
        DnsProtocol::Tcp {
            addr: self.socket_addr(),
        }
    }
}

impl fmt::Display for DnsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsProtocol::Udp { addr } => write!(f, "udp://{}", addr),
            DnsProtocol::Tcp { addr } => write!(f, "tcp://{}", addr),
        }
    }
}
