use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

/// Standard DNS port (RFC 1035 §4.2).
pub const DNS_PORT: u16 = 53;

/// A validated IPv4 or IPv6 address of a resolver to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverAddress(IpAddr);

impl ResolverAddress {
    pub fn new(ip: IpAddr) -> Self {
        Self(ip)
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }

    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.0, port)
    }

    /// Parses caller-supplied entries in order, skipping anything that is not an IP address.
    pub fn parse_list<S: AsRef<str>>(entries: &[S]) -> Vec<ResolverAddress> {
        entries
            .iter()
            .filter_map(|entry| entry.as_ref().parse().ok())
            .collect()
    }
}

impl FromStr for ResolverAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<IpAddr>()
            .map(ResolverAddress)
            .map_err(|_| format!("Invalid resolver address: {}", s))
    }
}

impl From<IpAddr> for ResolverAddress {
    fn from(ip: IpAddr) -> Self {
        Self(ip)
    }
}

impl fmt::Display for ResolverAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
