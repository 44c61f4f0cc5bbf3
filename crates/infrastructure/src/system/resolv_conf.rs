use ferrous_lookup_domain::ResolverAddress;
use tokio::fs;
use tracing::{debug, warn};

pub const DEFAULT_RESOLV_CONF: &str = "/etc/resolv.conf";

/// Resolvers configured for the host, read from a resolv.conf-format file.
#[derive(Debug, Clone)]
pub struct SystemResolvers {
    path: String,
}

impl SystemResolvers {
    pub fn from_resolv_conf(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Nameservers in file order. A missing or unreadable file yields none.
    pub async fn load(&self) -> Vec<ResolverAddress> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let resolvers = parse_resolv_conf(&content);
                debug!(path = %self.path, resolvers = resolvers.len(), "System resolvers loaded");
                resolvers
            }
            Err(e) => {
                debug!(path = %self.path, error = %e, "Failed to read resolv.conf");
                Vec::new()
            }
        }
    }
}

impl Default for SystemResolvers {
    fn default() -> Self {
        Self::from_resolv_conf(DEFAULT_RESOLV_CONF)
    }
}

// nameserver 192.168.1.1
// nameserver fe80::1%eth0   <- link-local with zone, not representable
pub fn parse_resolv_conf(content: &str) -> Vec<ResolverAddress> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.split(['#', ';']).next().unwrap_or("");
            let mut fields = line.split_whitespace();
            if fields.next() != Some("nameserver") {
                return None;
            }

            let addr = fields.next()?;
            if addr.contains('%') {
                debug!(nameserver = addr, "Skipping nameserver with zone index");
                return None;
            }

            match addr.parse::<ResolverAddress>() {
                Ok(resolver) => Some(resolver),
                Err(e) => {
                    warn!(error = %e, "Invalid nameserver in resolv.conf");
                    None
                }
            }
        })
        .collect()
}
