use crate::resolver_address::DNS_PORT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Overall deadline for one query, in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Where the system resolvers are read from.
    #[serde(default = "default_resolv_conf")]
    pub resolv_conf: String,

    /// Used only when neither the caller nor the system provides a resolver.
    #[serde(default)]
    pub fallback_resolvers: Vec<String>,
}

impl LookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            port: default_port(),
            resolv_conf: default_resolv_conf(),
            fallback_resolvers: Vec::new(),
        }
    }
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_port() -> u16 {
    DNS_PORT
}

fn default_resolv_conf() -> String {
    "/etc/resolv.conf".to_string()
}
