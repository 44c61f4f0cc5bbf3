//! Sequential resolver exchange: UDP first, one TCP retry on truncation,
//! failover to the next resolver within an overall deadline.

use super::transport::{SocketTransportFactory, TransportFactory};
use super::wire::{MessageHeader, ResponseParser};
use bytes::Bytes;
use ferrous_lookup_domain::{DnsProtocol, LookupError};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Response bytes together with where and how they were obtained.
#[derive(Debug, Clone)]
pub struct ExchangeResult {
    pub bytes: Bytes,
    pub server: SocketAddr,
    pub protocol_used: &'static str,
    pub latency_ms: u64,
}

#[derive(Clone)]
pub struct UpstreamExchange {
    factory: Arc<dyn TransportFactory>,
}

impl UpstreamExchange {
    pub fn new() -> Self {
        Self::with_factory(Arc::new(SocketTransportFactory))
    }

    pub fn with_factory(factory: Arc<dyn TransportFactory>) -> Self {
        Self { factory }
    }

    /// Sends `message_bytes` to each server in order until one answers it.
    ///
    /// A reply only counts when it is a response to this exact query (see
    /// [`ResponseParser::check_reply`]); anything else moves on to the next
    /// server. Replies with an error rcode are returned as-is.
    ///
    /// `timeout` bounds the whole call. Each server gets an even share of what
    /// is left; a TCP retry after truncation gets everything that is left.
    pub async fn send(
        &self,
        message_bytes: &[u8],
        servers: &[SocketAddr],
        timeout: Duration,
    ) -> Result<ExchangeResult, LookupError> {
        if servers.is_empty() {
            return Err(LookupError::ResolverUnreachable(
                "no resolvers to query".to_string(),
            ));
        }

        let start = Instant::now();
        let deadline = start + timeout;
        let mut last_error = None;

        debug!(servers = servers.len(), timeout_ms = timeout.as_millis() as u64, "Trying sequentially");

        for (index, server) in servers.iter().enumerate() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                last_error = Some(LookupError::Timeout);
                break;
            }
            let budget = remaining / (servers.len() - index) as u32;

            match self.attempt(message_bytes, *server, budget, deadline).await {
                Ok((bytes, protocol_used)) => {
                    let latency_ms = start.elapsed().as_millis() as u64;
                    debug!(
                        server = %server,
                        protocol = protocol_used,
                        latency_ms = latency_ms,
                        position = index,
                        "Server responded"
                    );
                    return Ok(ExchangeResult {
                        bytes,
                        server: *server,
                        protocol_used,
                        latency_ms,
                    });
                }
                Err(e) => {
                    warn!(server = %server, error = %e, position = index, "Failing over");
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(LookupError::Timeout) => LookupError::Timeout,
            Some(e @ LookupError::MalformedResponse(_)) => e,
            Some(e) => LookupError::ResolverUnreachable(format!(
                "all {} resolvers failed, last error: {}",
                servers.len(),
                e
            )),
            None => LookupError::ResolverUnreachable("no resolvers to query".to_string()),
        })
    }

    async fn attempt(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        budget: Duration,
        deadline: Instant,
    ) -> Result<(Bytes, &'static str), LookupError> {
        let udp = DnsProtocol::Udp { addr: server };
        let response = self
            .factory
            .create(&udp)
            .send(message_bytes, budget)
            .await?;

        if !MessageHeader::decode(&response.bytes)?.is_truncated() {
            ResponseParser::check_reply(message_bytes, &response.bytes)?;
            return Ok((response.bytes, response.protocol_used));
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(LookupError::Timeout);
        }

        debug!(server = %server, "Response truncated (TC bit), retrying via TCP");

        let tcp = udp.to_tcp();
        let response = self
            .factory
            .create(&tcp)
            .send(message_bytes, remaining)
            .await?;

        ResponseParser::check_reply(message_bytes, &response.bytes)?;
        Ok((response.bytes, response.protocol_used))
    }
}

impl Default for UpstreamExchange {
    fn default() -> Self {
        Self::new()
    }
}
