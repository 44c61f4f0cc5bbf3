//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Standard DNS transport. Messages are sent as-is (no framing).
//! If the response has the TC (truncated) bit set, the caller should retry via TCP.

use super::{validate_response_id, DnsTransport, TransportResponse};
use crate::dns::wire::header::{MessageHeader, HEADER_LEN};
use async_trait::async_trait;
use bytes::Bytes;
use ferrous_lookup_domain::LookupError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    async fn exchange(
        &self,
        socket: &UdpSocket,
        message_bytes: &[u8],
    ) -> Result<TransportResponse, LookupError> {
        let bytes_sent = socket.send(message_bytes).await.map_err(|e| {
            LookupError::ResolverUnreachable(format!(
                "Failed to send UDP query to {}: {}",
                self.server_addr, e
            ))
        })?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let bytes_received = socket.recv(&mut recv_buf).await.map_err(|e| {
                LookupError::ResolverUnreachable(format!(
                    "Failed to receive UDP response from {}: {}",
                    self.server_addr, e
                ))
            })?;
            let datagram = &recv_buf[..bytes_received];

            if datagram.len() < HEADER_LEN {
                warn!(
                    server = %self.server_addr,
                    bytes_received = bytes_received,
                    "Discarding UDP datagram shorter than a DNS header"
                );
                continue;
            }

            if let Err(e) = validate_response_id(message_bytes, datagram, self.server_addr) {
                warn!(error = %e, "Discarding UDP datagram");
                continue;
            }

            if !MessageHeader::decode(datagram).is_ok_and(|header| header.is_response()) {
                warn!(
                    server = %self.server_addr,
                    "Discarding UDP datagram with QR clear"
                );
                continue;
            }

            debug!(
                server = %self.server_addr,
                bytes_received = bytes_received,
                "UDP response received"
            );

            return Ok(TransportResponse {
                bytes: Bytes::copy_from_slice(datagram),
                protocol_used: "UDP",
            });
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, LookupError> {
        let socket = UdpSocket::bind(self.bind_addr()).await.map_err(|e| {
            LookupError::ResolverUnreachable(format!("Failed to bind UDP socket: {}", e))
        })?;

        // Connected socket: the kernel drops datagrams from other sources and
        // reports ICMP port-unreachable as a receive error.
        socket.connect(self.server_addr).await.map_err(|e| {
            LookupError::ResolverUnreachable(format!(
                "Failed to connect UDP socket to {}: {}",
                self.server_addr, e
            ))
        })?;

        tokio::time::timeout(timeout, self.exchange(&socket, message_bytes))
            .await
            .map_err(|_| {
                debug!(
                    server = %self.server_addr,
                    timeout_ms = timeout.as_millis() as u64,
                    "Timeout waiting for UDP response"
                );
                LookupError::Timeout
            })?
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;
