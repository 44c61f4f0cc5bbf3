pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_lookup_domain::{DnsProtocol, LookupError};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Bytes,

    pub protocol_used: &'static str,
}

/// One request/response exchange with a single resolver.
///
/// Implementations own their sockets for the duration of `send` only; nothing
/// outlives the call, so dropping the future releases everything.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, LookupError>;

    fn protocol_name(&self) -> &'static str;
}

/// Creates the transport for one attempt.
pub trait TransportFactory: Send + Sync {
    fn create(&self, protocol: &DnsProtocol) -> Box<dyn DnsTransport>;
}

/// Plain UDP/TCP sockets on the resolver address.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketTransportFactory;

impl TransportFactory for SocketTransportFactory {
    fn create(&self, protocol: &DnsProtocol) -> Box<dyn DnsTransport> {
        create_transport(protocol)
    }
}

pub fn create_transport(protocol: &DnsProtocol) -> Box<dyn DnsTransport> {
    match protocol {
        DnsProtocol::Udp { addr } => Box::new(udp::UdpTransport::new(*addr)),
        DnsProtocol::Tcp { addr } => Box::new(tcp::TcpTransport::new(*addr)),
    }
}

/// Checks that `response` carries the transaction id of `query`.
pub(crate) fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), LookupError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(LookupError::MalformedResponse(format!(
            "message from {} too short to carry a transaction id",
            server
        )));
    }

    let query_id = u16::from_be_bytes([query[0], query[1]]);
    let response_id = u16::from_be_bytes([response[0], response[1]]);

    if query_id != response_id {
        return Err(LookupError::MalformedResponse(format!(
            "transaction id mismatch from {}: expected {}, got {}",
            server, query_id, response_id
        )));
    }

    Ok(())
}
