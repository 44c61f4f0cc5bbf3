//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message is prefixed with a 2-byte big-endian length. One connection
//! per query; the stream is closed when `send` returns.

use super::{validate_response_id, DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use ferrous_lookup_domain::LookupError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Bytes, LookupError> {
        let mut stream = TcpStream::connect(self.server_addr).await.map_err(|e| {
            LookupError::ResolverUnreachable(format!(
                "Connection to TCP server {} failed: {}",
                self.server_addr, e
            ))
        })?;

        stream.set_nodelay(true).map_err(|e| {
            LookupError::ResolverUnreachable(format!(
                "Failed to set TCP_NODELAY on {}: {}",
                self.server_addr, e
            ))
        })?;

        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| self.io_error("send TCP query", e))?;

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response = read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| self.io_error("read TCP response", e))?;

        debug!(
            server = %self.server_addr,
            response_len = response.len(),
            "TCP response received"
        );

        Ok(response)
    }

    fn io_error(&self, action: &str, e: io::Error) -> LookupError {
        LookupError::ResolverUnreachable(format!(
            "Failed to {} ({}): {}",
            action, self.server_addr, e
        ))
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, LookupError> {
        if message_bytes.len() > MAX_TCP_MESSAGE_SIZE {
            return Err(LookupError::Encoding(format!(
                "message of {} bytes exceeds TCP frame limit of {}",
                message_bytes.len(),
                MAX_TCP_MESSAGE_SIZE
            )));
        }

        let response = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| {
                debug!(
                    server = %self.server_addr,
                    timeout_ms = timeout.as_millis() as u64,
                    "Timeout waiting for TCP response"
                );
                LookupError::Timeout
            })??;

        validate_response_id(message_bytes, &response, self.server_addr)?;

        Ok(TransportResponse {
            bytes: response,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let mut frame = BytesMut::with_capacity(2 + message_bytes.len());
    frame.put_u16(message_bytes.len() as u16);
    frame.put_slice(message_bytes);

    stream.write_all(&frame).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Bytes>
where
    S: AsyncReadExt + Unpin,
{
    let response_len = stream.read_u16().await? as usize;

    let mut response = BytesMut::zeroed(response_len);
    stream.read_exact(&mut response).await?;

    Ok(response.freeze())
}
