pub mod client;
pub mod exchange;
pub mod records;
pub mod transport;
pub mod wire;

pub use client::LookupClient;
pub use exchange::{ExchangeResult, UpstreamExchange};
pub use records::RecordParser;
pub use wire::{MessageBuilder, MessageHeader, RawRecord, ResponseParser};
pub use transport::{DnsTransport, SocketTransportFactory, TransportFactory, TransportResponse};
