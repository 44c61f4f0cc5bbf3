//! RFC 1035 message codec: query encoding and bounds-checked response decoding.

pub mod header;
pub mod message_builder;
pub mod name;
pub mod response_parser;

pub use header::MessageHeader;
pub use message_builder::MessageBuilder;
pub use response_parser::{RawRecord, ResponseParser};

/// Class IN
pub const CLASS_IN: u16 = 1;
