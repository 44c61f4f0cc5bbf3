//! DNS Message Builder
//!
//! Constructs query messages in wire format: one question, class IN,
//! recursion desired, no additional records.

use super::header::{MessageHeader, HEADER_LEN};
use super::name::{self, MAX_NAME_LEN};
use super::CLASS_IN;
use bytes::{BufMut, BytesMut};
use ferrous_lookup_domain::{LookupError, RecordType};

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a DNS query message with the given transaction id
    ///
    /// Fails with [`LookupError::Encoding`] when the domain is empty, longer
    /// than 253 octets, has a label over 63 octets, or contains characters
    /// other than letters, digits, `-` and `_`.
    pub fn build_query(
        domain: &str,
        record_type: RecordType,
        id: u16,
    ) -> Result<Vec<u8>, LookupError> {
        let mut buf = BytesMut::with_capacity(HEADER_LEN + MAX_NAME_LEN + 6);

        MessageHeader::query(id).encode(&mut buf);
        name::encode_name(domain, &mut buf)?;
        buf.put_u16(record_type.to_u16());
        buf.put_u16(CLASS_IN);

        Ok(buf.to_vec())
    }

    /// Build a query with a fresh random transaction id
    pub fn build_query_with_id(
        domain: &str,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), LookupError> {
        let id = fastrand::u16(..);
        let bytes = Self::build_query(domain, record_type, id)?;
        Ok((id, bytes))
    }
}
