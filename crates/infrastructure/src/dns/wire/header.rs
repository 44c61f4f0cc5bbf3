//! Fixed 12-byte message header (RFC 1035 §4.1.1)

use bytes::{BufMut, BytesMut};
use ferrous_lookup_domain::{LookupError, ResponseCode};

pub const HEADER_LEN: usize = 12;

const FLAG_QR: u16 = 0x8000;
const FLAG_TC: u16 = 0x0200;
const FLAG_RD: u16 = 0x0100;
const RCODE_MASK: u16 = 0x000F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl MessageHeader {
    /// Standard query header with RD set and a single question.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: FLAG_RD,
            question_count: 1,
            answer_count: 0,
            authority_count: 0,
            additional_count: 0,
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, LookupError> {
        if bytes.len() < HEADER_LEN {
            return Err(LookupError::MalformedResponse(format!(
                "message too short for header: {} bytes (need {})",
                bytes.len(),
                HEADER_LEN
            )));
        }

        let word = |i: usize| u16::from_be_bytes([bytes[i], bytes[i + 1]]);

        Ok(Self {
            id: word(0),
            flags: word(2),
            question_count: word(4),
            answer_count: word(6),
            authority_count: word(8),
            additional_count: word(10),
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.id);
        buf.put_u16(self.flags);
        buf.put_u16(self.question_count);
        buf.put_u16(self.answer_count);
        buf.put_u16(self.authority_count);
        buf.put_u16(self.additional_count);
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_QR != 0
    }

    pub fn is_truncated(&self) -> bool {
        self.flags & FLAG_TC != 0
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from_u8((self.flags & RCODE_MASK) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_header_encoding() {
        let mut buf = BytesMut::new();
        MessageHeader::query(0xABCD).encode(&mut buf);

        assert_eq!(
            &buf[..],
            &[0xAB, 0xCD, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_decode_response_flags() {
        let bytes = [0x12, 0x34, 0x83, 0x83, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00];
        let header = MessageHeader::decode(&bytes).unwrap();

        assert_eq!(header.id, 0x1234);
        assert!(header.is_response());
        assert!(header.is_truncated());
        assert_eq!(header.flags & FLAG_RD, FLAG_RD);
        assert_eq!(header.response_code(), ResponseCode::NxDomain);
        assert_eq!(header.question_count, 1);
        assert_eq!(header.answer_count, 2);
    }

    #[test]
    fn test_decode_short_header() {
        for len in 0..HEADER_LEN {
            let bytes = vec![0u8; len];
            assert!(matches!(
                MessageHeader::decode(&bytes),
                Err(LookupError::MalformedResponse(_))
            ));
        }
    }
}
