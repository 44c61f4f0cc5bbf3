use super::header::{MessageHeader, HEADER_LEN};
use super::name;
use super::CLASS_IN;
use ferrous_lookup_domain::{LookupError, RecordType};
use std::ops::Range;
use tracing::debug;

/// Fixed part of a resource record after its owner name: TYPE, CLASS, TTL, RDLENGTH.
const RR_FIXED_LEN: usize = 10;
/// QTYPE + QCLASS
const QUESTION_FIXED_LEN: usize = 4;

/// One answer-section resource record, with its rdata located inside the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,

    pub record_type: u16,

    pub class: u16,

    pub ttl: u32,

    pub rdata_len: u16,

    rdata_offset: usize,
}

impl RawRecord {
    /// Byte range of the rdata within the message it was decoded from.
    pub fn rdata_range(&self) -> Range<usize> {
        self.rdata_offset..self.rdata_offset + self.rdata_len as usize
    }

    /// Rdata bytes; `message` must be the buffer the record was decoded from.
    pub fn rdata<'a>(&self, message: &'a [u8]) -> Result<&'a [u8], LookupError> {
        message.get(self.rdata_range()).ok_or_else(|| {
            LookupError::MalformedResponse(format!(
                "rdata {:?} lies outside a {} byte message",
                self.rdata_range(),
                message.len()
            ))
        })
    }

    pub fn is_type(&self, record_type: RecordType) -> bool {
        RecordType::from_u16(self.record_type) == Some(record_type)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decode the fixed header of a response
    pub fn decode_header(bytes: &[u8]) -> Result<MessageHeader, LookupError> {
        MessageHeader::decode(bytes)
    }

    /// Checks that `response` answers `query`: QR set, same transaction id,
    /// and the query's question echoed back.
    ///
    /// A reply carrying an error rcode may leave the question out.
    pub fn check_reply(query: &[u8], response: &[u8]) -> Result<MessageHeader, LookupError> {
        let sent = MessageHeader::decode(query)?;
        let header = MessageHeader::decode(response)?;

        if !header.is_response() {
            return Err(LookupError::MalformedResponse(
                "message is not a response (QR clear)".to_string(),
            ));
        }
        if header.id != sent.id {
            return Err(LookupError::MalformedResponse(format!(
                "transaction id {:#06x} does not match query {:#06x}",
                header.id, sent.id
            )));
        }
        if header.question_count == 0 && !header.response_code().is_success() {
            return Ok(header);
        }
        if header.question_count != 1 {
            return Err(LookupError::MalformedResponse(format!(
                "expected 1 question, response has {}",
                header.question_count
            )));
        }

        let (asked, asked_type, asked_class, _) = Self::decode_question(query, HEADER_LEN)?;
        let (echoed, echoed_type, echoed_class, _) = Self::decode_question(response, HEADER_LEN)?;
        if !name::names_equal(&echoed, &asked)
            || echoed_type != asked_type
            || echoed_class != asked_class
        {
            return Err(LookupError::MalformedResponse(format!(
                "question '{}' {}/{} does not echo query '{}' {}/{}",
                echoed, echoed_type, echoed_class, asked, asked_type, asked_class
            )));
        }

        Ok(header)
    }

    /// Decode the question section and the answer records
    ///
    /// The question must echo exactly what was asked: one entry, same name
    /// (ASCII case-insensitive), same type, class IN. Authority and additional
    /// sections are not read.
    pub fn decode_question_and_answers(
        bytes: &[u8],
        header: &MessageHeader,
        expected_name: &str,
        expected_type: RecordType,
    ) -> Result<Vec<RawRecord>, LookupError> {
        if header.question_count != 1 {
            return Err(LookupError::MalformedResponse(format!(
                "expected 1 question, response has {}",
                header.question_count
            )));
        }

        let (qname, qtype, qclass, mut offset) = Self::decode_question(bytes, HEADER_LEN)?;

        if !name::names_equal(&qname, expected_name) {
            return Err(LookupError::MalformedResponse(format!(
                "question name '{}' does not match query '{}'",
                qname, expected_name
            )));
        }
        if qtype != expected_type.to_u16() || qclass != CLASS_IN {
            return Err(LookupError::MalformedResponse(format!(
                "question type/class {}/{} does not match query {}/IN",
                qtype, qclass, expected_type
            )));
        }

        // Every record needs at least a root name plus the fixed fields.
        let remaining = bytes.len() - offset;
        if header.answer_count as usize > remaining / (1 + RR_FIXED_LEN) {
            return Err(LookupError::MalformedResponse(format!(
                "answer count {} cannot fit in remaining {} bytes",
                header.answer_count, remaining
            )));
        }

        let mut records = Vec::with_capacity(header.answer_count as usize);
        for index in 0..header.answer_count {
            let (record, next) = Self::decode_record(bytes, offset).map_err(|e| match e {
                LookupError::MalformedResponse(msg) => {
                    LookupError::MalformedResponse(format!("answer {}: {}", index, msg))
                }
                other => other,
            })?;
            records.push(record);
            offset = next;
        }

        debug!(
            question = %qname,
            answers = records.len(),
            "DNS response decoded"
        );

        Ok(records)
    }

    fn decode_question(
        bytes: &[u8],
        offset: usize,
    ) -> Result<(String, u16, u16, usize), LookupError> {
        let (qname, offset) = name::read_name(bytes, offset)?;
        let fixed = bytes
            .get(offset..offset + QUESTION_FIXED_LEN)
            .ok_or_else(|| {
                LookupError::MalformedResponse("question section is cut short".to_string())
            })?;

        let qtype = u16::from_be_bytes([fixed[0], fixed[1]]);
        let qclass = u16::from_be_bytes([fixed[2], fixed[3]]);

        Ok((qname, qtype, qclass, offset + QUESTION_FIXED_LEN))
    }

    fn decode_record(bytes: &[u8], offset: usize) -> Result<(RawRecord, usize), LookupError> {
        let (owner, offset) = name::read_name(bytes, offset)?;
        let fixed = bytes.get(offset..offset + RR_FIXED_LEN).ok_or_else(|| {
            LookupError::MalformedResponse(format!(
                "record header at offset {} is cut short",
                offset
            ))
        })?;

        let record_type = u16::from_be_bytes([fixed[0], fixed[1]]);
        let class = u16::from_be_bytes([fixed[2], fixed[3]]);
        let ttl = u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
        let rdata_len = u16::from_be_bytes([fixed[8], fixed[9]]);

        let rdata_offset = offset + RR_FIXED_LEN;
        let rdata_end = rdata_offset + rdata_len as usize;
        if rdata_end > bytes.len() {
            return Err(LookupError::MalformedResponse(format!(
                "rdata length {} at offset {} overruns message of {} bytes",
                rdata_len,
                rdata_offset,
                bytes.len()
            )));
        }

        Ok((
            RawRecord {
                name: owner,
                record_type,
                class,
                ttl,
                rdata_len,
                rdata_offset,
            },
            rdata_end,
        ))
    }
}
