//! Typed extraction of CNAME, MX and TXT answers.
//!
//! Every rdata is checked against its declared length: embedded names and
//! character-strings must end exactly at the record boundary.

use crate::dns::wire::name;
use crate::dns::wire::RawRecord;
use ferrous_lookup_domain::{LookupError, MxRecord, RecordType};

pub struct RecordParser;

impl RecordParser {
    /// Target of the first CNAME record, or an empty string when there is none.
    pub fn parse_cname(message: &[u8], records: &[RawRecord]) -> Result<String, LookupError> {
        match records.iter().find(|r| r.is_type(RecordType::CNAME)) {
            Some(record) => Self::read_rdata_name(message, record, record.rdata_range().start),
            None => Ok(String::new()),
        }
    }

    /// All MX records in answer order.
    pub fn parse_mx(message: &[u8], records: &[RawRecord]) -> Result<Vec<MxRecord>, LookupError> {
        records
            .iter()
            .filter(|r| r.is_type(RecordType::MX))
            .map(|record| {
                let rdata = record.rdata(message)?;
                if rdata.len() < 3 {
                    return Err(LookupError::MalformedResponse(format!(
                        "MX rdata of {} bytes is too short",
                        rdata.len()
                    )));
                }

                let preference = u16::from_be_bytes([rdata[0], rdata[1]]);
                let exchange =
                    Self::read_rdata_name(message, record, record.rdata_range().start + 2)?;

                Ok(MxRecord::new(preference, exchange))
            })
            .collect()
    }

    /// One string per TXT record, its character-strings concatenated.
    pub fn parse_txt(message: &[u8], records: &[RawRecord]) -> Result<Vec<String>, LookupError> {
        records
            .iter()
            .filter(|r| r.is_type(RecordType::TXT))
            .map(|record| record.rdata(message).and_then(Self::join_character_strings))
            .collect()
    }

    fn join_character_strings(rdata: &[u8]) -> Result<String, LookupError> {
        let mut text = Vec::with_capacity(rdata.len());
        let mut pos = 0;

        while pos < rdata.len() {
            let len = rdata[pos] as usize;
            let segment = rdata.get(pos + 1..pos + 1 + len).ok_or_else(|| {
                LookupError::MalformedResponse(format!(
                    "TXT character-string of {} bytes at offset {} overruns rdata of {} bytes",
                    len,
                    pos,
                    rdata.len()
                ))
            })?;
            text.extend_from_slice(segment);
            pos += 1 + len;
        }

        Ok(String::from_utf8_lossy(&text).into_owned())
    }

    fn read_rdata_name(
        message: &[u8],
        record: &RawRecord,
        offset: usize,
    ) -> Result<String, LookupError> {
        let rdata_end = record.rdata_range().end;
        if offset >= rdata_end {
            return Err(LookupError::MalformedResponse(format!(
                "type {} rdata is empty where a name is expected",
                record.record_type
            )));
        }

        let (target, end) = name::read_name(message, offset)?;
        if end != rdata_end {
            return Err(LookupError::MalformedResponse(format!(
                "type {} name ends at offset {} but rdata ends at {}",
                record.record_type, end, rdata_end
            )));
        }

        Ok(target)
    }
}
