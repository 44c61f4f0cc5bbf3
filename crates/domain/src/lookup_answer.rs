use crate::dns_record::{MxRecord, RecordType};
use serde::Serialize;

/// Shaped result of one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "records", rename_all = "UPPERCASE")]
pub enum LookupAnswer {
    /// Canonical target, empty when the response carried no CNAME.
    Cname(String),
    /// Sorted by preference.
    Mx(Vec<MxRecord>),
    /// One string per TXT record.
    Txt(Vec<String>),
}

impl LookupAnswer {
    pub fn record_type(&self) -> RecordType {
        match self {
            LookupAnswer::Cname(_) => RecordType::CNAME,
            LookupAnswer::Mx(_) => RecordType::MX,
            LookupAnswer::Txt(_) => RecordType::TXT,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LookupAnswer::Cname(target) => target.is_empty(),
            LookupAnswer::Mx(records) => records.is_empty(),
            LookupAnswer::Txt(records) => records.is_empty(),
        }
    }

    /// One display line per result.
    pub fn lines(&self) -> Vec<String> {
        match self {
            LookupAnswer::Cname(target) if target.is_empty() => Vec::new(),
            LookupAnswer::Cname(target) => vec![target.clone()],
            LookupAnswer::Mx(records) => records.iter().map(|r| r.to_string()).collect(),
            LookupAnswer::Txt(records) => records.clone(),
        }
    }
}
