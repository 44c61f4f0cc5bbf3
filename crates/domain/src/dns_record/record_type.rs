use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types this client can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    CNAME,
    MX,
    TXT,
}

impl RecordType {
    pub const ALL: [RecordType; 3] = [RecordType::CNAME, RecordType::MX, RecordType::TXT];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::CNAME => 5,
            RecordType::MX => 15,
            RecordType::TXT => 16,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            5 => Some(RecordType::CNAME),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CNAME" => Ok(RecordType::CNAME),
            "MX" => Ok(RecordType::MX),
            "TXT" => Ok(RecordType::TXT),
            _ => Err(format!("Unsupported record type: {} (expected CNAME, MX or TXT)", s)),
        }
    }
}
