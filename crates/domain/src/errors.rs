use crate::dns_record::ResponseCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid domain name: {0}")]
    Encoding(String),

    #[error("No resolver reachable: {0}")]
    ResolverUnreachable(String),

    #[error("Query timeout")]
    Timeout,

    #[error("Malformed DNS response: {0}")]
    MalformedResponse(String),

    #[error("DNS server returned {code}")]
    DnsResponse { code: ResponseCode },
}
