//! Ferrous Lookup Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod dns_record;
pub mod errors;
pub mod lookup_answer;
pub mod lookup_request;
pub mod resolver_address;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, LookupConfig};
pub use dns_protocol::DnsProtocol;
pub use dns_record::{MxRecord, RecordType, ResponseCode};
pub use errors::LookupError;
pub use lookup_answer::LookupAnswer;
pub use lookup_request::LookupRequest;
pub use resolver_address::{ResolverAddress, DNS_PORT};
