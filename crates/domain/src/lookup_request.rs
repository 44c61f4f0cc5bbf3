use crate::dns_record::RecordType;
use crate::errors::LookupError;
use crate::resolver_address::ResolverAddress;
use std::sync::Arc;
use std::time::Duration;

/// One query, built per call and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    domain: Arc<str>,
    record_type: RecordType,
    resolvers: Vec<ResolverAddress>,
    timeout: Duration,
}

impl LookupRequest {
    pub fn new(
        domain: &str,
        record_type: RecordType,
        resolvers: Vec<ResolverAddress>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(LookupError::Encoding("domain must not be empty".to_string()));
        }

        Ok(Self {
            domain: Arc::from(domain),
            record_type,
            resolvers,
            timeout,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Explicit resolvers in caller order; empty means "use the system resolvers".
    pub fn resolvers(&self) -> &[ResolverAddress] {
        &self.resolvers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Every lookup goes to the wire; there is no cache to consult.
    pub fn bypass_cache(&self) -> bool {
        true
    }
}
