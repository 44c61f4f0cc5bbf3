use super::exchange::UpstreamExchange;
use super::records::RecordParser;
use super::transport::TransportFactory;
use super::wire::{MessageBuilder, RawRecord, ResponseParser};
use crate::system::SystemResolvers;
use bytes::Bytes;
use ferrous_lookup_domain::{
    LookupAnswer, LookupConfig, LookupError, LookupRequest, MxRecord, RecordType,
    ResolverAddress,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// CNAME, MX and TXT lookups against explicit or system resolvers.
///
/// Immutable after construction; clones share the transport factory.
#[derive(Clone)]
pub struct LookupClient {
    exchange: UpstreamExchange,
    system: SystemResolvers,
    fallback: Arc<[ResolverAddress]>,
    port: u16,
    timeout: Duration,
}

impl LookupClient {
    pub fn new(config: &LookupConfig) -> Self {
        Self::from_parts(config, UpstreamExchange::new())
    }

    pub fn with_transport_factory(
        config: &LookupConfig,
        factory: Arc<dyn TransportFactory>,
    ) -> Self {
        Self::from_parts(config, UpstreamExchange::with_factory(factory))
    }

    fn from_parts(config: &LookupConfig, exchange: UpstreamExchange) -> Self {
        Self {
            exchange,
            system: SystemResolvers::from_resolv_conf(config.resolv_conf.clone()),
            fallback: ResolverAddress::parse_list(&config.fallback_resolvers).into(),
            port: config.port,
            timeout: config.timeout(),
        }
    }

    /// Validates the domain and keeps the resolvers that parse as IP addresses.
    pub fn build_request<S: AsRef<str>>(
        &self,
        domain: &str,
        record_type: RecordType,
        resolvers: &[S],
    ) -> Result<LookupRequest, LookupError> {
        let parsed = ResolverAddress::parse_list(resolvers);
        if parsed.len() < resolvers.len() {
            debug!(
                supplied = resolvers.len(),
                usable = parsed.len(),
                "Dropped unparsable resolver addresses"
            );
        }
        LookupRequest::new(domain, record_type, parsed, self.timeout)
    }

    /// Canonical name of `domain`, or an empty string when it has none.
    pub async fn query_cname<S: AsRef<str>>(
        &self,
        domain: &str,
        resolvers: &[S],
    ) -> Result<String, LookupError> {
        let request = self.build_request(domain, RecordType::CNAME, resolvers)?;
        let (message, records) = self.resolve(&request).await?;
        RecordParser::parse_cname(&message, &records)
    }

    /// Mail exchangers of `domain`, lowest preference first.
    pub async fn query_mx<S: AsRef<str>>(
        &self,
        domain: &str,
        resolvers: &[S],
    ) -> Result<Vec<MxRecord>, LookupError> {
        let request = self.build_request(domain, RecordType::MX, resolvers)?;
        let (message, records) = self.resolve(&request).await?;
        let mut mx = RecordParser::parse_mx(&message, &records)?;
        MxRecord::sort_by_preference(&mut mx);
        Ok(mx)
    }

    /// TXT strings of `domain`, one per record.
    pub async fn query_txt<S: AsRef<str>>(
        &self,
        domain: &str,
        resolvers: &[S],
    ) -> Result<Vec<String>, LookupError> {
        let request = self.build_request(domain, RecordType::TXT, resolvers)?;
        let (message, records) = self.resolve(&request).await?;
        RecordParser::parse_txt(&message, &records)
    }

    pub async fn lookup(&self, request: &LookupRequest) -> Result<LookupAnswer, LookupError> {
        let (message, records) = self.resolve(request).await?;

        Ok(match request.record_type() {
            RecordType::CNAME => LookupAnswer::Cname(RecordParser::parse_cname(&message, &records)?),
            RecordType::MX => {
                let mut mx = RecordParser::parse_mx(&message, &records)?;
                MxRecord::sort_by_preference(&mut mx);
                LookupAnswer::Mx(mx)
            }
            RecordType::TXT => LookupAnswer::Txt(RecordParser::parse_txt(&message, &records)?),
        })
    }

    async fn resolve(
        &self,
        request: &LookupRequest,
    ) -> Result<(Bytes, Vec<RawRecord>), LookupError> {
        let (id, query) =
            MessageBuilder::build_query_with_id(request.domain(), request.record_type())?;
        let servers = self.candidate_servers(request).await?;

        debug!(
            domain = %request.domain(),
            record_type = %request.record_type(),
            servers = servers.len(),
            id = id,
            "Sending lookup"
        );

        let result = self
            .exchange
            .send(&query, &servers, request.timeout())
            .await?;

        // The exchange only returns replies that match this query's id and question.
        let header = ResponseParser::decode_header(&result.bytes)?;

        let code = header.response_code();
        if !code.is_success() {
            debug!(
                domain = %request.domain(),
                server = %result.server,
                rcode = %code,
                "Resolver returned error code"
            );
            return Err(LookupError::DnsResponse { code });
        }

        let records = ResponseParser::decode_question_and_answers(
            &result.bytes,
            &header,
            request.domain(),
            request.record_type(),
        )?;

        debug!(
            domain = %request.domain(),
            record_type = %request.record_type(),
            server = %result.server,
            protocol = result.protocol_used,
            latency_ms = result.latency_ms,
            answers = records.len(),
            "Lookup answered"
        );

        Ok((result.bytes, records))
    }

    /// Caller resolvers, else the system's, else the configured fallback.
    async fn candidate_servers(
        &self,
        request: &LookupRequest,
    ) -> Result<Vec<SocketAddr>, LookupError> {
        let resolvers = if !request.resolvers().is_empty() {
            request.resolvers().to_vec()
        } else {
            let system = self.system.load().await;
            if !system.is_empty() {
                system
            } else {
                debug!(path = %self.system.path(), "No system resolvers, using fallback");
                self.fallback.to_vec()
            }
        };

        if resolvers.is_empty() {
            return Err(LookupError::ResolverUnreachable(
                "no resolvers supplied and none configured on the system".to_string(),
            ));
        }

        Ok(resolvers
            .iter()
            .map(|resolver| resolver.socket_addr(self.port))
            .collect())
    }
}
