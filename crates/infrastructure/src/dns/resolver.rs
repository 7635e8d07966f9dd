use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{DnsTransport, TlsTransport};
use async_trait::async_trait;
use dotproxy_application::ports::DnsResolver;
use dotproxy_domain::config::UpstreamConfig;
use dotproxy_domain::{AnswerRecord, DomainError, Question, RecordType, ResponseCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Resolves A and AAAA questions through a single DNS-over-TLS upstream.
///
/// Any other question type is rejected with `UnsupportedQueryType` before a
/// connection is made.
pub struct TlsUpstreamResolver {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl TlsUpstreamResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        info!(
            server = %transport.server(),
            protocol = transport.protocol_name(),
            timeout_ms = timeout.as_millis() as u64,
            "Upstream resolver created"
        );

        Self { transport, timeout }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            Arc::new(TlsTransport::new(config.target.clone())),
            config.timeout(),
        )
    }

    async fn exchange(&self, question: &Question) -> Result<Vec<AnswerRecord>, DomainError> {
        let (id, query_bytes) = MessageBuilder::build_query_with_id(question)?;

        let response = self.transport.send(&query_bytes, self.timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response ID {} does not match query ID {}",
                parsed.id, id
            )));
        }

        if parsed.is_nxdomain() {
            return Err(DomainError::NxDomain);
        }

        if parsed.rcode != ResponseCode::NoError {
            return Err(DomainError::UpstreamFailure(format!(
                "{} answered {}",
                self.transport.server(),
                parsed.rcode.as_str()
            )));
        }

        let wants_v6 = question.record_type == RecordType::AAAA;

        let answers: Vec<AnswerRecord> = parsed
            .addresses
            .iter()
            .filter(|upstream| upstream.address.is_ipv6() == wants_v6)
            .map(|upstream| {
                AnswerRecord::from_address(
                    question.name.clone(),
                    question.class,
                    upstream.ttl,
                    upstream.address,
                )
            })
            .collect();

        if answers.is_empty() {
            return Err(DomainError::NoAddresses(question.name.to_string()));
        }

        Ok(answers)
    }
}

#[async_trait]
impl DnsResolver for TlsUpstreamResolver {
    async fn resolve(&self, question: &Question) -> Result<Vec<AnswerRecord>, DomainError> {
        if !question.record_type.is_address() {
            return Err(DomainError::UnsupportedQueryType(
                question.record_type.to_string(),
            ));
        }

        let start = Instant::now();
        let result = self.exchange(question).await;

        debug!(
            domain = %question.name,
            record_type = %question.record_type,
            server = %self.transport.server(),
            ok = result.is_ok(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream lookup finished"
        );

        result
    }
}
