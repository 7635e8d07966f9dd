use crate::ports::{DnsResolver, MessageCodec};
use crate::services::ResponseSynthesizer;
use dotproxy_domain::{DomainError, ListenerProtocol};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// One raw DNS payload as delivered by a listener.
#[derive(Debug, Clone, Copy)]
pub struct InboundQuery<'a> {
    pub payload: &'a [u8],
    pub client: SocketAddr,
    pub protocol: ListenerProtocol,
}

impl<'a> InboundQuery<'a> {
    pub fn new(payload: &'a [u8], client: SocketAddr, protocol: ListenerProtocol) -> Self {
        Self {
            payload,
            client,
            protocol,
        }
    }
}

/// Parse → resolve → synthesize → serialize, shared by both listeners.
///
/// `Ok` carries the reply payload without transport framing. `Err` means no
/// reply must be sent: the payload did not parse, the upstream failed, or
/// the reply could not be encoded. Unsupported question types are not an
/// error here; they produce a NOTIMP reply.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
    codec: Arc<dyn MessageCodec>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, codec: Arc<dyn MessageCodec>) -> Self {
        Self { resolver, codec }
    }

    pub async fn execute(&self, query: InboundQuery<'_>) -> Result<Vec<u8>, DomainError> {
        let start = Instant::now();

        let request = match self.codec.parse(query.payload) {
            Ok(request) => request,
            Err(e) => {
                warn!(
                    client = %query.client,
                    protocol = %query.protocol,
                    bytes = query.payload.len(),
                    error = %e,
                    "Malformed DNS query dropped"
                );
                return Err(e);
            }
        };
        let question = request.question()?;

        info!(
            id = request.id(),
            domain = %question.name,
            record_type = %question.record_type,
            client = %query.client,
            protocol = %query.protocol,
            "DNS query received"
        );

        let response = match self.resolver.resolve(question).await {
            Ok(answers) => {
                debug!(
                    domain = %question.name,
                    answers = answers.len(),
                    "Upstream lookup succeeded"
                );
                ResponseSynthesizer::build_success(&request, answers)
            }
            Err(e) if e.is_unsupported_query_type() => {
                warn!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    "Unsupported record type, replying NOTIMP"
                );
                ResponseSynthesizer::build_error(&request)
            }
            Err(e) => {
                error!(
                    domain = %question.name,
                    record_type = %question.record_type,
                    client = %query.client,
                    error = %e,
                    "Query resolution failed"
                );
                return Err(e);
            }
        };

        let bytes = self.codec.serialize(&response).inspect_err(|e| {
            error!(
                id = response.id(),
                client = %query.client,
                error = %e,
                "Failed to serialize DNS response"
            );
        })?;

        debug!(
            id = response.id(),
            rcode = response.response_code().as_str(),
            answers = response.answers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Response synthesized"
        );

        Ok(bytes)
    }
}
