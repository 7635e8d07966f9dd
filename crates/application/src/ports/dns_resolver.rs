use async_trait::async_trait;
use dotproxy_domain::{AnswerRecord, DomainError, Question};

/// Resolves a single question against the upstream.
///
/// Implementations dispatch on the question type: A and AAAA are looked up,
/// every other type fails with [`DomainError::UnsupportedQueryType`] without
/// touching the network. Calls must be independent of each other; the
/// resolver is shared by every in-flight request.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, question: &Question) -> Result<Vec<AnswerRecord>, DomainError>;
}
