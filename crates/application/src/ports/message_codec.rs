use dotproxy_domain::{DnsMessage, DomainError};

/// Wire format codec for DNS messages. Pure and stateless.
pub trait MessageCodec: Send + Sync {
    /// Decode a DNS payload (transport framing already stripped).
    fn parse(&self, bytes: &[u8]) -> Result<DnsMessage, DomainError>;

    /// Encode a message, deriving section counts from its contents.
    fn serialize(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError>;
}
