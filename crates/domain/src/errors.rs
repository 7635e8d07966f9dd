use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Failed to serialize DNS message: {0}")]
    SerializationFailed(String),

    #[error("Unsupported query type: {0}")]
    UnsupportedQueryType(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("No addresses found for {0}")]
    NoAddresses(String),

    #[error("Upstream lookup failed: {0}")]
    UpstreamFailure(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("TLS handshake with {server} failed: {reason}")]
    TlsHandshakeFailed { server: String, reason: String },

    #[error("Invalid TLS server name: {0}")]
    InvalidTlsServerName(String),

    #[error("Failed to bind {address}: {reason}")]
    BindFailed { address: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// The one resolver outcome that still produces a reply (NOTIMP).
    pub fn is_unsupported_query_type(&self) -> bool {
        matches!(self, DomainError::UnsupportedQueryType(_))
    }

    /// Failures of the upstream exchange. These suppress the reply entirely.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidDnsResponse(_)
                | DomainError::NxDomain
                | DomainError::NoAddresses(_)
                | DomainError::UpstreamFailure(_)
                | DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::TransportConnectionReset { .. }
                | DomainError::TlsHandshakeFailed { .. }
                | DomainError::InvalidTlsServerName(_)
                | DomainError::IoError(_)
        )
    }
}
