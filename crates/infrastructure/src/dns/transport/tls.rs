//! DNS-over-TLS transport (RFC 7858)
//!
//! Every exchange opens its own TCP connection, completes a TLS handshake,
//! sends one framed query, reads one framed response and closes. Nothing is
//! pooled between lookups. Session tickets cached by the shared
//! `ClientConfig` still shorten repeated handshakes.

use super::tcp::{read_with_length_prefix, send_with_length_prefix};
use super::{map_io_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use dotproxy_domain::config::UpstreamTarget;
use dotproxy_domain::DomainError;
use rustls::pki_types::ServerName;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::debug;

/// Shared TLS config verifying upstream certificates against the webpki roots.
static SHARED_TLS_CONFIG: LazyLock<Arc<rustls::ClientConfig>> = LazyLock::new(|| {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Arc::new(config)
});

/// DNS-over-TLS transport (RFC 7858)
pub struct TlsTransport {
    target: UpstreamTarget,
    tls_config: Arc<rustls::ClientConfig>,
}

impl TlsTransport {
    pub fn new(target: UpstreamTarget) -> Self {
        Self::with_tls_config(target, SHARED_TLS_CONFIG.clone())
    }

    /// Uses a caller-supplied trust configuration instead of the webpki roots.
    pub fn with_tls_config(target: UpstreamTarget, tls_config: Arc<rustls::ClientConfig>) -> Self {
        Self { target, tls_config }
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.target.to_string(),
        }
    }

    /// Establish a new TLS connection (TCP connect + TLS handshake).
    async fn connect_new(&self, timeout: Duration) -> Result<TlsStream<TcpStream>, DomainError> {
        let server = self.target.to_string();
        let connector = tokio_rustls::TlsConnector::from(self.tls_config.clone());

        let server_name = ServerName::try_from(self.target.host().to_string())
            .map_err(|e| DomainError::InvalidTlsServerName(format!("{}: {}", self.target.host(), e)))?;

        let tcp_stream = tokio::time::timeout(
            timeout,
            TcpStream::connect((self.target.host(), self.target.port())),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(|e| map_io_error(e, &server))?;

        tcp_stream
            .set_nodelay(true)
            .map_err(|e| map_io_error(e, &server))?;

        let tls_stream = tokio::time::timeout(timeout, connector.connect(server_name, tcp_stream))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| DomainError::TlsHandshakeFailed {
                server: server.clone(),
                reason: e.to_string(),
            })?;

        debug!(server = %server, "TLS connection established");
        Ok(tls_stream)
    }

    async fn send_on_stream(
        &self,
        stream: &mut TlsStream<TcpStream>,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(timeout, send_with_length_prefix(stream, message_bytes))
            .await
            .map_err(|_| self.timeout_error())??;

        tokio::time::timeout(timeout, read_with_length_prefix(stream))
            .await
            .map_err(|_| self.timeout_error())?
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = self.connect_new(timeout).await?;

        let result = self.send_on_stream(&mut stream, message_bytes, timeout).await;

        // close_notify; a failure here does not change the result
        let _ = tokio::time::timeout(timeout, stream.shutdown()).await;

        let response_bytes = result?;

        debug!(
            server = %self.target,
            response_len = response_bytes.len(),
            "TLS response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }

    fn server(&self) -> String {
        self.target.to_string()
    }
}
