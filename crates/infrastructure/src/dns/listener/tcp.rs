use super::create_tcp_listener;
use crate::dns::server::DnsServerHandler;
use crate::dns::transport::tcp::{read_with_length_prefix, send_with_length_prefix};
use dotproxy_domain::{DomainError, ListenerProtocol};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

/// Length-prefixed DNS over TCP, one query per connection.
pub struct TcpDnsListener {
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
}

impl TcpDnsListener {
    pub fn bind(
        address: SocketAddr,
        handler: Arc<DnsServerHandler>,
        idle_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let listener = create_tcp_listener(address)?;
        Ok(Self {
            listener,
            handler,
            idle_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.listener
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    /// Accepts connections until the task is dropped. Accept errors are
    /// logged and the loop continues.
    pub async fn serve(self) {
        if let Ok(address) = self.local_addr() {
            info!(
                bind_address = %address,
                protocol = "tcp",
                idle_timeout_secs = self.idle_timeout.as_secs(),
                "DNS server started"
            );
        }

        loop {
            let (stream, client) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(error = %e, "TCP accept error");
                    continue;
                }
            };

            let handler = self.handler.clone();
            let idle_timeout = self.idle_timeout;

            tokio::spawn(async move {
                handle_connection(stream, client, handler, idle_timeout).await;
            });
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    client: SocketAddr,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
) {
    debug!(client = %client, "Connection opened");

    match tokio::time::timeout(idle_timeout, exchange(&mut stream, client, &handler)).await {
        Ok(Ok(true)) => {
            debug!(client = %client, protocol = "tcp", "Response sent");
        }
        Ok(Ok(false)) => {}
        Ok(Err(e)) => {
            debug!(client = %client, error = %e, "Connection error");
        }
        Err(_) => {
            debug!(
                client = %client,
                idle_timeout_secs = idle_timeout.as_secs(),
                "Connection idle timeout"
            );
        }
    }

    let _ = stream.shutdown().await;
    debug!(client = %client, "Connection closed");
}

/// Reads one framed query and writes the framed reply, if any.
/// Returns whether a reply was written.
async fn exchange(
    stream: &mut TcpStream,
    client: SocketAddr,
    handler: &DnsServerHandler,
) -> Result<bool, DomainError> {
    let payload = read_with_length_prefix(stream).await?;

    let Some(response) = handler
        .handle_raw(&payload, client, ListenerProtocol::Tcp)
        .await
    else {
        return Ok(false);
    };

    send_with_length_prefix(stream, &response).await?;
    Ok(true)
}
