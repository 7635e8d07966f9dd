use super::{create_udp_socket, UDP_RECV_BUFFER_SIZE};
use crate::dns::server::DnsServerHandler;
use dotproxy_domain::{DomainError, ListenerProtocol};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

/// One datagram in, at most one datagram out.
pub struct UdpDnsListener {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
}

impl UdpDnsListener {
    pub fn bind(address: SocketAddr, handler: Arc<DnsServerHandler>) -> Result<Self, DomainError> {
        let socket = create_udp_socket(address)?;
        Ok(Self {
            socket: Arc::new(socket),
            handler,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    /// Receives datagrams until the task is dropped. Each datagram is handled
    /// on its own task; receive errors are logged and skipped.
    pub async fn serve(self) {
        if let Ok(address) = self.local_addr() {
            info!(bind_address = %address, protocol = "udp", "DNS server started");
        }

        let mut recv_buf = [0u8; UDP_RECV_BUFFER_SIZE];

        loop {
            let (len, client) = match self.socket.recv_from(&mut recv_buf).await {
                Ok(received) => received,
                Err(e) => {
                    error!(error = %e, "UDP recv error");
                    continue;
                }
            };

            let payload: Arc<[u8]> = Arc::from(&recv_buf[..len]);
            let socket = self.socket.clone();
            let handler = self.handler.clone();

            tokio::spawn(async move {
                let Some(response) = handler
                    .handle_raw(&payload, client, ListenerProtocol::Udp)
                    .await
                else {
                    return;
                };

                match socket.send_to(&response, client).await {
                    Ok(sent) => debug!(
                        client = %client,
                        bytes = sent,
                        protocol = "udp",
                        "Response sent"
                    ),
                    Err(e) => error!(client = %client, error = %e, "UDP send error"),
                }
            });
        }
    }
}
