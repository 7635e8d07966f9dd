use super::listener::{TcpDnsListener, UdpDnsListener};
use super::server::DnsServerHandler;
use dotproxy_domain::config::ServerConfig;
use dotproxy_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Owns the TCP listener and, when enabled, the UDP listener on the same
/// host and port.
pub struct DnsProxy {
    tcp: TcpDnsListener,
    udp: Option<UdpDnsListener>,
}

impl DnsProxy {
    /// Binds every enabled listener. A bind failure aborts before anything
    /// is served.
    ///
    /// TCP binds first; UDP then binds the port TCP actually got, so an
    /// ephemeral port (0) yields one shared port for both.
    pub fn bind(settings: &ServerConfig, handler: DnsServerHandler) -> Result<Self, DomainError> {
        let handler = Arc::new(handler);

        let tcp = TcpDnsListener::bind(
            settings.bind_address(),
            handler.clone(),
            settings.tcp_timeout(),
        )?;

        let udp = if settings.udp_enabled {
            Some(UdpDnsListener::bind(tcp.local_addr()?, handler)?)
        } else {
            None
        };

        Ok(Self { tcp, udp })
    }

    pub fn tcp_local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.tcp.local_addr()
    }

    /// `None` when the UDP listener is disabled.
    pub fn udp_local_addr(&self) -> Option<Result<SocketAddr, DomainError>> {
        self.udp.as_ref().map(UdpDnsListener::local_addr)
    }

    /// Serves until the TCP accept loop ends. The UDP listener runs as a
    /// background task and is aborted when this future completes or is dropped.
    pub async fn run(self) {
        info!(
            tcp = true,
            udp = self.udp.is_some(),
            "DNS proxy running"
        );

        let udp_task = self.udp.map(|udp| AbortOnDrop(tokio::spawn(udp.serve())));

        self.tcp.serve().await;

        drop(udp_task);
    }
}

struct AbortOnDrop(tokio::task::JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
