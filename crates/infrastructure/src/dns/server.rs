use dotproxy_application::use_cases::{HandleDnsQueryUseCase, InboundQuery};
use dotproxy_domain::ListenerProtocol;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Glue between the socket listeners and the query use case.
///
/// Listeners hand over raw payloads; `None` means the datagram or connection
/// gets no reply.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_raw(
        &self,
        payload: &[u8],
        client: SocketAddr,
        protocol: ListenerProtocol,
    ) -> Option<Vec<u8>> {
        match self
            .use_case
            .execute(InboundQuery::new(payload, client, protocol))
            .await
        {
            Ok(response) => Some(response),
            Err(e) => {
                debug!(
                    client = %client,
                    protocol = %protocol,
                    error = %e,
                    "No reply sent"
                );
                None
            }
        }
    }
}
