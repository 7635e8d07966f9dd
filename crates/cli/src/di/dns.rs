use dotproxy_application::use_cases::HandleDnsQueryUseCase;
use dotproxy_domain::Config;
use dotproxy_infrastructure::dns::{DnsServerHandler, HickoryMessageCodec, TlsUpstreamResolver};
use std::sync::Arc;
use tracing::info;

/// Everything the listeners share: one resolver, one codec, one use case.
pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config) -> Self {
        info!(
            upstream = %config.upstream.target,
            timeout_secs = config.upstream.timeout_secs,
            "Initializing DNS services"
        );

        let resolver = Arc::new(TlsUpstreamResolver::from_config(&config.upstream));
        let codec = Arc::new(HickoryMessageCodec::new());
        let use_case = Arc::new(HandleDnsQueryUseCase::new(resolver, codec));

        Self {
            handler: DnsServerHandler::new(use_case),
        }
    }
}
