#![allow(dead_code)]
use dotproxy_application::use_cases::HandleDnsQueryUseCase;
use dotproxy_domain::config::ServerConfig;
use dotproxy_infrastructure::dns::{
    DnsServerHandler, HickoryMessageCodec, TlsTransport, TlsUpstreamResolver,
};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RData, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use super::MockTlsDnsServer;

/// Client-side wire queries built independently of the codec under test.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn message(id: u16, name: &str, record_type: RecordType) -> Message {
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(Query::query(Name::from_ascii(name).unwrap(), record_type));
        message
    }

    pub fn bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
        Self::message(id, name, record_type).to_vec().unwrap()
    }

    pub fn a(id: u16, name: &str) -> Vec<u8> {
        Self::bytes(id, name, RecordType::A)
    }

    pub fn aaaa(id: u16, name: &str) -> Vec<u8> {
        Self::bytes(id, name, RecordType::AAAA)
    }

    /// Header only, no question.
    pub fn without_question(id: u16) -> Vec<u8> {
        Message::new(id, MessageType::Query, OpCode::Query)
            .to_vec()
            .unwrap()
    }
}

pub fn first_address(response: &Message) -> Option<IpAddr> {
    response.answers().iter().find_map(|record| match record.data() {
        RData::A(a) => Some(IpAddr::V4(a.0)),
        RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
        _ => None,
    })
}

pub struct HandlerBuilder;

impl HandlerBuilder {
    /// Full pipeline against a mock DNS-over-TLS upstream.
    pub fn against(upstream: &MockTlsDnsServer) -> DnsServerHandler {
        let transport = TlsTransport::with_tls_config(upstream.target(), upstream.client_config());
        Self::with_transport(transport)
    }

    /// Full pipeline against an address where nothing listens.
    pub fn unreachable(port: u16) -> DnsServerHandler {
        let target = format!("127.0.0.1:{}", port).parse().unwrap();
        Self::with_transport(TlsTransport::new(target))
    }

    fn with_transport(transport: TlsTransport) -> DnsServerHandler {
        let resolver = Arc::new(TlsUpstreamResolver::new(
            Arc::new(transport),
            Duration::from_secs(2),
        ));
        let codec = Arc::new(HickoryMessageCodec::new());
        DnsServerHandler::new(Arc::new(HandleDnsQueryUseCase::new(resolver, codec)))
    }
}

pub fn loopback_settings(udp_enabled: bool, tcp_timeout_secs: u64) -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        udp_enabled,
        tcp_timeout_secs,
    }
}

/// Port that refuses connections: bound once, then released.
pub async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

pub fn loopback(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}
