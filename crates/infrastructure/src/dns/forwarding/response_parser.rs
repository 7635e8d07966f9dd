use super::record_type_map::RecordTypeMapper;
use dotproxy_domain::{DomainError, ResponseCode};
use hickory_proto::op::Message;
use hickory_proto::rr::RData;
use std::net::IpAddr;
use tracing::debug;

/// Address found in an upstream answer together with its TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamAddress {
    pub address: IpAddr,
    pub ttl: u32,
}

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    pub addresses: Vec<UpstreamAddress>,
}

impl DnsResponse {
    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("failed to parse DNS response: {}", e))
        })?;

        let rcode = RecordTypeMapper::rcode_from_hickory(message.response_code());
        let truncated = message.truncated();

        let mut addresses = Vec::new();

        for record in message.answers() {
            let ttl = record.ttl();

            match record.data() {
                RData::A(a) => addresses.push(UpstreamAddress {
                    address: IpAddr::V4(a.0),
                    ttl,
                }),
                RData::AAAA(aaaa) => addresses.push(UpstreamAddress {
                    address: IpAddr::V6(aaaa.0),
                    ttl,
                }),
                _ => {}
            }
        }

        debug!(
            id = message.id(),
            rcode = rcode.as_str(),
            addresses = addresses.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            id: message.id(),
            rcode,
            truncated,
            addresses,
        })
    }
}
