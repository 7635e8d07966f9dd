use super::{RecordClass, RecordType};
use std::net::IpAddr;
use std::sync::Arc;

/// Address answer produced by the upstream resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub name: Arc<str>,

    pub record_type: RecordType,

    pub class: RecordClass,

    pub ttl: u32,

    pub address: IpAddr,
}

impl AnswerRecord {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        class: RecordClass,
        ttl: u32,
        address: IpAddr,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
            ttl,
            address,
        }
    }

    /// Builds the record whose type is implied by the address family.
    pub fn from_address(
        name: impl Into<Arc<str>>,
        class: RecordClass,
        ttl: u32,
        address: IpAddr,
    ) -> Self {
        let record_type = match address {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::AAAA,
        };
        Self::new(name, record_type, class, ttl, address)
    }

    /// True when the resource data family agrees with the record type.
    pub fn is_consistent(&self) -> bool {
        matches!(
            (self.record_type, self.address),
            (RecordType::A, IpAddr::V4(_)) | (RecordType::AAAA, IpAddr::V6(_))
        )
    }
}
