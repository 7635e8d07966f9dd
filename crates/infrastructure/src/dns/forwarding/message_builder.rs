//! DNS Message Builder
//!
//! Constructs the outbound query sent to the DNS-over-TLS upstream.

use super::record_type_map::RecordTypeMapper;
use crate::dns::names::to_hickory_name;
use dotproxy_domain::{DomainError, Question};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::DNSClass;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `question` and return its ID with the bytes
    ///
    /// The ID is random and independent of the client's ID; the caller uses
    /// it to match the upstream response. The upstream is always asked in
    /// class IN whatever class the client used.
    pub fn build_query_with_id(question: &Question) -> Result<(u16, Vec<u8>), DomainError> {
        Self::build_query_with_given_id(fastrand::u16(..), question)
    }

    pub fn build_query_with_given_id(
        id: u16,
        question: &Question,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let mut query = Self::build_question(question)?;
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Question section entry for `question`, name case preserved
    pub(crate) fn build_question(question: &Question) -> Result<Query, DomainError> {
        let mut query = Query::new();
        query.set_name(to_hickory_name(&question.name)?);
        query.set_query_type(RecordTypeMapper::to_hickory(&question.record_type));
        query.set_query_class(RecordTypeMapper::class_to_hickory(&question.class));
        Ok(query)
    }

    /// Serialize a Message to wire format bytes
    pub(crate) fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::SerializationFailed(e.to_string()))?;

        Ok(buf)
    }
}
