//! Wire codec backed by `hickory_proto`.
//!
//! Only the header, the question section and address answers are modelled.
//! Authority and additional sections of inbound messages are dropped.

use crate::dns::forwarding::{MessageBuilder, RecordTypeMapper};
use crate::dns::names::{from_hickory_name, to_hickory_name};
use dotproxy_application::ports::MessageCodec;
use dotproxy_domain::{AnswerRecord, DnsHeader, DnsMessage, DomainError, Question};
use hickory_proto::op::Message;
use hickory_proto::rr::{rdata, RData, Record};
use std::net::IpAddr;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryMessageCodec;

impl HickoryMessageCodec {
    pub fn new() -> Self {
        Self
    }

    fn answer_to_hickory(answer: &AnswerRecord) -> Result<Record, DomainError> {
        if !answer.is_consistent() {
            return Err(DomainError::SerializationFailed(format!(
                "{} record for {} carries address {}",
                answer.record_type, answer.name, answer.address
            )));
        }

        let rdata = match answer.address {
            IpAddr::V4(ipv4) => RData::A(rdata::A(ipv4)),
            IpAddr::V6(ipv6) => RData::AAAA(rdata::AAAA(ipv6)),
        };

        let mut record = Record::from_rdata(to_hickory_name(&answer.name)?, answer.ttl, rdata);
        record.set_dns_class(RecordTypeMapper::class_to_hickory(&answer.class));
        Ok(record)
    }

    fn answer_from_hickory(record: &Record) -> Option<AnswerRecord> {
        let address = match record.data() {
            RData::A(a) => IpAddr::V4(a.0),
            RData::AAAA(aaaa) => IpAddr::V6(aaaa.0),
            _ => return None,
        };

        Some(AnswerRecord::new(
            from_hickory_name(record.name()),
            RecordTypeMapper::from_hickory(record.record_type()),
            RecordTypeMapper::class_from_hickory(record.dns_class()),
            record.ttl(),
            address,
        ))
    }
}

impl MessageCodec for HickoryMessageCodec {
    fn parse(&self, bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

        let header = DnsHeader {
            id: message.id(),
            message_type: RecordTypeMapper::message_type_from_hickory(message.message_type()),
            op_code: RecordTypeMapper::op_code_from_hickory(message.op_code())?,
            authoritative: message.authoritative(),
            truncated: message.truncated(),
            recursion_desired: message.recursion_desired(),
            recursion_available: message.recursion_available(),
            response_code: RecordTypeMapper::rcode_from_hickory(message.response_code()),
        };

        let questions: Vec<Question> = message
            .queries()
            .iter()
            .map(|query| {
                Question::new(
                    from_hickory_name(query.name()),
                    RecordTypeMapper::from_hickory(query.query_type()),
                    RecordTypeMapper::class_from_hickory(query.query_class()),
                )
            })
            .collect();

        if questions.is_empty() {
            return Err(DomainError::InvalidDnsMessage(
                "message has no question".to_string(),
            ));
        }

        let mut answers = Vec::with_capacity(message.answers().len());
        for record in message.answers() {
            match Self::answer_from_hickory(record) {
                Some(answer) => answers.push(answer),
                None => debug!(
                    record_type = %RecordTypeMapper::from_hickory(record.record_type()),
                    "Skipping non-address answer"
                ),
            }
        }

        Ok(DnsMessage {
            header,
            questions,
            answers,
        })
    }

    fn serialize(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        if message.questions.is_empty() {
            return Err(DomainError::SerializationFailed(
                "message has no question".to_string(),
            ));
        }

        let header = &message.header;

        let mut wire = Message::new(
            header.id,
            RecordTypeMapper::message_type_to_hickory(&header.message_type),
            RecordTypeMapper::op_code_to_hickory(&header.op_code),
        );
        wire.set_authoritative(header.authoritative);
        wire.set_truncated(header.truncated);
        wire.set_recursion_desired(header.recursion_desired);
        wire.set_recursion_available(header.recursion_available);
        wire.set_response_code(RecordTypeMapper::rcode_to_hickory(&header.response_code));

        for question in &message.questions {
            wire.add_query(MessageBuilder::build_question(question)?);
        }

        for answer in &message.answers {
            wire.add_answer(Self::answer_to_hickory(answer)?);
        }

        MessageBuilder::serialize_message(&wire)
    }
}
