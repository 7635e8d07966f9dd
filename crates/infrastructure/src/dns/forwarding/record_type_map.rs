//! Mapping between the domain DNS vocabulary and `hickory_proto` types.
//!
//! Record types, classes and response codes travel through their numeric
//! wire codes so values without a named variant survive in both directions.

use dotproxy_domain::{DomainError, MessageType, OpCode, RecordClass, RecordType, ResponseCode};
use hickory_proto::op::{
    MessageType as HickoryMessageType, OpCode as HickoryOpCode,
    ResponseCode as HickoryResponseCode,
};
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};

/// Bidirectional mapper between domain and hickory types
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        record_type.to_u16().into()
    }

    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }

    pub fn class_to_hickory(class: &RecordClass) -> DNSClass {
        match class {
            RecordClass::IN => DNSClass::IN,
            RecordClass::CH => DNSClass::CH,
            RecordClass::HS => DNSClass::HS,
            RecordClass::NONE => DNSClass::NONE,
            RecordClass::ANY => DNSClass::ANY,
            RecordClass::Unknown(code) => DNSClass::Unknown(*code),
        }
    }

    pub fn class_from_hickory(class: DNSClass) -> RecordClass {
        RecordClass::from_u16(u16::from(class))
    }

    pub fn rcode_to_hickory(rcode: &ResponseCode) -> HickoryResponseCode {
        rcode.to_u16().into()
    }

    pub fn rcode_from_hickory(rcode: HickoryResponseCode) -> ResponseCode {
        ResponseCode::from_u16(u16::from(rcode))
    }

    pub fn op_code_to_hickory(op_code: &OpCode) -> HickoryOpCode {
        match op_code {
            OpCode::Query => HickoryOpCode::Query,
            OpCode::Status => HickoryOpCode::Status,
            OpCode::Notify => HickoryOpCode::Notify,
            OpCode::Update => HickoryOpCode::Update,
        }
    }

    #[allow(unreachable_patterns)]
    pub fn op_code_from_hickory(op_code: HickoryOpCode) -> Result<OpCode, DomainError> {
        match op_code {
            HickoryOpCode::Query => Ok(OpCode::Query),
            HickoryOpCode::Status => Ok(OpCode::Status),
            HickoryOpCode::Notify => Ok(OpCode::Notify),
            HickoryOpCode::Update => Ok(OpCode::Update),
            other => Err(DomainError::InvalidDnsMessage(format!(
                "unsupported opcode {:?}",
                other
            ))),
        }
    }

    pub fn message_type_to_hickory(message_type: &MessageType) -> HickoryMessageType {
        match message_type {
            MessageType::Query => HickoryMessageType::Query,
            MessageType::Response => HickoryMessageType::Response,
        }
    }

    pub fn message_type_from_hickory(message_type: HickoryMessageType) -> MessageType {
        match message_type {
            HickoryMessageType::Query => MessageType::Query,
            HickoryMessageType::Response => MessageType::Response,
        }
    }
}
