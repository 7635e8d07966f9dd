//! dotproxy domain layer
pub mod config;
pub mod dns_message;
pub mod dns_question;
pub mod dns_record;
pub mod errors;
pub mod transport;

pub use config::{Config, ConfigError};
pub use dns_message::{DnsHeader, DnsMessage, MessageType, OpCode, ResponseCode};
pub use dns_question::Question;
pub use dns_record::{AnswerRecord, RecordClass, RecordType};
pub use errors::DomainError;
pub use transport::ListenerProtocol;
