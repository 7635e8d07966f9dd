#![allow(dead_code)]
use dotproxy_domain::{
    AnswerRecord, DnsHeader, DnsMessage, MessageType, Question, RecordClass, RecordType,
};
use std::collections::HashMap;
use std::net::IpAddr;

pub struct DnsMessageBuilder {
    header: DnsHeader,
    questions: Vec<Question>,
    answers: Vec<AnswerRecord>,
}

impl DnsMessageBuilder {
    pub fn query(id: u16) -> Self {
        Self {
            header: DnsHeader::query(id),
            questions: vec![],
            answers: vec![],
        }
    }

    pub fn question(mut self, name: &str, record_type: RecordType) -> Self {
        self.questions
            .push(Question::new(name, record_type, RecordClass::IN));
        self
    }

    pub fn answer(mut self, name: &str, ttl: u32, address: &str) -> Self {
        let address: IpAddr = address.parse().unwrap();
        self.answers
            .push(AnswerRecord::from_address(name, RecordClass::IN, ttl, address));
        self
    }

    pub fn response(mut self) -> Self {
        self.header.message_type = MessageType::Response;
        self
    }

    pub fn build(self) -> DnsMessage {
        DnsMessage {
            header: self.header,
            questions: self.questions,
            answers: self.answers,
        }
    }
}

/// Minimal `.env`-like source for `Config::from_lookup`.
pub struct EnvBuilder {
    values: HashMap<String, String>,
}

impl EnvBuilder {
    pub fn valid() -> Self {
        let mut values = HashMap::new();
        values.insert("HOST".to_string(), "127.0.0.1".to_string());
        values.insert("PORT".to_string(), "5353".to_string());
        values.insert(
            "TARGET_SERVER_ADDRESS".to_string(),
            "1.1.1.1:853".to_string(),
        );
        values.insert("UDP_SERVER_ENABLED".to_string(), "true".to_string());
        values.insert("TCP_SERVER_TIMEOUT".to_string(), "10".to_string());
        Self { values }
    }

    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.values.remove(key);
        self
    }

    pub fn lookup(&self) -> impl Fn(&str) -> Option<String> + '_ {
        move |key| self.values.get(key).cloned()
    }
}
