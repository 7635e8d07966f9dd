#![allow(dead_code)]

use async_trait::async_trait;
use dotproxy_application::ports::{DnsResolver, MessageCodec};
use dotproxy_domain::{
    AnswerRecord, DnsHeader, DnsMessage, DomainError, Question, RecordClass, RecordType,
};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Outcome = Result<Vec<AnswerRecord>, DomainError>;

/// Resolver double with the real type dispatch and canned upstream outcomes.
pub struct MockDnsResolver {
    outcomes: Mutex<HashMap<(String, RecordType), Outcome>>,
    upstream_calls: AtomicUsize,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(HashMap::new()),
            upstream_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_addresses(&self, domain: &str, record_type: RecordType, addresses: &[&str]) {
        let records = addresses
            .iter()
            .map(|a| {
                let address: IpAddr = a.parse().unwrap();
                AnswerRecord::new(domain, record_type, RecordClass::IN, 300, address)
            })
            .collect();
        self.outcomes
            .lock()
            .unwrap()
            .insert((domain.to_string(), record_type), Ok(records));
    }

    pub fn set_error(&self, domain: &str, record_type: RecordType, error: DomainError) {
        self.outcomes
            .lock()
            .unwrap()
            .insert((domain.to_string(), record_type), Err(error));
    }

    pub fn upstream_calls(&self) -> usize {
        self.upstream_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, question: &Question) -> Result<Vec<AnswerRecord>, DomainError> {
        if !question.record_type.is_address() {
            return Err(DomainError::UnsupportedQueryType(
                question.record_type.to_string(),
            ));
        }
        self.upstream_calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .get(&(question.name.to_string(), question.record_type))
            .cloned()
            .unwrap_or(Err(DomainError::NxDomain))
    }
}

/// Codec double: hands out a preset request and records every reply.
pub struct MockMessageCodec {
    request: Option<DnsMessage>,
    fail_serialize: bool,
    serialized: Mutex<Vec<DnsMessage>>,
}

impl MockMessageCodec {
    pub fn returning(request: DnsMessage) -> Self {
        Self {
            request: Some(request),
            fail_serialize: false,
            serialized: Mutex::new(vec![]),
        }
    }

    pub fn unparseable() -> Self {
        Self {
            request: None,
            fail_serialize: false,
            serialized: Mutex::new(vec![]),
        }
    }

    pub fn failing_serialize(mut self) -> Self {
        self.fail_serialize = true;
        self
    }

    pub fn serialized(&self) -> Vec<DnsMessage> {
        self.serialized.lock().unwrap().clone()
    }
}

impl MessageCodec for MockMessageCodec {
    fn parse(&self, _bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        self.request
            .clone()
            .ok_or_else(|| DomainError::InvalidDnsMessage("truncated header".to_string()))
    }

    fn serialize(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        if self.fail_serialize {
            return Err(DomainError::SerializationFailed("forced".to_string()));
        }
        self.serialized.lock().unwrap().push(message.clone());
        Ok(message.id().to_be_bytes().to_vec())
    }
}

pub fn query(id: u16, name: &str, record_type: RecordType) -> DnsMessage {
    DnsMessage::new(
        DnsHeader::query(id),
        Question::new(name, record_type, RecordClass::IN),
    )
}

/// Collects formatted log lines emitted while its guard is alive.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: std::sync::Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs an INFO-level subscriber for the current thread.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(capture.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

pub struct LogCaptureWriter {
    buffer: std::sync::Arc<Mutex<Vec<u8>>>,
}

impl std::io::Write for LogCaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogCaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}
