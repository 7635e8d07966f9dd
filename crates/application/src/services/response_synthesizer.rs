use dotproxy_domain::{AnswerRecord, DnsHeader, DnsMessage, MessageType, OpCode, ResponseCode};

/// Builds reply messages from an untouched request.
///
/// The request is only read; every reply is a new value carrying the
/// request's id, RD bit and question section.
pub struct ResponseSynthesizer;

impl ResponseSynthesizer {
    pub fn build_success(request: &DnsMessage, answers: Vec<AnswerRecord>) -> DnsMessage {
        DnsMessage {
            header: Self::response_header(&request.header, ResponseCode::NoError),
            questions: request.questions.clone(),
            answers,
        }
    }

    /// NOTIMP reply for question types the proxy does not forward.
    pub fn build_error(request: &DnsMessage) -> DnsMessage {
        DnsMessage {
            header: Self::response_header(&request.header, ResponseCode::NotImp),
            questions: request.questions.clone(),
            answers: Vec::new(),
        }
    }

    fn response_header(request: &DnsHeader, response_code: ResponseCode) -> DnsHeader {
        DnsHeader {
            message_type: MessageType::Response,
            op_code: OpCode::Query,
            response_code,
            recursion_available: true,
            ..*request
        }
    }
}
