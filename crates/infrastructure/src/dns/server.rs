use crate::dns::listener::TransportKind;
use crate::dns::record_encoder;
use crate::dns::record_type_map::RecordTypeMapper;
use crate::dns::tsig::{TsigReply, TsigVerifier};
use fdns_application::use_cases::HandleZoneQueryUseCase;
use fdns_domain::{AnswerRecord, DomainError, Question, ZoneRequest};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Payload limit for UDP responses when the client does not advertise one.
const MIN_UDP_PAYLOAD: u16 = 512;

/// Turns raw request bytes into raw response bytes.
///
/// Shared by the UDP and TCP listeners. Holds no mutable state, so one
/// instance serves every request concurrently.
pub struct DnsServerHandler {
    use_case: Arc<HandleZoneQueryUseCase>,
    verifier: Option<Arc<TsigVerifier>>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleZoneQueryUseCase>) -> Self {
        Self {
            use_case,
            verifier: None,
        }
    }

    pub fn with_verifier(mut self, verifier: TsigVerifier) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    pub fn verifies_signatures(&self) -> bool {
        self.verifier.is_some()
    }

    /// Returns `None` when nothing should be sent back (responses, or
    /// garbage too short to carry a message id).
    pub fn handle_raw(
        &self,
        query: &[u8],
        client: SocketAddr,
        transport: TransportKind,
    ) -> Option<Vec<u8>> {
        let request = match Message::from_vec(query) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %client, error = %e, "Failed to parse DNS message");
                return Self::format_error(query);
            }
        };

        if request.message_type() != MessageType::Query {
            debug!(client = %client, "Ignoring DNS response sent to server");
            return None;
        }

        let tsig = self
            .verifier
            .as_ref()
            .map(|verifier| TsigReply::from(verifier.verify(query)));
        let response = self.respond(&request, tsig.as_ref(), client);
        self.encode(&request, response, tsig.as_ref(), transport)
    }

    fn respond(&self, request: &Message, tsig: Option<&TsigReply>, client: SocketAddr) -> Message {
        if let Some(TsigReply::Reject(e)) = tsig {
            warn!(client = %client, error = %e, "Rejecting unauthenticated request");
            return Self::response_for(request, ResponseCode::NotAuth);
        }

        if request.op_code() != OpCode::Query {
            debug!(op_code = ?request.op_code(), "Unsupported opcode");
            return Self::response_for(request, ResponseCode::NotImp);
        }

        let questions = request
            .queries()
            .iter()
            .map(|q| {
                Question::new(
                    q.name().to_ascii(),
                    RecordTypeMapper::from_hickory(q.query_type()),
                )
            })
            .collect();
        let zone_request = ZoneRequest::new(questions, client.ip());

        match self.use_case.execute(&zone_request) {
            Ok(answers) => Self::answer_response(request, &answers),
            Err(DomainError::EmptyQuestion) => {
                debug!(client = %client, "Request without question");
                Self::response_for(request, ResponseCode::FormErr)
            }
            Err(DomainError::NotAuthoritative(name)) => {
                info!(domain = %name, client = %client, "Query outside configured zones");
                Self::response_for(request, ResponseCode::Refused)
            }
            Err(e) => {
                error!(error = %e, "Query handling failed");
                Self::response_for(request, ResponseCode::ServFail)
            }
        }
    }

    fn answer_response(request: &Message, answers: &[AnswerRecord]) -> Message {
        let mut response = Self::response_for(request, ResponseCode::NoError);

        for answer in answers {
            match record_encoder::to_hickory(answer) {
                Ok(record) => {
                    response.add_answer(record);
                }
                Err(e) => {
                    warn!(name = %answer.header().name, error = %e, "Dropping unencodable record")
                }
            }
        }

        debug!(answers = response.answers().len(), "Sending response");
        response
    }

    /// Reply skeleton: same id, opcode, RD bit and questions as the request.
    fn response_for(request: &Message, code: ResponseCode) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_authoritative(code != ResponseCode::Refused)
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(false)
            .set_response_code(code);
        response.add_queries(request.queries().iter().cloned());
        response
    }

    fn format_error(query: &[u8]) -> Option<Vec<u8>> {
        let id = u16::from_be_bytes([*query.first()?, *query.get(1)?]);

        let mut response = Message::new();
        response
            .set_id(id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_response_code(ResponseCode::FormErr);
        response.to_vec().ok()
    }

    fn encode(
        &self,
        request: &Message,
        response: Message,
        tsig: Option<&TsigReply>,
        transport: TransportKind,
    ) -> Option<Vec<u8>> {
        let code = response.response_code();
        let bytes = match self.seal(response, tsig) {
            Some(bytes) => bytes,
            None => {
                return Self::response_for(request, ResponseCode::ServFail)
                    .to_vec()
                    .ok()
            }
        };

        if transport == TransportKind::Datagram && bytes.len() > Self::udp_limit(request) {
            debug!(size = bytes.len(), "Response exceeds UDP payload, truncating");
            let mut truncated = Self::response_for(request, code);
            truncated.set_truncated(true);
            return self.seal(truncated, tsig);
        }

        Some(bytes)
    }

    /// Attaches the TSIG record owed to the request, if any, and encodes.
    fn seal(&self, mut response: Message, tsig: Option<&TsigReply>) -> Option<Vec<u8>> {
        if let (Some(verifier), Some(reply)) = (&self.verifier, tsig) {
            if let Err(e) = verifier.seal(&mut response, reply) {
                error!(error = %e, "Failed to sign response");
                return None;
            }
        }

        match response.to_vec() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(error = %e, "Failed to encode response");
                None
            }
        }
    }

    fn udp_limit(request: &Message) -> usize {
        request
            .extensions()
            .as_ref()
            .map(|edns| edns.max_payload())
            .unwrap_or(MIN_UDP_PAYLOAD)
            .max(MIN_UDP_PAYLOAD) as usize
    }
}
