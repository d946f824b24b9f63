use tracing::{debug, warn};
use trust_dns_proto::op::{Message, MessageType, ResponseCode};
use trust_dns_proto::rr::rdata::TXT;
use trust_dns_proto::rr::{RData, Record, RecordType};

/// TTL for challenge TXT answers. The record is throwaway and must not be cached.
const CHALLENGE_TTL: u32 = 0;

/// Answers DNS questions for exactly one `(fqdn, TXT)` pair.
///
/// A `Handler` is parameterized once at construction and holds no mutable state, so a
/// single instance can serve any number of concurrent queries.
pub(crate) struct Handler {
    fqdn: String,
    acme_response: String,
}

impl Handler {
    pub(super) fn new(fqdn: &str, value: &str) -> Self {
        Handler {
            fqdn: fqdn.to_string(),
            acme_response: value.to_string(),
        }
    }

    /// Decide the reply for one raw datagram. `None` means the request doesn't deserve
    /// a reply at all and the datagram is dropped on the floor.
    pub(super) fn handle_raw(&self, datagram: &[u8]) -> Option<Vec<u8>> {
        let request = match Message::from_vec(datagram) {
            Ok(request) => request,
            Err(err) => {
                warn!("dropping undecodable dns request: {err}");
                return None;
            }
        };
        let response = self.handle_query(&request)?;
        match response.to_vec() {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!("failed to encode dns response: {err}");
                None
            }
        }
    }

    /// The matching rule: the first question must name the configured FQDN exactly
    /// (case-sensitive, trailing-dot form) and ask for `TXT`. Anything else is answered
    /// authoritatively with NXDOMAIN; a request carrying no questions gets no answer.
    fn handle_query(&self, request: &Message) -> Option<Message> {
        let question = match request.queries().first() {
            Some(question) => question,
            None => {
                warn!("invalid dns request - no questions. force close connection");
                return None;
            }
        };

        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_authoritative(true)
            .set_recursion_available(false);
        response.add_query(question.clone());

        if question.name().to_string() == self.fqdn && question.query_type() == RecordType::TXT {
            debug!(
                "dns response: found, request: {} {}",
                question.name(),
                question.query_type()
            );
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                CHALLENGE_TTL,
                RData::TXT(TXT::new(vec![self.acme_response.clone()])),
            ));
        } else {
            debug!(
                "dns response: not found, request: {} {}",
                question.name(),
                question.query_type()
            );
            response.set_response_code(ResponseCode::NXDomain);
        }
        Some(response)
    }
}
