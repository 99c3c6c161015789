use fdns_domain::record_builder::{
    build_address, build_alias, build_mail_exchange, build_nameserver, build_text,
};
use fdns_domain::{
    AnswerRecord, DomainError, QueryBindings, Question, RecordType, ZoneEntry, ZoneRequest,
};
use std::sync::Arc;
use tracing::debug;

/// Answers queries from the registered zone bindings.
///
/// The binding is chosen from the first question; every question of the
/// request is then answered from that binding, echoing the queried name.
pub struct HandleZoneQueryUseCase {
    bindings: Arc<QueryBindings>,
}

impl HandleZoneQueryUseCase {
    pub fn new(bindings: Arc<QueryBindings>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &QueryBindings {
        &self.bindings
    }

    pub fn execute(&self, request: &ZoneRequest) -> Result<Vec<AnswerRecord>, DomainError> {
        let first = request.questions.first().ok_or(DomainError::EmptyQuestion)?;

        let entry = self
            .bindings
            .lookup(&first.name)
            .ok_or_else(|| DomainError::NotAuthoritative(first.name.clone()))?;

        let mut answers = Vec::new();
        for question in &request.questions {
            debug!(
                name = %question.name,
                record_type = ?question.record_type,
                zone = %entry.fqdn(),
                client = %request.client_ip,
                "Requested"
            );
            answers.extend(Self::answer(entry, question));
        }

        Ok(answers)
    }

    fn answer(entry: &ZoneEntry, question: &Question) -> Option<AnswerRecord> {
        let name = question.name.as_str();

        match question.record_type? {
            RecordType::A => entry
                .address()
                .filter(|(ip, _)| ip.is_ipv4())
                .map(|(ip, ttl)| build_address(name, ip, ttl)),
            RecordType::AAAA => entry
                .address()
                .filter(|(ip, _)| ip.is_ipv6())
                .map(|(ip, ttl)| build_address(name, ip, ttl)),
            RecordType::MX => entry
                .mail_exchange()
                .map(|(target, priority, ttl)| build_mail_exchange(name, target, priority, ttl)),
            RecordType::TXT => entry
                .text()
                .map(|(content, ttl)| build_text(name, content, ttl)),
            RecordType::CNAME => entry
                .alias()
                .map(|(target, ttl)| build_alias(name, target, ttl)),
            RecordType::NS => entry
                .nameserver()
                .map(|(target, ttl)| build_nameserver(name, target, ttl)),
        }
    }
}
