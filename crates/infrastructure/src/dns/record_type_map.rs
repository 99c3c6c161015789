//! Mapping from `hickory_proto::rr::RecordType` to `fdns_domain::RecordType`

use fdns_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

/// Maps query types read off the wire to the types the server answers
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert hickory RecordType → domain RecordType (for incoming queries)
    ///
    /// Returns `None` for types the server never answers.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::CNAME => Some(RecordType::CNAME),
            HickoryRecordType::MX => Some(RecordType::MX),
            HickoryRecordType::NS => Some(RecordType::NS),
            HickoryRecordType::TXT => Some(RecordType::TXT),
            _ => None,
        }
    }
}
