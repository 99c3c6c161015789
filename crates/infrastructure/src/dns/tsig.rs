//! Shared-secret (TSIG) request verification and response signing.
//!
//! The MAC computation itself is delegated to `hickory-proto`; this module
//! wires the configured key into a signer, checks the signing time window
//! and seals responses the way RFC 8945 expects.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use fdns_domain::SharedSecretKey;
use hickory_proto::dnssec::rdata::tsig::{
    make_tsig_record, message_tbs, signed_bitmessage_to_buf, TSIG,
};
use hickory_proto::dnssec::tsig::TSigner;
use hickory_proto::op::Message;
use hickory_proto::rr::Name;
use std::time::{SystemTime, UNIX_EPOCH};

pub use hickory_proto::dnssec::rdata::tsig::TsigAlgorithm;

pub const DEFAULT_ALGORITHM: &str = "hmac-sha256";

/// Allowed clock skew between signer and server, in seconds.
const DEFAULT_FUDGE: u16 = 300;

// TSIG error field values (RFC 8945, section 3).
const TSIG_NO_ERROR: u16 = 0;
const TSIG_BADSIG: u16 = 16;
const TSIG_BADKEY: u16 = 17;
const TSIG_BADTIME: u16 = 18;

#[derive(Debug, thiserror::Error)]
pub enum TsigError {
    #[error("Invalid TSIG secret for key {0}: {1}")]
    InvalidSecret(String, String),

    #[error("Unsupported TSIG algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Request carries no TSIG record")]
    Unsigned,

    #[error("Request signed with unknown key {0}")]
    UnknownKey(String),

    #[error("TSIG verification failed: {0}")]
    Verification(String),

    #[error("TSIG signature time {signed_at} is outside the allowed window")]
    Expired { request_mac: Vec<u8>, signed_at: u64 },

    #[error("Failed to sign response: {0}")]
    Signing(String),
}

/// What to attach to the response of a request that went through
/// [`TsigVerifier::verify`].
#[derive(Debug)]
pub enum TsigReply {
    /// Request verified: sign the response, chained to the request MAC.
    Sign { request_mac: Vec<u8> },
    /// Request rejected for the given reason.
    Reject(TsigError),
}

impl From<Result<Vec<u8>, TsigError>> for TsigReply {
    fn from(result: Result<Vec<u8>, TsigError>) -> Self {
        match result {
            Ok(request_mac) => TsigReply::Sign { request_mac },
            Err(e) => TsigReply::Reject(e),
        }
    }
}

pub struct TsigVerifier {
    signer: TSigner,
}

impl TsigVerifier {
    pub fn new(key: &SharedSecretKey, algorithm: TsigAlgorithm) -> Result<Self, TsigError> {
        let secret = STANDARD
            .decode(key.secret.trim())
            .map_err(|e| TsigError::InvalidSecret(key.name.clone(), e.to_string()))?;
        let signer_name = Name::from_ascii(&key.name)
            .map_err(|e| TsigError::InvalidSecret(key.name.clone(), e.to_string()))?;

        let signer = TSigner::new(secret, algorithm, signer_name, DEFAULT_FUDGE)
            .map_err(|e| TsigError::InvalidSecret(key.name.clone(), e.to_string()))?;

        Ok(Self { signer })
    }

    /// Builds a verifier for `key`, or `None` when the key has no secret.
    pub fn from_key(
        key: &SharedSecretKey,
        algorithm: TsigAlgorithm,
    ) -> Result<Option<Self>, TsigError> {
        if !key.has_secret() {
            return Ok(None);
        }
        Self::new(key, algorithm).map(Some)
    }

    pub fn signer(&self) -> &TSigner {
        &self.signer
    }

    /// Verifies the TSIG record closing `message` (raw wire bytes) and
    /// returns the request MAC the response must be chained to.
    pub fn verify(&self, message: &[u8]) -> Result<Vec<u8>, TsigError> {
        let (_, record) =
            signed_bitmessage_to_buf(None, message, true).map_err(|_| TsigError::Unsigned)?;
        if record.name() != self.signer.signer_name() {
            return Err(TsigError::UnknownKey(record.name().to_ascii()));
        }

        let (request_mac, valid, signed_at) = self
            .signer
            .verify_message_byte(None, message, true)
            .map_err(|e| TsigError::Verification(e.to_string()))?;

        if !valid.contains(&unix_now()) {
            return Err(TsigError::Expired {
                request_mac,
                signed_at,
            });
        }
        Ok(request_mac)
    }

    /// Appends the TSIG record `reply` calls for to `response`.
    ///
    /// Verified requests get a signed response. A request with a bad key or
    /// MAC gets an unsigned TSIG record carrying BADKEY or BADSIG. A request
    /// outside the time window gets a signed BADTIME record holding the
    /// server time. Unsigned requests get no TSIG record at all.
    pub fn seal(&self, response: &mut Message, reply: &TsigReply) -> Result<(), TsigError> {
        match reply {
            TsigReply::Sign { request_mac } => {
                self.sign(response, request_mac, TSIG_NO_ERROR, Vec::new())
            }
            TsigReply::Reject(TsigError::Expired { request_mac, .. }) => {
                let server_time = unix_now().to_be_bytes()[2..].to_vec();
                self.sign(response, request_mac, TSIG_BADTIME, server_time)
            }
            TsigReply::Reject(TsigError::UnknownKey(_)) => {
                self.attach_error(response, TSIG_BADKEY);
                Ok(())
            }
            TsigReply::Reject(TsigError::Verification(_)) => {
                self.attach_error(response, TSIG_BADSIG);
                Ok(())
            }
            TsigReply::Reject(_) => Ok(()),
        }
    }

    fn pre_tsig(&self, response: &Message, error: u16, other: Vec<u8>) -> TSIG {
        TSIG::new(
            self.signer.algorithm().clone(),
            unix_now(),
            self.signer.fudge(),
            Vec::new(),
            response.id(),
            error,
            other,
        )
    }

    fn sign(
        &self,
        response: &mut Message,
        request_mac: &[u8],
        error: u16,
        other: Vec<u8>,
    ) -> Result<(), TsigError> {
        let pre_tsig = self.pre_tsig(response, error, other);
        let tbs = message_tbs(
            Some(request_mac),
            &*response,
            &pre_tsig,
            self.signer.signer_name(),
        )
        .map_err(|e| TsigError::Signing(e.to_string()))?;
        let mac = self
            .signer
            .sign(&tbs)
            .map_err(|e| TsigError::Signing(e.to_string()))?;

        response.add_tsig(make_tsig_record(
            self.signer.signer_name().clone(),
            pre_tsig.set_mac(mac),
        ));
        Ok(())
    }

    fn attach_error(&self, response: &mut Message, error: u16) {
        let tsig = self.pre_tsig(response, error, Vec::new());
        response.add_tsig(make_tsig_record(self.signer.signer_name().clone(), tsig));
    }
}

pub fn parse_algorithm(name: &str) -> Result<TsigAlgorithm, TsigError> {
    match name.trim_end_matches('.').to_ascii_lowercase().as_str() {
        "hmac-sha256" => Ok(TsigAlgorithm::HmacSha256),
        "hmac-sha384" => Ok(TsigAlgorithm::HmacSha384),
        "hmac-sha512" => Ok(TsigAlgorithm::HmacSha512),
        _ => Err(TsigError::UnsupportedAlgorithm(name.to_string())),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
