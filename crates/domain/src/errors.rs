use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid shared secret: {0}")]
    InvalidSharedSecret(String),

    #[error("Request carries no question")]
    EmptyQuestion,

    #[error("Not authoritative for {0}")]
    NotAuthoritative(String),
}
