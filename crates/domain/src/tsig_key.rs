use crate::dns_name;
use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

/// Shared secret used to authenticate signed requests.
///
/// Parsed from the `keyname:base64secret` command-line form. The key name is
/// made fully qualified; the secret stays base64 encoded until a verifier
/// decodes it.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecretKey {
    pub name: String,
    pub secret: String,
}

impl SharedSecretKey {
    pub fn new(name: &str, secret: impl Into<String>) -> Self {
        Self {
            name: dns_name::fqdn(name),
            secret: secret.into(),
        }
    }

    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}

impl FromStr for SharedSecretKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, secret) = s.split_once(':').ok_or_else(|| {
            DomainError::InvalidSharedSecret(format!("expected keyname:base64secret, got '{}'", s))
        })?;

        if name.is_empty() {
            return Err(DomainError::InvalidSharedSecret(
                "key name is empty".to_string(),
            ));
        }
        if dns_name::is_domain_name(name).is_none() {
            return Err(DomainError::InvalidDomainName(name.to_string()));
        }

        Ok(Self::new(name, secret))
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for SharedSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecretKey")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}
