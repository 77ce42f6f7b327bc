//! Cache key derivation.

use crate::types::Credential;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a credential. The credential itself is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hash: String,
}

impl CacheKey {
    pub fn from_credential(credential: &Credential) -> Self {
        Self {
            hash: sha256_hex(credential.expose()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Short prefix, safe for log fields.
    pub fn short(&self) -> &str {
        &self.hash[..12]
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

pub(crate) fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
