//! bcrypt password hashing

use tokio::task;

use crate::errors::DomainError;

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Hashes and verifies passwords with a fixed bcrypt cost
///
/// Both operations are CPU-bound and run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Salted bcrypt digest of `plaintext`
    ///
    /// A cost outside `4..=31` is a system error.
    pub async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::internal(e.to_string()))?
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    /// Compare `plaintext` against `digest`; a malformed digest never matches
    pub async fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        task::spawn_blocking(move || bcrypt::verify(plaintext, &digest).unwrap_or(false))
            .await
            .unwrap_or(false)
    }
}
