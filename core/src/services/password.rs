//! Password hashing via bcrypt.

use tracing::warn;

use crate::errors::{DomainError, DomainResult};

/// Production bcrypt cost factor
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest cost bcrypt accepts, for tests only
pub const MIN_COST: u32 = 4;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("bcrypt hash: {}", e),
    })
}

/// Verify a password against a stored bcrypt hash
///
/// A malformed hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Passw0rd!", MIN_COST).unwrap();

        assert_ne!(hash, "Passw0rd!");
        assert!(verify_password("Passw0rd!", &hash));
        assert!(!verify_password("passw0rd!", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("Passw0rd!", MIN_COST).unwrap();
        let second = hash_password("Passw0rd!", MIN_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_password("Passw0rd!", "not-a-bcrypt-hash"));
        assert!(!verify_password("Passw0rd!", ""));
    }
}
