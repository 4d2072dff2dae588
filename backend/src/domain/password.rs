//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`) carrying their
//! own salt and parameters. Verification runs in constant time inside the
//! `argon2` crate.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash as PhcHash};
use thiserror::Error;

/// Failure to produce or parse a password hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("stored password hash is malformed: {0}")]
    Malformed(String),
}

/// PHC-format Argon2id hash of a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn generate(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError::Hash(err.to_string()))
    }

    /// Wrap a hash read back from storage.
    pub fn from_stored(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `candidate` is the password this hash was generated from.
    pub fn verify(&self, candidate: &str) -> Result<bool, PasswordHashError> {
        let parsed =
            PhcHash::new(&self.0).map_err(|err| PasswordHashError::Malformed(err.to_string()))?;
        Ok(Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hash() -> PasswordHash {
        PasswordHash::generate("s3cret pass").expect("hash")
    }

    #[rstest]
    fn hash_is_argon2id_phc_and_not_plaintext(hash: PasswordHash) {
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("s3cret pass"));
    }

    #[rstest]
    #[case("s3cret pass", true)]
    #[case("s3cret pass ", false)]
    #[case("S3cret pass", false)]
    #[case("", false)]
    fn verifies_only_the_exact_password(
        hash: PasswordHash,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(hash.verify(candidate).expect("well-formed hash"), expected);
    }

    #[rstest]
    fn same_password_gets_distinct_salts() {
        let a = PasswordHash::generate("pw").expect("hash");
        let b = PasswordHash::generate("pw").expect("hash");
        assert_ne!(a, b);
    }

    #[rstest]
    fn plaintext_in_storage_is_reported_malformed() {
        let stored = PasswordHash::from_stored("hunter2");
        assert!(matches!(
            stored.verify("hunter2"),
            Err(PasswordHashError::Malformed(_))
        ));
    }
}
