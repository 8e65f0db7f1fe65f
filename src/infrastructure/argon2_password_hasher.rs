use argon2::{
    Algorithm, Argon2, PasswordHash as Argon2Hash,
    password_hash::{
        Error as ArgonError, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use crate::domain::{
    error::DomainError,
    models::credential::HashedPassword,
    services::password_service::PasswordHasher,
};

const TRACING_TARGET: &str = "credential_hasher::argon2";

#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let salt = SaltString::generate(OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(plain_password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(target: TRACING_TARGET, error = %e, "password hashing failed");
                DomainError::Hashing(Box::new(e))
            })?
            .to_string();

        Ok(HashedPassword::new(hash))
    }

    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
        verify(plain_password, hashed_password.as_str())
    }

    fn is_hash(&self, value: &str) -> bool {
        is_argon2_hash(value)
    }
}

/// Check a plaintext candidate against a stored Argon2 PHC string
///
/// The stored string carries its own algorithm, version and parameters, so
/// no configuration is needed. Only a wrong candidate yields `Ok(false)`:
/// a stored string that is not a usable Argon2 hash (unparsable, another
/// algorithm, invalid parameters) is `MalformedHash`, and an internal engine
/// failure is returned as `Hashing`.
pub fn verify(candidate: &str, stored_hash: &str) -> Result<bool, DomainError> {
    let parsed_hash = Argon2Hash::new(stored_hash).map_err(|e| {
        tracing::warn!(target: TRACING_TARGET, error = %e, "invalid password hash format");
        DomainError::MalformedHash
    })?;

    match Argon2::default().verify_password(candidate.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(ArgonError::Password) => Ok(false),
        Err(e @ ArgonError::Crypto) => {
            tracing::error!(target: TRACING_TARGET, error = %e, "password verification failed");
            Err(DomainError::Hashing(Box::new(e)))
        }
        Err(e) => {
            tracing::warn!(target: TRACING_TARGET, error = %e, "stored hash is not a usable Argon2 hash");
            Err(DomainError::MalformedHash)
        }
    }
}

/// Syntactic check for the leading `$argon2id$v=19$m=..,t=..,p=..` part of
/// a PHC string. Salt and output segments are not inspected.
pub fn is_argon2_hash(value: &str) -> bool {
    let mut segments = value.split('$');

    if segments.next() != Some("") {
        return false;
    }

    let Some(ident) = segments.next() else {
        return false;
    };
    let known = [Algorithm::Argon2d, Algorithm::Argon2i, Algorithm::Argon2id];
    if !known.iter().any(|algorithm| algorithm.as_str() == ident) {
        return false;
    }

    let version_ok = segments
        .next()
        .and_then(|s| s.strip_prefix("v="))
        .is_some_and(is_number);
    if !version_ok {
        return false;
    }

    let Some(params) = segments.next() else {
        return false;
    };
    let mut params = params.split(',');
    ["m=", "t=", "p="].iter().all(|key| {
        params
            .next()
            .and_then(|param| param.strip_prefix(key))
            .is_some_and(is_number)
    })
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
