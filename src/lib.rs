//! Automatic Argon2 hashing of a record's password field.
//!
//! [`CredentialHasher`] is handed to a persistence layer as its
//! [`LifecycleHooks`]: it hashes the configured field before a record is
//! inserted, and before an update only when that update sets the field.
//! Empty passwords and values that are already hashes are refused.
//! [`verify`] and [`CredentialHasher::verify_password`] check candidates
//! against stored hashes.
//!
//! The `infrastructure` and `presentation` modules hold an account service
//! built on these hooks with sea-orm and axum.

pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod usecase;

pub use domain::{
    error::DomainError,
    models::{
        credential::HashedPassword,
        hasher_config::HasherConfig,
        record::{FieldAccess, Record},
    },
    services::{
        credential_hasher::CredentialHasher, lifecycle::LifecycleHooks,
        password_service::PasswordHasher,
    },
};
pub use infrastructure::argon2_password_hasher::{Argon2PasswordHasher, verify};
