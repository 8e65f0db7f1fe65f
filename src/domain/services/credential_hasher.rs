use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{
    error::DomainError,
    models::{credential::HashedPassword, hasher_config::HasherConfig, record::FieldAccess},
    services::{lifecycle::LifecycleHooks, password_service::PasswordHasher},
};

const TRACING_TARGET: &str = "credential_hasher::credential_hasher";

/// Hashes the configured password field of a record before it is persisted
///
/// Plaintext is hashed exactly once: empty values are refused unless the
/// configuration allows them, and values that already look like a hash are
/// refused instead of being hashed again. Hashing runs on the blocking pool.
#[derive(Clone)]
pub struct CredentialHasher<P: PasswordHasher> {
    config: HasherConfig,
    password_hasher: P,
}

impl<P> CredentialHasher<P>
where
    P: PasswordHasher + Send + Sync + 'static,
{
    pub fn new(config: HasherConfig, password_hasher: P) -> Self {
        Self {
            config,
            password_hasher,
        }
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Check a candidate against the hash stored in the record's password field
    ///
    /// An absent field is verified as an empty hash and fails as malformed.
    pub async fn verify_password<R>(&self, record: &R, candidate: &str) -> Result<bool, DomainError>
    where
        R: FieldAccess + ?Sized,
    {
        let stored = record
            .get_field(self.config.password_field())?
            .unwrap_or_default();
        let hasher = self.password_hasher.clone();
        let candidate = candidate.to_string();

        tokio::task::spawn_blocking(move || {
            hasher.verify(&candidate, &HashedPassword::new(stored))
        })
        .await?
    }

    async fn hash_field<R>(&self, record: &mut R) -> Result<(), DomainError>
    where
        R: FieldAccess + Send + ?Sized,
    {
        let field = self.config.password_field();

        let plaintext = match record.get_field(field)? {
            Some(value) if !value.is_empty() => value,
            _ if self.config.allow_empty_password() => {
                tracing::debug!(target: TRACING_TARGET, field = %field, "empty password allowed, leaving field as is");
                return Ok(());
            }
            _ => return Err(DomainError::EmptyPassword),
        };

        if self.password_hasher.is_hash(&plaintext) {
            tracing::warn!(target: TRACING_TARGET, field = %field, "refusing to hash a value that is already a hash");
            return Err(DomainError::DoubleHash);
        }

        let hasher = self.password_hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await??;

        record.set_field(field, hash.into_string())?;
        tracing::debug!(target: TRACING_TARGET, field = %field, "password field hashed");

        Ok(())
    }
}

#[async_trait]
impl<R, P> LifecycleHooks<R> for CredentialHasher<P>
where
    R: FieldAccess + Send,
    P: PasswordHasher + Send + Sync + 'static,
{
    async fn before_create(&self, record: &mut R) -> Result<(), DomainError> {
        self.hash_field(record).await
    }

    async fn before_update(
        &self,
        record: &mut R,
        changed_fields: &HashSet<String>,
    ) -> Result<(), DomainError> {
        if !changed_fields.contains(self.config.password_field()) {
            tracing::trace!(target: TRACING_TARGET, "password field unchanged, skipping");
            return Ok(());
        }

        self.hash_field(record).await
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        domain::models::record::Record,
        infrastructure::argon2_password_hasher::{Argon2PasswordHasher, verify},
    };

    type Hasher = CredentialHasher<Argon2PasswordHasher>;

    #[fixture]
    fn hasher() -> Hasher {
        CredentialHasher::new(HasherConfig::default(), Argon2PasswordHasher::new())
    }

    fn changed(fields: &[&str]) -> HashSet<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn stored(record: &Record, field: &str) -> String {
        record.get_field(field).unwrap().expect("field is set")
    }

    #[rstest]
    #[case("Turtle123!")]
    #[case("test")]
    #[case("pässwörd with spaces")]
    #[tokio::test]
    async fn create_hashes_plaintext(hasher: Hasher, #[case] plaintext: &str) {
        let mut record = Record::new().with("password", plaintext);

        hasher.before_create(&mut record).await.unwrap();

        let hash = stored(&record, "password");
        assert_ne!(hash, plaintext);
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify(plaintext, &hash).unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn create_refuses_existing_hash(hasher: Hasher) {
        let mut record = Record::new().with("password", "Turtle123!");
        hasher.before_create(&mut record).await.unwrap();

        let err = hasher.before_create(&mut record).await.unwrap_err();
        assert!(matches!(err, DomainError::DoubleHash));
        assert_eq!(err.to_string(), "Argon2 tried to hash another Argon2 hash");

        let err = hasher
            .before_update(&mut record, &changed(&["password"]))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DoubleHash));
    }

    #[rstest]
    #[case(Record::new())]
    #[case(Record::new().with("password", ""))]
    #[case(Record::new().with("password", Value::Null))]
    #[tokio::test]
    async fn create_refuses_empty_password(hasher: Hasher, #[case] mut record: Record) {
        let err = hasher.before_create(&mut record).await.unwrap_err();

        assert!(matches!(err, DomainError::EmptyPassword));
        assert_eq!(err.to_string(), "password must not be empty");
    }

    #[rstest]
    #[case(Record::new())]
    #[case(Record::new().with("password", ""))]
    #[case(Record::new().with("password", Value::Null))]
    #[tokio::test]
    async fn create_keeps_empty_password_when_allowed(#[case] mut record: Record) {
        let hasher = CredentialHasher::new(
            HasherConfig::default().with_allow_empty_password(true),
            Argon2PasswordHasher::new(),
        );
        let before = record.clone();

        hasher.before_create(&mut record).await.unwrap();

        assert_eq!(record, before);
        assert_eq!(record.get_field("password").unwrap().unwrap_or_default(), "");
    }

    #[rstest]
    #[case(Record::new().with("password", ""))]
    #[case(Record::new().with("password", Value::Null))]
    #[tokio::test]
    async fn update_to_empty_password_when_allowed(#[case] mut record: Record) {
        let hasher = CredentialHasher::new(
            HasherConfig::default().with_allow_empty_password(true),
            Argon2PasswordHasher::new(),
        );
        let before = record.clone();

        hasher
            .before_update(&mut record, &changed(&["password"]))
            .await
            .unwrap();

        assert_eq!(record, before);
        assert_eq!(record.get_field("password").unwrap().unwrap_or_default(), "");
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_other_fields_keeps_hash(hasher: Hasher) {
        let mut record = Record::new()
            .with("name", "Leonardo")
            .with("password", "Turtle123!");
        hasher.before_create(&mut record).await.unwrap();
        let original = stored(&record, "password");

        record.insert("name", "Raphael");
        hasher
            .before_update(&mut record, &changed(&["name"]))
            .await
            .unwrap();

        assert_eq!(stored(&record, "password"), original);
        assert_eq!(record.get("name"), Some(&json!("Raphael")));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_other_fields_ignores_empty_password(hasher: Hasher) {
        let mut record = Record::new().with("name", "Leonardo");

        hasher
            .before_update(&mut record, &changed(&["name"]))
            .await
            .unwrap();

        assert!(!record.contains("password"));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_password_rehashes(hasher: Hasher) {
        let mut record = Record::new().with("password", "Turtle123!");
        hasher.before_create(&mut record).await.unwrap();

        record.insert("password", "Monkey69!");
        hasher
            .before_update(&mut record, &changed(&["password"]))
            .await
            .unwrap();

        let hash = stored(&record, "password");
        assert!(verify("Monkey69!", &hash).unwrap());
        assert!(!verify("Turtle123!", &hash).unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn update_to_empty_password_is_refused(hasher: Hasher) {
        let mut record = Record::new().with("password", "");

        let err = hasher
            .before_update(&mut record, &changed(&["password"]))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::EmptyPassword));
    }

    #[tokio::test]
    async fn custom_password_field() {
        let hasher = CredentialHasher::new(
            HasherConfig::default().with_password_field("hash"),
            Argon2PasswordHasher::new(),
        );
        let mut record = Record::new()
            .with("hash", "Turtle123!")
            .with("password", "untouched");

        hasher.before_create(&mut record).await.unwrap();

        assert!(verify("Turtle123!", &stored(&record, "hash")).unwrap());
        assert_eq!(stored(&record, "password"), "untouched");
        assert!(hasher.verify_password(&record, "Turtle123!").await.unwrap());

        hasher
            .before_update(&mut record, &changed(&["password"]))
            .await
            .unwrap();
        assert_eq!(stored(&record, "password"), "untouched");

        let mut empty = Record::new().with("password", "Turtle123!");
        assert!(matches!(
            hasher.before_create(&mut empty).await,
            Err(DomainError::EmptyPassword)
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn verify_password_uses_record_hash(hasher: Hasher) {
        let mut record = Record::new().with("password", "test");
        hasher.before_create(&mut record).await.unwrap();

        assert!(hasher.verify_password(&record, "test").await.unwrap());
        assert!(!hasher.verify_password(&record, "not-the-same").await.unwrap());
    }

    #[rstest]
    #[case(Record::new())]
    #[case(Record::new().with("password", "plaintext"))]
    #[tokio::test]
    async fn verify_password_fails_without_hash(hasher: Hasher, #[case] record: Record) {
        assert!(matches!(
            hasher.verify_password(&record, "plaintext").await,
            Err(DomainError::MalformedHash)
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn non_text_password_is_rejected(hasher: Hasher) {
        let mut record = Record::new().with("password", 1234);

        assert!(matches!(
            hasher.before_create(&mut record).await,
            Err(DomainError::InvalidFieldType(_))
        ));
    }
}
