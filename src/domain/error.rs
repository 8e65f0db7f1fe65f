use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("Argon2 tried to hash another Argon2 hash")]
    DoubleHash,

    #[error("Malformed password hash")]
    MalformedHash,

    #[error("Password hashing failed: {0}")]
    Hashing(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field does not hold text: {0}")]
    InvalidFieldType(String),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Empty username")]
    EmptyUsername,

    #[error("Empty display name")]
    EmptyDisplayName,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    /// Errors caused by the submitted data rather than by the system
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyPassword
                | Self::DoubleHash
                | Self::EmptyUsername
                | Self::EmptyDisplayName
                | Self::InvalidFieldType(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
