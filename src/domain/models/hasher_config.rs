use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub const DEFAULT_PASSWORD_FIELD: &str = "password";

const PASSWORD_FIELD_VAR: &str = "PASSWORD_FIELD";
const ALLOW_EMPTY_PASSWORD_VAR: &str = "ALLOW_EMPTY_PASSWORD";

/// Settings shared by every hashing transform of one host type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherConfig {
    password_field: String,
    allow_empty_password: bool,
}

impl HasherConfig {
    pub fn new() -> Self {
        Self {
            password_field: DEFAULT_PASSWORD_FIELD.to_string(),
            allow_empty_password: false,
        }
    }

    pub fn with_password_field(mut self, field: impl Into<String>) -> Self {
        self.password_field = field.into();
        self
    }

    pub fn with_allow_empty_password(mut self, allow: bool) -> Self {
        self.allow_empty_password = allow;
        self
    }

    /// Load from `PASSWORD_FIELD` and `ALLOW_EMPTY_PASSWORD`, falling back
    /// to the defaults for unset variables
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let mut config = Self::new();

        if let Some(field) = lookup(PASSWORD_FIELD_VAR) {
            if field.trim().is_empty() {
                return Err(DomainError::InvalidConfig(format!(
                    "{PASSWORD_FIELD_VAR} must not be blank"
                )));
            }
            config.password_field = field.trim().to_string();
        }

        if let Some(flag) = lookup(ALLOW_EMPTY_PASSWORD_VAR) {
            config.allow_empty_password = parse_flag(ALLOW_EMPTY_PASSWORD_VAR, &flag)?;
        }

        Ok(config)
    }

    pub fn password_field(&self) -> &str {
        &self.password_field
    }

    pub fn allow_empty_password(&self) -> bool {
        self.allow_empty_password
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(DomainError::InvalidConfig(format!(
            "{name} expects a boolean, got {other:?}"
        ))),
    }
}
