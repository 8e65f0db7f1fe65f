use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::{credential::HashedPassword, record::FieldAccess},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: Uuid,
    username: String,
    display_name: String,
    password: Option<HashedPassword>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        id: Uuid,
        username: String,
        display_name: String,
        password: Option<HashedPassword>,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        Self::reconstruct(id, username, display_name, password, now, now)
    }

    pub fn reconstruct(
        id: Uuid,
        username: String,
        display_name: String,
        password: Option<HashedPassword>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if username.is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        if display_name.is_empty() {
            return Err(DomainError::EmptyDisplayName);
        }

        Ok(Self {
            id,
            username,
            display_name,
            password,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn password(&self) -> Option<&HashedPassword> {
        self.password.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Field names follow the `accounts` table columns
impl FieldAccess for Account {
    fn get_field(&self, field: &str) -> Result<Option<String>, DomainError> {
        match field {
            "id" => Ok(Some(self.id.to_string())),
            "username" => Ok(Some(self.username.clone())),
            "display_name" => Ok(Some(self.display_name.clone())),
            "password" => Ok(self.password.as_ref().map(|hash| hash.as_str().to_string())),
            "created_at" | "updated_at" => Err(DomainError::InvalidFieldType(field.to_string())),
            _ => Err(DomainError::UnknownField(field.to_string())),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), DomainError> {
        match field {
            "username" => self.username = value,
            "display_name" => self.display_name = value,
            "password" => self.password = Some(HashedPassword::new(value)),
            "id" | "created_at" | "updated_at" => {
                return Err(DomainError::InvalidFieldType(field.to_string()));
            }
            _ => return Err(DomainError::UnknownField(field.to_string())),
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
