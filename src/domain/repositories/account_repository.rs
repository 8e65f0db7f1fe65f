use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{error::DomainError, models::account::Account};

/// Input for creating an account; `password` is plaintext
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub display_name: String,
    pub password: Option<String>,
}

/// Fields to modify on an existing account; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub display_name: Option<String>,
    pub password: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.password.is_none()
    }
}

/// Repository for accounts whose password column is hashed before every write
#[async_trait]
pub trait AccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError>;

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;
}
