use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::{account::Account, hasher_config::HasherConfig, record::FieldAccess},
        repositories::account_repository::{AccountChanges, AccountRepository, NewAccount},
        services::{credential_hasher::CredentialHasher, lifecycle::LifecycleHooks},
    },
    infrastructure::argon2_password_hasher::Argon2PasswordHasher,
};

/// In-memory accounts that run the real credential hasher as their hooks
#[derive(Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<Mutex<Vec<Account>>>,
    hooks: CredentialHasher<Argon2PasswordHasher>,
}

impl InMemoryAccountRepository {
    pub fn new(config: HasherConfig) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(Vec::new())),
            hooks: CredentialHasher::new(config, Argon2PasswordHasher::new()),
        }
    }

    pub fn hasher(&self) -> CredentialHasher<Argon2PasswordHasher> {
        self.hooks.clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Account> {
        let accounts = self.accounts.lock().unwrap();
        accounts.iter().find(|account| account.id() == id).cloned()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let mut created = Account::new(
            Uuid::new_v4(),
            account.username,
            account.display_name,
            None,
        )?;
        if let Some(password) = account.password {
            created.set_field("password", password)?;
        }

        self.hooks.before_create(&mut created).await?;

        self.accounts.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, DomainError> {
        let mut account = self.get(id).ok_or(RepositoryError::NotFound)?;

        let mut changed = HashSet::new();
        if let Some(display_name) = changes.display_name {
            account.set_field("display_name", display_name)?;
            changed.insert("display_name".to_string());
        }
        if let Some(password) = changes.password {
            account.set_field("password", password)?;
            changed.insert("password".to_string());
        }

        self.hooks.before_update(&mut account, &changed).await?;

        let mut accounts = self.accounts.lock().unwrap();
        if let Some(slot) = accounts.iter_mut().find(|stored| stored.id() == id) {
            *slot = account.clone();
        }
        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|account| account.username() == username)
            .cloned())
    }
}
