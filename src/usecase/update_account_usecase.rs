use uuid::Uuid;

use crate::domain::{
    error::DomainError,
    models::account::Account,
    repositories::account_repository::{AccountChanges, AccountRepository},
};

pub struct UpdateAccountUsecase<R: AccountRepository> {
    account_repository: R,
}

impl<R: AccountRepository> UpdateAccountUsecase<R> {
    pub fn new(account_repository: R) -> Self {
        Self { account_repository }
    }

    pub async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, DomainError>
    where
        R: Send + Sync,
    {
        if changes
            .display_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(DomainError::EmptyDisplayName);
        }

        self.account_repository.update(id, changes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{models::hasher_config::HasherConfig, repositories::account_repository::NewAccount},
        usecase::mock_repository::InMemoryAccountRepository,
    };

    #[tokio::test]
    async fn renaming_keeps_password_hash() {
        let repository = InMemoryAccountRepository::new(HasherConfig::default());
        let account = repository
            .create(NewAccount {
                username: "leo".to_string(),
                display_name: "Leonardo".to_string(),
                password: Some("Turtle123!".to_string()),
            })
            .await
            .unwrap();

        let updated = UpdateAccountUsecase::new(repository.clone())
            .update(
                account.id(),
                AccountChanges {
                    display_name: Some("Raphael".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.display_name(), "Raphael");
        assert_eq!(updated.password(), account.password());
        assert_eq!(repository.get(account.id()), Some(updated));
    }

    #[tokio::test]
    async fn blank_display_name_is_rejected() {
        let repository = InMemoryAccountRepository::new(HasherConfig::default());

        let err = UpdateAccountUsecase::new(repository)
            .update(
                Uuid::new_v4(),
                AccountChanges {
                    display_name: Some("  ".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::EmptyDisplayName));
    }
}
