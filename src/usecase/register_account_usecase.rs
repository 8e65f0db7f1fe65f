use crate::domain::{
    error::DomainError,
    models::account::Account,
    repositories::account_repository::{AccountRepository, NewAccount},
};

pub struct RegisterAccountUsecase<R: AccountRepository> {
    account_repository: R,
}

impl<R: AccountRepository> RegisterAccountUsecase<R> {
    pub fn new(account_repository: R) -> Self {
        Self { account_repository }
    }

    pub async fn register(
        &self,
        username: String,
        display_name: String,
        password: Option<String>,
    ) -> Result<Account, DomainError>
    where
        R: Send + Sync,
    {
        // Reject bad input before paying for a hash
        if username.trim().is_empty() {
            return Err(DomainError::EmptyUsername);
        }
        if display_name.trim().is_empty() {
            return Err(DomainError::EmptyDisplayName);
        }

        self.account_repository
            .create(NewAccount {
                username,
                display_name,
                password,
            })
            .await
    }
}
