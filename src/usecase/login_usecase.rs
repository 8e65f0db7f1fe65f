use crate::domain::{
    error::DomainError,
    models::account::Account,
    repositories::account_repository::AccountRepository,
    services::{credential_hasher::CredentialHasher, password_service::PasswordHasher},
};

const TRACING_TARGET: &str = "credential_hasher::login";

pub struct LoginUsecase<R: AccountRepository, P: PasswordHasher> {
    account_repository: R,
    credential_hasher: CredentialHasher<P>,
}

impl<R, P> LoginUsecase<R, P>
where
    R: AccountRepository,
    P: PasswordHasher + Send + Sync + 'static,
{
    pub fn new(account_repository: R, credential_hasher: CredentialHasher<P>) -> Self {
        Self {
            account_repository,
            credential_hasher,
        }
    }

    pub async fn login(&self, username: String, password: String) -> Result<Account, DomainError>
    where
        R: Send + Sync,
    {
        let account = self
            .account_repository
            .find_by_username(&username)
            .await?
            .ok_or(DomainError::AuthenticationFailed)?;

        match self
            .credential_hasher
            .verify_password(&account, &password)
            .await
        {
            Ok(true) => Ok(account),
            Ok(false) => Err(DomainError::AuthenticationFailed),
            Err(DomainError::MalformedHash) => {
                tracing::warn!(target: TRACING_TARGET, account_id = %account.id(), "account has no usable password hash");
                Err(DomainError::AuthenticationFailed)
            }
            Err(e) => Err(e),
        }
    }
}
