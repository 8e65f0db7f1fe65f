use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use uuid::Uuid;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::{account::Account, credential::HashedPassword},
        repositories::account_repository::{AccountChanges, AccountRepository, NewAccount},
        services::lifecycle::LifecycleHooks,
    },
    infrastructure::entity::accounts,
};

const TRACING_TARGET: &str = "credential_hasher::account_repository";

/// Account repository that runs lifecycle hooks before every insert and update
#[derive(Clone)]
pub struct SeaOrmAccountRepository<H> {
    db: Arc<DatabaseConnection>,
    hooks: H,
}

impl<H> SeaOrmAccountRepository<H>
where
    H: LifecycleHooks<accounts::ActiveModel>,
{
    pub fn new(db: Arc<DatabaseConnection>, hooks: H) -> Self {
        Self { db, hooks }
    }
}

fn database_error(e: DbErr) -> RepositoryError {
    tracing::error!(target: TRACING_TARGET, error = %e, "database operation failed");
    RepositoryError::DatabaseError(e.to_string())
}

fn to_domain(model: accounts::Model) -> Result<Account, DomainError> {
    Account::reconstruct(
        model.id,
        model.username,
        model.display_name,
        model.password.map(HashedPassword::new),
        model.created_at.to_utc(),
        model.updated_at.to_utc(),
    )
}

#[async_trait]
impl<H> AccountRepository for SeaOrmAccountRepository<H>
where
    H: LifecycleHooks<accounts::ActiveModel>,
{
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let now = Utc::now().fixed_offset();
        let mut model = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(account.username),
            display_name: Set(account.display_name),
            password: Set(account.password),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // Hooks must succeed before anything is written
        self.hooks.before_create(&mut model).await?;

        let created = model.insert(self.db.as_ref()).await.map_err(database_error)?;
        tracing::info!(target: TRACING_TARGET, account_id = %created.id, "account created");

        to_domain(created)
    }

    async fn update(&self, id: Uuid, changes: AccountChanges) -> Result<Account, DomainError> {
        let existing = accounts::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(database_error)?
            .ok_or(RepositoryError::NotFound)?;

        if changes.is_empty() {
            return to_domain(existing);
        }

        let mut model = existing.into_active_model();
        if let Some(display_name) = changes.display_name {
            model.display_name = Set(display_name);
        }
        if let Some(password) = changes.password {
            model.password = Set(Some(password));
        }

        let changed = accounts::changed_fields(&model);
        model.updated_at = Set(Utc::now().fixed_offset());

        self.hooks.before_update(&mut model, &changed).await?;

        let updated = model.update(self.db.as_ref()).await.map_err(database_error)?;
        tracing::info!(target: TRACING_TARGET, account_id = %updated.id, "account updated");

        to_domain(updated)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(database_error)?
            .map(to_domain)
            .transpose()
    }
}
