use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{error::DomainError, models::record::FieldAccess};

/// Callbacks a persistence layer runs before writing a record
///
/// An error from either hook must abort the write.
#[async_trait]
pub trait LifecycleHooks<R: FieldAccess + Send>: Send + Sync {
    /// Called before a new record is inserted
    async fn before_create(&self, record: &mut R) -> Result<(), DomainError>;

    /// Called before an existing record is modified, with the names of the
    /// fields the modification sets
    async fn before_update(
        &self,
        record: &mut R,
        changed_fields: &HashSet<String>,
    ) -> Result<(), DomainError>;
}
