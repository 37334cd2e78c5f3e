//! User directory trait

use async_trait::async_trait;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Remote collection of users owned by the directory service
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the full collection, in the order the service returns it.
    /// Records that cannot be read as a user are left out.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Register a new user
    async fn create(&self, user: NewUser) -> Result<(), DomainError>;

    /// Remove a user by identifier
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
