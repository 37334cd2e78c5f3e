//! In-memory user directory
//!
//! Behaves like the REST service: keeps insertion order, assigns ids,
//! rejects duplicate emails with a service message.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{DomainError, NewUser, User, UserDirectory, UserId};

#[derive(Debug, Default, Clone)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<Vec<User>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a fixed set of users
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
            should_fail: Arc::default(),
        }
    }

    /// Set whether operations should fail
    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    async fn check_should_fail(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::rejected(503, None));
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.check_should_fail().await?;
        Ok(self.users.read().await.clone())
    }

    async fn create(&self, user: NewUser) -> Result<(), DomainError> {
        self.check_should_fail().await?;
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email() == user.email) {
            return Err(DomainError::rejected(
                409,
                Some("duplicate email".to_string()),
            ));
        }

        let id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|e| DomainError::validation(e.to_string()))?;
        users.push(User::new(id, user.username, user.email, user.date_of_birth));
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.check_should_fail().await?;
        let mut users = self.users.write().await;

        let before = users.len();
        users.retain(|u| u.id() != id);

        if users.len() == before {
            return Err(DomainError::rejected(
                404,
                Some(format!("User '{}' not found", id)),
            ));
        }
        Ok(())
    }
}
