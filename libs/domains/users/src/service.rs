use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, User};
use crate::password::hash_password;
use crate::repository::UserRepository;
use crate::value_objects::Username;

/// Service layer for user accounts
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate the username, hash the password and store the account.
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        let username = Username::new(input.username)?;
        let password_hash = hash_password(&input.password)?;

        self.repository
            .create(&User::new(username, password_hash))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_username(&self, username: &str) -> UserResult<User> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    /// Remove the account and every task it owns.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        self.repository.delete(id).await
    }
}
