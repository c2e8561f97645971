use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Persistence of user accounts.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A taken username is `DuplicateUsername`.
    async fn create(&self, user: &User) -> UserResult<User>;

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>>;

    /// Delete the user and all of its tasks atomically.
    ///
    /// `NotFound` (and nothing deleted) when the user does not exist.
    async fn delete(&self, id: Uuid) -> UserResult<()>;
}
