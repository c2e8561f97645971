use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::{Task, TaskPage};
use crate::query::GetTasksQuery;

/// Persistence of tasks. Every read and write is scoped to one owner.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task. `NotFound` when its owner does not exist.
    async fn create(&self, task: &Task) -> TaskResult<Task>;

    async fn get(&self, owner_id: Uuid, id: Uuid) -> TaskResult<Option<Task>>;

    /// One page of the owner's tasks plus the total match count.
    async fn list(&self, query: &GetTasksQuery) -> TaskResult<TaskPage>;

    /// Persist the mutable fields of `task`. `NotFound` if no owned row matched.
    async fn update(&self, task: &Task) -> TaskResult<Task>;

    /// Delete all of `ids` or none of them.
    async fn delete_many(&self, owner_id: Uuid, ids: &[Uuid]) -> TaskResult<u64>;
}
