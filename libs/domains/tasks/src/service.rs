use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, ListTasks, Task, TaskPage, UpdateTask};
use crate::query::GetTasksQuery;
use crate::repository::TaskRepository;
use crate::value_objects::{TaskPriority, TaskStatus};

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Task use cases. The caller's identity is always an explicit `owner`.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(user_id = %owner))]
    pub async fn create_task(&self, owner: Uuid, input: CreateTask) -> TaskResult<Task> {
        let task = Task::new(owner, input, now())?;
        self.repository.create(&task).await
    }

    /// `NotFound` when the task is missing or belongs to someone else.
    #[instrument(skip(self), fields(user_id = %owner, task_id = %id))]
    pub async fn get_task(&self, owner: Uuid, id: Uuid) -> TaskResult<Task> {
        self.repository
            .get(owner, id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Unknown status and priority codes are dropped from the filters.
    #[instrument(skip(self, input), fields(user_id = %owner))]
    pub async fn get_tasks(&self, owner: Uuid, input: ListTasks) -> TaskResult<TaskPage> {
        let statuses = input
            .statuses
            .into_iter()
            .filter_map(|code| TaskStatus::from_code(code).ok())
            .collect();
        let priorities = input
            .priorities
            .into_iter()
            .filter_map(|code| TaskPriority::from_code(code).ok())
            .collect();

        let query = GetTasksQuery::new(
            &owner.to_string(),
            input.page_size,
            input.page_number,
            &input.sort_field,
            &input.sort_direction,
            statuses,
            priorities,
            &input.title,
        )?;

        self.repository.list(&query).await
    }

    #[instrument(skip(self, update), fields(user_id = %owner, task_id = %update.id))]
    pub async fn update_task(&self, owner: Uuid, update: UpdateTask) -> TaskResult<Task> {
        let mut task = self.get_task(owner, update.id).await?;
        task.apply_update(&update, now())?;
        self.repository.update(&task).await
    }

    /// Delete every id or none. An empty list is a no-op.
    #[instrument(skip(self, ids), fields(user_id = %owner, count = ids.len()))]
    pub async fn delete_tasks(&self, owner: Uuid, ids: Vec<Uuid>) -> TaskResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.repository.delete_many(owner, &ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryError, SortDirection, SortField};
    use crate::repository::MockTaskRepository;
    use crate::value_objects::ValueError;

    fn create_input() -> CreateTask {
        CreateTask {
            title: "Pay rent".to_string(),
            description: String::new(),
            priority: 1,
            due_date: now() + 86_400,
        }
    }

    fn stored_task(owner: Uuid) -> Task {
        Task::new(owner, create_input(), now()).unwrap()
    }

    #[tokio::test]
    async fn test_create_task_validates_before_storage() {
        let mut repo = MockTaskRepository::new();
        repo.expect_create().never();

        let service = TaskService::new(repo);
        let err = service
            .create_task(
                Uuid::now_v7(),
                CreateTask {
                    title: "x".repeat(129),
                    ..create_input()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TaskError::Validation(ValueError::TooLong { field: "title", .. })
        ));
    }

    #[tokio::test]
    async fn test_create_task_sets_owner_and_status() {
        let owner = Uuid::now_v7();
        let mut repo = MockTaskRepository::new();
        repo.expect_create()
            .withf(move |task| task.user_id == owner && task.status == TaskStatus::Todo)
            .times(1)
            .returning(|task| Ok(task.clone()));

        let service = TaskService::new(repo);
        let task = service.create_task(owner, create_input()).await.unwrap();
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[tokio::test]
    async fn test_get_task_not_owned_is_not_found() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get().returning(|_, _| Ok(None));

        let service = TaskService::new(repo);
        let err = service
            .get_task(Uuid::now_v7(), Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_tasks_drops_unknown_codes() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list()
            .withf(|query| {
                query.statuses() == [TaskStatus::Done]
                    && query.priorities() == [TaskPriority::Low, TaskPriority::High]
                    && query.sort_field() == SortField::CreatedAt
                    && query.sort_direction() == SortDirection::Desc
            })
            .times(1)
            .returning(|_| Ok(TaskPage::default()));

        let service = TaskService::new(repo);
        let page = service
            .get_tasks(
                Uuid::now_v7(),
                ListTasks {
                    page_size: 10,
                    page_number: 1,
                    statuses: vec![5, 2, -1],
                    priorities: vec![0, 3, 2],
                    sort_field: "created_at".to_string(),
                    sort_direction: "desc".to_string(),
                    title: String::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_get_tasks_unknown_sort_field() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list().never();

        let service = TaskService::new(repo);
        let err = service
            .get_tasks(
                Uuid::now_v7(),
                ListTasks {
                    sort_field: "unknown(7)".to_string(),
                    ..ListTasks::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TaskError::Query(QueryError::InvalidField { field: "sort_field", .. })
        ));
    }

    #[tokio::test]
    async fn test_status_only_update_persists_other_fields_unchanged() {
        let owner = Uuid::now_v7();
        let existing = stored_task(owner);
        let expected = Task {
            status: TaskStatus::InProgress,
            ..existing.clone()
        };

        let mut repo = MockTaskRepository::new();
        let found = existing.clone();
        repo.expect_get()
            .returning(move |_, _| Ok(Some(found.clone())));
        repo.expect_update()
            .withf(move |task| *task == expected)
            .times(1)
            .returning(|task| Ok(task.clone()));

        let service = TaskService::new(repo);
        let mut update = UpdateTask::new(existing.id);
        update.status = Some(1);

        let updated = service.update_task(owner, update).await.unwrap();
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.title, existing.title);
    }

    #[tokio::test]
    async fn test_invalid_update_never_persists() {
        let owner = Uuid::now_v7();
        let existing = stored_task(owner);

        let mut repo = MockTaskRepository::new();
        let found = existing.clone();
        repo.expect_get()
            .returning(move |_, _| Ok(Some(found.clone())));
        repo.expect_update().never();

        let service = TaskService::new(repo);
        let mut update = UpdateTask::new(existing.id);
        update.title = Some("   ".to_string());

        let err = service.update_task(owner, update).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(ValueError::Empty { .. })));
    }

    #[tokio::test]
    async fn test_delete_tasks_empty_skips_repository() {
        let mut repo = MockTaskRepository::new();
        repo.expect_delete_many().never();

        let service = TaskService::new(repo);
        assert_eq!(service.delete_tasks(Uuid::now_v7(), vec![]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_tasks_passes_owner() {
        let owner = Uuid::now_v7();
        let ids = vec![Uuid::now_v7(), Uuid::now_v7()];
        let expected = ids.clone();

        let mut repo = MockTaskRepository::new();
        repo.expect_delete_many()
            .withf(move |candidate, batch| *candidate == owner && batch == expected.as_slice())
            .times(1)
            .returning(|_, batch| Ok(batch.len() as u64));

        let service = TaskService::new(repo);
        assert_eq!(service.delete_tasks(owner, ids).await.unwrap(), 2);
    }
}
