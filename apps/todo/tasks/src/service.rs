//! `todo.TodoService` implementation.
//!
//! Handlers read the caller from `userid` metadata, convert the wire message
//! with the `From`/`TryFrom` impls in the domain crates and map domain errors
//! through [`crate::status`].

use std::sync::Arc;

use domain_tasks::{CreateTask, ListTasks, TaskRepository, TaskService, UpdateTask};
use domain_users::{CreateUser, UserRepository, UserService};
use grpc_client::conversions::{parse_uuid, parse_uuids};
use rpc::todo::{
    CreateTaskRequest, CreateTaskResponse, CreateUserRequest, CreateUserResponse,
    DeleteTasksByIdRequest, DeleteTasksByIdResponse, DeleteUserByIdRequest,
    DeleteUserByIdResponse, GetTaskRequest, GetTaskResponse, GetTasksRequest, GetTasksResponse,
    GetUserByUsernameRequest, GetUserByUsernameResponse, UpdateTaskRequest, UpdateTaskResponse,
    todo_service_server::TodoService,
};
use tonic::{Request, Response, Status};
use tracing::info;

use crate::status::{from_task_error, from_user_error};

/// Generic over both repositories so tests can run against mocks.
pub struct TodoServiceImpl<T, U>
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
{
    tasks: Arc<TaskService<T>>,
    users: Arc<UserService<U>>,
}

impl<T, U> TodoServiceImpl<T, U>
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
{
    pub fn new(tasks: TaskService<T>, users: UserService<U>) -> Self {
        Self {
            tasks: Arc::new(tasks),
            users: Arc::new(users),
        }
    }
}

#[tonic::async_trait]
impl<T, U> TodoService for TodoServiceImpl<T, U>
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
{
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let input: CreateUser = request.into_inner().into();
        let user = self
            .users
            .create_user(input)
            .await
            .map_err(from_user_error)?;

        info!(user_id = %user.id, "Created user");
        Ok(Response::new(CreateUserResponse {
            user: Some(user.into()),
        }))
    }

    async fn get_user_by_username(
        &self,
        request: Request<GetUserByUsernameRequest>,
    ) -> Result<Response<GetUserByUsernameResponse>, Status> {
        let username = request.into_inner().username;
        let user = self
            .users
            .get_user_by_username(&username)
            .await
            .map_err(from_user_error)?;

        Ok(Response::new(GetUserByUsernameResponse {
            user: Some(user.into()),
        }))
    }

    async fn delete_user_by_id(
        &self,
        request: Request<DeleteUserByIdRequest>,
    ) -> Result<Response<DeleteUserByIdResponse>, Status> {
        let id = parse_uuid("id", &request.into_inner().id)?;
        self.users.delete_user(id).await.map_err(from_user_error)?;

        info!(user_id = %id, "Deleted user");
        Ok(Response::new(DeleteUserByIdResponse {}))
    }

    async fn create_task(
        &self,
        request: Request<CreateTaskRequest>,
    ) -> Result<Response<CreateTaskResponse>, Status> {
        let owner = grpc_client::user_id(&request)?;
        let input: CreateTask = request.into_inner().into();
        let task = self
            .tasks
            .create_task(owner, input)
            .await
            .map_err(from_task_error)?;

        Ok(Response::new(CreateTaskResponse {
            task: Some(task.into()),
        }))
    }

    async fn get_task(
        &self,
        request: Request<GetTaskRequest>,
    ) -> Result<Response<GetTaskResponse>, Status> {
        let owner = grpc_client::user_id(&request)?;
        let id = parse_uuid("id", &request.into_inner().id)?;
        let task = self
            .tasks
            .get_task(owner, id)
            .await
            .map_err(from_task_error)?;

        Ok(Response::new(GetTaskResponse {
            task: Some(task.into()),
        }))
    }

    async fn get_tasks(
        &self,
        request: Request<GetTasksRequest>,
    ) -> Result<Response<GetTasksResponse>, Status> {
        let owner = grpc_client::user_id(&request)?;
        let input: ListTasks = request.into_inner().into();
        let page = self
            .tasks
            .get_tasks(owner, input)
            .await
            .map_err(from_task_error)?;

        Ok(Response::new(GetTasksResponse {
            tasks: page.tasks.into_iter().map(Into::into).collect(),
            total_count: page.total_count,
            total_pages: page.total_pages,
        }))
    }

    async fn update_task(
        &self,
        request: Request<UpdateTaskRequest>,
    ) -> Result<Response<UpdateTaskResponse>, Status> {
        let owner = grpc_client::user_id(&request)?;
        let update: UpdateTask = request.into_inner().try_into()?;
        let task = self
            .tasks
            .update_task(owner, update)
            .await
            .map_err(from_task_error)?;

        Ok(Response::new(UpdateTaskResponse {
            task: Some(task.into()),
        }))
    }

    async fn delete_tasks_by_id(
        &self,
        request: Request<DeleteTasksByIdRequest>,
    ) -> Result<Response<DeleteTasksByIdResponse>, Status> {
        let owner = grpc_client::user_id(&request)?;
        let ids = parse_uuids("ids", &request.into_inner().ids)?;
        let deleted = self
            .tasks
            .delete_tasks(owner, ids)
            .await
            .map_err(from_task_error)?;

        info!(user_id = %owner, deleted, "Deleted tasks");
        Ok(Response::new(DeleteTasksByIdResponse {}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_tasks::{MockTaskRepository, Task, TaskError, TaskPage};
    use domain_users::{MockUserRepository, UserError};
    use rpc::todo as pb;
    use tonic::Code;
    use uuid::Uuid;

    const NOW: i64 = 1_700_000_000;

    fn service(
        tasks: MockTaskRepository,
        users: MockUserRepository,
    ) -> TodoServiceImpl<MockTaskRepository, MockUserRepository> {
        TodoServiceImpl::new(TaskService::new(tasks), UserService::new(users))
    }

    fn with_owner<M>(message: M, owner: Uuid) -> Request<M> {
        let mut request = Request::new(message);
        grpc_client::insert_user_id(&mut request, owner);
        request
    }

    fn sample_task(owner: Uuid) -> Task {
        Task::new(
            owner,
            CreateTask {
                title: "Water plants".to_string(),
                description: "balcony".to_string(),
                priority: 1,
                due_date: NOW + 86_400,
            },
            NOW,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_task_calls_require_identity() {
        let svc = service(MockTaskRepository::new(), MockUserRepository::new());

        let status = svc
            .get_tasks(Request::new(pb::GetTasksRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);

        let status = svc
            .create_task(Request::new(pb::CreateTaskRequest::default()))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);
    }

    #[tokio::test]
    async fn test_get_tasks_applies_wire_defaults() {
        let owner = Uuid::now_v7();
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_list()
            .withf(move |query| {
                query.owner_id() == owner
                    && query.page_size() == 10
                    && query.page_number() == 1
                    && query.sort_field().as_str() == "priority"
                    && query.sort_direction().as_str() == "asc"
                    && query.statuses().is_empty()
                    && query.title().is_empty()
            })
            .times(1)
            .returning(|_| Ok(TaskPage::default()));

        let svc = service(tasks, MockUserRepository::new());
        let response = svc
            .get_tasks(with_owner(pb::GetTasksRequest::default(), owner))
            .await
            .unwrap()
            .into_inner();

        assert!(response.tasks.is_empty());
        assert_eq!(response.total_count, 0);
        assert_eq!(response.total_pages, 0);
    }

    #[tokio::test]
    async fn test_get_task_not_owned_is_not_found() {
        let mut tasks = MockTaskRepository::new();
        tasks.expect_get().returning(|_, _| Ok(None));

        let svc = service(tasks, MockUserRepository::new());
        let status = svc
            .get_task(with_owner(
                pb::GetTaskRequest {
                    id: Uuid::now_v7().to_string(),
                },
                Uuid::now_v7(),
            ))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_get_task_returns_wire_task() {
        let owner = Uuid::now_v7();
        let task = sample_task(owner);
        let id = task.id;
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_get()
            .withf(move |o, i| *o == owner && *i == id)
            .returning(move |_, _| Ok(Some(task.clone())));

        let svc = service(tasks, MockUserRepository::new());
        let response = svc
            .get_task(with_owner(pb::GetTaskRequest { id: id.to_string() }, owner))
            .await
            .unwrap()
            .into_inner();

        let wire = response.task.unwrap();
        assert_eq!(wire.id, id.to_string());
        assert_eq!(wire.user_id, owner.to_string());
        assert_eq!(wire.priority, pb::TaskPriority::Medium as i32);
    }

    #[tokio::test]
    async fn test_create_task_validation_is_invalid_argument() {
        let svc = service(MockTaskRepository::new(), MockUserRepository::new());
        let status = svc
            .create_task(with_owner(
                pb::CreateTaskRequest {
                    title: "   ".to_string(),
                    description: String::new(),
                    priority: 0,
                    due_date: i64::MAX,
                },
                Uuid::now_v7(),
            ))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_delete_tasks_rejects_malformed_ids() {
        let svc = service(MockTaskRepository::new(), MockUserRepository::new());
        let status = svc
            .delete_tasks_by_id(with_owner(
                pb::DeleteTasksByIdRequest {
                    ids: vec![Uuid::now_v7().to_string(), "nope".to_string()],
                },
                Uuid::now_v7(),
            ))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_delete_tasks_partial_batch_is_not_found() {
        let mut tasks = MockTaskRepository::new();
        tasks
            .expect_delete_many()
            .returning(|_, _| Err(TaskError::NotFound("1 of 2 tasks".to_string())));

        let svc = service(tasks, MockUserRepository::new());
        let status = svc
            .delete_tasks_by_id(with_owner(
                pb::DeleteTasksByIdRequest {
                    ids: vec![Uuid::now_v7().to_string(), Uuid::now_v7().to_string()],
                },
                Uuid::now_v7(),
            ))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_is_already_exists() {
        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .returning(|user| Err(UserError::DuplicateUsername(user.username.to_string())));

        let svc = service(MockTaskRepository::new(), users);
        let status = svc
            .create_user(Request::new(pb::CreateUserRequest {
                username: "dora".to_string(),
                password: "pw".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::AlreadyExists);
    }

    #[tokio::test]
    async fn test_get_user_by_username_missing() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let svc = service(MockTaskRepository::new(), users);
        let status = svc
            .get_user_by_username(Request::new(pb::GetUserByUsernameRequest {
                username: "ghost".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn test_delete_user_parses_id() {
        let id = Uuid::now_v7();
        let mut users = MockUserRepository::new();
        users
            .expect_delete()
            .withf(move |got| *got == id)
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(MockTaskRepository::new(), users);
        svc.delete_user_by_id(Request::new(pb::DeleteUserByIdRequest { id: id.to_string() }))
            .await
            .unwrap();
    }
}
