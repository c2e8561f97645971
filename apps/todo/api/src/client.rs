//! Outbound calls to `todo.TodoService`.
//!
//! Handlers talk to [`TodoClient`]; [`GrpcTodoClient`] is the tonic-backed
//! implementation that stamps identity metadata and a per-call deadline.

use async_trait::async_trait;
use grpc_client::{ChannelConfig, TracingInterceptor, create_channel_lazy_with_config};
use rpc::todo as pb;
use rpc::todo::todo_service_client::TodoServiceClient;
use std::time::Duration;
use tonic::codec::CompressionEncoding;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::{Request, Status};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoClient: Send + Sync {
    async fn create_user(&self, username: String, password: String) -> Result<pb::User, Status>;

    async fn get_user_by_username(&self, username: String) -> Result<pb::User, Status>;

    async fn delete_user(&self, id: Uuid) -> Result<(), Status>;

    async fn create_task(
        &self,
        owner: Uuid,
        request: pb::CreateTaskRequest,
    ) -> Result<pb::Task, Status>;

    async fn get_task(&self, owner: Uuid, id: Uuid) -> Result<pb::Task, Status>;

    async fn get_tasks(
        &self,
        owner: Uuid,
        request: pb::GetTasksRequest,
    ) -> Result<pb::GetTasksResponse, Status>;

    async fn update_task(
        &self,
        owner: Uuid,
        request: pb::UpdateTaskRequest,
    ) -> Result<pb::Task, Status>;

    async fn delete_tasks(&self, owner: Uuid, ids: Vec<Uuid>) -> Result<(), Status>;
}

type Inner = TodoServiceClient<InterceptedService<Channel, TracingInterceptor>>;

#[derive(Clone)]
pub struct GrpcTodoClient {
    inner: Inner,
    timeout: Duration,
}

impl GrpcTodoClient {
    /// Lazy channel: the first call connects.
    pub fn connect_lazy(addr: &str, timeout: Duration) -> grpc_client::GrpcResult<Self> {
        let channel = create_channel_lazy_with_config(
            addr,
            ChannelConfig::new().with_request_timeout(timeout),
        )?;
        let inner = TodoServiceClient::with_interceptor(channel, TracingInterceptor::new())
            .send_compressed(CompressionEncoding::Zstd)
            .accept_compressed(CompressionEncoding::Zstd);

        Ok(Self { inner, timeout })
    }

    fn request<T>(&self, message: T, owner: Option<Uuid>) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.timeout);
        if let Some(owner) = owner {
            grpc_client::insert_user_id(&mut request, owner);
        }
        request
    }
}

fn required<T>(value: Option<T>, what: &str) -> Result<T, Status> {
    value.ok_or_else(|| Status::internal(format!("response without {what}")))
}

#[async_trait]
impl TodoClient for GrpcTodoClient {
    async fn create_user(&self, username: String, password: String) -> Result<pb::User, Status> {
        let request = self.request(pb::CreateUserRequest { username, password }, None);
        let response = self.inner.clone().create_user(request).await?;
        required(response.into_inner().user, "user")
    }

    async fn get_user_by_username(&self, username: String) -> Result<pb::User, Status> {
        let request = self.request(pb::GetUserByUsernameRequest { username }, None);
        let response = self.inner.clone().get_user_by_username(request).await?;
        required(response.into_inner().user, "user")
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), Status> {
        let request = self.request(
            pb::DeleteUserByIdRequest { id: id.to_string() },
            Some(id),
        );
        self.inner.clone().delete_user_by_id(request).await?;
        Ok(())
    }

    async fn create_task(
        &self,
        owner: Uuid,
        request: pb::CreateTaskRequest,
    ) -> Result<pb::Task, Status> {
        let request = self.request(request, Some(owner));
        let response = self.inner.clone().create_task(request).await?;
        required(response.into_inner().task, "task")
    }

    async fn get_task(&self, owner: Uuid, id: Uuid) -> Result<pb::Task, Status> {
        let request = self.request(pb::GetTaskRequest { id: id.to_string() }, Some(owner));
        let response = self.inner.clone().get_task(request).await?;
        required(response.into_inner().task, "task")
    }

    async fn get_tasks(
        &self,
        owner: Uuid,
        request: pb::GetTasksRequest,
    ) -> Result<pb::GetTasksResponse, Status> {
        let request = self.request(request, Some(owner));
        Ok(self.inner.clone().get_tasks(request).await?.into_inner())
    }

    async fn update_task(
        &self,
        owner: Uuid,
        request: pb::UpdateTaskRequest,
    ) -> Result<pb::Task, Status> {
        let request = self.request(request, Some(owner));
        let response = self.inner.clone().update_task(request).await?;
        required(response.into_inner().task, "task")
    }

    async fn delete_tasks(&self, owner: Uuid, ids: Vec<Uuid>) -> Result<(), Status> {
        let ids = ids.iter().map(Uuid::to_string).collect();
        let request = self.request(pb::DeleteTasksByIdRequest { ids }, Some(owner));
        self.inner.clone().delete_tasks_by_id(request).await?;
        Ok(())
    }
}
