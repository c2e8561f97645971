//! Task endpoints. Every call forwards the caller id as `userid` metadata;
//! update and delete first confirm ownership with `GetTask`.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::{AppError, CurrentUser};
use rpc::todo as pb;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{from_ownership_status, from_status};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBody {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub status: i32,
    pub priority: i32,
    pub due_date: i64,
    pub created_at: i64,
}

impl From<pb::Task> for TaskBody {
    fn from(task: pb::Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            created_at: task.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i32,
    pub due_date: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskBody {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<i32>,
    pub priority: Option<i32>,
    pub due_date: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTasksBody {
    pub ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FiltersBody {
    #[serde(default)]
    pub task_statuses: Vec<i32>,
    #[serde(default)]
    pub task_priorities: Vec<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderByBody {
    #[serde(default)]
    pub field: i32,
    #[serde(default)]
    pub direction: i32,
}

/// All fields optional; the storage service fills in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksBody {
    pub page_size: Option<i64>,
    pub page_number: Option<i64>,
    pub filters: Option<FiltersBody>,
    pub order_by: Option<OrderByBody>,
    pub title: Option<String>,
}

impl From<ListTasksBody> for pb::GetTasksRequest {
    fn from(body: ListTasksBody) -> Self {
        pb::GetTasksRequest {
            page_size: body.page_size.unwrap_or_default(),
            page_number: body.page_number.unwrap_or_default(),
            filters: body.filters.map(|f| pb::Filters {
                task_statuses: f.task_statuses,
                task_priorities: f.task_priorities,
            }),
            order_by: body.order_by.map(|o| pb::OrderBy {
                field: o.field,
                direction: o.direction,
            }),
            title: body.title,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskPageBody {
    pub tasks: Vec<TaskBody>,
    pub total_count: i64,
    pub total_pages: i64,
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid task id: {raw:?}")))
}

/// Fail with 400 unless `id` names a task of `owner`.
async fn ensure_owned(state: &AppState, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    let task = state
        .client
        .get_task(owner, id)
        .await
        .map_err(from_ownership_status)?;

    if task.user_id != owner.to_string() {
        return Err(AppError::BadRequest(
            "task does not belong to the caller".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let task = state
        .client
        .create_task(
            owner,
            pb::CreateTaskRequest {
                title: body.title,
                description: body.description,
                priority: body.priority,
                due_date: body.due_date,
            },
        )
        .await
        .map_err(from_status)?;

    info!(task_id = %task.id, "Created task");
    Ok((StatusCode::CREATED, Json(TaskBody::from(task))))
}

pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskBody>, AppError> {
    let Json(body) = payload?;
    let id = parse_id(&body.id)?;
    ensure_owned(&state, owner, id).await?;

    let task = state
        .client
        .update_task(
            owner,
            pb::UpdateTaskRequest {
                id: id.to_string(),
                title: body.title,
                description: body.description,
                status: body.status,
                priority: body.priority,
                due_date: body.due_date,
            },
        )
        .await
        .map_err(from_status)?;

    Ok(Json(task.into()))
}

pub async fn delete_tasks(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    payload: Result<Json<DeleteTasksBody>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(body) = payload?;
    let ids = body
        .ids
        .iter()
        .map(|raw| parse_id(raw))
        .collect::<Result<Vec<_>, _>>()?;

    for id in &ids {
        ensure_owned(&state, owner, *id).await?;
    }

    state
        .client
        .delete_tasks(owner, ids)
        .await
        .map_err(from_ownership_status)?;

    Ok(StatusCode::OK)
}

pub async fn list_tasks(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    payload: Result<Json<ListTasksBody>, JsonRejection>,
) -> Result<Json<TaskPageBody>, AppError> {
    let Json(body) = payload?;
    let page = state
        .client
        .get_tasks(owner, body.into())
        .await
        .map_err(from_status)?;

    Ok(Json(TaskPageBody {
        tasks: page.tasks.into_iter().map(Into::into).collect(),
        total_count: page.total_count,
        total_pages: page.total_pages,
    }))
}
