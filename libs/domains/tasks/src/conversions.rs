//! Task ↔ protobuf conversions

use grpc_client::conversions::parse_uuid;
use rpc::todo as pb;
use tonic::Status;

use crate::models::{CreateTask, ListTasks, Task, UpdateTask};
use crate::query::{SortDirection, SortField};

impl From<Task> for pb::Task {
    fn from(task: Task) -> Self {
        pb::Task {
            id: task.id.to_string(),
            user_id: task.user_id.to_string(),
            title: task.title.to_string(),
            description: task.description.as_str().to_string(),
            status: task.status.code().into(),
            priority: task.priority.code().into(),
            due_date: task.due_date.epoch_secs(),
            created_at: task.created_at,
        }
    }
}

impl From<pb::CreateTaskRequest> for CreateTask {
    fn from(request: pb::CreateTaskRequest) -> Self {
        CreateTask {
            title: request.title,
            description: request.description,
            priority: request.priority,
            due_date: request.due_date,
        }
    }
}

impl TryFrom<pb::UpdateTaskRequest> for UpdateTask {
    type Error = Status;

    fn try_from(request: pb::UpdateTaskRequest) -> Result<Self, Self::Error> {
        Ok(UpdateTask {
            id: parse_uuid("id", &request.id)?,
            title: request.title,
            description: request.description,
            status: request.status,
            priority: request.priority,
            due_date: request.due_date,
        })
    }
}

// Unknown codes become names the query builder rejects
fn sort_field_name(code: i32) -> String {
    match pb::SortField::try_from(code) {
        Ok(pb::SortField::Priority) => SortField::Priority.to_string(),
        Ok(pb::SortField::DueDate) => SortField::DueDate.to_string(),
        Ok(pb::SortField::CreatedAt) => SortField::CreatedAt.to_string(),
        Err(_) => format!("unknown({code})"),
    }
}

fn sort_direction_name(code: i32) -> String {
    match pb::SortDirection::try_from(code) {
        Ok(pb::SortDirection::Asc) => SortDirection::Asc.to_string(),
        Ok(pb::SortDirection::Desc) => SortDirection::Desc.to_string(),
        Err(_) => format!("unknown({code})"),
    }
}

/// Absent `filters`, `order_by` and `title` fall back to empty filters,
/// priority ascending and no title match.
impl From<pb::GetTasksRequest> for ListTasks {
    fn from(request: pb::GetTasksRequest) -> Self {
        let filters = request.filters.unwrap_or_default();
        let order_by = request.order_by.unwrap_or_default();

        ListTasks {
            page_size: request.page_size,
            page_number: request.page_number,
            statuses: filters.task_statuses,
            priorities: filters.task_priorities,
            sort_field: sort_field_name(order_by.field),
            sort_direction: sort_direction_name(order_by.direction),
            title: request.title.unwrap_or_default(),
        }
    }
}
