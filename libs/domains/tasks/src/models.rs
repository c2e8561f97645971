use uuid::Uuid;

use crate::value_objects::{
    TaskDescription, TaskDueDate, TaskPriority, TaskStatus, TaskTitle, ValueError,
};

/// A task owned by exactly one user.
///
/// `id`, `user_id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: TaskTitle,
    pub description: TaskDescription,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: TaskDueDate,
    /// Epoch seconds
    pub created_at: i64,
}

impl Task {
    /// Validate every field of `input` and build a fresh `Todo` task.
    pub fn new(owner: Uuid, input: CreateTask, now: i64) -> Result<Self, ValueError> {
        Ok(Self {
            id: Uuid::now_v7(),
            user_id: owner,
            title: TaskTitle::new(input.title)?,
            description: TaskDescription::new(input.description)?,
            status: TaskStatus::default(),
            priority: TaskPriority::from_code(input.priority)?,
            due_date: TaskDueDate::new_at(input.due_date, now)?,
            created_at: now,
        })
    }

    /// Apply the present fields of `update`.
    ///
    /// All present fields are validated before any is assigned, so a failure
    /// leaves the task untouched.
    pub fn apply_update(&mut self, update: &UpdateTask, now: i64) -> Result<(), ValueError> {
        let title = update.title.as_deref().map(TaskTitle::new).transpose()?;
        let description = update
            .description
            .as_deref()
            .map(TaskDescription::new)
            .transpose()?;
        let status = update.status.map(TaskStatus::from_code).transpose()?;
        let priority = update.priority.map(TaskPriority::from_code).transpose()?;
        let due_date = update
            .due_date
            .map(|secs| TaskDueDate::new_at(secs, now))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(due_date) = due_date {
            self.due_date = due_date;
        }

        Ok(())
    }
}

/// Unvalidated input for a new task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub due_date: i64,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTask {
    pub id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<i32>,
    pub priority: Option<i32>,
    pub due_date: Option<i64>,
}

impl UpdateTask {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: None,
        }
    }
}

/// Raw listing request as it arrives from the wire.
///
/// Status and priority codes may be out of range; the service drops those
/// before building a [`GetTasksQuery`](crate::query::GetTasksQuery).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasks {
    pub page_size: i64,
    pub page_number: i64,
    pub statuses: Vec<i32>,
    pub priorities: Vec<i32>,
    pub sort_field: String,
    pub sort_direction: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub total_count: i64,
    pub total_pages: i64,
}
