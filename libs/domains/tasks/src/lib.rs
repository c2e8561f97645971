//! Tasks domain
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← use cases, owner scoping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← TaskRepository trait + PgTaskRepository
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task, value objects, GetTasksQuery
//! └─────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_tasks::{PgTaskRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//! let service = TaskService::new(PgTaskRepository::new(db));
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;
pub mod value_objects;

pub use error::{TaskError, TaskResult};
pub use models::{CreateTask, ListTasks, Task, TaskPage, UpdateTask};
pub use postgres::PgTaskRepository;
pub use query::{GetTasksQuery, QueryError, SortDirection, SortField};
#[cfg(any(test, feature = "mock"))]
pub use repository::MockTaskRepository;
pub use repository::TaskRepository;
pub use service::TaskService;
pub use value_objects::{
    TaskDescription, TaskDueDate, TaskPriority, TaskStatus, TaskTitle, ValueError,
};
