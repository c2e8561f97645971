use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::error::TaskError;
use crate::models::Task;
use crate::value_objects::{
    TaskDescription, TaskDueDate, TaskPriority, TaskStatus, TaskTitle, ValueError,
};

/// Sea-ORM entity for the `tasks` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: i16,
    pub priority: i16,
    pub due_date: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Task {
    type Error = TaskError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let corrupt = |e: ValueError| TaskError::Storage(format!("corrupt task row {}: {e}", model.id));

        Ok(Task {
            id: model.id,
            user_id: model.user_id,
            title: TaskTitle::new(model.title.clone()).map_err(corrupt)?,
            description: TaskDescription::new(&model.description).map_err(corrupt)?,
            status: TaskStatus::from_code(model.status.into()).map_err(corrupt)?,
            priority: TaskPriority::from_code(model.priority.into()).map_err(corrupt)?,
            due_date: TaskDueDate::from_storage(model.due_date),
            created_at: model.created_at,
        })
    }
}

impl From<&Task> for ActiveModel {
    fn from(task: &Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            user_id: Set(task.user_id),
            title: Set(task.title.as_str().to_string()),
            description: Set(task.description.as_str().to_string()),
            status: Set(task.status.code()),
            priority: Set(task.priority.code()),
            due_date: Set(task.due_date.epoch_secs()),
            created_at: Set(task.created_at),
        }
    }
}

/// Only the columns an update may touch; identity and creation time stay `NotSet`.
pub(crate) fn mutable_columns(task: &Task) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        user_id: NotSet,
        created_at: NotSet,
        ..ActiveModel::from(task)
    }
}
