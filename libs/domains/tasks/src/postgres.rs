use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Statement, TransactionTrait,
};
use std::collections::HashSet;
use uuid::Uuid;

use crate::entity::{self, mutable_columns};
use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskPage};
use crate::query::{GetTasksQuery, SortDirection, SortField};
use crate::repository::TaskRepository;

/// PostgreSQL implementation of [`TaskRepository`]
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(field: SortField) -> entity::Column {
    match field {
        SortField::Priority => entity::Column::Priority,
        SortField::DueDate => entity::Column::DueDate,
        SortField::CreatedAt => entity::Column::CreatedAt,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// Owner, status, priority and title predicates shared by count and page queries.
fn filtered(query: &GetTasksQuery) -> Select<entity::Entity> {
    let mut select = entity::Entity::find().filter(entity::Column::UserId.eq(query.owner_id()));

    if !query.statuses().is_empty() {
        select = select.filter(
            entity::Column::Status.is_in(query.statuses().iter().map(|status| status.code())),
        );
    }
    if !query.priorities().is_empty() {
        select = select.filter(
            entity::Column::Priority
                .is_in(query.priorities().iter().map(|priority| priority.code())),
        );
    }
    if !query.title().is_empty() {
        // `%` and `_` in the filter keep their LIKE meaning
        select = select.filter(Expr::cust_with_values(
            "title ILIKE $1",
            [format!("%{}%", query.title())],
        ));
    }

    select
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: &Task) -> TaskResult<Task> {
        let txn = self.db.begin().await?;

        let owner = txn
            .query_one_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "SELECT 1 AS present FROM users WHERE id = $1",
                [task.user_id.into()],
            ))
            .await?;

        if owner.is_none() {
            txn.rollback().await?;
            return Err(TaskError::NotFound(format!("user {}", task.user_id)));
        }

        entity::Entity::insert(entity::ActiveModel::from(task))
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(task_id = %task.id, user_id = %task.user_id, "Created task");
        Ok(task.clone())
    }

    async fn get(&self, owner_id: Uuid, id: Uuid) -> TaskResult<Option<Task>> {
        entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::UserId.eq(owner_id))
            .one(&self.db)
            .await?
            .map(Task::try_from)
            .transpose()
    }

    async fn list(&self, query: &GetTasksQuery) -> TaskResult<TaskPage> {
        let total_count = filtered(query).count(&self.db).await? as i64;

        if total_count == 0 {
            return Ok(TaskPage::default());
        }

        let models = filtered(query)
            .order_by(sort_column(query.sort_field()), sort_order(query.sort_direction()))
            .order_by_asc(entity::Column::Id)
            .limit(query.page_size() as u64)
            .offset(query.offset() as u64)
            .all(&self.db)
            .await?;

        let tasks = models
            .into_iter()
            .map(Task::try_from)
            .collect::<TaskResult<Vec<_>>>()?;

        tracing::debug!(
            owner_id = %query.owner_id(),
            total_count,
            returned = tasks.len(),
            "Listed tasks"
        );

        Ok(TaskPage {
            tasks,
            total_count,
            total_pages: query.total_pages(total_count),
        })
    }

    async fn update(&self, task: &Task) -> TaskResult<Task> {
        let result = entity::Entity::update_many()
            .set(mutable_columns(task))
            .filter(entity::Column::Id.eq(task.id))
            .filter(entity::Column::UserId.eq(task.user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(TaskError::NotFound(task.id.to_string()));
        }

        tracing::info!(task_id = %task.id, "Updated task");
        Ok(task.clone())
    }

    async fn delete_many(&self, owner_id: Uuid, ids: &[Uuid]) -> TaskResult<u64> {
        let distinct: HashSet<Uuid> = ids.iter().copied().collect();
        if distinct.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;

        let result = entity::Entity::delete_many()
            .filter(entity::Column::UserId.eq(owner_id))
            .filter(entity::Column::Id.is_in(distinct.iter().copied()))
            .exec(&txn)
            .await?;

        if result.rows_affected < distinct.len() as u64 {
            txn.rollback().await?;
            return Err(TaskError::NotFound(format!(
                "{} of {} tasks",
                distinct.len() as u64 - result.rows_affected,
                distinct.len()
            )));
        }

        txn.commit().await?;

        tracing::info!(owner_id = %owner_id, deleted = result.rows_affected, "Deleted tasks");
        Ok(result.rows_affected)
    }
}
