use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement,
    TransactionTrait,
};
use uuid::Uuid;

use crate::error::{UserError, UserResult, map_insert_error};
use crate::models::User;
use crate::repository::UserRepository;
use crate::value_objects::Username;

/// PostgreSQL implementation of [`UserRepository`]
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username)
            .map_err(|e| UserError::Storage(format!("corrupt user row {}: {e}", row.id)))?;

        Ok(User {
            id: row.id,
            username,
            password_hash: row.password_hash,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> UserResult<User> {
        let sql = r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.id.into(),
                user.username.as_str().into(),
                user.password_hash.clone().into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| map_insert_error(e, user.username.as_str()))?
            .ok_or_else(|| UserError::Storage("insert returned no row".to_string()))?;

        tracing::info!(user_id = %row.id, "Created user");
        row.try_into()
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let sql = "SELECT id, username, password_hash FROM users WHERE username = $1";
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [username.into()]);

        UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let txn = self.db.begin().await?;

        let tasks = txn
            .execute_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "DELETE FROM tasks WHERE user_id = $1",
                [id.into()],
            ))
            .await?;

        let users = txn
            .execute_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "DELETE FROM users WHERE id = $1",
                [id.into()],
            ))
            .await?;

        if users.rows_affected() == 0 {
            txn.rollback().await?;
            return Err(UserError::NotFound(id.to_string()));
        }

        txn.commit().await?;

        tracing::info!(user_id = %id, tasks_deleted = tasks.rows_affected(), "Deleted user");
        Ok(())
    }
}
