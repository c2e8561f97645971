//! Storage tests against a real Postgres container.
//!
//! Run with `cargo test -p domain_users -- --ignored` (requires Docker).

use domain_users::{CreateUser, PgUserRepository, UserError, UserRepository, UserService};
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use test_utils::{TestDataBuilder, TestDatabase};

fn service(db: &TestDatabase) -> UserService<PgUserRepository> {
    UserService::new(PgUserRepository::new(db.connection()))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_user() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_create_and_find_user");
    let username = builder.username("alice");

    let created = service(&db)
        .create_user(CreateUser {
            username: username.clone(),
            password: "s3cret".to_string(),
        })
        .await
        .unwrap();

    let found = service(&db).get_user_by_username(&username).await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_username_rejected() {
    let db = TestDatabase::new().await;
    let input = CreateUser {
        username: "dupe".to_string(),
        password: "pw".to_string(),
    };

    service(&db).create_user(input.clone()).await.unwrap();
    let err = service(&db).create_user(input).await.unwrap_err();
    assert!(matches!(err, UserError::DuplicateUsername(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_user_removes_owned_tasks() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_delete_user_removes_owned_tasks");
    let owner = db
        .create_test_user(builder.user_id(), &builder.username("owner"))
        .await;

    for i in 0..3 {
        db.connection
            .execute_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "INSERT INTO tasks (id, user_id, title, description, status, priority, due_date, created_at) \
                 VALUES (gen_random_uuid(), $1, $2, '', 0, 0, 4102444800, 1700000000)",
                [owner.into(), format!("task {i}").into()],
            ))
            .await
            .unwrap();
    }
    assert_eq!(db.count_tasks(owner).await, 3);

    PgUserRepository::new(db.connection())
        .delete(owner)
        .await
        .unwrap();

    assert_eq!(db.count_tasks(owner).await, 0);
    let err = PgUserRepository::new(db.connection())
        .delete(owner)
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::NotFound(_)));
}
