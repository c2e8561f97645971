//! Storage tests against a real Postgres container.
//!
//! Run with `cargo test -p domain_tasks -- --ignored` (requires Docker).

use domain_tasks::{
    CreateTask, ListTasks, PgTaskRepository, TaskError, TaskService, TaskStatus, UpdateTask,
};
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

fn service(db: &TestDatabase) -> TaskService<PgTaskRepository> {
    TaskService::new(PgTaskRepository::new(db.connection()))
}

fn input(title: &str, priority: i32) -> CreateTask {
    CreateTask {
        title: title.to_string(),
        description: String::new(),
        priority,
        due_date: chrono::Utc::now().timestamp() + 86_400,
    }
}

fn listing(statuses: Vec<i32>) -> ListTasks {
    ListTasks {
        page_size: 10,
        page_number: 1,
        statuses,
        sort_field: "priority".to_string(),
        sort_direction: "desc".to_string(),
        ..ListTasks::default()
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_listing_is_scoped_to_owner_and_filtered() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_listing_is_scoped_to_owner_and_filtered");
    let alice = db
        .create_test_user(builder.user_id(), &builder.username("alice"))
        .await;
    let bob = db
        .create_test_user(Uuid::now_v7(), &builder.username("bob"))
        .await;
    let tasks = service(&db);

    let low = tasks.create_task(alice, input("low", 0)).await.unwrap();
    let high = tasks.create_task(alice, input("high", 2)).await.unwrap();
    tasks.create_task(bob, input("bob's", 1)).await.unwrap();

    let page = tasks.get_tasks(alice, listing(vec![])).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.tasks[0].id, high.id);
    assert_eq!(page.tasks[1].id, low.id);

    let mut done = UpdateTask::new(low.id);
    done.status = Some(TaskStatus::Done.code().into());
    tasks.update_task(alice, done).await.unwrap();

    let page = tasks.get_tasks(alice, listing(vec![2])).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.tasks[0].id, low.id);
    assert_eq!(page.tasks[0].status, TaskStatus::Done);

    let err = tasks.get_task(bob, low.id).await.unwrap_err();
    assert!(matches!(err, TaskError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_title_filter_is_case_insensitive() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_title_filter_is_case_insensitive");
    let owner = db
        .create_test_user(builder.user_id(), &builder.username("owner"))
        .await;
    let tasks = service(&db);

    tasks.create_task(owner, input("Quarterly REPORT", 1)).await.unwrap();
    tasks.create_task(owner, input("groceries", 1)).await.unwrap();

    let page = tasks
        .get_tasks(
            owner,
            ListTasks {
                title: "report".to_string(),
                ..listing(vec![])
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.tasks[0].title.as_str(), "Quarterly REPORT");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_batch_delete_with_foreign_id_deletes_nothing() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("test_batch_delete_with_foreign_id_deletes_nothing");
    let alice = db
        .create_test_user(builder.user_id(), &builder.username("alice"))
        .await;
    let bob = db
        .create_test_user(Uuid::now_v7(), &builder.username("bob"))
        .await;
    let tasks = service(&db);

    let mine = tasks.create_task(alice, input("mine", 0)).await.unwrap();
    let theirs = tasks.create_task(bob, input("theirs", 0)).await.unwrap();

    let err = tasks
        .delete_tasks(alice, vec![mine.id, theirs.id])
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::NotFound(_)));
    assert_eq!(db.count_tasks(alice).await, 1);
    assert_eq!(db.count_tasks(bob).await, 1);

    assert_eq!(tasks.delete_tasks(alice, vec![mine.id]).await.unwrap(), 1);
    assert_eq!(db.count_tasks(alice).await, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_for_missing_owner_is_not_found() {
    let db = TestDatabase::new().await;

    let err = service(&db)
        .create_task(Uuid::now_v7(), input("orphan", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::NotFound(_)));
}
