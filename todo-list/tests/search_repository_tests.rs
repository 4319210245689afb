use sea_orm::DatabaseConnection;
use std::sync::Arc;
use todo_list_server::entities::sea_orm_active_enums::{TaskPriority, TaskStatus};
use todo_list_server::task::SearchRepository;

mod common;

use common::{date, insert_task};

pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
    pub search: SearchRepository,
}

async fn setup() -> anyhow::Result<TestContext> {
    let db = Arc::new(common::setup_db().await?);
    let search = SearchRepository::new(db.clone());
    Ok(TestContext { db, search })
}

#[tokio::test]
async fn can_filter_by_completion_status() {
    let state = setup().await.expect("Failed to setup test context");
    let done = insert_task(
        &state.db,
        "Done",
        date(2024, 1, 10),
        TaskStatus::Completed,
        TaskPriority::Low,
    )
    .await;
    let open = insert_task(
        &state.db,
        "Open",
        date(2024, 1, 10),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;

    let completed = state.search.get_todos_by_status(true).await.unwrap();
    let incomplete = state.search.get_todos_by_status(false).await.unwrap();

    assert_eq!(completed, vec![done]);
    assert_eq!(incomplete, vec![open]);
}

#[tokio::test]
async fn can_return_empty_status_filter() {
    let state = setup().await.expect("Failed to setup test context");
    insert_task(
        &state.db,
        "Open",
        date(2024, 1, 10),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;

    let completed = state.search.get_todos_by_status(true).await.unwrap();

    assert!(completed.is_empty());
}

#[tokio::test]
async fn can_match_due_date_exactly() {
    let state = setup().await.expect("Failed to setup test context");
    let on_day = insert_task(
        &state.db,
        "On the day",
        date(2024, 1, 10),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;
    insert_task(
        &state.db,
        "Day after",
        date(2024, 1, 11),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;

    let matching = state
        .search
        .get_todos_by_due_date(date(2024, 1, 10))
        .await
        .unwrap();
    let none = state
        .search
        .get_todos_by_due_date(date(2024, 1, 9))
        .await
        .unwrap();

    assert_eq!(matching, vec![on_day]);
    assert!(none.is_empty());
}

#[tokio::test]
async fn can_filter_by_priority() {
    let state = setup().await.expect("Failed to setup test context");
    let high = insert_task(
        &state.db,
        "Urgent",
        date(2024, 1, 10),
        TaskStatus::InCompleted,
        TaskPriority::High,
    )
    .await;
    let also_high = insert_task(
        &state.db,
        "Also urgent",
        date(2024, 3, 1),
        TaskStatus::Completed,
        TaskPriority::High,
    )
    .await;
    insert_task(
        &state.db,
        "Whenever",
        date(2024, 1, 10),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;

    let found = state
        .search
        .get_todos_by_priority(TaskPriority::High)
        .await
        .unwrap();
    let medium = state
        .search
        .get_todos_by_priority(TaskPriority::Medium)
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.contains(&high));
    assert!(found.contains(&also_high));
    assert!(medium.is_empty());
}
