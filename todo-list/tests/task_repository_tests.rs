use sea_orm::{ActiveValue, DatabaseConnection, DbErr};
use std::sync::Arc;
use todo_list_server::entities::sea_orm_active_enums::{TaskPriority, TaskStatus};
use todo_list_server::entities::task;
use todo_list_server::task::TaskRepository;

mod common;

use common::{date, insert_task};

pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
    pub repository: TaskRepository,
}

async fn setup() -> anyhow::Result<TestContext> {
    let db = Arc::new(common::setup_db().await?);
    let repository = TaskRepository::new(db.clone());
    Ok(TestContext { db, repository })
}

fn new_task(title: &str, description: &str) -> task::ActiveModel {
    task::ActiveModel {
        title: ActiveValue::Set(title.to_string()),
        description: ActiveValue::Set(description.to_string()),
        due_date: ActiveValue::Set(date(2024, 1, 10)),
        status: ActiveValue::Set(TaskStatus::InCompleted),
        priority: ActiveValue::Set(TaskPriority::Low),
        ..Default::default()
    }
}

#[tokio::test]
async fn can_handle_empty_task_list() {
    let state = setup().await.expect("Failed to setup test context");

    let tasks = state.repository.get_all().await.expect("Failed to get tasks");

    assert!(tasks.is_empty());
}

#[tokio::test]
async fn can_return_none_for_missing_task() {
    let state = setup().await.expect("Failed to setup test context");

    let task = state.repository.get(42).await.expect("Failed to get task");

    assert_eq!(task, None);
}

#[tokio::test]
async fn can_stage_add_without_writing_until_save() {
    let mut state = setup().await.expect("Failed to setup test context");

    state.repository.add(new_task("Buy milk", "2% milk"));

    assert!(state.repository.has_pending_changes());
    assert!(state.repository.get_all().await.unwrap().is_empty());

    let affected = state.repository.save().await.expect("Failed to save");

    assert_eq!(affected, 1);
    assert!(!state.repository.has_pending_changes());
    assert_eq!(state.repository.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn can_assign_id_and_creation_date_on_save() {
    let mut state = setup().await.expect("Failed to setup test context");

    state.repository.add(new_task("Buy milk", "2% milk"));
    state.repository.save().await.expect("Failed to save");

    let inserted = state.repository.inserted().to_vec();
    assert_eq!(inserted.len(), 1);
    let created = &inserted[0];
    assert!(created.id > 0);
    assert_eq!(created.creation_date, chrono::Local::now().date_naive());

    let fetched = state
        .repository
        .get(created.id)
        .await
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(&fetched, created);
}

#[tokio::test]
async fn can_update_every_field_of_loaded_task() {
    let mut state = setup().await.expect("Failed to setup test context");
    let existing = insert_task(
        &state.db,
        "Draft",
        date(2024, 1, 10),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;

    let mut changed = existing.clone();
    changed.title = "Final".to_string();
    changed.description = "Ready to ship".to_string();
    changed.due_date = date(2024, 2, 1);
    changed.status = TaskStatus::Completed;
    changed.priority = TaskPriority::High;
    state.repository.update(changed.clone());
    let affected = state.repository.save().await.expect("Failed to save");

    assert_eq!(affected, 1);
    let fetched = state.repository.get(existing.id).await.unwrap().unwrap();
    assert_eq!(fetched, changed);
    assert_eq!(fetched.creation_date, existing.creation_date);
}

#[tokio::test]
async fn can_delete_existing_task() {
    let mut state = setup().await.expect("Failed to setup test context");
    let keep = insert_task(
        &state.db,
        "Keep",
        date(2024, 1, 10),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;
    let remove = insert_task(
        &state.db,
        "Remove",
        date(2024, 1, 11),
        TaskStatus::InCompleted,
        TaskPriority::Low,
    )
    .await;

    let staged = state.repository.delete(remove.id).await.expect("Failed to delete");
    let affected = state.repository.save().await.expect("Failed to save");

    assert!(staged);
    assert_eq!(affected, 1);
    assert_eq!(state.repository.get(remove.id).await.unwrap(), None);
    assert_eq!(state.repository.get_all().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn can_ignore_delete_of_missing_task() {
    let mut state = setup().await.expect("Failed to setup test context");

    let staged = state.repository.delete(999).await.expect("Failed to delete");
    let affected = state.repository.save().await.expect("Failed to save");

    assert!(!staged);
    assert!(!state.repository.has_pending_changes());
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn can_refuse_oversized_title_and_commit_nothing() {
    let mut state = setup().await.expect("Failed to setup test context");

    state.repository.add(new_task("Valid", "First"));
    state.repository.add(new_task(&"x".repeat(51), "Second"));
    let result = state.repository.save().await;

    match result {
        Err(DbErr::Custom(message)) => {
            assert_eq!(message, "title must be between 1 and 50 characters")
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
    assert!(state.repository.get_all().await.unwrap().is_empty());
    assert!(state.repository.inserted().is_empty());
}

#[tokio::test]
async fn can_refuse_empty_description() {
    let mut state = setup().await.expect("Failed to setup test context");

    state.repository.add(new_task("Valid", ""));
    let result = state.repository.save().await;

    assert!(matches!(result, Err(DbErr::Custom(_))));
}

#[tokio::test]
async fn can_refuse_whitespace_only_title() {
    let mut state = setup().await.expect("Failed to setup test context");

    state.repository.add(new_task("   ", "Valid"));
    let result = state.repository.save().await;

    assert!(matches!(result, Err(DbErr::Custom(message)) if message == "title is required"));
    assert!(state.repository.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn can_refuse_missing_title_on_insert() {
    let mut state = setup().await.expect("Failed to setup test context");
    let mut active_model = new_task("Valid", "Valid");
    active_model.title = ActiveValue::NotSet;

    state.repository.add(active_model);
    let result = state.repository.save().await;

    assert!(matches!(result, Err(DbErr::Custom(message)) if message == "title is required"));
}
