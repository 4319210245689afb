use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectOptions, Database, DatabaseConnection};
use todo_list_server::entities::sea_orm_active_enums::{TaskPriority, TaskStatus};
use todo_list_server::entities::task;

/// Connects to a fresh in-memory SQLite database and applies all migrations.
///
/// The pool is pinned to one connection because every SQLite in-memory
/// connection is its own database.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Inserts a task directly through the entity, bypassing the repositories.
#[allow(dead_code)]
pub async fn insert_task(
    db: &DatabaseConnection,
    title: &str,
    due_date: chrono::NaiveDate,
    status: TaskStatus,
    priority: TaskPriority,
) -> task::Model {
    let active_model = task::ActiveModel {
        title: ActiveValue::Set(title.to_string()),
        description: ActiveValue::Set(format!("{title} description")),
        due_date: ActiveValue::Set(due_date),
        status: ActiveValue::Set(status),
        priority: ActiveValue::Set(priority),
        ..Default::default()
    };
    active_model.insert(db).await.expect("Failed to insert task")
}

#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
