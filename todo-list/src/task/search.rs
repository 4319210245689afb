use crate::entities::sea_orm_active_enums::{TaskPriority, TaskStatus};
use crate::entities::task;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::sync::Arc;

/// Read-only filtered queries over the `tasks` table.
#[derive(Debug, Clone)]
pub struct SearchRepository {
    db: Arc<DatabaseConnection>,
}

impl SearchRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Tasks whose status is `Completed` when `completed` is true, `InCompleted` otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_todos_by_status(&self, completed: bool) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .filter(task::Column::Status.eq(TaskStatus::from_completed(completed)))
            .all(self.db.as_ref())
            .await
    }

    /// Tasks due exactly on `due_date`.
    #[tracing::instrument(skip(self))]
    pub async fn get_todos_by_due_date(
        &self,
        due_date: NaiveDate,
    ) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .filter(task::Column::DueDate.eq(due_date))
            .all(self.db.as_ref())
            .await
    }

    /// Tasks with exactly the given priority.
    #[tracing::instrument(skip(self))]
    pub async fn get_todos_by_priority(
        &self,
        priority: TaskPriority,
    ) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .filter(task::Column::Priority.eq(priority))
            .all(self.db.as_ref())
            .await
    }
}
