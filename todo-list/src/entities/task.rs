use super::sea_orm_active_enums::{TaskPriority, TaskStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue;

pub const TITLE_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 250;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub due_date: Date,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub creation_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Refuses writes with a missing or oversized title/description and stamps
    /// `creation_date` on insert.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        check_text("title", &self.title, TITLE_MAX_LEN, insert)?;
        check_text("description", &self.description, DESCRIPTION_MAX_LEN, insert)?;
        if insert && self.creation_date.is_not_set() {
            self.creation_date = ActiveValue::Set(chrono::Local::now().date_naive());
        }
        Ok(self)
    }
}

fn check_text(
    field: &str,
    value: &ActiveValue<String>,
    max_len: usize,
    insert: bool,
) -> Result<(), DbErr> {
    let text = match value {
        ActiveValue::Set(text) | ActiveValue::Unchanged(text) => text,
        ActiveValue::NotSet if insert => {
            return Err(DbErr::Custom(format!("{field} is required")));
        }
        ActiveValue::NotSet => return Ok(()),
    };
    if text.trim().is_empty() {
        return Err(DbErr::Custom(format!("{field} is required")));
    }
    if text.chars().count() > max_len {
        return Err(DbErr::Custom(format!(
            "{field} must be between 1 and {max_len} characters"
        )));
    }
    Ok(())
}
