use crate::entities::sea_orm_active_enums::{ParseEnumError, TaskPriority, TaskStatus};
use crate::entities::task;
use chrono::NaiveDate;
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Wire representation of a task. Status and priority travel as display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    /// Store-assigned identifier, ignored on input
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    #[schema(read_only)]
    pub id: Option<i32>,
    /// Short title, 1 to 50 characters
    #[validate(
        custom(function = "not_blank", message = "title is required"),
        length(min = 1, max = 50, message = "title must be between 1 and 50 characters")
    )]
    pub title: String,
    /// Free text, 1 to 250 characters
    #[validate(
        custom(function = "not_blank", message = "description is required"),
        length(
            min = 1,
            max = 250,
            message = "description must be between 1 and 250 characters"
        )
    )]
    pub description: String,
    /// Due date; a date-time is accepted on input and its time of day dropped
    #[serde(deserialize_with = "date_only::deserialize")]
    pub due_date: NaiveDate,
    /// `Completed` or `InCompleted`
    #[serde(default)]
    #[schema(example = "InCompleted")]
    pub status: Option<String>,
    /// `Low`, `Medium` or `High`
    #[serde(default)]
    #[schema(example = "Low")]
    pub priority: Option<String>,
    /// Date the task was created, ignored on input
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    #[schema(read_only)]
    pub creation_date: Option<NaiveDate>,
}

/// Whitespace-only text counts as missing.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

impl From<task::Model> for TodoDto {
    fn from(model: task::Model) -> Self {
        let mut dto = Self {
            id: Some(model.id),
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            status: None,
            priority: None,
            creation_date: Some(model.creation_date),
        };
        dto.render_enums(model.status, model.priority);
        dto
    }
}

impl TodoDto {
    /// Builds an input payload with no status or priority set.
    pub fn new(title: String, description: String, due_date: NaiveDate) -> Self {
        Self {
            id: None,
            title,
            description,
            due_date,
            status: None,
            priority: None,
            creation_date: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    fn render_enums(&mut self, status: TaskStatus, priority: TaskPriority) {
        self.status = Some(status.to_string());
        self.priority = Some(priority.to_string());
    }

    /// Parses the status string, `None` when the field was omitted.
    pub fn parsed_status(&self) -> Result<Option<TaskStatus>, ParseEnumError> {
        self.status.as_deref().map(str::parse).transpose()
    }

    /// Parses the priority string, `None` when the field was omitted.
    pub fn parsed_priority(&self) -> Result<Option<TaskPriority>, ParseEnumError> {
        self.priority.as_deref().map(str::parse).transpose()
    }

    /// Converts a create payload into an insertable model.
    ///
    /// Omitted status means `InCompleted`, omitted priority means `Low`.
    pub fn into_active_model(self) -> Result<task::ActiveModel, ParseEnumError> {
        let status = self.parsed_status()?.unwrap_or_default();
        let priority = self.parsed_priority()?.unwrap_or_default();
        Ok(task::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            due_date: ActiveValue::Set(self.due_date),
            status: ActiveValue::Set(status),
            priority: ActiveValue::Set(priority),
            creation_date: ActiveValue::NotSet,
        })
    }

    /// Overwrites the editable fields of a loaded task.
    ///
    /// Status and priority are only replaced when supplied. The model is left
    /// untouched if either fails to parse.
    pub fn apply_to(self, model: &mut task::Model) -> Result<(), ParseEnumError> {
        let status = self.parsed_status()?;
        let priority = self.parsed_priority()?;
        model.title = self.title;
        model.description = self.description;
        model.due_date = self.due_date;
        if let Some(status) = status {
            model.status = status;
        }
        if let Some(priority) = priority {
            model.priority = priority;
        }
        Ok(())
    }
}

pub mod date_only {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, de};

    /// Parses `YYYY-MM-DD`, or a date-time of which only the date is kept.
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|date_time| date_time.date_naive())
            })
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|date_time| date_time.date())
            })
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
                    .ok()
                    .map(|date_time| date_time.date())
            })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("'{raw}' is not a valid date")))
    }
}
