use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use std::fmt;
use std::str::FromStr;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TaskStatus {
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[default]
    #[sea_orm(string_value = "InCompleted")]
    InCompleted,
}

impl TaskStatus {
    /// Maps the boolean used by the completion filter onto a status.
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::InCompleted
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::InCompleted => "InCompleted",
        }
    }
}

/// Priority level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TaskPriority {
    #[default]
    #[sea_orm(string_value = "Low")]
    Low,
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "High")]
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a wire value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_variant(value, "status")
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_variant(value, "priority")
    }
}

/// Accepts a variant name (case-insensitive) or its declaration ordinal.
fn parse_variant<T>(value: &str, kind: &'static str) -> Result<T, ParseEnumError>
where
    T: Iterable + fmt::Display,
{
    let trimmed = value.trim();
    let found = match trimmed.parse::<usize>() {
        Ok(ordinal) => T::iter().nth(ordinal),
        Err(_) => T::iter().find(|variant| variant.to_string().eq_ignore_ascii_case(trimmed)),
    };
    found.ok_or_else(|| ParseEnumError {
        kind,
        value: value.to_string(),
    })
}
