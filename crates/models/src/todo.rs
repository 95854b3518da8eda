use chrono::NaiveDate;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub day: Date,
    pub completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Raw form submission. `day` stays a string so a bad value can fall back to today
/// instead of failing the request.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
}

/// Parse an ISO-8601 calendar date; anything missing or malformed becomes `today`.
pub fn parse_day(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or(today)
}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}

impl NewTodo {
    pub fn into_active_model(self, today: NaiveDate) -> Result<ActiveModel, errors::ModelError> {
        validate_title(&self.title)?;
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Ok(ActiveModel {
            title: Set(self.title.trim().to_string()),
            description: Set(description),
            day: Set(parse_day(self.day.as_deref(), today)),
            completed: Set(false),
            ..Default::default()
        })
    }
}
