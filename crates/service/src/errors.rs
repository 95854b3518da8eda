use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Map a driver error, surfacing unique-index violations as conflicts.
    pub fn from_db(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::Db(e.to_string()),
        }
    }

    /// `ModelError::Validation` is a client error too; fold it so callers match one arm.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Model(models::errors::ModelError::Validation(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_validation_counts_as_validation() {
        let e: ServiceError = models::errors::ModelError::Validation("name required".into()).into();
        assert!(e.is_validation());
        assert!(!ServiceError::not_found("cafe").is_validation());
        assert_eq!(ServiceError::not_found("cafe").to_string(), "not found: cafe not found");
    }

    #[test]
    fn plain_db_errors_stay_db() {
        let e = ServiceError::from_db(DbErr::Custom("boom".into()));
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
