use async_trait::async_trait;
use models::cafe::{self, CafePatch, NewCafe};
use sea_orm::DatabaseConnection;

use crate::db::cafe_service::{self, CafeFilter};
use crate::errors::ServiceError;

#[async_trait]
pub trait CafeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<cafe::Model>, ServiceError>;
    async fn search(&self, filter: &CafeFilter) -> Result<Vec<cafe::Model>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    async fn nth(&self, offset: u64) -> Result<Option<cafe::Model>, ServiceError>;
    async fn create(&self, input: NewCafe) -> Result<cafe::Model, ServiceError>;
    async fn update(&self, id: i32, patch: CafePatch) -> Result<cafe::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn ping(&self) -> bool;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCafeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCafeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CafeRepository for SeaOrmCafeRepository {
    async fn list(&self) -> Result<Vec<cafe::Model>, ServiceError> {
        cafe_service::list_cafes(&self.db).await
    }

    async fn search(&self, filter: &CafeFilter) -> Result<Vec<cafe::Model>, ServiceError> {
        cafe_service::search_cafes(&self.db, filter).await
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        cafe_service::count_cafes(&self.db).await
    }

    async fn nth(&self, offset: u64) -> Result<Option<cafe::Model>, ServiceError> {
        cafe_service::nth_cafe(&self.db, offset).await
    }

    async fn create(&self, input: NewCafe) -> Result<cafe::Model, ServiceError> {
        cafe_service::create_cafe(&self.db, input).await
    }

    async fn update(&self, id: i32, patch: CafePatch) -> Result<cafe::Model, ServiceError> {
        cafe_service::update_cafe(&self.db, id, patch).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        cafe_service::delete_cafe(&self.db, id).await
    }

    async fn ping(&self) -> bool {
        models::db::ping(&self.db).await
    }
}
