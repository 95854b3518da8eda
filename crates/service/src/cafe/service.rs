use std::sync::Arc;

use models::cafe::{self, CafePatch, NewCafe};
use rand::Rng;
use tracing::{info, instrument};

use crate::cafe::repository::CafeRepository;
use crate::db::cafe_service::CafeFilter;
use crate::errors::ServiceError;

/// Application service encapsulating the cafe directory rules.
/// Empty `/random` and `/search` results are `NotFound`; an empty `/all` is not.
pub struct CafeService<R: CafeRepository> {
    repo: Arc<R>,
}

impl<R: CafeRepository> Clone for CafeService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: CafeRepository> CafeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<cafe::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn search(&self, filter: &CafeFilter) -> Result<Vec<cafe::Model>, ServiceError> {
        if filter.is_empty() {
            return Err(ServiceError::Validation("at least one search criterion is required".into()));
        }
        let found = self.repo.search(filter).await?;
        if found.is_empty() {
            return Err(ServiceError::NotFound("Sorry, we don't have a cafe at that location.".into()));
        }
        Ok(found)
    }

    /// Uniform pick over the rows present right now: count, draw an offset, fetch it.
    pub async fn random(&self) -> Result<cafe::Model, ServiceError> {
        let total = self.repo.count().await?;
        if total == 0 {
            return Err(ServiceError::NotFound("No cafes found.".into()));
        }
        let offset = rand::thread_rng().gen_range(0..total);
        // A concurrent delete can shrink the table between the two reads.
        self.repo
            .nth(offset)
            .await?
            .ok_or_else(|| ServiceError::NotFound("No cafes found.".into()))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewCafe) -> Result<cafe::Model, ServiceError> {
        let created = self.repo.create(input).await?;
        info!(id = created.id, "created cafe");
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: CafePatch) -> Result<cafe::Model, ServiceError> {
        let updated = self.repo.update(id, patch).await?;
        info!(id, "updated cafe");
        Ok(updated)
    }

    /// Unknown id is `NotFound` for cafes.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::NotFound(format!("cafe with id {} not found", id)));
        }
        info!(id, "deleted cafe");
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.repo.count().await
    }

    pub async fn ping(&self) -> bool {
        self.repo.ping().await
    }
}
