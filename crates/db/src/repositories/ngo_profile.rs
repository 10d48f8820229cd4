//! NGO profile repository.

use std::sync::Arc;

use crate::entities::{NgoProfile, ngo_profile, review_status::ReviewStatus};
use aaharsetu_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

/// NGO profile repository for database operations.
#[derive(Clone)]
pub struct NgoProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl NgoProfileRepository {
    /// Create a new NGO profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<ngo_profile::Model>> {
        NgoProfile::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a profile by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<ngo_profile::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("NGO profile {id}")))
    }

    /// Whether a user or email already has a profile.
    pub async fn exists_for(&self, user_id: &str, email: &str) -> AppResult<bool> {
        let count = NgoProfile::find()
            .filter(
                Condition::any()
                    .add(ngo_profile::Column::UserId.eq(user_id))
                    .add(ngo_profile::Column::Email.eq(email.to_lowercase())),
            )
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Create a new profile.
    pub async fn create(&self, model: ngo_profile::ActiveModel) -> AppResult<ngo_profile::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every profile, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<ngo_profile::Model>> {
        NgoProfile::find()
            .order_by_desc(ngo_profile::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Move a pending profile to a review outcome.
    pub async fn review(&self, id: &str, status: ReviewStatus, reviewer_id: &str) -> AppResult<bool> {
        let result = NgoProfile::update_many()
            .set(ngo_profile::ActiveModel {
                status: Set(status),
                reviewed_by: Set(Some(reviewer_id.to_string())),
                ..Default::default()
            })
            .filter(ngo_profile::Column::Id.eq(id))
            .filter(ngo_profile::Column::Status.eq(ReviewStatus::Pending))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
