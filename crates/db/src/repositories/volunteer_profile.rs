//! Volunteer profile repository.

use std::sync::Arc;

use crate::entities::{VolunteerProfile, review_status::ReviewStatus, volunteer_profile};
use aaharsetu_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

/// Volunteer profile repository for database operations.
#[derive(Clone)]
pub struct VolunteerProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl VolunteerProfileRepository {
    /// Create a new volunteer profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<volunteer_profile::Model>> {
        VolunteerProfile::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a profile by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<volunteer_profile::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Volunteer profile {id}")))
    }

    /// Find the profile owned by a user.
    pub async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> AppResult<Option<volunteer_profile::Model>> {
        VolunteerProfile::find()
            .filter(volunteer_profile::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether a user or email already has a profile.
    pub async fn exists_for(&self, user_id: &str, email: &str) -> AppResult<bool> {
        let count = VolunteerProfile::find()
            .filter(
                Condition::any()
                    .add(volunteer_profile::Column::UserId.eq(user_id))
                    .add(volunteer_profile::Column::Email.eq(email.to_lowercase())),
            )
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Create a new profile.
    pub async fn create(
        &self,
        model: volunteer_profile::ActiveModel,
    ) -> AppResult<volunteer_profile::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every profile, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<volunteer_profile::Model>> {
        VolunteerProfile::find()
            .order_by_desc(volunteer_profile::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Move a pending profile to a review outcome.
    pub async fn review(
        &self,
        id: &str,
        status: ReviewStatus,
        reviewer_id: &str,
    ) -> AppResult<bool> {
        let result = VolunteerProfile::update_many()
            .set(volunteer_profile::ActiveModel {
                status: Set(status),
                reviewed_by: Set(Some(reviewer_id.to_string())),
                ..Default::default()
            })
            .filter(volunteer_profile::Column::Id.eq(id))
            .filter(volunteer_profile::Column::Status.eq(ReviewStatus::Pending))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
