//! Donation repository.
//!
//! Every lifecycle transition is a single conditional `UPDATE`; callers learn
//! whether the guard held from the returned flag.

use std::sync::Arc;

use crate::entities::{
    Donation,
    donation::{self, DonationStatus},
};
use aaharsetu_common::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Completed delivery count for one volunteer.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct DeliveryCount {
    pub volunteer_id: String,
    pub deliveries: i64,
}

/// Donation repository for database operations.
#[derive(Clone)]
pub struct DonationRepository {
    db: Arc<DatabaseConnection>,
}

impl DonationRepository {
    /// Create a new donation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a donation by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<donation::Model>> {
        Donation::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a donation by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<donation::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::DonationNotFound(id.to_string()))
    }

    /// Create a new donation.
    pub async fn create(&self, model: donation::ActiveModel) -> AppResult<donation::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Donations owned by a donor, newest first.
    pub async fn find_by_donor(&self, donor_id: &str) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .filter(donation::Column::DonorId.eq(donor_id))
            .order_by_desc(donation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Donations waiting for NGO review, newest first.
    pub async fn find_pending(&self) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .filter(donation::Column::Status.eq(DonationStatus::Pending))
            .order_by_desc(donation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Donations approved by an NGO, newest first.
    pub async fn find_approved_by_ngo(&self, ngo_id: &str) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .filter(donation::Column::NgoId.eq(ngo_id))
            .filter(donation::Column::Status.is_in([
                DonationStatus::NgoApproved,
                DonationStatus::Claimed,
                DonationStatus::Completed,
            ]))
            .order_by_desc(donation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// NGO-approved donations nobody has claimed yet, newest first.
    pub async fn find_available(&self) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .filter(donation::Column::Status.eq(DonationStatus::NgoApproved))
            .filter(donation::Column::ClaimedBy.is_null())
            .order_by_desc(donation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Deliveries a volunteer holds and has not completed, newest claim first.
    pub async fn find_active_for_volunteer(
        &self,
        volunteer_id: &str,
    ) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .filter(donation::Column::ClaimedBy.eq(volunteer_id))
            .filter(donation::Column::Status.eq(DonationStatus::Claimed))
            .order_by_desc(donation::Column::ClaimedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Every donation, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<donation::Model>> {
        Donation::find()
            .order_by_desc(donation::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// `pending -> ngo_approved`, recording the approving NGO.
    pub async fn approve_by_ngo(&self, id: &str, ngo_id: &str) -> AppResult<bool> {
        self.transition_from_pending(
            id,
            donation::ActiveModel {
                status: Set(DonationStatus::NgoApproved),
                ngo_id: Set(Some(ngo_id.to_string())),
                ..Default::default()
            },
        )
        .await
    }

    /// `pending -> rejected`.
    pub async fn reject(&self, id: &str) -> AppResult<bool> {
        self.transition_from_pending(
            id,
            donation::ActiveModel {
                status: Set(DonationStatus::Rejected),
                ..Default::default()
            },
        )
        .await
    }

    /// `pending -> approved` (admin marker).
    pub async fn approve_by_admin(&self, id: &str) -> AppResult<bool> {
        self.transition_from_pending(
            id,
            donation::ActiveModel {
                status: Set(DonationStatus::Approved),
                ..Default::default()
            },
        )
        .await
    }

    /// `ngo_approved -> claimed`, only while nobody holds the claim.
    pub async fn claim(
        &self,
        id: &str,
        volunteer_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = Donation::update_many()
            .set(donation::ActiveModel {
                status: Set(DonationStatus::Claimed),
                claimed_by: Set(Some(volunteer_id.to_string())),
                claimed_at: Set(Some(now.into())),
                ..Default::default()
            })
            .filter(donation::Column::Id.eq(id))
            .filter(donation::Column::Status.eq(DonationStatus::NgoApproved))
            .filter(donation::Column::ClaimedBy.is_null())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// `claimed -> completed`, only by the claiming volunteer.
    pub async fn complete(
        &self,
        id: &str,
        volunteer_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = Donation::update_many()
            .set(donation::ActiveModel {
                status: Set(DonationStatus::Completed),
                completed_at: Set(Some(now.into())),
                ..Default::default()
            })
            .filter(donation::Column::Id.eq(id))
            .filter(donation::Column::ClaimedBy.eq(volunteer_id))
            .filter(donation::Column::Status.eq(DonationStatus::Claimed))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    /// Completed deliveries per volunteer, most first.
    pub async fn delivery_counts(&self) -> AppResult<Vec<DeliveryCount>> {
        Donation::find()
            .select_only()
            .column_as(donation::Column::ClaimedBy, "volunteer_id")
            .column_as(donation::Column::Id.count(), "deliveries")
            .filter(donation::Column::Status.eq(DonationStatus::Completed))
            .filter(donation::Column::ClaimedBy.is_not_null())
            .group_by(donation::Column::ClaimedBy)
            .order_by_desc(donation::Column::Id.count())
            .into_model::<DeliveryCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn transition_from_pending(
        &self,
        id: &str,
        changes: donation::ActiveModel,
    ) -> AppResult<bool> {
        let result = Donation::update_many()
            .set(changes)
            .filter(donation::Column::Id.eq(id))
            .filter(donation::Column::Status.eq(DonationStatus::Pending))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
