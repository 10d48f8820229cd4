//! Donation request repository.

use std::sync::Arc;

use crate::entities::{
    DonationRequest, donation,
    donation_request::{self, RequestStatus},
};
use aaharsetu_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

/// Donation request repository for database operations.
#[derive(Clone)]
pub struct DonationRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl DonationRequestRepository {
    /// Create a new donation request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<donation_request::Model>> {
        DonationRequest::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a request by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<donation_request::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::RequestNotFound(id.to_string()))
    }

    /// Create a new request.
    pub async fn create(
        &self,
        model: donation_request::ActiveModel,
    ) -> AppResult<donation_request::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Requests issued by one requester, newest first.
    pub async fn find_by_requester(
        &self,
        requester_id: &str,
    ) -> AppResult<Vec<donation_request::Model>> {
        DonationRequest::find()
            .filter(donation_request::Column::NgoId.eq(requester_id))
            .order_by_desc(donation_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Requests still waiting for a donor, newest first.
    pub async fn find_open(&self) -> AppResult<Vec<donation_request::Model>> {
        DonationRequest::find()
            .filter(donation_request::Column::Status.eq(RequestStatus::Pending))
            .order_by_desc(donation_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Replace a request with a donation in one transaction.
    ///
    /// The delete is conditional on the request still existing; if another
    /// acceptance got there first the insert is rolled back and
    /// `RequestNotFound` is returned.
    pub async fn convert_to_donation(
        &self,
        request_id: &str,
        donation: donation::ActiveModel,
    ) -> AppResult<donation::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = DonationRequest::delete_many()
            .filter(donation_request::Column::Id.eq(request_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            return Err(AppError::RequestNotFound(request_id.to_string()));
        }

        let created = donation
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }
}
