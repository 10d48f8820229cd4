//! Standing requests for food and their conversion into donations.

use aaharsetu_common::{AppError, AppResult, IdGenerator};
use aaharsetu_db::{
    entities::{
        donation::{self, DonationStatus},
        donation_request::{self, RequestStatus},
        user,
    },
    repositories::DonationRequestRepository,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Input for issuing a request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestInput {
    #[validate(length(min = 1, max = 256, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 4096, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,

    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[validate(length(min = 1, message = "Required-by date is required"))]
    pub required_by: String,

    #[serde(default)]
    pub dietary_requirements: Vec<String>,
}

/// Parse a required-by date, accepting a plain date or a full timestamp.
fn parse_required_by(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::Validation(format!("Invalid requiredBy date: {raw}")))
}

/// Donation request service.
#[derive(Clone)]
pub struct DonationRequestService {
    request_repo: DonationRequestRepository,
    id_gen: IdGenerator,
}

impl DonationRequestService {
    /// Create a new donation request service.
    #[must_use]
    pub const fn new(request_repo: DonationRequestRepository) -> Self {
        Self {
            request_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Issue a request on behalf of `requester`.
    pub async fn create(
        &self,
        requester: &user::Model,
        input: CreateRequestInput,
    ) -> AppResult<donation_request::Model> {
        input.validate()?;
        let required_by = parse_required_by(&input.required_by)?;

        let model = donation_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title.trim().to_string()),
            description: Set(input.description),
            quantity: Set(input.quantity),
            required_by: Set(required_by),
            dietary_requirements: Set(serde_json::json!(input.dietary_requirements)),
            ngo_id: Set(requester.id.clone()),
            status: Set(RequestStatus::Pending),
            created_at: Set(Utc::now().into()),
        };

        let request = self.request_repo.create(model).await?;
        info!(request_id = %request.id, requester_id = %requester.id, "Donation request created");

        Ok(request)
    }

    /// Requests issued by one requester.
    pub async fn list_by_requester(
        &self,
        requester_id: &str,
    ) -> AppResult<Vec<donation_request::Model>> {
        self.request_repo.find_by_requester(requester_id).await
    }

    /// Requests still open for donors.
    pub async fn list_open(&self) -> AppResult<Vec<donation_request::Model>> {
        self.request_repo.find_open().await
    }

    /// Convert a request into a pending donation owned by `donor`.
    ///
    /// The requester is recorded as the donation's NGO. The request row is
    /// removed in the same transaction.
    pub async fn accept(
        &self,
        request_id: &str,
        donor: &user::Model,
    ) -> AppResult<donation::Model> {
        let request = self.request_repo.get_by_id(request_id).await?;

        if request.ngo_id == donor.id {
            return Err(AppError::Forbidden(
                "You cannot accept your own request".to_string(),
            ));
        }

        let model = donation::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(request.title.clone()),
            description: Set(Some(request.description.clone())),
            quantity: Set(request.quantity),
            expiry_date: Set(None),
            pickup_address: Set(None),
            pickup_time: Set(Some(request.required_by.to_string())),
            photo: Set(None),
            donor_name: Set(Some(donor.name.clone())),
            donor_phone: Set(None),
            latitude: Set(None),
            longitude: Set(None),
            food_type: Set(None),
            donor_id: Set(donor.id.clone()),
            ngo_id: Set(Some(request.ngo_id.clone())),
            status: Set(DonationStatus::Pending),
            claimed_by: Set(None),
            claimed_at: Set(None),
            completed_at: Set(None),
            created_at: Set(Utc::now().into()),
        };

        let donation = self.request_repo.convert_to_donation(request_id, model).await?;
        info!(
            request_id = %request_id,
            donation_id = %donation.id,
            donor_id = %donor.id,
            "Request converted into donation"
        );

        Ok(donation)
    }
}
