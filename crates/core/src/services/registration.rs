//! NGO and volunteer registration profiles, reviewed by admins.

use aaharsetu_common::{AppError, AppResult, IdGenerator};
use aaharsetu_db::{
    entities::{
        ngo_profile,
        review_status::ReviewStatus,
        user,
        volunteer_profile::{self, Gender},
    },
    repositories::{NgoProfileRepository, VolunteerProfileRepository},
};
use chrono::Utc;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError};

fn must_accept_terms(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(ValidationError::new("terms_not_accepted"))
    }
}

/// NGO registration form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNgoInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub registration_number: String,
    #[validate(length(min = 1, max = 256))]
    pub contact_person_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5, max = 32))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub areas_served: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub beneficiaries_count: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[serde(default)]
    pub food_type: Vec<String>,
    #[validate(length(min = 1))]
    pub registration_certificate: String,
    #[validate(length(min = 1))]
    pub fssai_compliance: String,
    #[serde(default)]
    pub pickup_timing: Vec<String>,
    #[validate(custom(function = "must_accept_terms"))]
    pub terms_accepted: bool,
}

/// Volunteer registration form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVolunteerInput {
    #[validate(length(min = 1, max = 256))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5, max = 32))]
    pub phone: String,
    #[validate(range(min = 18, message = "Volunteers must be at least 18"))]
    pub age: i32,
    pub gender: Gender,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    #[validate(length(min = 1, max = 16))]
    pub pincode: String,
    #[validate(length(min = 1, max = 128))]
    pub availability: String,
    #[validate(length(min = 1, message = "Pick at least one volunteering type"))]
    pub volunteering_types: Vec<String>,
    pub has_vehicle: bool,
    #[validate(length(min = 1, max = 64))]
    pub food_preference: String,
    #[validate(length(min = 1))]
    pub id_proof: String,
    #[validate(custom(function = "must_accept_terms"))]
    pub terms_accepted: bool,
}

/// Publicly listable volunteer details. Contact data and ID proof stay private.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerSummary {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub city: String,
    pub availability: String,
    pub volunteering_types: serde_json::Value,
    pub has_vehicle: bool,
    pub status: ReviewStatus,
}

impl From<volunteer_profile::Model> for VolunteerSummary {
    fn from(p: volunteer_profile::Model) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            full_name: p.full_name,
            city: p.city,
            availability: p.availability,
            volunteering_types: p.volunteering_types,
            has_vehicle: p.has_vehicle,
            status: p.status,
        }
    }
}

/// Admin review outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ReviewDecision {
    const fn status(self) -> ReviewStatus {
        match self {
            Self::Approve => ReviewStatus::Approved,
            Self::Reject => ReviewStatus::Rejected,
        }
    }
}

/// Registration service.
#[derive(Clone)]
pub struct RegistrationService {
    ngo_repo: NgoProfileRepository,
    volunteer_repo: VolunteerProfileRepository,
    id_gen: IdGenerator,
}

impl RegistrationService {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(
        ngo_repo: NgoProfileRepository,
        volunteer_repo: VolunteerProfileRepository,
    ) -> Self {
        Self {
            ngo_repo,
            volunteer_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit an NGO profile for review.
    pub async fn register_ngo(
        &self,
        owner: &user::Model,
        input: RegisterNgoInput,
    ) -> AppResult<ngo_profile::Model> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();
        if self.ngo_repo.exists_for(&owner.id, &email).await? {
            return Err(AppError::Conflict("NGO already registered".to_string()));
        }

        let model = ngo_profile::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner.id.clone()),
            name: Set(input.name),
            registration_number: Set(input.registration_number),
            contact_person_name: Set(input.contact_person_name),
            email: Set(email),
            phone: Set(input.phone),
            address: Set(input.address),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            areas_served: Set(serde_json::json!(input.areas_served)),
            beneficiaries_count: Set(input.beneficiaries_count),
            quantity: Set(input.quantity),
            food_type: Set(serde_json::json!(input.food_type)),
            registration_certificate: Set(input.registration_certificate),
            fssai_compliance: Set(input.fssai_compliance),
            pickup_timing: Set(serde_json::json!(input.pickup_timing)),
            terms_accepted: Set(input.terms_accepted),
            status: Set(ReviewStatus::Pending),
            reviewed_by: Set(None),
            created_at: Set(Utc::now().into()),
        };

        let profile = self.ngo_repo.create(model).await?;
        info!(profile_id = %profile.id, user_id = %owner.id, "NGO registered");

        Ok(profile)
    }

    /// Every NGO profile.
    pub async fn list_ngos(&self) -> AppResult<Vec<ngo_profile::Model>> {
        self.ngo_repo.find_all().await
    }

    /// One NGO profile.
    pub async fn get_ngo(&self, id: &str) -> AppResult<ngo_profile::Model> {
        self.ngo_repo.get_by_id(id).await
    }

    /// Record an admin decision on a pending NGO profile.
    pub async fn review_ngo(
        &self,
        id: &str,
        decision: ReviewDecision,
        admin: &user::Model,
    ) -> AppResult<ngo_profile::Model> {
        if !self.ngo_repo.review(id, decision.status(), &admin.id).await? {
            let current = self.ngo_repo.get_by_id(id).await?;
            return Err(AppError::Conflict(format!(
                "NGO profile already {}",
                current.status.as_str()
            )));
        }

        info!(profile_id = %id, admin_id = %admin.id, ?decision, "NGO profile reviewed");
        self.ngo_repo.get_by_id(id).await
    }

    /// Submit a volunteer profile for review.
    pub async fn register_volunteer(
        &self,
        owner: &user::Model,
        input: RegisterVolunteerInput,
    ) -> AppResult<volunteer_profile::Model> {
        input.validate()?;

        let email = input.email.trim().to_lowercase();
        if self.volunteer_repo.exists_for(&owner.id, &email).await? {
            return Err(AppError::Conflict("Volunteer already registered".to_string()));
        }

        let model = volunteer_profile::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner.id.clone()),
            full_name: Set(input.full_name),
            email: Set(email),
            phone: Set(input.phone),
            age: Set(input.age),
            gender: Set(input.gender),
            address: Set(input.address),
            city: Set(input.city),
            pincode: Set(input.pincode),
            availability: Set(input.availability),
            volunteering_types: Set(serde_json::json!(input.volunteering_types)),
            has_vehicle: Set(input.has_vehicle),
            food_preference: Set(input.food_preference),
            id_proof: Set(input.id_proof),
            terms_accepted: Set(input.terms_accepted),
            status: Set(ReviewStatus::Pending),
            reviewed_by: Set(None),
            created_at: Set(Utc::now().into()),
        };

        let profile = self.volunteer_repo.create(model).await?;
        info!(profile_id = %profile.id, user_id = %owner.id, "Volunteer registered");

        Ok(profile)
    }

    /// Every volunteer profile, full detail.
    pub async fn list_volunteers(&self) -> AppResult<Vec<volunteer_profile::Model>> {
        self.volunteer_repo.find_all().await
    }

    /// Every volunteer profile, public fields only.
    pub async fn list_volunteer_summaries(&self) -> AppResult<Vec<VolunteerSummary>> {
        Ok(self
            .volunteer_repo
            .find_all()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// The profile a volunteer user registered, if any.
    pub async fn volunteer_profile_of(
        &self,
        user_id: &str,
    ) -> AppResult<Option<volunteer_profile::Model>> {
        self.volunteer_repo.find_by_user_id(user_id).await
    }

    /// Record an admin decision on a pending volunteer profile.
    pub async fn review_volunteer(
        &self,
        id: &str,
        decision: ReviewDecision,
        admin: &user::Model,
    ) -> AppResult<volunteer_profile::Model> {
        if !self
            .volunteer_repo
            .review(id, decision.status(), &admin.id)
            .await?
        {
            let current = self.volunteer_repo.get_by_id(id).await?;
            return Err(AppError::Conflict(format!(
                "Volunteer profile already {}",
                current.status.as_str()
            )));
        }

        info!(profile_id = %id, admin_id = %admin.id, ?decision, "Volunteer profile reviewed");
        self.volunteer_repo.get_by_id(id).await
    }
}
