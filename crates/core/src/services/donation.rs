//! Donation lifecycle service.
//!
//! `pending -> ngo_approved -> claimed -> completed`, with `pending ->
//! rejected` and the admin `pending -> approved` marker as terminal side
//! branches. Each transition is one guarded write; when the guard fails the
//! row is re-read only to pick the right error.

use std::collections::HashMap;

use aaharsetu_common::{AppError, AppResult, IdGenerator};
use aaharsetu_db::{
    entities::{
        donation::{self, DonationStatus},
        user,
    },
    repositories::{DonationRepository, UserRepository},
};
use chrono::Utc;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use validator::Validate;

/// Points awarded per completed delivery.
pub const POINTS_PER_DELIVERY: i64 = 100;

/// Input for listing surplus food.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationInput {
    #[validate(length(min = 1, max = 256, message = "Title is required"))]
    pub title: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,

    pub expiry_date: Option<String>,
    pub pickup_address: Option<String>,
    pub pickup_time: Option<String>,

    /// Opaque photo blob or URI
    pub photo: Option<String>,

    #[validate(length(max = 256))]
    pub donor_name: Option<String>,

    #[validate(length(max = 32))]
    pub donor_phone: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub food_type: Option<String>,
}

/// Status shown to donors, derived from claim and delivery markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Pending,
    NgoApproved,
    Claimed,
    Completed,
    Rejected,
    Approved,
}

impl DisplayStatus {
    /// Derive the display status of a donation.
    #[must_use]
    pub fn of(donation: &donation::Model) -> Self {
        // Administrative outcomes carry no claim markers.
        match (&donation.status, &donation.claimed_by, &donation.completed_at) {
            (DonationStatus::Rejected, _, _) => Self::Rejected,
            (DonationStatus::Approved, _, _) => Self::Approved,
            (_, Some(_), Some(_)) => Self::Completed,
            (_, Some(_), None) => Self::Claimed,
            _ if donation.ngo_approved() => Self::NgoApproved,
            _ => Self::Pending,
        }
    }
}

/// Donation as sent to clients, with the derived flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    #[serde(flatten)]
    pub donation: donation::Model,
    pub ngo_approved: bool,
    pub display_status: DisplayStatus,
}

impl From<donation::Model> for DonationView {
    fn from(donation: donation::Model) -> Self {
        Self {
            ngo_approved: donation.ngo_approved(),
            display_status: DisplayStatus::of(&donation),
            donation,
        }
    }
}

/// Volunteer's view of the delivery board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerBoard {
    pub available_donations: Vec<DonationView>,
    pub active_deliveries: Vec<DonationView>,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub volunteer_id: String,
    pub name: String,
    pub deliveries: i64,
    pub points: i64,
}

/// Donation service for business logic.
#[derive(Clone)]
pub struct DonationService {
    donation_repo: DonationRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl DonationService {
    /// Create a new donation service.
    #[must_use]
    pub const fn new(donation_repo: DonationRepository, user_repo: UserRepository) -> Self {
        Self {
            donation_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List a new donation owned by `donor`.
    pub async fn create(
        &self,
        donor: &user::Model,
        input: CreateDonationInput,
    ) -> AppResult<donation::Model> {
        input.validate()?;

        let model = donation::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title.trim().to_string()),
            description: Set(input.description),
            quantity: Set(input.quantity),
            expiry_date: Set(input.expiry_date),
            pickup_address: Set(input.pickup_address),
            pickup_time: Set(input.pickup_time),
            photo: Set(input.photo),
            donor_name: Set(input.donor_name.or_else(|| Some(donor.name.clone()))),
            donor_phone: Set(input.donor_phone),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            food_type: Set(input.food_type),
            donor_id: Set(donor.id.clone()),
            ngo_id: Set(None),
            status: Set(DonationStatus::Pending),
            claimed_by: Set(None),
            claimed_at: Set(None),
            completed_at: Set(None),
            created_at: Set(Utc::now().into()),
        };

        let donation = self.donation_repo.create(model).await?;
        info!(donation_id = %donation.id, donor_id = %donor.id, quantity = donation.quantity, "Donation created");

        Ok(donation)
    }

    /// A donor's own donations.
    pub async fn list_for_donor(&self, donor_id: &str) -> AppResult<Vec<donation::Model>> {
        debug!(donor_id = %donor_id, "Listing donor donations");
        self.donation_repo.find_by_donor(donor_id).await
    }

    /// Donations awaiting NGO review.
    pub async fn list_pending(&self) -> AppResult<Vec<donation::Model>> {
        self.donation_repo.find_pending().await
    }

    /// Donations an NGO has approved.
    pub async fn list_approved_by(&self, ngo_id: &str) -> AppResult<Vec<donation::Model>> {
        self.donation_repo.find_approved_by_ngo(ngo_id).await
    }

    /// Every donation.
    pub async fn list_all(&self) -> AppResult<Vec<donation::Model>> {
        self.donation_repo.find_all().await
    }

    /// Deliveries a volunteer currently holds.
    pub async fn active_deliveries(&self, volunteer_id: &str) -> AppResult<Vec<donation::Model>> {
        self.donation_repo.find_active_for_volunteer(volunteer_id).await
    }

    /// Claimable donations alongside the volunteer's own active deliveries.
    pub async fn volunteer_board(&self, volunteer_id: &str) -> AppResult<VolunteerBoard> {
        let available = self.donation_repo.find_available().await?;
        let active = self.active_deliveries(volunteer_id).await?;

        Ok(VolunteerBoard {
            available_donations: available.into_iter().map(Into::into).collect(),
            active_deliveries: active.into_iter().map(Into::into).collect(),
        })
    }

    /// NGO approval: `pending -> ngo_approved`.
    pub async fn approve_by_ngo(&self, id: &str, ngo_id: &str) -> AppResult<donation::Model> {
        if !self.donation_repo.approve_by_ngo(id, ngo_id).await? {
            return Err(self.pending_guard_failure(id, "approve").await);
        }

        info!(donation_id = %id, ngo_id = %ngo_id, "Donation approved by NGO");
        self.donation_repo.get_by_id(id).await
    }

    /// Rejection by an NGO or admin: `pending -> rejected`.
    pub async fn reject(&self, id: &str, actor_id: &str) -> AppResult<donation::Model> {
        if !self.donation_repo.reject(id).await? {
            return Err(self.pending_guard_failure(id, "reject").await);
        }

        info!(donation_id = %id, actor_id = %actor_id, "Donation rejected");
        self.donation_repo.get_by_id(id).await
    }

    /// Admin approval marker: `pending -> approved`.
    pub async fn approve_by_admin(&self, id: &str, admin_id: &str) -> AppResult<donation::Model> {
        if !self.donation_repo.approve_by_admin(id).await? {
            return Err(self.pending_guard_failure(id, "approve").await);
        }

        info!(donation_id = %id, admin_id = %admin_id, "Donation approved by admin");
        self.donation_repo.get_by_id(id).await
    }

    /// Volunteer claim: `ngo_approved -> claimed`.
    pub async fn claim(&self, id: &str, volunteer_id: &str) -> AppResult<donation::Model> {
        if self.donation_repo.claim(id, volunteer_id, Utc::now()).await? {
            info!(donation_id = %id, volunteer_id = %volunteer_id, "Donation claimed");
            return self.donation_repo.get_by_id(id).await;
        }

        let current = self.donation_repo.get_by_id(id).await?;
        warn!(donation_id = %id, volunteer_id = %volunteer_id, status = current.status.as_str(), "Claim refused");

        if current.claimed_by.is_some()
            || matches!(
                current.status,
                DonationStatus::Claimed | DonationStatus::Completed
            )
        {
            Err(AppError::AlreadyClaimed)
        } else {
            Err(AppError::Conflict(format!(
                "Donation is {} and cannot be claimed",
                current.status.as_str()
            )))
        }
    }

    /// Delivery: `claimed -> completed`, by the claiming volunteer only.
    pub async fn complete(&self, id: &str, volunteer_id: &str) -> AppResult<donation::Model> {
        if self.donation_repo.complete(id, volunteer_id, Utc::now()).await? {
            info!(donation_id = %id, volunteer_id = %volunteer_id, "Delivery completed");
            return self.donation_repo.get_by_id(id).await;
        }

        let current = self.donation_repo.get_by_id(id).await?;
        warn!(donation_id = %id, volunteer_id = %volunteer_id, status = current.status.as_str(), "Completion refused");

        if current.claimed_by.as_deref() != Some(volunteer_id) {
            Err(AppError::NotAssigned)
        } else if current.status == DonationStatus::Completed {
            Err(AppError::AlreadyCompleted)
        } else {
            Err(AppError::Conflict(format!(
                "Donation is {} and cannot be completed",
                current.status.as_str()
            )))
        }
    }

    /// Volunteers ranked by completed deliveries.
    pub async fn leaderboard(&self) -> AppResult<Vec<LeaderboardEntry>> {
        let mut counts = self.donation_repo.delivery_counts().await?;
        counts.sort_by(|a, b| {
            b.deliveries
                .cmp(&a.deliveries)
                .then_with(|| a.volunteer_id.cmp(&b.volunteer_id))
        });

        let ids: Vec<String> = counts.iter().map(|c| c.volunteer_id.clone()).collect();
        let names: HashMap<String, String> = self
            .user_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(counts
            .into_iter()
            .enumerate()
            .map(|(i, c)| LeaderboardEntry {
                rank: i + 1,
                name: names.get(&c.volunteer_id).cloned().unwrap_or_default(),
                points: c.deliveries * POINTS_PER_DELIVERY,
                deliveries: c.deliveries,
                volunteer_id: c.volunteer_id,
            })
            .collect())
    }

    async fn pending_guard_failure(&self, id: &str, action: &str) -> AppError {
        match self.donation_repo.get_by_id(id).await {
            Ok(current) => {
                warn!(donation_id = %id, status = current.status.as_str(), action, "Transition refused");
                AppError::Conflict(format!(
                    "Cannot {action} a donation that is {}",
                    current.status.as_str()
                ))
            }
            Err(e) => e,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use aaharsetu_db::entities::user::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_donation(id: &str, status: DonationStatus) -> donation::Model {
        donation::Model {
            id: id.to_string(),
            title: "Veg biryani".to_string(),
            description: None,
            quantity: 30,
            expiry_date: None,
            pickup_address: None,
            pickup_time: None,
            photo: None,
            donor_name: None,
            donor_phone: None,
            latitude: None,
            longitude: None,
            food_type: None,
            donor_id: "donor1".to_string(),
            ngo_id: None,
            status,
            claimed_by: None,
            claimed_at: None,
            completed_at: None,
            created_at: Utc::now().into(),
        }
    }

    fn claimed_by(id: &str, volunteer: &str, status: DonationStatus) -> donation::Model {
        let mut d = create_test_donation(id, status);
        d.ngo_id = Some("ngo1".to_string());
        d.claimed_by = Some(volunteer.to_string());
        d.claimed_at = Some(Utc::now().into());
        if status == DonationStatus::Completed {
            d.completed_at = Some(Utc::now().into());
        }
        d
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn service_with(db: MockDatabase) -> DonationService {
        let conn = Arc::new(db.into_connection());
        DonationService::new(
            DonationRepository::new(conn.clone()),
            UserRepository::new(conn),
        )
    }

    fn donor() -> user::Model {
        user::Model {
            id: "donor1".to_string(),
            name: "Hotel Saravana".to_string(),
            email: "donor@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Donor,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_display_status_derivation() {
        let pending = create_test_donation("d1", DonationStatus::Pending);
        assert_eq!(DisplayStatus::of(&pending), DisplayStatus::Pending);

        let approved = create_test_donation("d1", DonationStatus::NgoApproved);
        assert_eq!(DisplayStatus::of(&approved), DisplayStatus::NgoApproved);

        let claimed = claimed_by("d1", "v1", DonationStatus::Claimed);
        assert_eq!(DisplayStatus::of(&claimed), DisplayStatus::Claimed);

        let done = claimed_by("d1", "v1", DonationStatus::Completed);
        assert_eq!(DisplayStatus::of(&done), DisplayStatus::Completed);

        let rejected = create_test_donation("d1", DonationStatus::Rejected);
        assert_eq!(DisplayStatus::of(&rejected), DisplayStatus::Rejected);

        let admin_approved = create_test_donation("d1", DonationStatus::Approved);
        assert_eq!(DisplayStatus::of(&admin_approved), DisplayStatus::Approved);
    }

    #[test]
    fn test_rejected_view_is_not_pending() {
        let view = DonationView::from(create_test_donation("d1", DonationStatus::Rejected));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["displayStatus"], "rejected");
        assert_eq!(json["ngoApproved"], false);
    }

    #[test]
    fn test_view_carries_derived_flags() {
        let view = DonationView::from(claimed_by("d1", "v1", DonationStatus::Claimed));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["ngoApproved"], true);
        assert_eq!(json["displayStatus"], "claimed");
        assert_eq!(json["status"], "claimed");
        assert_eq!(json["claimedBy"], "v1");
    }

    #[tokio::test]
    async fn test_create_rejects_zero_quantity() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));

        let input = CreateDonationInput {
            title: "Rotis".to_string(),
            description: None,
            quantity: 0,
            expiry_date: None,
            pickup_address: None,
            pickup_time: None,
            photo: None,
            donor_name: None,
            donor_phone: None,
            latitude: None,
            longitude: None,
            food_type: None,
        };

        assert!(matches!(
            service.create(&donor(), input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_approve_twice_conflicts() {
        let mut approved = create_test_donation("d1", DonationStatus::NgoApproved);
        approved.ngo_id = Some("ngo1".to_string());

        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .append_query_results([[approved]]),
        );

        let result = service.approve_by_ngo("d1", "ngo2").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_approve_missing_donation() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .append_query_results([Vec::<donation::Model>::new()]),
        );

        let result = service.approve_by_ngo("nope", "ngo1").await;
        assert!(matches!(result, Err(AppError::DonationNotFound(_))));
    }

    #[tokio::test]
    async fn test_claim_success_returns_fresh_row() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1)])
                .append_query_results([[claimed_by("d1", "v1", DonationStatus::Claimed)]]),
        );

        let donation = service.claim("d1", "v1").await.unwrap();
        assert_eq!(donation.claimed_by.as_deref(), Some("v1"));
        assert!(donation.claimed_at.is_some());
        assert!(donation.ngo_approved());
    }

    #[tokio::test]
    async fn test_claim_already_claimed() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .append_query_results([[claimed_by("d1", "v1", DonationStatus::Claimed)]]),
        );

        assert!(matches!(
            service.claim("d1", "v2").await,
            Err(AppError::AlreadyClaimed)
        ));
    }

    #[tokio::test]
    async fn test_claim_rejected_donation_conflicts() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .append_query_results([[create_test_donation("d1", DonationStatus::Rejected)]]),
        );

        assert!(matches!(
            service.claim("d1", "v1").await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_by_other_volunteer() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .append_query_results([[claimed_by("d1", "v1", DonationStatus::Claimed)]]),
        );

        assert!(matches!(
            service.complete("d1", "v2").await,
            Err(AppError::NotAssigned)
        ));
    }

    #[tokio::test]
    async fn test_complete_twice() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0)])
                .append_query_results([[claimed_by("d1", "v1", DonationStatus::Completed)]]),
        );

        assert!(matches!(
            service.complete("d1", "v1").await,
            Err(AppError::AlreadyCompleted)
        ));
    }

    #[tokio::test]
    async fn test_leaderboard_points() {
        use std::collections::BTreeMap;

        let row = |id: &str, n: i64| {
            BTreeMap::from([
                ("volunteer_id", sea_orm::Value::from(id.to_string())),
                ("deliveries", sea_orm::Value::from(n)),
            ])
        };
        let volunteer = |id: &str, name: &str| user::Model {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            password_hash: "hash".to_string(),
            role: Role::Volunteer,
            created_at: Utc::now().into(),
        };

        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[row("v2", 1), row("v1", 3)]])
                .append_query_results([[volunteer("v1", "Meera"), volunteer("v2", "Arjun")]]),
        );

        let board = service.leaderboard().await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].volunteer_id, "v1");
        assert_eq!(board[0].name, "Meera");
        assert_eq!(board[0].points, 300);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].points, 100);
    }
}
