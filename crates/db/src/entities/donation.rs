//! Donation entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored lifecycle state of a donation.
///
/// This column is the only source of truth for the lifecycle; NGO approval
/// is derived from it rather than stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum DonationStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "ngo_approved")]
    NgoApproved,
    #[sea_orm(string_value = "claimed")]
    Claimed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Administrative approval marker, terminal.
    #[sea_orm(string_value = "approved")]
    Approved,
}

impl DonationStatus {
    /// Stored name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::NgoApproved => "ngo_approved",
            Self::Claimed => "claimed",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Approved => "approved",
        }
    }

    /// Whether an NGO has approved the donation at some point.
    #[must_use]
    pub const fn is_ngo_approved(self) -> bool {
        matches!(self, Self::NgoApproved | Self::Claimed | Self::Completed)
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Approved)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donation")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Servings, always positive
    pub quantity: i32,

    #[sea_orm(nullable)]
    pub expiry_date: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub pickup_address: Option<String>,

    #[sea_orm(nullable)]
    pub pickup_time: Option<String>,

    /// Opaque photo blob or URI
    #[sea_orm(column_type = "Text", nullable)]
    pub photo: Option<String>,

    #[sea_orm(nullable)]
    pub donor_name: Option<String>,

    #[sea_orm(nullable)]
    pub donor_phone: Option<String>,

    #[sea_orm(nullable)]
    pub latitude: Option<f64>,

    #[sea_orm(nullable)]
    pub longitude: Option<f64>,

    #[sea_orm(nullable)]
    pub food_type: Option<String>,

    /// Owning donor, immutable
    pub donor_id: String,

    /// NGO that approved the donation (or requested it, for converted requests)
    #[sea_orm(nullable)]
    pub ngo_id: Option<String>,

    pub status: DonationStatus,

    /// Volunteer holding the claim
    #[sea_orm(nullable)]
    pub claimed_by: Option<String>,

    #[sea_orm(nullable)]
    pub claimed_at: Option<DateTimeWithTimeZone>,

    /// Delivery marker
    #[sea_orm(nullable)]
    pub completed_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Derived NGO approval flag.
    #[must_use]
    pub const fn ngo_approved(&self) -> bool {
        self.status.is_ngo_approved()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::DonorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Donor,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::NgoId",
        to = "super::user::Column::Id"
    )]
    Ngo,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ClaimedBy",
        to = "super::user::Column::Id"
    )]
    Volunteer,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngo_approval_is_derived_from_status() {
        assert!(!DonationStatus::Pending.is_ngo_approved());
        assert!(DonationStatus::NgoApproved.is_ngo_approved());
        assert!(DonationStatus::Claimed.is_ngo_approved());
        assert!(DonationStatus::Completed.is_ngo_approved());
        assert!(!DonationStatus::Rejected.is_ngo_approved());
        assert!(!DonationStatus::Approved.is_ngo_approved());
    }

    #[test]
    fn test_terminal_states() {
        assert!(DonationStatus::Completed.is_terminal());
        assert!(DonationStatus::Rejected.is_terminal());
        assert!(DonationStatus::Approved.is_terminal());
        assert!(!DonationStatus::Claimed.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_value(DonationStatus::NgoApproved).unwrap();
        assert_eq!(json, "ngo_approved");
    }
}
