//! NGO registration profile entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::review_status::ReviewStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ngo_profile")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning NGO user, one profile per user
    #[sea_orm(unique)]
    pub user_id: String,

    pub name: String,
    pub registration_number: String,
    pub contact_person_name: String,

    #[sea_orm(unique)]
    pub email: String,

    pub phone: String,

    #[sea_orm(column_type = "Text")]
    pub address: String,

    pub latitude: f64,
    pub longitude: f64,

    /// JSON array of area names
    pub areas_served: Json,

    pub beneficiaries_count: i32,

    /// Daily capacity in servings
    pub quantity: i32,

    /// JSON array of accepted food types
    pub food_type: Json,

    #[sea_orm(column_type = "Text")]
    pub registration_certificate: String,

    #[sea_orm(column_type = "Text")]
    pub fssai_compliance: String,

    /// JSON array of pickup windows
    pub pickup_timing: Json,

    pub terms_accepted: bool,

    pub status: ReviewStatus,

    /// Admin who last reviewed the profile
    #[sea_orm(nullable)]
    pub reviewed_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
