//! Volunteer registration profile entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::review_status::ReviewStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "volunteer_profile")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub user_id: String,

    pub full_name: String,

    #[sea_orm(unique)]
    pub email: String,

    pub phone: String,

    /// At least 18
    pub age: i32,

    pub gender: Gender,

    #[sea_orm(column_type = "Text")]
    pub address: String,

    pub city: String,
    pub pincode: String,
    pub availability: String,

    /// JSON array of strings
    pub volunteering_types: Json,

    pub has_vehicle: bool,
    pub food_preference: String,

    #[sea_orm(column_type = "Text")]
    pub id_proof: String,

    pub terms_accepted: bool,

    pub status: ReviewStatus,

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
