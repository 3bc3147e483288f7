//! Prediction entity - One completed footprint calculation per row.
//!
//! Each prediction stores the `user_id` it belongs to, the vehicle type used
//! for the calculation, the rounded daily total in kg CO2, the severity tier
//! label, and the creation timestamp. Rows are append-only: the engine never
//! mutates or deletes them (retention is a collaborator concern).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Prediction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "predictions")]
pub struct Model {
    /// Unique identifier for the prediction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user this prediction belongs to
    pub user_id: i64,
    /// Vehicle type the calculation was made with (e.g. `"petrol_car"`)
    pub vehicle_type: String,
    /// Daily total in kg CO2, at display precision
    pub total_co2: f64,
    /// Severity tier label: `"Low"`, `"Medium"`, or `"High"`
    pub level: String,
    /// When the calculation was recorded
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between Prediction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each prediction belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
