//! User entity - Represents a registered account in the identity store.
//!
//! The rest of the engine treats `id` as an opaque user identifier; the
//! credential column holds a SHA-256 hex digest and is never inspected
//! outside the account module.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across all accounts
    #[sea_orm(unique)]
    pub username: String,
    /// SHA-256 hex digest of the password
    pub credential: String,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many footprint predictions
    #[sea_orm(has_many = "super::prediction::Entity")]
    Predictions,
}

impl Related<super::prediction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Predictions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
