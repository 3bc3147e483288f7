//! Prediction recording and record queries.
//!
//! `record_calculation` is the engine's main write path: compute the
//! breakdown, classify it, derive recommendations, and append exactly one
//! prediction row. A failed insert propagates to the caller; it never claims
//! success. The read paths back the trend and leaderboard views.

use crate::{
    core::{
        footprint::{self, EmissionBreakdown, FactorTable, LifestyleInput},
        recommend,
        tier::{self, Tier},
    },
    entities::{Prediction, User, prediction},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Everything produced by one completed calculation.
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    /// Unrounded per-category breakdown
    pub breakdown: EmissionBreakdown,
    /// Severity tier of the daily total
    pub tier: Tier,
    /// Ordered advice list
    pub tips: Vec<String>,
    /// The persisted prediction row
    pub record: prediction::Model,
}

/// Runs one full calculation for a user and appends the result.
///
/// Control flow is compute → classify → recommend → one insert. Any failure
/// before the insert leaves the store untouched; a failed insert surfaces as
/// a database error with no partial success.
pub async fn record_calculation(
    db: &DatabaseConnection,
    table: &FactorTable,
    user_id: i64,
    input: &LifestyleInput,
) -> Result<CalculationOutcome> {
    let breakdown = footprint::compute(table, input)?;
    let tier = tier::classify(breakdown.total);
    let tips = recommend::recommend(&breakdown, input);

    let model = prediction::ActiveModel {
        user_id: Set(user_id),
        vehicle_type: Set(input.vehicle_type.as_str().to_string()),
        total_co2: Set(footprint::round_display(breakdown.total)),
        level: Set(tier.to_string()),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let record = model.insert(db).await?;
    debug!(
        user_id,
        total = record.total_co2,
        level = %record.level,
        "Recorded footprint calculation"
    );

    Ok(CalculationOutcome {
        breakdown,
        tier,
        tips,
        record,
    })
}

/// All predictions for one user, ascending by timestamp.
///
/// An empty result is a valid "no history yet" state, not an error.
pub async fn predictions_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<prediction::Model>> {
    Prediction::find()
        .filter(prediction::Column::UserId.eq(user_id))
        .order_by_asc(prediction::Column::Timestamp)
        .all(db)
        .await
        .map_err(Into::into)
}

/// All predictions joined to their usernames, as (username, total) pairs.
///
/// Rows whose user has disappeared are skipped rather than failing the
/// whole view. Backs the community leaderboard.
pub async fn all_predictions_with_username(db: &DatabaseConnection) -> Result<Vec<(String, f64)>> {
    let rows = Prediction::find().find_also_related(User).all(db).await?;

    Ok(rows
        .into_iter()
        .filter_map(|(prediction, account)| {
            account.map(|account| (account.username, prediction.total_co2))
        })
        .collect())
}
