//! Core business logic - framework-agnostic footprint scoring, tier
//! classification, recommendation rules, identity, and history aggregation.
//! The pure components (footprint, tier, recommend, the aggregation half of
//! history) have no side effects and touch no shared mutable state; the
//! database-backed operations take an explicit connection handle.

/// Account registration and authentication against the users table
pub mod account;
/// Factor table, lifestyle inputs, and the footprint calculator
pub mod footprint;
/// Trend, leaderboard, and CSV export over persisted predictions
pub mod history;
/// Prediction recording and record queries
pub mod prediction;
/// Ordered rule table for lifestyle recommendations
pub mod recommend;
/// Severity tier classification of daily totals
pub mod tier;
