//! History aggregation - trend series, community leaderboard, CSV export.
//!
//! Both views are derived read-only from persisted predictions and are never
//! stored back. The functions here are pure over their inputs; the database
//! reads that feed them live in [`crate::core::prediction`].

use crate::{
    core::footprint::format_display,
    core::tier::Tier,
    entities::prediction,
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashMap;
use std::str::FromStr;

/// Maximum number of entries in the community leaderboard.
pub const LEADERBOARD_LIMIT: usize = 10;

/// Header row of the exported history artifact.
pub const EXPORT_HEADER: &str = "Date,Total CO₂,Level";

/// Timestamp format used in the exported history artifact.
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One point of a user's emission trend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// When the calculation was recorded
    pub timestamp: DateTime<Utc>,
    /// Daily total in kg CO2, at display precision
    pub total_co2: f64,
    /// Severity tier of the total
    pub level: Tier,
}

/// One row of the community leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// Account the average belongs to
    pub username: String,
    /// Arithmetic mean of the user's recorded totals
    pub avg_co2: f64,
}

/// Builds a user's trend series, ascending by timestamp.
///
/// Input order does not matter; empty input yields an empty series (the
/// caller shows a "no history" state, not an error).
///
/// # Errors
/// Returns `Error::Config` if a persisted tier label cannot be parsed.
pub fn trend(records: &[prediction::Model]) -> Result<Vec<TrendPoint>> {
    let mut points = records
        .iter()
        .map(|record| {
            Ok(TrendPoint {
                timestamp: record.timestamp,
                total_co2: record.total_co2,
                level: Tier::from_str(&record.level)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    points.sort_by_key(|point| point.timestamp);
    Ok(points)
}

/// Builds the community leaderboard from (username, total) pairs.
///
/// Groups by username, averages each user's totals, sorts ascending by the
/// mean (a lower average footprint ranks higher), and truncates to
/// [`LEADERBOARD_LIMIT`]. The sort is stable, so tied users keep their
/// first-appearance order.
#[must_use]
pub fn leaderboard(rows: &[(String, f64)]) -> Vec<LeaderboardEntry> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();

    for (username, total) in rows {
        let entry = totals.entry(username.as_str()).or_insert_with(|| {
            order.push(username.as_str());
            (0.0, 0)
        });
        entry.0 += total;
        entry.1 += 1;
    }

    // Cast safety: record counts are far below f64's exact integer range
    #[allow(clippy::cast_precision_loss)]
    let mut entries: Vec<LeaderboardEntry> = order
        .into_iter()
        .map(|username| {
            let (sum, count) = totals[username];
            LeaderboardEntry {
                username: username.to_string(),
                avg_co2: sum / count as f64,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        a.avg_co2
            .partial_cmp(&b.avg_co2)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(LEADERBOARD_LIMIT);
    entries
}

/// Renders a trend series as the downloadable CSV artifact.
///
/// Header row included, one line per record, comma separated, UTF-8.
#[must_use]
pub fn export_csv(points: &[TrendPoint]) -> String {
    let mut out = String::from(EXPORT_HEADER);
    out.push('\n');

    for point in points {
        out.push_str(&format!(
            "{},{},{}\n",
            point.timestamp.format(EXPORT_TIMESTAMP_FORMAT),
            format_display(point.total_co2),
            point.level
        ));
    }

    out
}

/// Parses a previously exported history artifact back into trend points.
///
/// # Errors
/// Returns `Error::Config` on a missing/mismatched header or a malformed
/// row.
pub fn parse_csv(text: &str) -> Result<Vec<TrendPoint>> {
    let mut lines = text.lines();

    let header = lines.next().ok_or_else(|| Error::Config {
        message: "History export is empty".to_string(),
    })?;
    if header != EXPORT_HEADER {
        return Err(Error::Config {
            message: format!("Unexpected history export header '{header}'"),
        });
    }

    lines
        .filter(|line| !line.is_empty())
        .map(parse_csv_row)
        .collect()
}

fn parse_csv_row(line: &str) -> Result<TrendPoint> {
    let mut fields = line.split(',');
    let (Some(date), Some(total), Some(level), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::Config {
            message: format!("Malformed history row '{line}'"),
        });
    };

    let timestamp = NaiveDateTime::parse_from_str(date, EXPORT_TIMESTAMP_FORMAT)
        .map_err(|e| Error::Config {
            message: format!("Bad timestamp in history row '{line}': {e}"),
        })?
        .and_utc();
    let total_co2 = total.parse::<f64>().map_err(|e| Error::Config {
        message: format!("Bad total in history row '{line}': {e}"),
    })?;
    let level = Tier::from_str(level)?;

    Ok(TrendPoint {
        timestamp,
        total_co2,
        level,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use chrono::TimeZone;

    fn record(timestamp: DateTime<Utc>, total_co2: f64, level: &str) -> prediction::Model {
        prediction::Model {
            id: 0,
            user_id: 1,
            vehicle_type: "bus".to_string(),
            total_co2,
            level: level.to_string(),
            timestamp,
        }
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_trend_sorts_unordered_records() -> Result<()> {
        let records = vec![
            record(ts(200), 6.0, "Medium"),
            record(ts(0), 3.0, "Low"),
            record(ts(100), 13.0, "High"),
        ];

        let series = trend(&records)?;
        assert_eq!(series.len(), 3);
        assert!(series.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(series[0].total_co2, 3.0);
        assert_eq!(series[0].level, Tier::Low);
        Ok(())
    }

    #[test]
    fn test_trend_empty_input_yields_empty_series() -> Result<()> {
        assert!(trend(&[])?.is_empty());
        Ok(())
    }

    #[test]
    fn test_trend_rejects_corrupt_level() {
        let records = vec![record(ts(0), 3.0, "Whatever")];
        assert!(trend(&records).is_err());
    }

    #[test]
    fn test_leaderboard_averages_and_sorts_ascending() {
        let rows = vec![
            ("alice".to_string(), 10.0),
            ("alice".to_string(), 20.0),
            ("bob".to_string(), 5.0),
        ];

        let board = leaderboard(&rows);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].username, "bob");
        assert_eq!(board[0].avg_co2, 5.0);
        assert_eq!(board[1].username, "alice");
        assert_eq!(board[1].avg_co2, 15.0);
    }

    #[test]
    fn test_leaderboard_truncates_to_limit() {
        let rows: Vec<(String, f64)> = (0..15)
            .map(|i| (format!("user{i}"), f64::from(i)))
            .collect();

        let board = leaderboard(&rows);
        assert_eq!(board.len(), LEADERBOARD_LIMIT);
        assert_eq!(board[0].username, "user0");
    }

    #[test]
    fn test_leaderboard_ties_keep_first_appearance_order() {
        let rows = vec![
            ("carol".to_string(), 7.0),
            ("dave".to_string(), 7.0),
        ];

        let board = leaderboard(&rows);
        assert_eq!(board[0].username, "carol");
        assert_eq!(board[1].username, "dave");
    }

    #[test]
    fn test_leaderboard_empty_input() {
        assert!(leaderboard(&[]).is_empty());
    }

    #[test]
    fn test_export_header_and_rows() -> Result<()> {
        let series = trend(&[record(ts(0), 6.13, "Medium")])?;
        let csv = export_csv(&series);

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(EXPORT_HEADER));
        let row = lines.next().unwrap();
        assert!(row.ends_with(",6.13,Medium"));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn test_export_parse_round_trip() -> Result<()> {
        let records = vec![
            record(ts(0), 3.25, "Low"),
            record(ts(60), 8.5, "Medium"),
            record(ts(120), 14.75, "High"),
        ];
        let series = trend(&records)?;

        let reparsed = parse_csv(&export_csv(&series))?;
        assert_eq!(reparsed, series);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        let result = parse_csv("Date,Total,Level\n");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[test]
    fn test_parse_rejects_malformed_row() {
        let text = format!("{EXPORT_HEADER}\n2024-01-01 00:00:00,not_a_number,Low\n");
        assert!(parse_csv(&text).is_err());

        let text = format!("{EXPORT_HEADER}\n2024-01-01 00:00:00,1.0\n");
        assert!(parse_csv(&text).is_err());
    }
}
