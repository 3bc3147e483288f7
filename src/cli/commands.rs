//! Command handlers for the interactive loop.
//!
//! Each handler parses its arguments, calls into the core, and formats the
//! structured result as text. Handlers that need an authenticated user take
//! the session explicitly; nothing here keeps state of its own.

use crate::{
    cli::AppData,
    core::{account, footprint, history, prediction},
    entities::user,
    errors::{Error, Result},
    ml,
};
use std::str::FromStr;

const DEFAULT_EXPORT_PATH: &str = "carbon_history.csv";

const HELP_TEXT: &str = "carbon-buddy commands:\n\
  signup <username> <password>                         - create an account\n\
  login <username> <password>                          - start a session\n\
  logout                                               - end the session\n\
  calc <vehicle> <km> <kwh> <food> <waste_kg>          - compute and record today's footprint\n\
      vehicle: bike|petrol_car|diesel_car|ev|bus|train   food: veg|mixed|non_veg\n\
  history                                              - show your past calculations\n\
  export [path]                                        - write your history as CSV\n\
  leaderboard                                          - community ranking by average footprint\n\
  predict <vehicle> <fuel> <engine_l> <age> <mileage>  - ML vehicle emission label\n\
      vehicle: Car|Bus|Truck|Motorcycle   fuel: Petrol|Diesel|Electric|Hybrid\n\
  help                                                 - show this message\n\
  quit                                                 - leave";

/// Parses a command line and runs the matching handler.
pub async fn dispatch(
    data: &AppData,
    session: &mut Option<user::Model>,
    line: &str,
) -> Result<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        ["help"] => Ok(HELP_TEXT.to_string()),
        ["signup", username, password] => signup(data, username, password).await,
        ["login", username, password] => login(data, session, username, password).await,
        ["logout"] => Ok(logout(session)),
        ["calc", vehicle, km, kwh, food, waste] => {
            calc(data, session.as_ref(), vehicle, km, kwh, food, waste).await
        }
        ["history"] => show_history(data, session.as_ref()).await,
        ["export"] => export(data, session.as_ref(), DEFAULT_EXPORT_PATH).await,
        ["export", path] => export(data, session.as_ref(), path).await,
        ["leaderboard"] => leaderboard(data).await,
        ["predict", vehicle, fuel, engine, age, mileage] => {
            predict(data, vehicle, fuel, engine, age, mileage)
        }
        _ => Err(Error::Command {
            message: format!("Unrecognized command '{line}' (try 'help')"),
        }),
    }
}

fn require_session(session: Option<&user::Model>) -> Result<&user::Model> {
    session.ok_or_else(|| Error::Command {
        message: "Please login first".to_string(),
    })
}

fn parse_number(name: &str, value: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|_| Error::Command {
        message: format!("'{value}' is not a valid {name}"),
    })
}

async fn signup(data: &AppData, username: &str, password: &str) -> Result<String> {
    let account = account::register(&data.database, username, password).await?;
    Ok(format!(
        "Account '{}' created. Please login.",
        account.username
    ))
}

async fn login(
    data: &AppData,
    session: &mut Option<user::Model>,
    username: &str,
    password: &str,
) -> Result<String> {
    let account = account::authenticate(&data.database, username, password).await?;
    let greeting = format!("Logged in as {}", account.username);
    *session = Some(account);
    Ok(greeting)
}

fn logout(session: &mut Option<user::Model>) -> String {
    match session.take() {
        Some(account) => format!("Logged out {}", account.username),
        None => "No active session".to_string(),
    }
}

async fn calc(
    data: &AppData,
    session: Option<&user::Model>,
    vehicle: &str,
    km: &str,
    kwh: &str,
    food: &str,
    waste: &str,
) -> Result<String> {
    let account = require_session(session)?;

    let input = footprint::LifestyleInput {
        vehicle_type: footprint::VehicleType::from_str(vehicle)?,
        vehicle_km: parse_number("distance", km)?,
        electricity_kwh: parse_number("electricity amount", kwh)?,
        food_type: footprint::FoodType::from_str(food)?,
        waste_kg: parse_number("waste amount", waste)?,
    };

    let outcome =
        prediction::record_calculation(&data.database, &data.factors, account.id, &input).await?;
    let rounded = outcome.breakdown.rounded();

    let mut out = format!(
        "Total CO2: {} kg/day - {} impact\n  Vehicle: {} kg | Electricity: {} kg | Food: {} kg | Waste: {} kg\nRecommendations:",
        footprint::format_display(rounded.total),
        outcome.tier,
        footprint::format_display(rounded.vehicle),
        footprint::format_display(rounded.electricity),
        footprint::format_display(rounded.food),
        footprint::format_display(rounded.waste),
    );
    for tip in &outcome.tips {
        out.push_str("\n  - ");
        out.push_str(tip);
    }

    Ok(out)
}

async fn user_trend(data: &AppData, user_id: i64) -> Result<Vec<history::TrendPoint>> {
    let records = prediction::predictions_for_user(&data.database, user_id).await?;
    history::trend(&records)
}

async fn show_history(data: &AppData, session: Option<&user::Model>) -> Result<String> {
    let account = require_session(session)?;
    let series = user_trend(data, account.id).await?;

    if series.is_empty() {
        return Ok("No history available yet.".to_string());
    }

    let mut out = String::from("Date                 Total CO2  Level");
    for point in &series {
        out.push_str(&format!(
            "\n{}  {:>9}  {}",
            point.timestamp.format("%Y-%m-%d %H:%M:%S"),
            footprint::format_display(point.total_co2),
            point.level
        ));
    }
    Ok(out)
}

async fn export(data: &AppData, session: Option<&user::Model>, path: &str) -> Result<String> {
    let account = require_session(session)?;
    let series = user_trend(data, account.id).await?;

    std::fs::write(path, history::export_csv(&series))?;
    Ok(format!("Wrote {} record(s) to {path}", series.len()))
}

async fn leaderboard(data: &AppData) -> Result<String> {
    let rows = prediction::all_predictions_with_username(&data.database).await?;
    let board = history::leaderboard(&rows);

    if board.is_empty() {
        return Ok("Not enough data for a leaderboard yet.".to_string());
    }

    let mut out = String::from("Community leaderboard (avg kg CO2/day, lower is better):");
    for (rank, entry) in board.iter().enumerate() {
        out.push_str(&format!(
            "\n{:>2}. {}  {}",
            rank + 1,
            entry.username,
            footprint::format_display(entry.avg_co2)
        ));
    }
    Ok(out)
}

fn predict(
    data: &AppData,
    vehicle: &str,
    fuel: &str,
    engine: &str,
    age: &str,
    mileage: &str,
) -> Result<String> {
    let model = data.model.as_deref().ok_or_else(|| Error::Classifier {
        message: "No emission classifier is configured".to_string(),
    })?;

    let attrs = ml::VehicleAttributes {
        vehicle_type: vehicle.to_string(),
        fuel_type: fuel.to_string(),
        engine_size_l: parse_number("engine size", engine)?,
        age_years: parse_number("vehicle age", age)?,
        mileage_km: parse_number("mileage", mileage)?,
    };

    let label = ml::predict_emission_label(model, &attrs)?;
    Ok(format!("Predicted emission level: {label}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Result;
    use crate::test_utils::{setup_test_db, test_factor_table};
    use std::collections::HashMap;

    async fn setup_app() -> Result<AppData> {
        let db = setup_test_db().await?;
        Ok(AppData::new(db, test_factor_table()))
    }

    struct FixedLabelModel;

    impl ml::EmissionModel for FixedLabelModel {
        fn feature_names(&self) -> Vec<String> {
            vec!["Vehicle Type".to_string(), "Mileage".to_string()]
        }

        fn predict(&self, _features: &HashMap<String, f64>) -> Result<String> {
            Ok("Low".to_string())
        }
    }

    #[tokio::test]
    async fn test_signup_login_calc_history_flow() -> Result<()> {
        let data = setup_app().await?;
        let mut session = None;

        let out = dispatch(&data, &mut session, "signup alice hunter2").await?;
        assert!(out.contains("alice"));

        dispatch(&data, &mut session, "login alice hunter2").await?;
        assert!(session.is_some());

        let out = dispatch(&data, &mut session, "calc petrol_car 10 5 mixed 1").await?;
        assert!(out.contains("Total CO2"));
        assert!(out.contains("Recommendations:"));

        let out = dispatch(&data, &mut session, "history").await?;
        assert!(out.contains("Medium") || out.contains("Low") || out.contains("High"));

        let out = dispatch(&data, &mut session, "leaderboard").await?;
        assert!(out.contains("alice"));

        Ok(())
    }

    #[tokio::test]
    async fn test_calc_requires_login() -> Result<()> {
        let data = setup_app().await?;
        let mut session = None;

        let result = dispatch(&data, &mut session, "calc bike 1 1 veg 0").await;
        assert!(matches!(result.unwrap_err(), Error::Command { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_history_empty_state_is_not_an_error() -> Result<()> {
        let data = setup_app().await?;
        let mut session = None;

        dispatch(&data, &mut session, "signup bob pw").await?;
        dispatch(&data, &mut session, "login bob pw").await?;

        let out = dispatch(&data, &mut session, "history").await?;
        assert_eq!(out, "No history available yet.");

        Ok(())
    }

    #[tokio::test]
    async fn test_unrecognized_command() -> Result<()> {
        let data = setup_app().await?;
        let mut session = None;

        let result = dispatch(&data, &mut session, "frobnicate").await;
        assert!(matches!(result.unwrap_err(), Error::Command { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_predict_without_model_is_classifier_error() -> Result<()> {
        let data = setup_app().await?;
        let mut session = None;

        let result = dispatch(&data, &mut session, "predict Car Petrol 1.5 5 10000").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Classifier { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_predict_with_model() -> Result<()> {
        let data = setup_app().await?.with_model(Box::new(FixedLabelModel));
        let mut session = None;

        let out = dispatch(&data, &mut session, "predict Car Petrol 1.5 5 10000").await?;
        assert_eq!(out, "Predicted emission level: Low");

        Ok(())
    }

    #[tokio::test]
    async fn test_bad_number_is_command_error() -> Result<()> {
        let data = setup_app().await?;
        let mut session = None;

        dispatch(&data, &mut session, "signup carol pw").await?;
        dispatch(&data, &mut session, "login carol pw").await?;

        let result = dispatch(&data, &mut session, "calc bike lots 1 veg 0").await;
        assert!(matches!(result.unwrap_err(), Error::Command { message: _ }));

        Ok(())
    }
}
