//! Feature-encoding adapter for the external vehicle emission classifier.
//!
//! The classifier itself is an externally trained model behind the
//! [`EmissionModel`] trait: it declares its own feature set and performs a
//! single input/output exchange with no retry policy. The adapter's job is
//! to translate UI-level categorical inputs into the exact feature
//! name/value encoding the model expects. This path is independent of the
//! footprint calculator and touches neither the factor table nor the store.

use crate::errors::Result;
use std::collections::HashMap;
use tracing::warn;

/// Encoding table for the `"Vehicle Type"` feature. Extending the table is
/// an adapter-only change; the classifier contract stays untouched.
pub const VEHICLE_CODES: &[(&str, f64)] = &[
    ("Car", 0.0),
    ("Bus", 1.0),
    ("Truck", 2.0),
    ("Motorcycle", 3.0),
];

/// Encoding table for the `"Fuel Type"` feature.
pub const FUEL_CODES: &[(&str, f64)] = &[
    ("Petrol", 0.0),
    ("Diesel", 1.0),
    ("Electric", 2.0),
    ("Hybrid", 3.0),
];

/// Call contract with the external classifier.
///
/// The feature set is declared by the model itself and must be
/// introspectable so the adapter can supply exactly the features the model
/// was trained on, in whatever order it asks for them.
pub trait EmissionModel {
    /// The feature names the model expects, as trained.
    fn feature_names(&self) -> Vec<String>;

    /// Predicts a coarse emission-level label from a complete feature
    /// vector. A failure is surfaced to the caller, never retried.
    fn predict(&self, features: &HashMap<String, f64>) -> Result<String>;
}

/// UI-level vehicle attributes, before encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleAttributes {
    /// Vehicle category label (e.g. `"Car"`)
    pub vehicle_type: String,
    /// Fuel label (e.g. `"Petrol"`)
    pub fuel_type: String,
    /// Engine displacement in litres
    pub engine_size_l: f64,
    /// Vehicle age in years
    pub age_years: f64,
    /// Odometer reading in km
    pub mileage_km: f64,
}

/// Unknown categorical values encode as 0, matching the model's training
/// encoding for the baseline class.
fn lookup_code(table: &[(&str, f64)], value: &str) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == value)
        .map_or(0.0, |(_, code)| *code)
}

/// Encodes the attributes into the model's declared feature vector and
/// returns its single-label prediction.
///
/// A feature name the adapter does not recognize is supplied as 0.0 so the
/// classifier's feature contract can evolve without adapter changes; each
/// such fallback is logged, since it silently degrades prediction quality
/// when the mapping is stale.
pub fn predict_emission_label(
    model: &dyn EmissionModel,
    attrs: &VehicleAttributes,
) -> Result<String> {
    let mut features = HashMap::new();

    for name in model.feature_names() {
        let value = match name.as_str() {
            "Vehicle Type" => lookup_code(VEHICLE_CODES, &attrs.vehicle_type),
            "Fuel Type" => lookup_code(FUEL_CODES, &attrs.fuel_type),
            "Engine Size" => attrs.engine_size_l,
            "Age of Vehicle" => attrs.age_years,
            "Mileage" => attrs.mileage_km,
            other => {
                warn!(
                    feature = other,
                    "Classifier expects a feature the adapter does not map; supplying 0"
                );
                0.0
            }
        };
        features.insert(name, value);
    }

    model.predict(&features)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use std::sync::Mutex;

    /// Records the feature vector it was called with and returns a fixed
    /// label, standing in for the externally trained model.
    struct StubModel {
        names: Vec<String>,
        seen: Mutex<Option<HashMap<String, f64>>>,
        fail: bool,
    }

    impl StubModel {
        fn new(names: &[&str]) -> Self {
            Self {
                names: names.iter().map(|n| (*n).to_string()).collect(),
                seen: Mutex::new(None),
                fail: false,
            }
        }
    }

    impl EmissionModel for StubModel {
        fn feature_names(&self) -> Vec<String> {
            self.names.clone()
        }

        fn predict(&self, features: &HashMap<String, f64>) -> Result<String> {
            if self.fail {
                return Err(Error::Classifier {
                    message: "model exploded".to_string(),
                });
            }
            *self.seen.lock().unwrap() = Some(features.clone());
            Ok("Moderate".to_string())
        }
    }

    fn attrs() -> VehicleAttributes {
        VehicleAttributes {
            vehicle_type: "Bus".to_string(),
            fuel_type: "Diesel".to_string(),
            engine_size_l: 4.5,
            age_years: 8.0,
            mileage_km: 120_000.0,
        }
    }

    #[test]
    fn test_known_features_encode_per_tables() -> Result<()> {
        let model = StubModel::new(&[
            "Vehicle Type",
            "Fuel Type",
            "Engine Size",
            "Age of Vehicle",
            "Mileage",
        ]);

        let label = predict_emission_label(&model, &attrs())?;
        assert_eq!(label, "Moderate");

        let seen = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen["Vehicle Type"], 1.0);
        assert_eq!(seen["Fuel Type"], 1.0);
        assert_eq!(seen["Engine Size"], 4.5);
        assert_eq!(seen["Age of Vehicle"], 8.0);
        assert_eq!(seen["Mileage"], 120_000.0);
        Ok(())
    }

    #[test]
    fn test_unmapped_feature_defaults_to_zero() -> Result<()> {
        let model = StubModel::new(&["Vehicle Type", "Curb Weight"]);

        predict_emission_label(&model, &attrs())?;

        let seen = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen["Curb Weight"], 0.0);
        Ok(())
    }

    #[test]
    fn test_unknown_categorical_value_encodes_as_zero() -> Result<()> {
        let model = StubModel::new(&["Vehicle Type", "Fuel Type"]);
        let mut attrs = attrs();
        attrs.vehicle_type = "Hovercraft".to_string();
        attrs.fuel_type = "Peat".to_string();

        predict_emission_label(&model, &attrs)?;

        let seen = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen["Vehicle Type"], 0.0);
        assert_eq!(seen["Fuel Type"], 0.0);
        Ok(())
    }

    #[test]
    fn test_only_declared_features_are_supplied() -> Result<()> {
        let model = StubModel::new(&["Mileage"]);

        predict_emission_label(&model, &attrs())?;

        let seen = model.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen.contains_key("Mileage"));
        Ok(())
    }

    #[test]
    fn test_model_failure_propagates() {
        let mut model = StubModel::new(&["Mileage"]);
        model.fail = true;

        let result = predict_emission_label(&model, &attrs());
        assert!(matches!(
            result.unwrap_err(),
            Error::Classifier { message: _ }
        ));
    }
}
