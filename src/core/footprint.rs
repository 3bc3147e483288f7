//! Footprint calculator - from lifestyle inputs to a per-category emission
//! breakdown.
//!
//! The calculator is a pure function over the read-only factor table:
//! deterministic, no side effects, safe for unsynchronized concurrent use.
//! A lookup of a (category, type) pair missing from the table is an error
//! that rejects the whole calculation; it never defaults to zero, which
//! would silently under-report emissions.

use crate::config::factors::FactorRow;
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Decimal places applied to emission values for display and export.
pub const DISPLAY_DECIMALS: usize = 2;

/// Fixed regional key for the electricity factor lookup.
pub const ELECTRICITY_KEY: &str = "india_kwh";

/// Fixed key for the per-kilogram waste factor lookup.
pub const WASTE_KEY: &str = "kg";

/// Rounds an emission value to display precision.
#[must_use]
pub fn round_display(value: f64) -> f64 {
    // Cast safety: DISPLAY_DECIMALS is a small constant
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let scale = 10f64.powi(DISPLAY_DECIMALS as i32);
    (value * scale).round() / scale
}

/// Formats an emission value at display precision.
#[must_use]
pub fn format_display(value: f64) -> String {
    format!("{:.*}", DISPLAY_DECIMALS, value)
}

/// Emission source category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Transport emissions, scaled by distance
    Vehicle,
    /// Household electricity, scaled by consumption
    Electricity,
    /// Diet, a flat daily constant per food habit
    Food,
    /// Household waste, scaled by mass
    Waste,
}

impl Category {
    /// Stable lowercase form used in the factor table and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Electricity => "electricity",
            Self::Food => "food",
            Self::Waste => "waste",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vehicle" => Ok(Self::Vehicle),
            "electricity" => Ok(Self::Electricity),
            "food" => Ok(Self::Food),
            "waste" => Ok(Self::Waste),
            other => Err(Error::Config {
                message: format!("Unknown emission category '{other}'"),
            }),
        }
    }
}

/// Vehicle used for daily travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    /// Bicycle (zero direct emissions)
    Bike,
    /// Petrol car
    PetrolCar,
    /// Diesel car
    DieselCar,
    /// Electric vehicle
    Ev,
    /// Public bus
    Bus,
    /// Train
    Train,
}

impl VehicleType {
    /// Factor table key for this vehicle type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bike => "bike",
            Self::PetrolCar => "petrol_car",
            Self::DieselCar => "diesel_car",
            Self::Ev => "ev",
            Self::Bus => "bus",
            Self::Train => "train",
        }
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bike" => Ok(Self::Bike),
            "petrol_car" => Ok(Self::PetrolCar),
            "diesel_car" => Ok(Self::DieselCar),
            "ev" => Ok(Self::Ev),
            "bus" => Ok(Self::Bus),
            "train" => Ok(Self::Train),
            other => Err(Error::Command {
                message: format!(
                    "Unknown vehicle type '{other}' (expected bike, petrol_car, diesel_car, ev, bus, or train)"
                ),
            }),
        }
    }
}

/// Food habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodType {
    /// Vegetarian diet
    Veg,
    /// Mixed diet
    Mixed,
    /// Non-vegetarian diet
    NonVeg,
}

impl FoodType {
    /// Factor table key for this food habit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::Mixed => "mixed",
            Self::NonVeg => "non_veg",
        }
    }
}

impl FromStr for FoodType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "veg" => Ok(Self::Veg),
            "mixed" => Ok(Self::Mixed),
            "non_veg" => Ok(Self::NonVeg),
            other => Err(Error::Command {
                message: format!("Unknown food type '{other}' (expected veg, mixed, or non_veg)"),
            }),
        }
    }
}

/// Read-only mapping from (category, type) pairs to emission factors.
///
/// Loaded once at startup and shared immutably afterwards.
#[derive(Debug, Clone)]
pub struct FactorTable {
    factors: HashMap<(Category, String), f64>,
}

impl FactorTable {
    /// Builds a validated table from raw configuration rows.
    ///
    /// # Errors
    /// Returns `Error::Config` on an unknown category name, a non-finite or
    /// negative factor, or a duplicate (category, type) pair.
    pub fn from_rows(rows: Vec<FactorRow>) -> Result<Self> {
        let mut factors = HashMap::with_capacity(rows.len());

        for row in rows {
            let category = Category::from_str(&row.category)?;

            if !row.factor.is_finite() || row.factor < 0.0 {
                return Err(Error::Config {
                    message: format!(
                        "Factor for {category}/{} must be a non-negative number, got {}",
                        row.kind, row.factor
                    ),
                });
            }

            if factors.insert((category, row.kind.clone()), row.factor).is_some() {
                return Err(Error::Config {
                    message: format!("Duplicate factor row for {category}/{}", row.kind),
                });
            }
        }

        Ok(Self { factors })
    }

    /// Looks up the factor for a (category, type) pair.
    ///
    /// # Errors
    /// Returns `Error::UnknownFactor` when the pair is absent.
    pub fn factor(&self, category: Category, kind: &str) -> Result<f64> {
        self.factors
            .get(&(category, kind.to_string()))
            .copied()
            .ok_or_else(|| Error::UnknownFactor {
                category,
                kind: kind.to_string(),
            })
    }

    /// Number of factor rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether the table holds no factors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// One day of lifestyle inputs, constructed fresh per calculation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifestyleInput {
    /// Vehicle used for daily travel
    pub vehicle_type: VehicleType,
    /// Daily travel distance in km
    pub vehicle_km: f64,
    /// Daily electricity consumption in kWh
    pub electricity_kwh: f64,
    /// Food habit
    pub food_type: FoodType,
    /// Daily waste generated in kg
    pub waste_kg: f64,
}

impl LifestyleInput {
    /// Rejects out-of-range quantities before any factor lookup.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` for a negative or non-finite quantity.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("vehicle_km", self.vehicle_km),
            ("electricity_kwh", self.electricity_kwh),
            ("waste_kg", self.waste_kg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInput { field, value });
            }
        }
        Ok(())
    }
}

/// Per-category emission breakdown in kg CO2 per day.
///
/// Components and total are kept unrounded; `total` is always the exact sum
/// of the four components. Use [`EmissionBreakdown::rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionBreakdown {
    /// Transport component
    pub vehicle: f64,
    /// Electricity component
    pub electricity: f64,
    /// Food component
    pub food: f64,
    /// Waste component
    pub waste: f64,
    /// Sum of the four components
    pub total: f64,
}

impl EmissionBreakdown {
    /// Copy of the breakdown with every value rounded to display precision.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            vehicle: round_display(self.vehicle),
            electricity: round_display(self.electricity),
            food: round_display(self.food),
            waste: round_display(self.waste),
            total: round_display(self.total),
        }
    }
}

/// Computes the daily emission breakdown for one set of lifestyle inputs.
///
/// Vehicle, electricity, and waste components scale usage by their factors;
/// the food component is a flat daily constant for the food habit. Any
/// missing factor propagates as `Error::UnknownFactor` with no partial
/// result.
pub fn compute(table: &FactorTable, input: &LifestyleInput) -> Result<EmissionBreakdown> {
    input.validate()?;

    let vehicle = input.vehicle_km * table.factor(Category::Vehicle, input.vehicle_type.as_str())?;
    let electricity =
        input.electricity_kwh * table.factor(Category::Electricity, ELECTRICITY_KEY)?;
    let food = table.factor(Category::Food, input.food_type.as_str())?;
    let waste = input.waste_kg * table.factor(Category::Waste, WASTE_KEY)?;

    let total = vehicle + electricity + food + waste;

    Ok(EmissionBreakdown {
        vehicle,
        electricity,
        food,
        waste,
        total,
    })
}
