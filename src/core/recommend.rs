//! Rule-based lifestyle recommendations.
//!
//! Rules are an ordered table of predicate/advice pairs rather than nested
//! conditionals: evaluation order is fixed, every matching rule fires, and
//! new rules append without disturbing existing ones. When nothing matches,
//! a single positive-reinforcement message is returned instead.

use crate::core::footprint::{EmissionBreakdown, FoodType, LifestyleInput};

/// Electricity component above which the efficiency advice fires (kg CO2).
pub const ELECTRICITY_ADVICE_THRESHOLD: f64 = 3.0;

/// Waste component above which the recycling advice fires (kg CO2).
pub const WASTE_ADVICE_THRESHOLD: f64 = 2.0;

/// Message returned when no rule matches.
pub const ECO_FRIENDLY_MESSAGE: &str = "Great job! Your lifestyle is already eco-friendly";

struct Rule {
    applies: fn(&EmissionBreakdown, &LifestyleInput) -> bool,
    advice: &'static str,
}

/// The fixed rule table, evaluated top to bottom.
const RULES: &[Rule] = &[
    Rule {
        applies: |breakdown, _| breakdown.vehicle > breakdown.electricity,
        advice: "Reduce vehicle usage or switch to public transport or an EV",
    },
    Rule {
        applies: |_, input| input.food_type == FoodType::NonVeg,
        advice: "Reduce non-veg meals to lower food emissions",
    },
    Rule {
        applies: |breakdown, _| breakdown.electricity > ELECTRICITY_ADVICE_THRESHOLD,
        advice: "Use energy-efficient appliances and switch off unused devices",
    },
    Rule {
        applies: |breakdown, _| breakdown.waste > WASTE_ADVICE_THRESHOLD,
        advice: "Reduce waste and practice recycling",
    },
];

/// Derives the ordered advice list for one calculation.
///
/// Purely a function of the already-computed breakdown and the raw inputs;
/// never re-reads the factor table.
#[must_use]
pub fn recommend(breakdown: &EmissionBreakdown, input: &LifestyleInput) -> Vec<String> {
    let tips: Vec<String> = RULES
        .iter()
        .filter(|rule| (rule.applies)(breakdown, input))
        .map(|rule| rule.advice.to_string())
        .collect();

    if tips.is_empty() {
        vec![ECO_FRIENDLY_MESSAGE.to_string()]
    } else {
        tips
    }
}
