//! Unit table for solution quantities
//!
//! Maps the volume/weight tokens accepted after a solution quantity to their
//! classification and conversion coefficients. Unknown tokens are accepted and
//! treated as dimensionless so that unit-free `M1`, `M2`... formulas keep working.

use crate::types::Classification;

/// Table entry for a solution unit token
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSpec {
    /// Token as written by the user
    pub token: String,
    /// Volume units convert to litres, weight units to kilograms
    pub coefficient: f64,
    pub classification: Classification,
    /// Unit solute masses are reported in
    pub solute_unit: String,
    /// Converts a mass in `solute_unit` to grams
    pub gram_coefficient: f64,
}

impl UnitSpec {
    /// Look up a unit token, case-insensitively
    pub fn parse(token: &str) -> Self {
        let (coefficient, classification, solute_unit, gram_coefficient) =
            match token.to_lowercase().as_str() {
                // Volume
                "kl" => (1000.0, Classification::Volume, "t", 1_000_000.0),
                "l" => (1.0, Classification::Volume, "kg", 1000.0),
                "ml" => (1.0 / 1000.0, Classification::Volume, "g", 1.0),
                // Weight
                "t" => (1000.0, Classification::Weight, token, 1_000_000.0),
                "kg" => (1.0, Classification::Weight, token, 1000.0),
                "g" => (1.0 / 1000.0, Classification::Weight, token, 1.0),
                "mg" => (1.0 / 1000.0 / 1000.0, Classification::Weight, token, 1.0 / 1000.0),
                // Unknown or empty
                _ => (1.0, Classification::Unspecified, token, 1.0),
            };

        Self {
            token: token.to_string(),
            coefficient,
            classification,
            solute_unit: solute_unit.to_string(),
            gram_coefficient,
        }
    }

    /// True when no unit was written at all
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// Convert a quantity in this unit to litres (or kilograms for weights)
    pub fn to_base(&self, quantity: f64) -> f64 {
        quantity * self.coefficient
    }

    /// Convert a solute mass in `solute_unit` to grams
    pub fn to_grams(&self, mass: f64) -> f64 {
        mass * self.gram_coefficient
    }

    /// Percent label for mass-percent figures
    pub fn percent_label(&self) -> &'static str {
        match self.classification {
            Classification::Volume => "w/v%",
            Classification::Weight => "w/w%",
            Classification::Unspecified => "%",
        }
    }

    /// Case-insensitive unit comparison, empty always matches
    pub fn accepts(&self, unit: &str) -> bool {
        unit.is_empty() || unit.eq_ignore_ascii_case(&self.token)
    }
}
