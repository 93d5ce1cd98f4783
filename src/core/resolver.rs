//! Concentration resolver
//!
//! Turns an accumulated solute mass and the quantity it was measured against
//! into mass-percent or molar figures.

use crate::core::units::UnitSpec;
use crate::error::{SolmixError, SolmixResult};
use crate::types::{Classification, Concentration, ConcentrationMode};

pub const MOLAR_UNIT: &str = "mol/L (M)";
pub const MASS_MOLAR_UNIT: &str = "mol/kg";

/// Mass per unit quantity
pub fn resolve_ratio(mass: f64, quantity: f64) -> SolmixResult<f64> {
    if quantity == 0.0 {
        return Err(SolmixError::DivisionByZero(format!(
            "{mass} / {quantity}: the total quantity is zero"
        )));
    }
    Ok(mass / quantity)
}

/// Mass per hundred units of quantity
pub fn resolve_percent(mass: f64, quantity: f64) -> SolmixResult<f64> {
    Ok(resolve_ratio(mass, quantity)? * 100.0)
}

/// Mass-percent figures, labelled by the unit's classification
pub fn mass_percent(mass: f64, quantity: f64, unit: &UnitSpec) -> SolmixResult<Concentration> {
    let ratio = resolve_ratio(mass, quantity)?;
    Ok(Concentration::Ratio {
        ratio,
        percent: ratio * 100.0,
        label: unit.percent_label().to_string(),
    })
}

/// What a molar concentration is measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MolarBasis {
    /// Solution quantity in the formula's unit
    pub quantity: f64,
    /// Density split volume in the formula's unit, when tracked
    pub split_volume: Option<f64>,
}

/// Molar figures for `mass` (in the solute unit) of a compound of `molar_mass` g/mol
///
/// - zero quantity: moles only, no denominator
/// - mass molarity: per kilogram of solvent net of the dissolved grams
/// - volume: per litre
/// - weight: per litre of split volume if tracked, else the weight read as litres
/// - unclassified: per quantity, unitless
pub fn molar(
    mass: f64,
    molar_mass: f64,
    basis: MolarBasis,
    unit: &UnitSpec,
    mode: ConcentrationMode,
) -> SolmixResult<Concentration> {
    let grams = unit.to_grams(mass);

    if basis.quantity == 0.0 {
        return Ok(Concentration::Molar {
            grams,
            molar_mass,
            denominator: None,
            denominator_unit: String::new(),
            value: grams / molar_mass,
            unit: String::new(),
        });
    }

    let (denominator, denominator_unit, label) = if mode == ConcentrationMode::MassMolarity {
        (
            unit.to_base(basis.quantity) - grams / 1000.0,
            "kg",
            MASS_MOLAR_UNIT,
        )
    } else {
        match unit.classification {
            Classification::Volume => (unit.to_base(basis.quantity), "L", MOLAR_UNIT),
            Classification::Weight => {
                let liters = match basis.split_volume {
                    Some(split) => unit.to_base(split),
                    None => unit.to_base(basis.quantity),
                };
                (liters, "L", MOLAR_UNIT)
            }
            Classification::Unspecified => (unit.to_base(basis.quantity), "", ""),
        }
    };

    if denominator == 0.0 {
        return Err(SolmixError::DivisionByZero(format!(
            "{grams} g / {molar_mass} g/mol / 0 {denominator_unit}"
        )));
    }

    Ok(Concentration::Molar {
        grams,
        molar_mass,
        denominator: Some(denominator),
        denominator_unit: denominator_unit.to_string(),
        value: grams / molar_mass / denominator,
        unit: label.to_string(),
    })
}
