use serde::Serialize;

//==============================================================================
// Modes and classifications
//==============================================================================

/// How solute concentrations are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcentrationMode {
    /// Mass ratio and w/v% or w/w% (default)
    #[default]
    MassPercent,
    /// Moles per litre of solution
    Molar,
    /// Moles per kilogram of solvent, net of dissolved solute
    MassMolarity,
}

impl ConcentrationMode {
    /// Build the mode from the two CLI switches. Mass molarity wins if both are set.
    pub fn from_flags(molar: bool, mass_molarity: bool) -> Self {
        if mass_molarity {
            ConcentrationMode::MassMolarity
        } else if molar {
            ConcentrationMode::Molar
        } else {
            ConcentrationMode::MassPercent
        }
    }

    pub fn is_molar(&self) -> bool {
        !matches!(self, ConcentrationMode::MassPercent)
    }
}

/// Whether a solution quantity is measured by volume or by weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Classification {
    Volume,
    Weight,
    #[default]
    Unspecified,
}

impl Classification {
    /// Label used for quantity lines. Unclassified quantities read as weights.
    pub fn property_name(&self) -> &'static str {
        match self {
            Classification::Volume => "Volume",
            Classification::Weight | Classification::Unspecified => "Weight",
        }
    }
}

//==============================================================================
// Parsed formula
//==============================================================================

/// The `density * volume` operands of a quantity written as a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensitySplit {
    pub density: f64,
    pub volume: f64,
}

/// One comma-delimited clause of a solution term, e.g. `3.0%NaCl`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationTerm {
    pub raw: String,
    /// Solute name, `M<k>` when the clause had none
    pub solute: String,
    /// True when `solute` was generated rather than written
    pub auto_named: bool,
    /// Ratio (0..1), or an absolute mass when the enclosing quantity is zero
    pub value: f64,
}

/// One `+`-delimited segment of a formula, e.g. `100mL:0.3NaCl,0.03T-N`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionTerm {
    /// 1-based position in the formula
    pub id: usize,
    /// Term text with whitespace removed
    pub raw: String,
    pub quantity: f64,
    /// Quantity as written, or the evaluated product for `d*v` forms
    pub quantity_text: String,
    pub unit: String,
    pub split: Option<DensitySplit>,
    pub concentrations: Vec<ConcentrationTerm>,
}

impl SolutionTerm {
    pub fn is_zero(&self) -> bool {
        self.quantity == 0.0
    }
}

//==============================================================================
// Reports
//==============================================================================

/// Resolved concentration of one solute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Concentration {
    /// Mass added with no carrier quantity, nothing to divide by
    AbsoluteMass,
    /// Mass-percent figures
    Ratio {
        ratio: f64,
        percent: f64,
        /// `w/v%`, `w/w%` or `%`
        label: String,
    },
    /// Molar figures
    Molar {
        grams: f64,
        molar_mass: f64,
        /// Litres or kilograms divided by, absent for zero-quantity terms
        denominator: Option<f64>,
        /// `L`, `kg` or empty
        denominator_unit: String,
        value: f64,
        /// `mol/L (M)`, `mol/kg` or empty
        unit: String,
    },
}

/// One solute line of a solution or product record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoluteLine {
    pub solute: String,
    /// Mass in the solute unit derived from the solution unit
    pub mass: f64,
    pub mass_unit: String,
    pub concentration: Concentration,
}

/// Running totals after a solution term has been mixed in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunningTotals {
    pub total: f64,
    pub unit: String,
    /// Solid first, then solutes in first-seen order
    pub solutes: Vec<SoluteLine>,
}

/// Result for one solution term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionRecord {
    pub id: usize,
    pub formula: String,
    pub quantity: f64,
    pub quantity_text: String,
    pub unit: String,
    pub classification: Classification,
    /// Density split volume in litres, weight formulas only
    pub split_liters: Option<f64>,
    pub solutes: Vec<SoluteLine>,
    pub running: Option<RunningTotals>,
}

/// Result for the whole mixture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub formula: String,
    pub total_quantity: f64,
    pub unit: String,
    pub classification: Classification,
    pub split_liters: Option<f64>,
    pub solutes: Vec<SoluteLine>,
    /// Sum of every solute contribution
    pub solid_mass: f64,
    /// Solid resolved like a solute, mass-percent mode only
    pub solid: Option<SoluteLine>,
}

/// Everything computed for one formula
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixtureReport {
    pub formula: String,
    pub mode: ConcentrationMode,
    pub solutions: Vec<SolutionRecord>,
    pub product: ProductRecord,
}

impl MixtureReport {
    /// Find a product solute line by name
    pub fn product_solute(&self, name: &str) -> Option<&SoluteLine> {
        self.product.solutes.iter().find(|line| line.solute == name)
    }
}
