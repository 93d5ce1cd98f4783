//! Error handling tests

use royalbit_solmix::composition::CompositionTable;
use royalbit_solmix::core::MixtureCalculator;
use royalbit_solmix::error::SolmixError;
use royalbit_solmix::types::ConcentrationMode;

fn error_of(mode: ConcentrationMode, formula: &str) -> SolmixError {
    let table = CompositionTable::new();
    MixtureCalculator::new(mode, &table)
        .calculate(formula)
        .expect_err("formula should fail")
}

fn mass_percent_error(formula: &str) -> SolmixError {
    error_of(ConcentrationMode::MassPercent, formula)
}

fn molar_error(formula: &str) -> SolmixError {
    error_of(ConcentrationMode::Molar, formula)
}

#[test]
fn test_unit_mismatch() {
    let err = mass_percent_error("100 L : 3% NaCl + 50 mL : 3% NaCl");
    match &err {
        SolmixError::UnitMismatch { found, expected } => {
            assert_eq!(found, "mL");
            assert_eq!(expected, "L");
        }
        other => panic!("expected unit mismatch, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "Unit mismatch: 'mL' cannot be mixed with 'L'"
    );
}

#[test]
fn test_unitless_formula_rejects_later_unit() {
    let err = mass_percent_error("100 : 3% NaCl + 50 g");
    assert!(matches!(err, SolmixError::UnitMismatch { .. }));
}

#[test]
fn test_reserved_name() {
    let err = mass_percent_error("100 : 3% NaCl, 15 Solid");
    assert!(matches!(err, SolmixError::ReservedName(ref name) if name == "Solid"));
}

#[test]
fn test_hyphen_rejected_in_molar_mode() {
    let err = molar_error("100 mL : 3% T-N");
    assert!(matches!(err, SolmixError::InvalidName(ref name) if name == "T-N"));
}

#[test]
fn test_hyphen_allowed_in_mass_percent_mode() {
    let table = CompositionTable::new();
    let report = MixtureCalculator::new(ConcentrationMode::MassPercent, &table)
        .calculate("100 mL : 3% T-N")
        .unwrap();
    assert!(report.is_some());
}

#[test]
fn test_molar_requires_unit() {
    let err = molar_error("100 : 3% NaCl");
    assert!(matches!(err, SolmixError::MissingUnit(_)));

    let err = molar_error("100 mL : 3% NaCl + 100");
    assert!(matches!(err, SolmixError::MissingUnit(_)));
}

#[test]
fn test_molar_requires_solute_name() {
    let err = molar_error("100 mL : 3%");
    assert!(matches!(err, SolmixError::MissingSoluteName(_)));
}

#[test]
fn test_unknown_compound() {
    let err = molar_error("100 mL : 3% Qq");
    assert!(matches!(err, SolmixError::UnknownCompound { .. }));

    let err = molar_error("100 mL : 3% salt");
    assert!(matches!(err, SolmixError::UnknownCompound { .. }));
}

#[test]
fn test_parse_error_on_nameless_number() {
    let err = mass_percent_error("100 mL : NaCl");
    assert!(matches!(err, SolmixError::Parse { .. }));
}

#[test]
fn test_parse_error_on_non_numeric_later_term() {
    let err = mass_percent_error("100 mL + water");
    assert!(matches!(err, SolmixError::Parse { .. }));
}

#[test]
fn test_parse_error_on_empty_term() {
    for formula in ["100 mL : 3% NaCl +", "100 mL + + 100 mL"] {
        let err = mass_percent_error(formula);
        assert!(matches!(err, SolmixError::Parse { .. }), "{formula}: {err:?}");
    }
}

#[test]
fn test_empty_quantity_with_colon_is_still_zero() {
    let table = CompositionTable::new();
    let report = MixtureCalculator::new(ConcentrationMode::MassPercent, &table)
        .calculate("100 g : 10% NaCl + : 15.0 NaCl")
        .unwrap()
        .unwrap();
    assert_eq!(report.solutions.len(), 2);
    assert_eq!(report.solutions[1].quantity, 0.0);
}

#[test]
fn test_division_by_zero_in_expression() {
    let err = mass_percent_error("1000 / 0 mL : 3% NaCl");
    assert!(matches!(err, SolmixError::DivisionByZero(_)));
}

#[test]
fn test_division_by_zero_on_empty_product() {
    let err = mass_percent_error("0 g : 15 NaCl + 0 g : 5 KCl");
    assert!(matches!(err, SolmixError::DivisionByZero(_)));
}

#[test]
fn test_error_aborts_only_the_failing_formula() {
    let table = CompositionTable::new();
    let calculator = MixtureCalculator::new(ConcentrationMode::MassPercent, &table);

    assert!(calculator.calculate("100 L : 3% NaCl + 50 mL").is_err());
    let report = calculator.calculate("100 L : 3% NaCl + 50 L").unwrap().unwrap();
    assert_eq!(report.product.total_quantity, 150.0);
}

#[test]
fn test_error_messages_carry_raw_text() {
    let err = molar_error("100 : 3% NaCl");
    assert!(err.to_string().contains("100:3%NaCl"));

    let err = mass_percent_error("100 : 3% NaCl, 15 Solid");
    assert!(err.to_string().contains("Solid"));
}
