//! Molar mass lookup tests

use pretty_assertions::assert_eq;
use royalbit_solmix::composition::{atomic_mass, Composition, CompositionTable, MolarMassLookup};
use royalbit_solmix::error::SolmixError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_common_reagents() {
    let table = CompositionTable::new();
    for (formula, expected) in [
        ("H2O", 18.015),
        ("NaCl", 58.443),
        ("KCl", 74.551),
        ("H2SO4", 98.078),
        ("C6H12O6", 180.156),
        ("NH4NO3", 80.043),
    ] {
        let mass = table.molar_mass(formula).unwrap();
        assert!((mass - expected).abs() < 2e-3, "{formula}: {mass}");
    }
}

#[test]
fn test_nested_groups() {
    let composition = Composition::parse("Al2(SO4)3").unwrap();
    assert_eq!(composition.count("Al"), 2);
    assert_eq!(composition.count("S"), 3);
    assert_eq!(composition.count("O"), 12);

    let ferrocyanide = Composition::parse("K4[Fe(CN)6]").unwrap();
    assert_eq!(ferrocyanide.count("C"), 6);
    assert_eq!(ferrocyanide.count("N"), 6);
    assert_eq!(ferrocyanide.count("Fe"), 1);
}

#[test]
fn test_hydrate_multiplier() {
    let composition = Composition::parse("MgSO4·7H2O").unwrap();
    assert_eq!(composition.count("H"), 14);
    assert_eq!(composition.count("O"), 11);
}

#[test]
fn test_molar_mass_is_sum_of_atoms() {
    let composition = Composition::parse("CH3COOH").unwrap();
    let expected = 2.0 * atomic_mass("C").unwrap()
        + 4.0 * atomic_mass("H").unwrap()
        + 2.0 * atomic_mass("O").unwrap();
    assert!((composition.molar_mass() - expected).abs() < 1e-9);
}

#[test]
fn test_atomic_mass_is_case_sensitive() {
    assert!(atomic_mass("Co").is_some());
    assert!(atomic_mass("CO").is_none());
    assert!(atomic_mass("co").is_none());
}

#[test]
fn test_invalid_formulas() {
    for formula in ["", "nacl", "NaCl!", "Ca(OH", "Zz", "T-N"] {
        let err = Composition::parse(formula).unwrap_err();
        assert!(
            matches!(err, SolmixError::UnknownCompound { .. }),
            "{formula}: {err:?}"
        );
    }
}

#[test]
fn test_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("masses.yaml");
    fs::write(&path, "# trivial names\nGlucose: 180.156\nEDTA: 292.24\n").unwrap();

    let table = CompositionTable::from_yaml_file(&path).unwrap();
    assert_eq!(table.overrides().len(), 2);
    assert_eq!(table.molar_mass("EDTA").unwrap(), 292.24);
    // formulas still resolve through the element table
    assert!((table.molar_mass("H2O").unwrap() - 18.015).abs() < 1e-3);
}

#[test]
fn test_overrides_file_errors() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(
        CompositionTable::from_yaml_file(&missing),
        Err(SolmixError::Io(_))
    ));

    let malformed = dir.path().join("malformed.yaml");
    fs::write(&malformed, "Glucose: [1, 2]\n").unwrap();
    assert!(matches!(
        CompositionTable::from_yaml_file(&malformed),
        Err(SolmixError::Yaml(_))
    ));

    let negative = dir.path().join("negative.yaml");
    fs::write(&negative, "Glucose: -1.0\n").unwrap();
    assert!(matches!(
        CompositionTable::from_yaml_file(&negative),
        Err(SolmixError::Parse { .. })
    ));
}
