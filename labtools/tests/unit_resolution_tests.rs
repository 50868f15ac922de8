//! Integration tests for the unit resolver on the standard tables.

use approx::assert_relative_eq;
use proptest::prelude::*;

use labtools::constants::{NaturalBasis, NaturalConstants, SiConstants};
use labtools::units::{self, ConversionTable, PrefixTable, UnitTables, UnrecognizedReason};
use labtools::{LabConfig, LabError};

const PREFIX_SYMBOLS: &[&str] = &[
    "Q", "R", "Y", "Z", "E", "P", "T", "G", "M", "k", "h", "da", "d", "c", "m", "μ", "µ",
    "u", "n", "p", "f", "a", "z", "y", "r", "q",
];

const UNIT_SYMBOLS: &[&str] = &[
    "s", "m", "J", "K", "C", "eV", "g", "A", "V", "N", "W", "T", "F", "Hz", "Ohm", "Ω", "H",
];

#[test]
fn smoke_test_prefixed_voltage() {
    let mv = units::resolve("mV").unwrap();
    let v = units::resolve("V").unwrap();
    assert_relative_eq!(mv, 1e-3 * v, max_relative = 1e-15);
}

#[test]
fn smoke_test_kilo_ohm_spellings() {
    let ohm = units::resolve("ohm").unwrap();
    for token in ["kOhm", "kΩ", "kiloohm"] {
        assert_relative_eq!(units::resolve(token).unwrap(), 1000.0 * ohm, max_relative = 1e-15);
    }
    // "kilo" + "hm" is the only split, and "hm" is no unit.
    assert!(units::resolve("kilohm").is_err());
}

#[test]
fn smoke_test_round_trip_through_natural_units() {
    let natural = units::to_natural(4.7, "kOhm").unwrap();
    let back = units::from_natural(natural, "Ohm").unwrap();
    assert_relative_eq!(back, 4700.0, max_relative = 1e-12);
}

#[test]
fn smoke_test_convert_between_units() {
    assert_relative_eq!(units::convert(1.0, "keV", "eV").unwrap(), 1000.0, max_relative = 1e-12);
    assert_relative_eq!(units::convert(2.5, "GHz", "MHz").unwrap(), 2500.0, max_relative = 1e-12);
    assert_relative_eq!(units::convert(3.0, "mm", "um").unwrap(), 3000.0, max_relative = 1e-12);
    assert_eq!(units::convert(1.23, "V", "V").unwrap(), 1.23);
}

#[test]
fn convert_reports_the_unknown_side() {
    let err = units::convert(1.0, "V", "xyzzy").unwrap_err();
    assert_eq!(err.token, "xyzzy");
    let err = units::convert(1.0, "", "V").unwrap_err();
    assert_eq!(err.reason, UnrecognizedReason::Empty);
}

#[test]
fn electron_rest_energy_is_one() {
    // mₑc² = 0.51099895 MeV
    let mev = units::resolve("MeV").unwrap();
    assert_relative_eq!(0.510_998_95 * mev, 1.0, max_relative = 1e-8);
}

#[test]
fn speed_of_light_is_one() {
    let c = units::resolve("m").unwrap() / units::resolve("s").unwrap();
    assert_relative_eq!(299_792_458.0 * c, 1.0, max_relative = 1e-12);
}

#[test]
fn unknown_tokens_surface_as_lab_errors() {
    let err: LabError = units::resolve("xyzzy").unwrap_err().into();
    assert!(matches!(err, LabError::Unit(_)));
    assert!(err.to_string().contains("xyzzy"));
}

#[test]
fn substituted_constants_change_every_factor() {
    let config = LabConfig::from_toml_str("[basis]\nelectron_mass = 2.0\n").unwrap();
    let doubled = UnitTables::from_config(&config).unwrap();
    let standard = UnitTables::standard();
    assert_relative_eq!(
        doubled.resolve("kg").unwrap(),
        2.0 * standard.resolve("kg").unwrap(),
        max_relative = 1e-12
    );
    // The time unit ħ / mₑc² shrinks with it.
    assert_ne!(doubled.resolve("s").unwrap(), standard.resolve("s").unwrap());
}

#[test]
fn unvalidated_constants_are_rejected_before_building() {
    let mut config = LabConfig::default();
    config.constants.electron_mass = 0.0;
    let err = UnitTables::from_config(&config).unwrap_err();
    assert!(matches!(err, LabError::Configuration(_)));
    assert!(err.to_string().contains("constants.electron_mass"), "{err}");

    config.constants.electron_mass = f64::NAN;
    assert!(UnitTables::from_config(&config).is_err());
}

#[test]
fn default_tables_match_the_standard_tables() {
    let built = UnitTables::from_config(&LabConfig::default()).unwrap();
    assert_eq!(&built, UnitTables::standard());
}

#[test]
fn synthetic_tables_follow_the_same_rules() {
    let tables = UnitTables::new(
        ConversionTable::from_entries([("gizmo", 7.0), ("agizmo", 11.0)]),
        PrefixTable::from_entries([("d", 0.1), ("da", 10.0)]),
    );
    assert_eq!(tables.resolve("gizmo").unwrap(), 7.0);
    assert_relative_eq!(tables.resolve("dgizmo").unwrap(), 0.7, max_relative = 1e-15);
    // "d" + "agizmo" would work, but "da" is longer and leaves "gizmo".
    assert_relative_eq!(tables.resolve("dagizmo").unwrap(), 70.0, max_relative = 1e-15);
    assert!(tables.resolve("da").is_err());
}

#[test]
fn fixed_constants_test_double() {
    let si = SiConstants {
        hbar: 1.0,
        speed_of_light: 1.0,
        vacuum_permeability: 1.0,
        vacuum_permittivity: 1.0,
        boltzmann: 1.0,
        electron_mass: 1.0,
        elementary_charge: 1.0,
        fine_structure: 1.0 / (4.0 * std::f64::consts::PI),
        electron_volt: 1.0,
        pi: std::f64::consts::PI,
    };
    let natural = NaturalConstants::new(&NaturalBasis::default(), &si);
    let tables = UnitTables::from_constants(&natural, &si);
    for unit in ["s", "m", "J", "K", "A", "V", "Ohm"] {
        assert_relative_eq!(tables.resolve(unit).unwrap(), 1.0, max_relative = 1e-12);
    }
}

proptest! {
    #[test]
    fn prop_resolution_is_idempotent(token in "\\PC{0,12}") {
        let tables = UnitTables::standard();
        let first = tables.resolve(&token);
        let second = tables.resolve(&token);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a.to_bits(), b.to_bits()),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "resolution of {:?} changed between calls", token),
        }
    }

    #[test]
    fn prop_errors_carry_the_token(token in "[a-zA-Z_]{0,10}") {
        if let Err(err) = units::resolve(&token) {
            prop_assert_eq!(err.token, token);
        }
    }

    #[test]
    fn prop_prefix_composition(
        prefix in prop::sample::select(PREFIX_SYMBOLS),
        unit in prop::sample::select(UNIT_SYMBOLS),
    ) {
        let tables = UnitTables::standard();
        let token = format!("{}{}", prefix, unit);
        prop_assume!(!tables.conversions().contains(&token));
        prop_assume!(tables.prefixes().longest_match(&token).map(|(p, _)| p) == Some(prefix));

        let expected = tables.prefixes().get(prefix).unwrap() * tables.conversions().get(unit).unwrap();
        let resolved = tables.resolve(&token).unwrap();
        prop_assert!((resolved - expected).abs() <= 1e-15 * expected.abs());
    }

    #[test]
    fn prop_natural_round_trip(value in -1e6..1e6f64, unit in prop::sample::select(UNIT_SYMBOLS)) {
        let natural = units::to_natural(value, unit).unwrap();
        let back = units::from_natural(natural, unit).unwrap();
        prop_assert!((back - value).abs() <= 1e-12 * value.abs().max(1.0));
    }
}
