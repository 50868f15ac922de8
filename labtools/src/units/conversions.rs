//! Conversion factors from SI units to natural units.
//!
//! Each entry answers "how many natural units is one of this SI unit?". A value `v`
//! given in SI unit `X` is converted with:
//!
//! ```text
//! v_natural = v * factor[X]
//! v_X       = v_natural / factor[X]
//! ```
//!
//! The base factors (time, length, energy, temperature, charge) are ratios between the
//! natural-unit expression of a unit and its SI value. Every other unit is an algebraic
//! combination of base factors, so the table is filled in dependency order: a derived
//! factor only reads entries inserted before it.
//!
//! | Unit | Spellings | Factor |
//! |------|-----------|--------|
//! | second | `second`, `s` | (ħ / mₑc²)ₙ / (ħ / mₑc²)ₛᵢ |
//! | metre | `metre`, `meter`, `m` | (ħ / mₑc)ₙ / (ħ / mₑc)ₛᵢ |
//! | joule | `joule`, `J` | (mₑc²)ₙ / (mₑc²)ₛᵢ |
//! | kelvin | `kelvin`, `K` | (mₑc² / k_B)ₙ / (mₑc² / k_B)ₛᵢ |
//! | coulomb | `coulomb`, `C` | eₙ / eₛᵢ |
//! | electronvolt | `electronvolt`, `eV` | J · (1 eV in J) |
//! | gram | `gram`, `g` | J / m² · s² / 1000 |
//! | ampere | `ampere`, `amphere`, `A` | C / s |
//! | volt | `volt`, `V` | J / C |
//! | newton | `newton`, `N` | J / m |
//! | watt | `watt`, `W` | J / s |
//! | tesla | `tesla`, `T` | J / A / m² |
//! | farad | `farad`, `F` | C / V |
//! | hertz | `hertz`, `Hz` | 1 / s |
//! | ohm | `ohm`, `Ohm`, `Ω`, `Ω` | V / A |
//! | henry | `henry`, `H` | V · s / A |
//! | radian | `radian`, `rad` | 1 |
//! | unity | `1` | 1 |

use std::collections::HashMap;

use crate::constants::{NaturalConstants, SiConstants};

/// Lookup table from unit spelling to its SI → natural conversion factor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTable {
    factors: HashMap<String, f64>,
}

impl ConversionTable {
    /// Build the standard table for the given natural basis and SI reference values.
    pub fn new(natural: &NaturalConstants, si: &SiConstants) -> Self {
        let mut builder = Builder::default();

        // Base units
        let second = builder.insert(
            &["second", "s"],
            (natural.hbar() / natural.electron_mass() / natural.speed_of_light().powi(2))
                / (si.hbar / si.electron_mass / si.speed_of_light.powi(2)),
        );
        let metre = builder.insert(
            &["metre", "meter", "m"],
            (natural.hbar() / natural.electron_mass() / natural.speed_of_light())
                / (si.hbar / si.electron_mass / si.speed_of_light),
        );
        let joule = builder.insert(
            &["joule", "J"],
            (natural.electron_mass() * natural.speed_of_light().powi(2))
                / (si.electron_mass * si.speed_of_light.powi(2)),
        );
        builder.insert(
            &["kelvin", "K"],
            (natural.electron_mass() * natural.speed_of_light().powi(2) / natural.boltzmann())
                / (si.electron_mass * si.speed_of_light.powi(2) / si.boltzmann),
        );
        let coulomb = builder.insert(
            &["coulomb", "C"],
            natural.elementary_charge() / si.elementary_charge,
        );
        builder.insert(&["electronvolt", "eV"], joule * si.electron_volt);

        // Derived from base units
        builder.insert(
            &["gram", "g"],
            joule / metre.powi(2) * second.powi(2) / 1e3,
        );
        let ampere = builder.insert(&["ampere", "amphere", "A"], coulomb / second);
        let volt = builder.insert(&["volt", "V"], joule / coulomb);
        builder.insert(&["newton", "N"], joule / metre);
        builder.insert(&["watt", "W"], joule / second);
        builder.insert(&["tesla", "T"], joule / ampere / metre.powi(2));
        builder.insert(&["farad", "F"], coulomb / volt);
        builder.insert(&["hertz", "Hz"], 1.0 / second);
        builder.insert(&["ohm", "Ohm", "\u{03A9}", "\u{2126}"], volt / ampere);
        builder.insert(&["henry", "H"], volt * second / ampere);

        // Dimensionless
        builder.insert(&["radian", "rad"], 1.0);
        builder.insert(&["1"], 1.0);

        builder.finish()
    }

    /// Build a table from arbitrary `(spelling, factor)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            factors: entries
                .into_iter()
                .map(|(name, factor)| (name.into(), factor))
                .collect(),
        }
    }

    #[inline]
    pub fn get(&self, unit: &str) -> Option<f64> {
        self.factors.get(unit).copied()
    }

    #[inline]
    pub fn contains(&self, unit: &str) -> bool {
        self.factors.contains_key(unit)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Iterate over `(spelling, factor)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.factors.iter().map(|(name, factor)| (name.as_str(), *factor))
    }

    /// All accepted spellings, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::new(&NaturalConstants::default(), &SiConstants::default())
    }
}

#[derive(Default)]
struct Builder {
    factors: HashMap<String, f64>,
}

impl Builder {
    /// Register `factor` under every alias and hand it back for dependent entries.
    fn insert(&mut self, aliases: &[&str], factor: f64) -> f64 {
        for alias in aliases {
            self.factors.insert((*alias).to_string(), factor);
        }
        factor
    }

    fn finish(self) -> ConversionTable {
        ConversionTable {
            factors: self.factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::{ELECTRON_MASS, HBAR, SPEED_OF_LIGHT};

    fn factor(table: &ConversionTable, unit: &str) -> f64 {
        table.get(unit).unwrap()
    }

    #[test]
    fn aliases_share_the_same_factor() {
        let table = ConversionTable::default();
        let groups: &[&[&str]] = &[
            &["second", "s"],
            &["metre", "meter", "m"],
            &["joule", "J"],
            &["kelvin", "K"],
            &["coulomb", "C"],
            &["electronvolt", "eV"],
            &["gram", "g"],
            &["ampere", "amphere", "A"],
            &["volt", "V"],
            &["newton", "N"],
            &["watt", "W"],
            &["tesla", "T"],
            &["farad", "F"],
            &["hertz", "Hz"],
            &["ohm", "Ohm", "\u{03A9}", "\u{2126}"],
            &["henry", "H"],
            &["radian", "rad"],
        ];
        for group in groups {
            let first = factor(&table, group[0]);
            for alias in &group[1..] {
                assert_eq!(factor(&table, alias), first, "{alias} differs from {}", group[0]);
            }
        }
    }

    #[test]
    fn base_units_match_reference_scales() {
        let table = ConversionTable::default();
        let compton_time = HBAR / (ELECTRON_MASS * SPEED_OF_LIGHT.powi(2));
        let compton_length = HBAR / (ELECTRON_MASS * SPEED_OF_LIGHT);
        let rest_energy = ELECTRON_MASS * SPEED_OF_LIGHT.powi(2);

        assert_relative_eq!(factor(&table, "s"), 1.0 / compton_time, max_relative = 1e-12);
        assert_relative_eq!(factor(&table, "m"), 1.0 / compton_length, max_relative = 1e-12);
        assert_relative_eq!(factor(&table, "J"), 1.0 / rest_energy, max_relative = 1e-12);
    }

    #[test]
    fn one_gram_is_electron_mass_ratio() {
        let table = ConversionTable::default();
        assert_relative_eq!(
            factor(&table, "g"),
            1e-3 / ELECTRON_MASS,
            max_relative = 1e-12
        );
    }

    #[test]
    fn electron_rest_energy_is_one() {
        let table = ConversionTable::default();
        // mₑc² ≈ 510 998.95 eV
        assert_relative_eq!(
            factor(&table, "eV") * 510_998.950_00,
            1.0,
            max_relative = 1e-8
        );
    }

    #[test]
    fn derived_units_are_consistent() {
        let table = ConversionTable::default();
        let f = |u: &str| factor(&table, u);

        assert_relative_eq!(f("V"), f("J") / f("C"), max_relative = 1e-12);
        assert_relative_eq!(f("ohm"), f("V") / f("A"), max_relative = 1e-12);
        assert_relative_eq!(f("A"), f("C") / f("s"), max_relative = 1e-12);
        assert_relative_eq!(f("N"), f("J") / f("m"), max_relative = 1e-12);
        assert_relative_eq!(f("W"), f("J") / f("s"), max_relative = 1e-12);
        assert_relative_eq!(f("T"), f("J") / f("A") / f("m").powi(2), max_relative = 1e-12);
        assert_relative_eq!(f("F"), f("C") / f("V"), max_relative = 1e-12);
        assert_relative_eq!(f("Hz") * f("s"), 1.0, max_relative = 1e-12);
        assert_relative_eq!(f("H"), f("V") * f("s") / f("A"), max_relative = 1e-12);
        assert_relative_eq!(f("W"), f("V") * f("A"), max_relative = 1e-12);
    }

    #[test]
    fn dimensionless_entries_are_unity() {
        let table = ConversionTable::default();
        assert_eq!(table.get("rad"), Some(1.0));
        assert_eq!(table.get("radian"), Some(1.0));
        assert_eq!(table.get("1"), Some(1.0));
    }

    #[test]
    fn names_are_sorted_and_complete() {
        let table = ConversionTable::default();
        let names = table.names();
        assert_eq!(names.len(), table.len());
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
        assert!(names.contains(&"Hz"));
    }

    #[test]
    fn from_entries_builds_synthetic_tables() {
        let table = ConversionTable::from_entries([("widget", 4.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("widget"), Some(4.0));
        assert!(!table.contains("V"));
    }
}
