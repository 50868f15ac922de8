//! Metric prefixes.
//!
//! The full SI ladder from quetta (10³⁰) down to quecto (10⁻³⁰), including the 2022
//! additions (ronna, quetta, ronto, quecto). Each prefix is accepted under its name and
//! its symbol; a few have extra spellings:
//!
//! - deka: `deka`, `deca`, `da`
//! - micro: `micro`, `μ` (Greek small mu, U+03BC), `µ` (micro sign, U+00B5), `u`
//!
//! The empty prefix `""` maps to 1 and is always present, so every token has at least
//! one matching prefix.

use std::collections::HashMap;

pub const QUETTA: f64 = 1e30;
pub const RONNA: f64 = 1e27;
pub const YOTTA: f64 = 1e24;
pub const ZETTA: f64 = 1e21;
pub const EXA: f64 = 1e18;
pub const PETA: f64 = 1e15;
pub const TERA: f64 = 1e12;
pub const GIGA: f64 = 1e9;
pub const MEGA: f64 = 1e6;
pub const KILO: f64 = 1e3;
pub const HECTO: f64 = 1e2;
pub const DEKA: f64 = 1e1;
pub const DECI: f64 = 1e-1;
pub const CENTI: f64 = 1e-2;
pub const MILLI: f64 = 1e-3;
pub const MICRO: f64 = 1e-6;
pub const NANO: f64 = 1e-9;
pub const PICO: f64 = 1e-12;
pub const FEMTO: f64 = 1e-15;
pub const ATTO: f64 = 1e-18;
pub const ZEPTO: f64 = 1e-21;
pub const YOCTO: f64 = 1e-24;
pub const RONTO: f64 = 1e-27;
pub const QUECTO: f64 = 1e-30;

/// Every accepted spelling of every SI prefix, with its multiplier.
pub const SI_PREFIXES: &[(&[&str], f64)] = &[
    (&["quetta", "Q"], QUETTA),
    (&["ronna", "R"], RONNA),
    (&["yotta", "Y"], YOTTA),
    (&["zetta", "Z"], ZETTA),
    (&["exa", "E"], EXA),
    (&["peta", "P"], PETA),
    (&["tera", "T"], TERA),
    (&["giga", "G"], GIGA),
    (&["mega", "M"], MEGA),
    (&["kilo", "k"], KILO),
    (&["hecto", "h"], HECTO),
    (&["deka", "deca", "da"], DEKA),
    (&[""], 1.0),
    (&["deci", "d"], DECI),
    (&["centi", "c"], CENTI),
    (&["milli", "m"], MILLI),
    (&["micro", "\u{03BC}", "\u{00B5}", "u"], MICRO),
    (&["nano", "n"], NANO),
    (&["pico", "p"], PICO),
    (&["femto", "f"], FEMTO),
    (&["atto", "a"], ATTO),
    (&["zepto", "z"], ZEPTO),
    (&["yocto", "y"], YOCTO),
    (&["ronto", "r"], RONTO),
    (&["quecto", "q"], QUECTO),
];

/// Lookup table from prefix spelling to multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixTable {
    factors: HashMap<String, f64>,
}

impl PrefixTable {
    /// The standard SI prefix table.
    pub fn si() -> Self {
        Self::from_entries(
            SI_PREFIXES
                .iter()
                .flat_map(|(names, factor)| names.iter().map(move |name| (*name, *factor))),
        )
    }

    /// Build a table from arbitrary `(spelling, multiplier)` pairs.
    ///
    /// The empty prefix is added with multiplier 1 when the entries do not provide it.
    /// Later entries overwrite earlier ones with the same spelling.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut factors: HashMap<String, f64> = entries
            .into_iter()
            .map(|(name, factor)| (name.into(), factor))
            .collect();
        factors.entry(String::new()).or_insert(1.0);
        Self { factors }
    }

    #[inline]
    pub fn get(&self, prefix: &str) -> Option<f64> {
        self.factors.get(prefix).copied()
    }

    #[inline]
    pub fn contains(&self, prefix: &str) -> bool {
        self.factors.contains_key(prefix)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Iterate over `(spelling, multiplier)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.factors.iter().map(|(name, factor)| (name.as_str(), *factor))
    }

    /// The longest spelling (by character count) that `token` starts with.
    ///
    /// Two distinct spellings of equal length cannot both prefix the same token, so the
    /// result does not depend on iteration order. Returns `None` only for a table without
    /// the empty prefix, which [`PrefixTable::from_entries`] never produces.
    pub fn longest_match<'t>(&'t self, token: &str) -> Option<(&'t str, f64)> {
        self.factors
            .iter()
            .filter(|(name, _)| token.starts_with(name.as_str()))
            .max_by_key(|(name, _)| name.chars().count())
            .map(|(name, factor)| (name.as_str(), *factor))
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::si()
    }
}
