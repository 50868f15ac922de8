//! String-keyed unit resolution.
//!
//! A token such as `"mV"`, `"kOhm"` or `"GHz"` is resolved in two steps:
//!
//! 1. If the token is itself a unit spelling, its factor is returned unchanged.
//! 2. Otherwise the longest prefix spelling the token starts with is split off, and the
//!    remainder must be a unit spelling. The result is `prefix * unit`.
//!
//! There is no backtracking: when the longest prefix leaves an unknown remainder the
//! token is rejected, even if a shorter prefix would have worked. Prefix and unit
//! namespaces overlap (`m` is both milli and metre, `T` both tera and tesla), and the
//! exact-match step plus maximal munch keeps every token to a single reading.

use core::fmt;

use log::debug;
use serde::Serialize;

use super::UnitTables;

/// Why a token could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnrecognizedReason {
    /// The token was empty.
    Empty,
    /// The token is a reserved `__name__` sentinel, never a physical unit.
    Reserved,
    /// The longest prefix split did not leave a known unit.
    Decomposition { prefix: String, remainder: String },
}

/// A unit token that names no known (prefix, unit) combination.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unit `{token}` is not recognized{reason}")]
pub struct UnrecognizedUnit {
    pub token: String,
    pub reason: UnrecognizedReason,
}

impl UnrecognizedUnit {
    fn new(token: &str, reason: UnrecognizedReason) -> Self {
        Self {
            token: token.to_string(),
            reason,
        }
    }
}

impl fmt::Display for UnrecognizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnrecognizedReason::Empty => write!(f, ": empty unit name"),
            UnrecognizedReason::Reserved => write!(f, ": reserved name"),
            UnrecognizedReason::Decomposition { prefix, remainder } => {
                write!(f, " (prefix `{}`, unit `{}`)", prefix, remainder)
            }
        }
    }
}

/// A successfully resolved token, split into its prefix and unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitParts<'a> {
    /// The token as given.
    pub token: &'a str,
    /// Prefix spelling; empty for exact matches.
    pub prefix: &'a str,
    /// Unit spelling.
    pub unit: &'a str,
    pub prefix_factor: f64,
    pub unit_factor: f64,
    /// `prefix_factor * unit_factor`.
    pub factor: f64,
}

/// Returns `true` for `__name__`-style sentinel names.
///
/// These belong to the host namespace of whatever embeds the resolver and are never
/// looked up as units.
pub fn is_reserved_name(token: &str) -> bool {
    token.len() > 4 && token.starts_with("__") && token.ends_with("__")
}

impl UnitTables {
    /// Resolve `token` to its SI → natural conversion factor.
    ///
    /// ```rust
    /// use labtools::units::UnitTables;
    ///
    /// let tables = UnitTables::standard();
    /// let mv = tables.resolve("mV").unwrap();
    /// assert_eq!(mv, 1e-3 * tables.resolve("V").unwrap());
    /// assert!(tables.resolve("xyzzy").is_err());
    /// ```
    pub fn resolve(&self, token: &str) -> Result<f64, UnrecognizedUnit> {
        self.decompose(token).map(|parts| parts.factor)
    }

    /// Resolve `token` and report how it was split.
    pub fn decompose<'a>(&'a self, token: &'a str) -> Result<UnitParts<'a>, UnrecognizedUnit> {
        if token.is_empty() {
            debug!("Rejecting empty unit token");
            return Err(UnrecognizedUnit::new(token, UnrecognizedReason::Empty));
        }
        if is_reserved_name(token) {
            debug!("Rejecting reserved name `{}`", token);
            return Err(UnrecognizedUnit::new(token, UnrecognizedReason::Reserved));
        }

        if let Some(factor) = self.conversions().get(token) {
            debug!("Resolved `{}` by exact match", token);
            return Ok(UnitParts {
                token,
                prefix: "",
                unit: token,
                prefix_factor: 1.0,
                unit_factor: factor,
                factor,
            });
        }

        let (prefix, prefix_factor) = self.prefixes().longest_match(token).ok_or_else(|| {
            UnrecognizedUnit::new(
                token,
                UnrecognizedReason::Decomposition {
                    prefix: String::new(),
                    remainder: token.to_string(),
                },
            )
        })?;
        let remainder = &token[prefix.len()..];

        match self.conversions().get(remainder) {
            Some(unit_factor) => {
                debug!(
                    "Resolved `{}` as prefix `{}` + unit `{}`",
                    token, prefix, remainder
                );
                Ok(UnitParts {
                    token,
                    prefix,
                    unit: remainder,
                    prefix_factor,
                    unit_factor,
                    factor: prefix_factor * unit_factor,
                })
            }
            None => {
                debug!(
                    "Failed to resolve `{}`: prefix `{}` leaves unknown unit `{}`",
                    token, prefix, remainder
                );
                Err(UnrecognizedUnit::new(
                    token,
                    UnrecognizedReason::Decomposition {
                        prefix: prefix.to_string(),
                        remainder: remainder.to_string(),
                    },
                ))
            }
        }
    }
}
