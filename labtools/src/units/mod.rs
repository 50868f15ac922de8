//! Natural-unit conversion tables and the unit resolver.
//!
//! [`UnitTables`] owns the two immutable lookup tables:
//!
//! - [`conversions::ConversionTable`]: unit spelling → SI-to-natural factor.
//! - [`prefixes::PrefixTable`]: prefix spelling → power of ten.
//!
//! Tables are built once and then only read. Build your own with
//! [`UnitTables::from_config`] (or [`UnitTables::new`] for synthetic tables), or use the
//! process-wide [`UnitTables::standard`] built from the default constants.
//!
//! # Example
//!
//! ```rust
//! use labtools::units;
//!
//! // 5 mV in natural units, and back again.
//! let natural = units::to_natural(5.0, "mV").unwrap();
//! let volts = units::from_natural(natural, "V").unwrap();
//! assert!((volts - 5e-3).abs() < 1e-15);
//!
//! // Between two SI units of the same kind.
//! let ohms = units::convert(2.2, "kOhm", "Ω").unwrap();
//! assert!((ohms - 2200.0).abs() < 1e-9);
//! ```

pub mod conversions;
pub mod prefixes;
pub mod resolver;


use log::info;
use once_cell::sync::Lazy;

use crate::config::LabConfig;
use crate::constants::{NaturalConstants, SiConstants};
use crate::error::LabResult;

pub use conversions::ConversionTable;
pub use prefixes::PrefixTable;
pub use resolver::{is_reserved_name, UnitParts, UnrecognizedReason, UnrecognizedUnit};

static STANDARD_TABLES: Lazy<UnitTables> = Lazy::new(UnitTables::default);

/// The conversion and prefix tables a resolver works from.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTables {
    conversions: ConversionTable,
    prefixes: PrefixTable,
}

impl UnitTables {
    /// Pair an arbitrary conversion table with an arbitrary prefix table.
    pub fn new(conversions: ConversionTable, prefixes: PrefixTable) -> Self {
        Self {
            conversions,
            prefixes,
        }
    }

    /// Build the standard tables from SI reference values and a natural basis.
    pub fn from_constants(natural: &NaturalConstants, si: &SiConstants) -> Self {
        let tables = Self::new(ConversionTable::new(natural, si), PrefixTable::si());
        info!(
            "Built unit tables: {} unit spellings, {} prefix spellings",
            tables.conversions.len(),
            tables.prefixes.len()
        );
        tables
    }

    /// Build the standard tables from the constants in `config`.
    ///
    /// The config is validated first, so a zero or non-finite constant is reported
    /// instead of turning into infinite or NaN factors.
    pub fn from_config(config: &LabConfig) -> LabResult<Self> {
        config.validate()?;
        Ok(Self::from_constants(
            &config.natural_constants(),
            &config.constants,
        ))
    }

    /// Process-wide tables built from the default configuration on first use.
    pub fn standard() -> &'static UnitTables {
        &STANDARD_TABLES
    }

    #[inline]
    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    #[inline]
    pub fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    /// Express `value`, given in SI unit `unit`, in natural units.
    pub fn to_natural(&self, value: f64, unit: &str) -> Result<f64, UnrecognizedUnit> {
        Ok(value * self.resolve(unit)?)
    }

    /// Express a natural-unit `value` in SI unit `unit`.
    pub fn from_natural(&self, value: f64, unit: &str) -> Result<f64, UnrecognizedUnit> {
        Ok(value / self.resolve(unit)?)
    }

    /// Re-express `value` from unit `from` in unit `to`.
    ///
    /// No dimension check is made: converting volts to metres yields a number.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64, UnrecognizedUnit> {
        let from_factor = self.resolve(from)?;
        let to_factor = self.resolve(to)?;
        if from == to {
            return Ok(value);
        }
        Ok(value * from_factor / to_factor)
    }
}

impl Default for UnitTables {
    fn default() -> Self {
        Self::from_constants(&NaturalConstants::default(), &SiConstants::default())
    }
}

/// Resolve `token` against the [standard tables](UnitTables::standard).
pub fn resolve(token: &str) -> Result<f64, UnrecognizedUnit> {
    UnitTables::standard().resolve(token)
}

/// [`UnitTables::to_natural`] on the standard tables.
pub fn to_natural(value: f64, unit: &str) -> Result<f64, UnrecognizedUnit> {
    UnitTables::standard().to_natural(value, unit)
}

/// [`UnitTables::from_natural`] on the standard tables.
pub fn from_natural(value: f64, unit: &str) -> Result<f64, UnrecognizedUnit> {
    UnitTables::standard().from_natural(value, unit)
}

/// [`UnitTables::convert`] on the standard tables.
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, UnrecognizedUnit> {
    UnitTables::standard().convert(value, from, to)
}
