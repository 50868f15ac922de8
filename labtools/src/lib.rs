//! Laboratory toolkit for natural-unit physics.
//!
//! - [`units`]: conversion factors from SI units into the natural system
//!   ħ = c = μ₀ = k_B = mₑ = 1, SI prefixes, and a resolver that turns tokens such as
//!   `"mV"` or `"kOhm"` into a single factor.
//! - [`instruments`]: accuracy models for the lab's digital multimeter and acquisition
//!   system, producing [`Measurement`]s.
//! - [`config`]: optional TOML configuration for the constants and instrument defaults.
//!
//! ```rust
//! use labtools::instruments::{dmm_dc_voltage, MeasureOptions};
//! use labtools::units;
//!
//! let reading = dmm_dc_voltage(5.0, MeasureOptions::default())?;
//! let natural = reading * units::resolve("V")?;
//! assert!(natural.value() > 0.0);
//! # Ok::<(), labtools::LabError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod instruments;
pub mod units;

pub use config::{InstrumentSettings, LabConfig};
pub use constants::{NaturalBasis, NaturalConstants, SiConstants};
pub use error::{LabError, LabResult};
pub use instruments::{DmmError, DmmMode, MeasureOptions, Measurement, ReadingOutOfRange};
pub use units::{UnitTables, UnrecognizedUnit};
