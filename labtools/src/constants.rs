//! Physical constants: the SI reference values and the natural-unit basis.
//!
//! Two sets of numbers meet here:
//!
//! - [`SiConstants`] carries reference values **in SI units**. It is the injected
//!   stand-in for a scientific-constants provider; [`SiConstants::default`] returns the
//!   CODATA 2018 recommended values, and a configuration file (or a test) may substitute
//!   its own.
//! - [`NaturalBasis`] states what the same constants are worth in the natural-unit
//!   system. The lab convention is ħ = c = μ₀ = k_B = mₑ = 1.
//!
//! [`NaturalConstants`] combines the two and derives the remaining natural-unit values
//! (ε₀ and the elementary charge), which anchor every conversion factor in
//! [`crate::units::conversions`].
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - CODATA 2018 values (published May 20, 2019, following the 2019 SI redefinition)
//!
//! ```rust
//! use labtools::constants::{NaturalBasis, NaturalConstants, SiConstants};
//!
//! let natural = NaturalConstants::new(&NaturalBasis::default(), &SiConstants::default());
//! assert_eq!(natural.vacuum_permittivity(), 1.0);
//! assert!((natural.elementary_charge() - 0.302_822).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

/// Reduced Planck constant ħ in J·s (exact since 2019).
pub const HBAR: f64 = 1.054_571_817e-34;
/// Speed of light in vacuum _c_ in m/s (exact).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Vacuum permeability μ₀ in H/m (CODATA 2018).
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;
/// Vacuum permittivity ε₀ in F/m (CODATA 2018).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Boltzmann constant k_B in J/K (exact).
pub const BOLTZMANN: f64 = 1.380_649e-23;
/// Electron mass mₑ in kg (CODATA 2018).
pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;
/// Elementary charge _e_ in C (exact).
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// Fine-structure constant α (dimensionless, CODATA 2018).
pub const FINE_STRUCTURE: f64 = 7.297_352_569_3e-3;
/// One electronvolt in joules (exact).
pub const ELECTRON_VOLT: f64 = 1.602_176_634e-19;

/// SI reference values for the constants the conversion tables are anchored on.
///
/// Every field is optional in a configuration file; missing fields keep the
/// CODATA 2018 value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiConstants {
    /// Reduced Planck constant (J·s).
    pub hbar: f64,
    /// Speed of light (m/s).
    pub speed_of_light: f64,
    /// Vacuum permeability (H/m).
    pub vacuum_permeability: f64,
    /// Vacuum permittivity (F/m).
    pub vacuum_permittivity: f64,
    /// Boltzmann constant (J/K).
    pub boltzmann: f64,
    /// Electron mass (kg).
    pub electron_mass: f64,
    /// Elementary charge (C).
    pub elementary_charge: f64,
    /// Fine-structure constant.
    pub fine_structure: f64,
    /// One electronvolt (J).
    pub electron_volt: f64,
    /// π.
    pub pi: f64,
}

impl Default for SiConstants {
    fn default() -> Self {
        Self {
            hbar: HBAR,
            speed_of_light: SPEED_OF_LIGHT,
            vacuum_permeability: VACUUM_PERMEABILITY,
            vacuum_permittivity: VACUUM_PERMITTIVITY,
            boltzmann: BOLTZMANN,
            electron_mass: ELECTRON_MASS,
            elementary_charge: ELEMENTARY_CHARGE,
            fine_structure: FINE_STRUCTURE,
            electron_volt: ELECTRON_VOLT,
            pi: core::f64::consts::PI,
        }
    }
}

impl SiConstants {
    /// Named view of every field, used for validation and listings.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("hbar", self.hbar),
            ("speed_of_light", self.speed_of_light),
            ("vacuum_permeability", self.vacuum_permeability),
            ("vacuum_permittivity", self.vacuum_permittivity),
            ("boltzmann", self.boltzmann),
            ("electron_mass", self.electron_mass),
            ("elementary_charge", self.elementary_charge),
            ("fine_structure", self.fine_structure),
            ("electron_volt", self.electron_volt),
            ("pi", self.pi),
        ]
    }
}

/// Values of the defining constants in the natural-unit system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalBasis {
    pub hbar: f64,
    pub speed_of_light: f64,
    pub vacuum_permeability: f64,
    pub boltzmann: f64,
    pub electron_mass: f64,
}

impl Default for NaturalBasis {
    fn default() -> Self {
        Self {
            hbar: 1.0,
            speed_of_light: 1.0,
            vacuum_permeability: 1.0,
            boltzmann: 1.0,
            electron_mass: 1.0,
        }
    }
}

impl NaturalBasis {
    /// Named view of every field, used for validation and listings.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("hbar", self.hbar),
            ("speed_of_light", self.speed_of_light),
            ("vacuum_permeability", self.vacuum_permeability),
            ("boltzmann", self.boltzmann),
            ("electron_mass", self.electron_mass),
        ]
    }
}

/// The natural-unit basis together with its derived constants.
///
/// - ε₀ = 1 / (μ₀ c²)
/// - e = √(4π ε₀ ħ c α)
///
/// π and α are dimensionless, so they are read from the SI provider unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalConstants {
    basis: NaturalBasis,
    vacuum_permittivity: f64,
    elementary_charge: f64,
    fine_structure: f64,
    pi: f64,
}

impl NaturalConstants {
    pub fn new(basis: &NaturalBasis, si: &SiConstants) -> Self {
        let vacuum_permittivity =
            1.0 / (basis.vacuum_permeability * basis.speed_of_light.powi(2));
        let elementary_charge = (4.0
            * si.pi
            * vacuum_permittivity
            * basis.hbar
            * basis.speed_of_light
            * si.fine_structure)
            .sqrt();

        Self {
            basis: *basis,
            vacuum_permittivity,
            elementary_charge,
            fine_structure: si.fine_structure,
            pi: si.pi,
        }
    }

    #[inline]
    pub fn hbar(&self) -> f64 {
        self.basis.hbar
    }

    #[inline]
    pub fn speed_of_light(&self) -> f64 {
        self.basis.speed_of_light
    }

    #[inline]
    pub fn vacuum_permeability(&self) -> f64 {
        self.basis.vacuum_permeability
    }

    #[inline]
    pub fn boltzmann(&self) -> f64 {
        self.basis.boltzmann
    }

    #[inline]
    pub fn electron_mass(&self) -> f64 {
        self.basis.electron_mass
    }

    /// Derived ε₀ = 1 / (μ₀ c²).
    #[inline]
    pub fn vacuum_permittivity(&self) -> f64 {
        self.vacuum_permittivity
    }

    /// Derived e = √(4π ε₀ ħ c α).
    #[inline]
    pub fn elementary_charge(&self) -> f64 {
        self.elementary_charge
    }

    #[inline]
    pub fn fine_structure(&self) -> f64 {
        self.fine_structure
    }

    #[inline]
    pub fn pi(&self) -> f64 {
        self.pi
    }
}

impl Default for NaturalConstants {
    fn default() -> Self {
        Self::new(&NaturalBasis::default(), &SiConstants::default())
    }
}
