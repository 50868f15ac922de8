//! Digital multimeter (DMM) accuracy specifications.
//!
//! Every DMM mode follows the same published form:
//!
//! ```text
//! uncertainty = relative_percent / 100 * |reading| + resolution_multiplier * resolution
//! ```
//!
//! where `resolution` is the value of one least-significant digit on the display.
//! Readings are in SI base units (V, A, Ω, F). Unless bypassed, the magnitude of the
//! reading must lie inside the closed range the specification covers.
//!
//! | Mode | Range (abs) | relative % | multiplier |
//! |------|-------------|-----------:|-----------:|
//! | DC voltage | 200 mV – 1000 V | 0.5 | 1 |
//! | AC voltage | 200 mV – 750 V | 0.8 | 3 |
//! | DC current | 20 mA – 20 A | 0.8 | 1 |
//! | AC current | 20 mA – 20 A | 1.0 | 3 |
//! | Resistance | 200 Ω – 2000 MΩ | 2.5 | 3 |
//! | Capacitance | 2 nF – 200 µF | 2.5 | 5 |
//!
//! ```rust
//! use labtools::instruments::{dmm_dc_voltage, MeasureOptions};
//!
//! let v = dmm_dc_voltage(5.0, MeasureOptions::default()).unwrap();
//! assert!((v.uncertainty() - 0.035).abs() < 1e-12);
//!
//! assert!(dmm_dc_voltage(0.1, MeasureOptions::default()).is_err());
//! assert!(dmm_dc_voltage(0.1, MeasureOptions::default().bypassing_range_check()).is_ok());
//! ```

use core::fmt;
use core::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use super::Measurement;
use crate::units::prefixes::{MEGA, MICRO, MILLI, NANO};

/// Default display resolution (one least-significant digit) for DMM readings.
pub const DEFAULT_DMM_RESOLUTION: f64 = 0.01;

/// Tolerance of a nominal (colour-coded) resistor.
pub const RESISTOR_TOLERANCE: f64 = 0.01;

/// A DMM measurement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DmmMode {
    DcVoltage,
    AcVoltage,
    DcCurrent,
    AcCurrent,
    Resistance,
    Capacitance,
}

/// Published accuracy of one DMM mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracySpec {
    /// Smallest accepted reading magnitude.
    pub min: f64,
    /// Largest accepted reading magnitude.
    pub max: f64,
    /// Percentage of the reading.
    pub relative_percent: f64,
    /// Number of display digits added to the error.
    pub resolution_multiplier: f64,
    /// SI symbol of the reading.
    pub unit: &'static str,
}

impl AccuracySpec {
    /// Absolute uncertainty of `reading` at the given display `resolution`.
    #[inline]
    pub fn uncertainty(&self, reading: f64, resolution: f64) -> f64 {
        (self.relative_percent / 100.0) * reading.abs() + self.resolution_multiplier * resolution
    }

    /// Check `reading` against the closed range `[min, max]` by magnitude.
    pub fn check(&self, reading: f64) -> Result<(), RangeBound> {
        let magnitude = reading.abs();
        if magnitude.is_nan() || magnitude < self.min {
            Err(RangeBound::Below { min: self.min })
        } else if magnitude > self.max {
            Err(RangeBound::Above { max: self.max })
        } else {
            Ok(())
        }
    }
}

impl DmmMode {
    pub const ALL: [DmmMode; 6] = [
        DmmMode::DcVoltage,
        DmmMode::AcVoltage,
        DmmMode::DcCurrent,
        DmmMode::AcCurrent,
        DmmMode::Resistance,
        DmmMode::Capacitance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DmmMode::DcVoltage => "DC voltage",
            DmmMode::AcVoltage => "AC voltage",
            DmmMode::DcCurrent => "DC current",
            DmmMode::AcCurrent => "AC current",
            DmmMode::Resistance => "Resistance",
            DmmMode::Capacitance => "Capacitance",
        }
    }

    pub fn accuracy(self) -> AccuracySpec {
        match self {
            DmmMode::DcVoltage => AccuracySpec {
                min: 200.0 * MILLI,
                max: 1000.0,
                relative_percent: 0.5,
                resolution_multiplier: 1.0,
                unit: "V",
            },
            DmmMode::AcVoltage => AccuracySpec {
                min: 200.0 * MILLI,
                max: 750.0,
                relative_percent: 0.8,
                resolution_multiplier: 3.0,
                unit: "V",
            },
            DmmMode::DcCurrent => AccuracySpec {
                min: 20.0 * MILLI,
                max: 20.0,
                relative_percent: 0.8,
                resolution_multiplier: 1.0,
                unit: "A",
            },
            DmmMode::AcCurrent => AccuracySpec {
                min: 20.0 * MILLI,
                max: 20.0,
                relative_percent: 1.0,
                resolution_multiplier: 3.0,
                unit: "A",
            },
            DmmMode::Resistance => AccuracySpec {
                min: 200.0,
                max: 2000.0 * MEGA,
                relative_percent: 2.5,
                resolution_multiplier: 3.0,
                unit: "\u{03A9}",
            },
            DmmMode::Capacitance => AccuracySpec {
                min: 2.0 * NANO,
                max: 200.0 * MICRO,
                relative_percent: 2.5,
                resolution_multiplier: 5.0,
                unit: "F",
            },
        }
    }

    /// Turn a raw `reading` into a measurement with its specified uncertainty.
    ///
    /// # Errors
    /// - [`DmmError::InvalidResolution`] when `options.resolution` is negative or not
    ///   finite. The bypass flag does not affect this check.
    /// - [`DmmError::OutOfRange`] when the reading magnitude lies outside the mode's
    ///   range and `options.bypass_range_check` is not set. With the bypass the same
    ///   formula is applied regardless of range.
    pub fn measure(self, reading: f64, options: MeasureOptions) -> Result<Measurement, DmmError> {
        check_resolution(options.resolution)?;
        let spec = self.accuracy();
        if let Err(bound) = spec.check(reading) {
            let err = ReadingOutOfRange {
                mode: self,
                reading,
                bound,
            };
            if !options.bypass_range_check {
                return Err(err.into());
            }
            warn!("Range check bypassed: {}", err);
        }
        Ok(Measurement::new(
            reading,
            spec.uncertainty(reading, options.resolution),
        ))
    }
}

impl fmt::Display for DmmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DmmMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "dc-voltage" | "dcv" | "vdc" => Ok(DmmMode::DcVoltage),
            "ac-voltage" | "acv" | "vac" => Ok(DmmMode::AcVoltage),
            "dc-current" | "dci" | "idc" => Ok(DmmMode::DcCurrent),
            "ac-current" | "aci" | "iac" => Ok(DmmMode::AcCurrent),
            "resistance" | "ohm" | "ohms" => Ok(DmmMode::Resistance),
            "capacitance" | "cap" => Ok(DmmMode::Capacitance),
            _ => Err(format!(
                "Unknown DMM mode '{}'. Use dc-voltage, ac-voltage, dc-current, ac-current, resistance, or capacitance.",
                s
            )),
        }
    }
}

/// Options for a single DMM reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureOptions {
    /// Value of one display digit, in the unit of the reading.
    pub resolution: f64,
    /// Apply the error formula even when the reading is out of range.
    pub bypass_range_check: bool,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_DMM_RESOLUTION,
            bypass_range_check: false,
        }
    }
}

impl MeasureOptions {
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn bypassing_range_check(mut self) -> Self {
        self.bypass_range_check = true;
        self
    }
}

/// Which end of an instrument range a reading violated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBound {
    Below { min: f64 },
    Above { max: f64 },
}

impl RangeBound {
    /// The violated limit.
    pub fn limit(&self) -> f64 {
        match self {
            RangeBound::Below { min } => *min,
            RangeBound::Above { max } => *max,
        }
    }

    fn relation(&self) -> &'static str {
        match self {
            RangeBound::Below { .. } => "below the minimum of",
            RangeBound::Above { .. } => "above the maximum of",
        }
    }
}

/// A reading outside the range its accuracy specification covers.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error(
    "{} reading {} {} is {} {} {}",
    .mode.label(),
    .reading,
    .mode.accuracy().unit,
    .bound.relation(),
    .bound.limit(),
    .mode.accuracy().unit
)]
pub struct ReadingOutOfRange {
    pub mode: DmmMode,
    pub reading: f64,
    pub bound: RangeBound,
}

/// A display resolution that is negative, infinite or NaN.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Resolution must be finite and non-negative, got {resolution}")]
pub struct InvalidResolution {
    pub resolution: f64,
}

/// Check that `resolution` can stand for one display digit.
pub fn check_resolution(resolution: f64) -> Result<(), InvalidResolution> {
    if resolution.is_finite() && resolution >= 0.0 {
        Ok(())
    } else {
        Err(InvalidResolution { resolution })
    }
}

/// Why a DMM reading could not be turned into a measurement.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DmmError {
    #[error(transparent)]
    OutOfRange(#[from] ReadingOutOfRange),

    #[error(transparent)]
    InvalidResolution(#[from] InvalidResolution),
}

impl DmmError {
    /// The range violation, if that is what failed.
    pub fn out_of_range(&self) -> Option<&ReadingOutOfRange> {
        match self {
            DmmError::OutOfRange(err) => Some(err),
            DmmError::InvalidResolution(_) => None,
        }
    }
}

/// DC voltage in volts.
pub fn dmm_dc_voltage(
    voltage: f64,
    options: MeasureOptions,
) -> Result<Measurement, DmmError> {
    DmmMode::DcVoltage.measure(voltage, options)
}

/// AC (RMS) voltage in volts.
pub fn dmm_ac_voltage(
    voltage: f64,
    options: MeasureOptions,
) -> Result<Measurement, DmmError> {
    DmmMode::AcVoltage.measure(voltage, options)
}

/// DC current in amperes.
pub fn dmm_dc_current(
    current: f64,
    options: MeasureOptions,
) -> Result<Measurement, DmmError> {
    DmmMode::DcCurrent.measure(current, options)
}

/// AC (RMS) current in amperes.
pub fn dmm_ac_current(
    current: f64,
    options: MeasureOptions,
) -> Result<Measurement, DmmError> {
    DmmMode::AcCurrent.measure(current, options)
}

/// Resistance in ohms.
pub fn dmm_resistance(
    resistance: f64,
    options: MeasureOptions,
) -> Result<Measurement, DmmError> {
    DmmMode::Resistance.measure(resistance, options)
}

/// Capacitance in farads.
pub fn dmm_capacitance(
    capacitance: f64,
    options: MeasureOptions,
) -> Result<Measurement, DmmError> {
    DmmMode::Capacitance.measure(capacitance, options)
}

/// A resistor's nominal value with its 1 % tolerance band.
pub fn nominal_resistor(resistance: f64) -> Measurement {
    Measurement::new(resistance, RESISTOR_TOLERANCE * resistance.abs())
}
