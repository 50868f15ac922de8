//! Acquisition system (ADS) accuracy models.
//!
//! The ADS has no range limits like the DMM. Its channel accuracy depends instead on
//! the configured volts-per-division scale (oscilloscope) or on the output level
//! (voltage output).

use log::debug;

use super::dmm::{check_resolution, InvalidResolution};
use super::Measurement;

/// Default resolution of the ADS voltmeter, in volts.
pub const ADS_VOLTMETER_RESOLUTION: f64 = 0.001;

/// Default oscilloscope scale, in volts per division.
pub const ADS_OSCILLOSCOPE_SCALE: f64 = 0.5;

/// Gain error of oscilloscope channels and the voltage output, as a fraction.
const GAIN_ERROR: f64 = 0.5 / 100.0;

/// Voltmeter channel: the uncertainty is one digit of `resolution`.
///
/// # Errors
/// Returns [`InvalidResolution`] for a negative or non-finite `resolution`.
pub fn ads_voltmeter(voltage: f64, resolution: f64) -> Result<Measurement, InvalidResolution> {
    check_resolution(resolution)?;
    Ok(Measurement::new(voltage, resolution))
}

/// Oscilloscope channel read at `scale` volts per division.
///
/// | scale (V/div) | uncertainty |
/// |---------------|-------------|
/// | ≥ 1           | 0.1 V + 0.5 % of reading |
/// | ≤ 0.5         | 0.01 V + 0.5 % of reading |
///
/// Scales strictly between 0.5 and 1 V/div (and NaN) have no published figure, and
/// `None` is returned rather than an invented one.
///
/// ```rust
/// use labtools::instruments::ads_oscilloscope;
///
/// let m = ads_oscilloscope(2.0, 0.5).unwrap();
/// assert!((m.uncertainty() - 0.02).abs() < 1e-12);
/// assert!(ads_oscilloscope(2.0, 0.75).is_none());
/// ```
pub fn ads_oscilloscope(voltage: f64, scale: f64) -> Option<Measurement> {
    let offset = if scale >= 1.0 {
        0.1
    } else if scale <= 0.5 {
        0.01
    } else {
        debug!("No oscilloscope accuracy figure for scale {} V/div", scale);
        return None;
    };
    Some(Measurement::new(voltage, offset + GAIN_ERROR * voltage.abs()))
}

/// Voltage output channel set to `voltage`.
///
/// Outputs up to 1 V carry a 10 mV offset error, higher outputs 25 mV, both plus
/// 0.5 % of the setting.
pub fn ads_voltage_output(voltage: f64) -> Measurement {
    let offset = if voltage <= 1.0 { 0.01 } else { 0.025 };
    Measurement::new(voltage, offset + GAIN_ERROR * voltage.abs())
}
