//! Instrument error models.
//!
//! Each model turns a raw instrument reading into a [`Measurement`] whose uncertainty
//! follows the instrument's published accuracy specification.
//!
//! - [`dmm`]: digital multimeter modes, with range checks that can be bypassed.
//! - [`ads`]: acquisition system channels (voltmeter, oscilloscope, voltage output).
//!
//! Readings are plain SI values. To carry a result into natural units, scale it by a
//! resolved unit factor:
//!
//! ```rust
//! use labtools::instruments::{dmm_dc_voltage, MeasureOptions};
//! use labtools::units;
//!
//! let reading = dmm_dc_voltage(5.0, MeasureOptions::default()).unwrap();
//! let natural = reading * units::resolve("V").unwrap();
//! assert!((natural.value() / reading.value() - units::resolve("V").unwrap()).abs() < 1e-18);
//! ```

pub mod ads;
pub mod dmm;
pub mod measurement;


pub use ads::{
    ads_oscilloscope, ads_voltage_output, ads_voltmeter, ADS_OSCILLOSCOPE_SCALE,
    ADS_VOLTMETER_RESOLUTION,
};
pub use dmm::{
    dmm_ac_current, dmm_ac_voltage, dmm_capacitance, dmm_dc_current, dmm_dc_voltage,
    dmm_resistance, nominal_resistor, AccuracySpec, DmmError, DmmMode, InvalidResolution,
    MeasureOptions, RangeBound, ReadingOutOfRange, DEFAULT_DMM_RESOLUTION,
};
pub use measurement::Measurement;
