//! Integration tests for the instrument error models.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use labtools::instruments::{
    ads_oscilloscope, ads_voltage_output, ads_voltmeter, dmm_dc_current, dmm_dc_voltage,
    dmm_resistance, nominal_resistor, DmmMode, MeasureOptions, Measurement, RangeBound,
};
use labtools::{units, LabConfig, LabError, LabResult};

#[test]
fn dc_voltage_reading() {
    let v = dmm_dc_voltage(5.0, MeasureOptions::default()).unwrap();
    assert_eq!(v.value(), 5.0);
    assert_abs_diff_eq!(v.uncertainty(), 0.035, epsilon = 1e-12);
}

#[test]
fn dc_voltage_out_of_range_without_bypass() {
    let err = dmm_dc_voltage(0.1, MeasureOptions::default()).unwrap_err();
    let err = err.out_of_range().expect("range error");
    assert_eq!(err.mode, DmmMode::DcVoltage);
    assert_eq!(err.reading, 0.1);
    assert!(matches!(err.bound, RangeBound::Below { .. }));

    let bypassed = dmm_dc_voltage(0.1, MeasureOptions::default().bypassing_range_check()).unwrap();
    assert_abs_diff_eq!(bypassed.uncertainty(), 0.005 * 0.1 + 0.01, epsilon = 1e-12);
}

#[test]
fn resistance_reading() {
    let r = dmm_resistance(1000.0, MeasureOptions::default().with_resolution(0.01)).unwrap();
    assert_eq!(r.value(), 1000.0);
    assert_abs_diff_eq!(r.uncertainty(), 25.03, epsilon = 1e-9);
}

#[test]
fn range_errors_convert_into_lab_errors() {
    fn read() -> LabResult<Measurement> {
        Ok(dmm_dc_current(100.0, MeasureOptions::default())?)
    }
    let err = read().unwrap_err();
    assert!(matches!(err, LabError::Range(_)));
    assert!(err.to_string().contains("DC current"), "{err}");
}

#[test]
fn invalid_resolution_converts_into_lab_errors() {
    fn read() -> LabResult<Measurement> {
        Ok(dmm_dc_voltage(5.0, MeasureOptions::default().with_resolution(-0.02))?)
    }
    assert!(matches!(read().unwrap_err(), LabError::Resolution(_)));

    fn voltmeter() -> LabResult<Measurement> {
        Ok(ads_voltmeter(1.0, -0.001)?)
    }
    assert!(matches!(voltmeter().unwrap_err(), LabError::Resolution(_)));
}

#[test]
fn ohms_law_with_propagated_uncertainty() {
    let v = dmm_dc_voltage(5.0, MeasureOptions::default()).unwrap();
    let i = dmm_dc_current(0.5, MeasureOptions::default().with_resolution(0.001)).unwrap();
    let r = v / i;
    assert_relative_eq!(r.value(), 10.0, max_relative = 1e-12);
    let expected = 10.0 * ((0.035_f64 / 5.0).powi(2) + (0.005_f64 / 0.5).powi(2)).sqrt();
    assert_relative_eq!(r.uncertainty(), expected, max_relative = 1e-12);

    let nominal = nominal_resistor(10.0);
    assert!(nominal.contains(r.value()));
}

#[test]
fn measurements_scale_into_natural_units() {
    let v = dmm_dc_voltage(5.0, MeasureOptions::default()).unwrap();
    let factor = units::resolve("V").unwrap();
    let natural = v * factor;
    assert_relative_eq!(natural.value(), 5.0 * factor, max_relative = 1e-15);
    assert_relative_eq!(natural.relative_uncertainty(), v.relative_uncertainty(), max_relative = 1e-12);
}

#[test]
fn ads_channels() {
    assert_eq!(ads_voltmeter(2.5, 0.001).unwrap().uncertainty(), 0.001);
    assert_abs_diff_eq!(ads_oscilloscope(2.0, 2.0).unwrap().uncertainty(), 0.11, epsilon = 1e-12);
    assert_abs_diff_eq!(ads_oscilloscope(2.0, 0.2).unwrap().uncertainty(), 0.02, epsilon = 1e-12);
    assert_eq!(ads_oscilloscope(2.0, 0.8), None);
    assert_abs_diff_eq!(ads_voltage_output(0.5).uncertainty(), 0.0125, epsilon = 1e-12);
    assert_abs_diff_eq!(ads_voltage_output(5.0).uncertainty(), 0.05, epsilon = 1e-12);
}

#[test]
fn configured_instrument_defaults() {
    let config = LabConfig::from_toml_str(
        r#"
        [instruments]
        dmm_resolution = 0.001
        ads_oscilloscope_scale = 1.0
        "#,
    )
    .unwrap();
    let options = config.instruments.measure_options();
    let v = dmm_dc_voltage(5.0, options).unwrap();
    assert_abs_diff_eq!(v.uncertainty(), 0.025 + 0.001, epsilon = 1e-12);

    let scope = ads_oscilloscope(1.0, config.instruments.ads_oscilloscope_scale).unwrap();
    assert_abs_diff_eq!(scope.uncertainty(), 0.105, epsilon = 1e-12);
}

#[test]
fn measurement_json_shape() {
    let v = dmm_dc_voltage(5.0, MeasureOptions::default()).unwrap();
    let json = serde_json::to_value(v).unwrap();
    assert_eq!(json["value"], 5.0);
    assert!(json["uncertainty"].as_f64().unwrap() > 0.0);
}
