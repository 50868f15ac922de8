//! Configuration file support.
//!
//! A configuration file is TOML with three optional sections:
//!
//! ```toml
//! # SI reference values (CODATA 2018 when omitted)
//! [constants]
//! electron_mass = 9.1093837015e-31
//!
//! # Natural-unit basis (all 1 when omitted)
//! [basis]
//! speed_of_light = 1.0
//!
//! [instruments]
//! dmm_resolution = 0.01
//! ads_voltmeter_resolution = 0.001
//! ads_oscilloscope_scale = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use log::debug;

use crate::constants::{NaturalBasis, NaturalConstants, SiConstants};
use crate::error::{LabError, LabResult};
use crate::instruments::{
    MeasureOptions, ADS_OSCILLOSCOPE_SCALE, ADS_VOLTMETER_RESOLUTION, DEFAULT_DMM_RESOLUTION,
};

/// Environment variable holding the path of the configuration file.
pub const CONFIG_ENV_VAR: &str = "LABTOOLS_CONFIG";

/// Locations searched by [`LabConfig::from_default_location`], in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 3] =
    ["labtools.toml", "labtools/labtools.toml", "../labtools.toml"];

fn env_config_path() -> Option<String> {
    env::var(CONFIG_ENV_VAR)
        .ok()
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
}

fn default_config_path() -> Option<&'static Path> {
    DEFAULT_CONFIG_PATHS
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
}

/// Lab toolkit configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabConfig {
    #[serde(default)]
    pub constants: SiConstants,
    #[serde(default)]
    pub basis: NaturalBasis,
    #[serde(default)]
    pub instruments: InstrumentSettings,
}

/// Default instrument settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSettings {
    #[serde(default = "default_dmm_resolution")]
    pub dmm_resolution: f64,
    #[serde(default = "default_ads_voltmeter_resolution")]
    pub ads_voltmeter_resolution: f64,
    #[serde(default = "default_ads_oscilloscope_scale")]
    pub ads_oscilloscope_scale: f64,
}

fn default_dmm_resolution() -> f64 {
    DEFAULT_DMM_RESOLUTION
}

fn default_ads_voltmeter_resolution() -> f64 {
    ADS_VOLTMETER_RESOLUTION
}

fn default_ads_oscilloscope_scale() -> f64 {
    ADS_OSCILLOSCOPE_SCALE
}

impl Default for InstrumentSettings {
    fn default() -> Self {
        Self {
            dmm_resolution: default_dmm_resolution(),
            ads_voltmeter_resolution: default_ads_voltmeter_resolution(),
            ads_oscilloscope_scale: default_ads_oscilloscope_scale(),
        }
    }
}

impl InstrumentSettings {
    /// DMM options using the configured resolution, with range checks enabled.
    pub fn measure_options(&self) -> MeasureOptions {
        MeasureOptions::default().with_resolution(self.dmm_resolution)
    }
}

impl LabConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> LabResult<Self> {
        let config: LabConfig = toml::from_str(content).map_err(|e| {
            LabError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(LabConfig)` if the file was read, parsed and validated
    /// * `Err(LabError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> LabResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            LabError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the first of [`DEFAULT_CONFIG_PATHS`] that exists,
    /// relative to the working directory.
    pub fn from_default_location() -> LabResult<Self> {
        let path = default_config_path().ok_or_else(|| {
            LabError::Configuration(format!(
                "No labtools.toml found in {}",
                DEFAULT_CONFIG_PATHS.join(", ")
            ))
        })?;
        Self::from_file(path)
    }

    /// Load configuration from the file named by `LABTOOLS_CONFIG`.
    ///
    /// Falls back to the defaults when the variable is unset or blank. A set but
    /// unreadable path is an error.
    pub fn from_env() -> LabResult<Self> {
        match env_config_path() {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Find configuration without an explicit path.
    ///
    /// `LABTOOLS_CONFIG` wins when set; otherwise the first existing default location is
    /// loaded; otherwise the built-in defaults apply.
    pub fn discover() -> LabResult<Self> {
        if let Some(path) = env_config_path() {
            debug!("Loading configuration from ${}: {}", CONFIG_ENV_VAR, path);
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => {
                debug!("No configuration file found, using built-in values");
                Ok(Self::default())
            }
        }
    }

    /// Check every value for physical sense.
    ///
    /// Constants and basis values must be finite and strictly positive, resolutions
    /// finite and non-negative, and the oscilloscope scale finite and positive.
    pub fn validate(&self) -> LabResult<()> {
        let named = self
            .constants
            .entries()
            .into_iter()
            .map(|(name, value)| (format!("constants.{}", name), value))
            .chain(
                self.basis
                    .entries()
                    .into_iter()
                    .map(|(name, value)| (format!("basis.{}", name), value)),
            );
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(LabError::Configuration(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        let instruments = &self.instruments;
        for (name, value) in [
            ("instruments.dmm_resolution", instruments.dmm_resolution),
            (
                "instruments.ads_voltmeter_resolution",
                instruments.ads_voltmeter_resolution,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LabError::Configuration(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if !instruments.ads_oscilloscope_scale.is_finite()
            || instruments.ads_oscilloscope_scale <= 0.0
        {
            return Err(LabError::Configuration(format!(
                "instruments.ads_oscilloscope_scale must be finite and positive, got {}",
                instruments.ads_oscilloscope_scale
            )));
        }

        Ok(())
    }

    /// The natural basis and its derived constants.
    pub fn natural_constants(&self) -> NaturalConstants {
        NaturalConstants::new(&self.basis, &self.constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = LabConfig::from_toml_str("").unwrap();
        assert_eq!(config, LabConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = LabConfig::from_toml_str(
            r#"
            [constants]
            electron_mass = 9.1e-31

            [instruments]
            dmm_resolution = 0.001
            "#,
        )
        .unwrap();
        assert_eq!(config.constants.electron_mass, 9.1e-31);
        assert_eq!(config.constants.hbar, crate::constants::HBAR);
        assert_eq!(config.instruments.dmm_resolution, 0.001);
        assert_eq!(config.instruments.ads_oscilloscope_scale, 0.5);
        assert_eq!(config.instruments.measure_options().resolution, 0.001);
    }

    #[test]
    fn rejects_non_positive_constants() {
        let err = LabConfig::from_toml_str("[basis]\nhbar = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("basis.hbar"), "{err}");
    }

    #[test]
    fn rejects_negative_resolution() {
        let err = LabConfig::from_toml_str("[instruments]\ndmm_resolution = -1.0\n").unwrap_err();
        assert!(matches!(err, LabError::Configuration(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = LabConfig::from_toml_str("[constants\n").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Failed to parse"));
    }
}
