//! Command-line front end for the lab toolkit.
//!
//! # Usage
//!
//! ```bash
//! labtools resolve mV kOhm GHz
//! labtools convert 5 mV              # SI -> natural units
//! labtools convert 2.2 kOhm --to Ohm
//! labtools dmm dc-voltage 5.0
//! labtools --json ads-scope 2.0 --scale 1
//! ```
//!
//! # Environment Variables
//!
//! - `LABTOOLS_CONFIG`: configuration file used when `--config` is not given. Without
//!   either, `labtools.toml` is looked up in the working directory, `labtools/` and the
//!   parent directory.
//! - `RUST_LOG`: log filter (default: warn)

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use labtools::instruments::{ads_oscilloscope, ads_voltage_output, ads_voltmeter, DmmMode};
use labtools::{LabConfig, Measurement, UnitTables};

#[derive(Debug, Parser)]
#[command(name = "labtools")]
#[command(about = "Natural-unit conversions and instrument uncertainties", long_about = None)]
struct Cli {
    /// Configuration file (default: $LABTOOLS_CONFIG, else labtools.toml, else built-in values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve unit tokens to their natural-unit factors
    Resolve {
        /// Unit tokens (e.g. "mV", "kOhm")
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Convert a value into natural units, or into another unit
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Unit of the value
        from: String,

        /// Target unit (default: natural units)
        #[arg(long)]
        to: Option<String>,
    },

    /// Uncertainty of a digital multimeter reading
    Dmm {
        /// dc-voltage, ac-voltage, dc-current, ac-current, resistance or capacitance
        mode: DmmMode,

        #[arg(allow_negative_numbers = true)]
        reading: f64,

        /// Value of one display digit
        #[arg(long, allow_negative_numbers = true)]
        resolution: Option<f64>,

        /// Apply the error formula even outside the specified range
        #[arg(long)]
        bypass: bool,
    },

    /// Uncertainty of an ADS voltmeter reading
    AdsVoltmeter {
        #[arg(allow_negative_numbers = true)]
        voltage: f64,

        #[arg(long, allow_negative_numbers = true)]
        resolution: Option<f64>,
    },

    /// Uncertainty of an ADS oscilloscope reading
    AdsScope {
        #[arg(allow_negative_numbers = true)]
        voltage: f64,

        /// Volts per division
        #[arg(long, allow_negative_numbers = true)]
        scale: Option<f64>,
    },

    /// Uncertainty of an ADS voltage output setting
    AdsOutput {
        #[arg(allow_negative_numbers = true)]
        voltage: f64,
    },

    /// List unit spellings and their factors
    Units,

    /// List prefix spellings and their multipliers
    Prefixes,
}

#[derive(Serialize)]
struct Conversion<'a> {
    value: f64,
    from: &'a str,
    to: &'a str,
    result: f64,
}

#[derive(Serialize)]
struct TableEntry<'a> {
    name: &'a str,
    factor: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    run(cli.command, &config, cli.json)
}

/// `--config` if given, else `LABTOOLS_CONFIG`, else `labtools.toml` in the default
/// locations, else built-in values.
fn load_config(path: Option<&Path>) -> Result<LabConfig> {
    match path {
        Some(path) => LabConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => LabConfig::discover().context("Failed to load configuration"),
    }
}

fn run(command: Commands, config: &LabConfig, json: bool) -> Result<()> {
    let tables = UnitTables::from_config(config).context("Invalid configuration")?;
    let instruments = config.instruments;

    match command {
        Commands::Resolve { tokens } => {
            let mut resolved = Vec::with_capacity(tokens.len());
            for token in &tokens {
                resolved.push(tables.decompose(token)?);
            }
            if json {
                print_json(&resolved)?;
            } else {
                for parts in &resolved {
                    if parts.prefix.is_empty() {
                        println!("{}\t{:e}", parts.token, parts.factor);
                    } else {
                        println!(
                            "{}\t{:e}\t({} {:e} x {} {:e})",
                            parts.token,
                            parts.factor,
                            parts.prefix,
                            parts.prefix_factor,
                            parts.unit,
                            parts.unit_factor
                        );
                    }
                }
            }
        }
        Commands::Convert { value, from, to } => {
            let (to, result) = match &to {
                Some(to) => (to.as_str(), tables.convert(value, &from, to)?),
                None => ("natural", tables.to_natural(value, &from)?),
            };
            if json {
                print_json(&Conversion {
                    value,
                    from: &from,
                    to,
                    result,
                })?;
            } else {
                println!("{} {} = {:e} {}", value, from, result, to);
            }
        }
        Commands::Dmm {
            mode,
            reading,
            resolution,
            bypass,
        } => {
            let mut options = instruments.measure_options();
            if let Some(resolution) = resolution {
                options = options.with_resolution(resolution);
            }
            if bypass {
                options = options.bypassing_range_check();
            }
            let measurement = mode.measure(reading, options)?;
            print_measurement(&measurement, mode.accuracy().unit, json)?;
        }
        Commands::AdsVoltmeter {
            voltage,
            resolution,
        } => {
            let resolution = resolution.unwrap_or(instruments.ads_voltmeter_resolution);
            print_measurement(&ads_voltmeter(voltage, resolution)?, "V", json)?;
        }
        Commands::AdsScope { voltage, scale } => {
            let scale = scale.unwrap_or(instruments.ads_oscilloscope_scale);
            ensure!(
                scale.is_finite() && scale > 0.0,
                "Oscilloscope scale must be finite and positive, got {}",
                scale
            );
            let measurement = ads_oscilloscope(voltage, scale).with_context(|| {
                format!(
                    "No oscilloscope accuracy figure for {} V/div (use <= 0.5 or >= 1)",
                    scale
                )
            })?;
            print_measurement(&measurement, "V", json)?;
        }
        Commands::AdsOutput { voltage } => {
            print_measurement(&ads_voltage_output(voltage), "V", json)?;
        }
        Commands::Units => {
            let entries: Vec<TableEntry> = tables
                .conversions()
                .names()
                .into_iter()
                .filter_map(|name| {
                    tables
                        .conversions()
                        .get(name)
                        .map(|factor| TableEntry { name, factor })
                })
                .collect();
            print_table(&entries, json)?;
        }
        Commands::Prefixes => {
            let mut entries: Vec<TableEntry> = tables
                .prefixes()
                .iter()
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, factor)| TableEntry { name, factor })
                .collect();
            entries.sort_by(|a, b| b.factor.total_cmp(&a.factor).then(a.name.cmp(b.name)));
            print_table(&entries, json)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn print_measurement(measurement: &Measurement, unit: &str, json: bool) -> Result<()> {
    if json {
        print_json(measurement)
    } else {
        println!("{} {}", measurement, unit);
        Ok(())
    }
}

fn print_table(entries: &[TableEntry], json: bool) -> Result<()> {
    if json {
        return print_json(entries);
    }
    let width = entries
        .iter()
        .map(|entry| entry.name.chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        println!("{:<width$}  {:e}", entry.name, entry.factor, width = width);
    }
    Ok(())
}
