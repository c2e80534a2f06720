// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the SNR / PSD application
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against a JSON schema before it is deserialized.
//!
//! ## Configuration Structure
//!
//! The configuration is organized as a nested structure with sections:
//! - `signal`: sampling frequency, duration and tone frequency
//! - `noise`: seed of the noise generator
//! - `scenarios`: the list of target SNRs, one analysis per entry
//! - `output`: directory, format and size of the generated plots
//! - `analysis`: settings of the spectrum summary
//!
//! ## Usage
//!
//! ```no_run
//! use rust_snr_psd::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some(48_000.0),        // Sampling frequency
//!     Some(0.5),             // Duration
//!     None,                  // Wave frequency
//!     Some(vec![30.0, 0.0]), // Target SNRs
//!     Some(42),              // Seed
//!     None,                  // Output directory
//!     None,                  // Image format
//! );
//!
//! println!("Samples per scenario: {}", config.signal.sampling().unwrap().sample_count());
//! ```

pub mod analysis;
pub mod noise;
pub mod output;
pub mod scenario;
pub mod signal;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::visualization::ImageFormat;

// Re-export all types for public API
pub use analysis::AnalysisConfig;
pub use noise::NoiseConfig;
pub use output::{OutputConfig, MIN_IMAGE_SIDE};
pub use scenario::{default_scenarios, ScenarioConfig};
pub use signal::SignalConfig;
pub use utils::{output_config_schema, validate_specific_rules};

/// JSON schema every configuration file must satisfy
pub const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure.
///
/// Every section has defaults, so an empty YAML document is a valid
/// configuration describing the 200 kHz / 10 ms / 1 kHz reference setup with
/// a 20 dB and a 5 dB scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Sampling grid and tone frequency
    #[serde(default)]
    pub signal: SignalConfig,

    /// Noise generator settings
    #[serde(default)]
    pub noise: NoiseConfig,

    /// Target SNRs, analyzed in order
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,

    /// Plot output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Spectrum summary settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            noise: NoiseConfig::default(),
            scenarios: default_scenarios(),
            output: OutputConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file.
    ///
    /// A missing file is created with the default configuration. A file that
    /// fails schema validation, deserialization or [`validate_specific_rules`]
    /// is rejected, and a `<name>.sample.yaml` holding the defaults is written
    /// next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let yaml_value: serde_yml::Value = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML configuration from {:?}", path))?;

        // An empty document parses as null; treat it as an empty mapping
        let json_value = match serde_json::to_value(&yaml_value).with_context(|| {
            format!("Failed to convert YAML to JSON for validation: {:?}", path)
        })? {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            value => value,
        };

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating {} configuration against schema", path.display());
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            Self::create_sample_config(path)?;
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = match serde_json::from_value(json_value) {
            Ok(config) => config,
            Err(err) => {
                error!("Configuration deserialization error: {}", err);
                if let Err(e) = Self::create_sample_config(path) {
                    error!("Failed to create sample config: {}", e);
                }
                return Err(anyhow::anyhow!(
                    "Failed to deserialize configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        if let Err(err) = validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            Self::create_sample_config(path)?;
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Check the configuration against the rules the schema cannot express
    pub fn validate(&self) -> Result<()> {
        validate_specific_rules(self)
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only the arguments that are `Some` override the configuration. A list
    /// of SNRs replaces the configured scenarios as a whole.
    ///
    /// # Parameters
    ///
    /// * `sampling_frequency` - Sampling frequency in Hz
    /// * `time_duration` - Signal duration in seconds
    /// * `wave_frequency` - Sine frequency in Hz
    /// * `snr_db` - Target SNRs in dB, one scenario each
    /// * `seed` - Seed of the noise generator
    /// * `output_dir` - Directory receiving the plots
    /// * `format` - Image format of the plots
    #[allow(clippy::too_many_arguments)]
    pub fn apply_args(
        &mut self,
        sampling_frequency: Option<f64>,
        time_duration: Option<f64>,
        wave_frequency: Option<f64>,
        snr_db: Option<Vec<f64>>,
        seed: Option<u64>,
        output_dir: Option<PathBuf>,
        format: Option<ImageFormat>,
    ) {
        if let Some(fs) = sampling_frequency {
            debug!("Overriding sampling frequency from command line: {}", fs);
            self.signal.sampling_frequency = fs;
        }
        if let Some(duration) = time_duration {
            debug!("Overriding time duration from command line: {}", duration);
            self.signal.time_duration = duration;
        }
        if let Some(freq) = wave_frequency {
            debug!("Overriding wave frequency from command line: {}", freq);
            self.signal.wave_frequency = freq;
        }
        if let Some(snrs) = snr_db {
            debug!("Overriding scenarios from command line: {:?}", snrs);
            self.scenarios = snrs.into_iter().map(ScenarioConfig::new).collect();
        }
        if let Some(seed) = seed {
            debug!("Overriding noise seed from command line: {}", seed);
            self.noise.seed = Some(seed);
        }
        if let Some(dir) = output_dir {
            debug!("Overriding output directory from command line: {:?}", dir);
            self.output.directory = dir;
        }
        if let Some(format) = format {
            debug!("Overriding image format from command line: {}", format);
            self.output.format = format;
        }
    }
}
