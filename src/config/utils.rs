// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::debug;

use super::{Config, CONFIG_SCHEMA, MIN_IMAGE_SIDE};

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./rust_snr_psd --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against additional rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **Sampling**: both values finite and positive, and their product worth at
///   least one sample
/// - **Wave frequency**: finite
/// - **Scenarios**: at least one, every SNR a number (`+inf` is accepted and
///   gives a noise-free signal)
/// - **Image size**: both sides at least [`MIN_IMAGE_SIDE`] pixels
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    let sampling = config
        .signal
        .sampling()
        .context("Invalid signal configuration")?;
    debug!(
        "Configuration yields {} samples per scenario",
        sampling.sample_count()
    );

    if !config.signal.wave_frequency.is_finite() {
        anyhow::bail!(
            "Wave frequency must be finite, got {}",
            config.signal.wave_frequency
        );
    }

    if config.scenarios.is_empty() {
        anyhow::bail!("At least one SNR scenario is required");
    }
    for scenario in &config.scenarios {
        if scenario.snr_db.is_nan() || scenario.snr_db == f64::NEG_INFINITY {
            anyhow::bail!("Invalid target SNR: {} dB", scenario.snr_db);
        }
    }

    if config.output.width < MIN_IMAGE_SIDE || config.output.height < MIN_IMAGE_SIDE {
        anyhow::bail!(
            "Image size {}x{} is below the {} pixel minimum",
            config.output.width,
            config.output.height,
            MIN_IMAGE_SIDE
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_specific_rules(&Config::default()).is_ok());
    }

    #[test]
    fn test_too_short_duration_is_rejected() {
        let mut config = Config::default();
        config.signal.sampling_frequency = 10.0;
        config.signal.time_duration = 0.05;
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_scenarios_are_checked() {
        let mut config = Config::default();
        config.scenarios.clear();
        assert!(validate_specific_rules(&config).is_err());

        config.scenarios = vec![ScenarioConfig::new(f64::NAN)];
        assert!(validate_specific_rules(&config).is_err());

        config.scenarios = vec![ScenarioConfig::new(f64::INFINITY)];
        assert!(validate_specific_rules(&config).is_ok());
    }

    #[test]
    fn test_small_images_are_rejected() {
        let mut config = Config::default();
        config.output.height = 10;
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(CONFIG_SCHEMA).unwrap();
        assert!(schema["properties"]["signal"].is_object());
        assert!(jsonschema::draft202012::options().build(&schema).is_ok());
    }
}
