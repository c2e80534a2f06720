// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use rust_snr_psd::config::{
    AnalysisConfig, Config, NoiseConfig, OutputConfig, ScenarioConfig, SignalConfig,
};
use rust_snr_psd::visualization::ImageFormat;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_load_and_save() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    let config = Config {
        signal: SignalConfig {
            sampling_frequency: 48_000.0,
            time_duration: 0.25,
            wave_frequency: 440.0,
        },
        noise: NoiseConfig { seed: Some(7) },
        scenarios: vec![ScenarioConfig::new(30.0), ScenarioConfig::new(-3.0)],
        output: OutputConfig {
            directory: PathBuf::from("plots"),
            format: ImageFormat::Png,
            width: 640,
            height: 480,
        },
        analysis: AnalysisConfig { guard_bins: 5 },
    };

    config.save_to_file(&config_path)?;
    let loaded_config = Config::from_file(&config_path)?;
    assert_eq!(loaded_config, config);

    // Loading a missing file creates it with the defaults
    let non_existent_path = temp_dir.path().join("non_existent.yaml");
    let default_config = Config::from_file(&non_existent_path)?;
    assert!(non_existent_path.exists());
    assert_eq!(default_config, Config::default());
    assert_eq!(default_config.signal.sampling_frequency, 200_000.0);
    assert_eq!(default_config.signal.time_duration, 0.01);
    assert_eq!(default_config.signal.wave_frequency, 1000.0);
    assert_eq!(
        default_config.scenarios,
        vec![ScenarioConfig::new(20.0), ScenarioConfig::new(5.0)]
    );

    Ok(())
}

#[test]
fn test_partial_config_uses_defaults() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("partial.yaml");
    fs::write(
        &config_path,
        r#"
signal:
  wave_frequency: 2500
scenarios:
  - snr_db: 0
"#,
    )?;

    let config = Config::from_file(&config_path)?;
    assert_eq!(config.signal.wave_frequency, 2500.0);
    assert_eq!(config.signal.sampling_frequency, 200_000.0);
    assert_eq!(config.scenarios, vec![ScenarioConfig::new(0.0)]);
    assert_eq!(config.output, OutputConfig::default());
    assert_eq!(config.analysis.guard_bins, 3);
    assert_eq!(config.noise.seed, None);

    Ok(())
}

#[test]
fn test_empty_file_is_the_default_config() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("empty.yaml");
    fs::write(&config_path, "")?;

    assert_eq!(Config::from_file(&config_path)?, Config::default());
    Ok(())
}

#[test]
fn test_apply_args() -> Result<()> {
    let mut config = Config::default();

    config.apply_args(
        Some(1000.0),
        Some(2.0),
        Some(50.0),
        Some(vec![10.0, 0.0, -5.0]),
        Some(3),
        Some(PathBuf::from("out")),
        Some(ImageFormat::Png),
    );

    assert_eq!(config.signal.sampling_frequency, 1000.0);
    assert_eq!(config.signal.time_duration, 2.0);
    assert_eq!(config.signal.wave_frequency, 50.0);
    assert_eq!(config.scenarios.len(), 3);
    assert_eq!(config.scenarios[2].snr_db, -5.0);
    assert_eq!(config.noise.seed, Some(3));
    assert_eq!(config.output.directory, PathBuf::from("out"));
    assert_eq!(config.output.format, ImageFormat::Png);

    // Nothing given, nothing changed
    let before = config.clone();
    config.apply_args(None, None, None, None, None, None, None);
    assert_eq!(config, before);

    Ok(())
}

#[test]
fn test_config_validation() -> Result<()> {
    assert!(Config::default().validate().is_ok());

    let mut config = Config::default();
    config.signal.time_duration = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.signal.sampling_frequency = 10.0;
    config.signal.time_duration = 0.05;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.scenarios.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.output.width = 32;
    assert!(config.validate().is_err());

    Ok(())
}
