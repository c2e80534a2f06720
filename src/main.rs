// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the noisy sine / PSD demonstrator
use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use rust_snr_psd::analysis;
use rust_snr_psd::config::{self, Config};
use rust_snr_psd::visualization::ImageFormat;

/// Sine wave in Gaussian noise: time series and power spectral density plots
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (YAML format), built-in defaults when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a configuration to validate and exit
    #[arg(long)]
    validate_config: Option<PathBuf>,

    /// Output the configuration schema as JSON and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Sampling frequency in Hz
    #[arg(long)]
    sampling_frequency: Option<f64>,

    /// Signal duration in seconds
    #[arg(long)]
    time_duration: Option<f64>,

    /// Sine frequency in Hz
    #[arg(long)]
    wave_frequency: Option<f64>,

    /// Target SNR in dB, repeat the flag or separate values with commas
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    snr_db: Vec<f64>,

    /// Seed of the noise generator for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Directory receiving the plots
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Image format of the plots
    #[arg(long, value_enum)]
    format: Option<ImageFormat>,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    if let Some(validate_path) = args.validate_config {
        if !validate_path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file does not exist: {}",
                validate_path.display()
            ));
        }

        Config::from_file(&validate_path)
            .map_err(|err| anyhow::anyhow!("Configuration validation failed: {}", err))?;
        println!("Configuration file is valid: {}", validate_path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let snr_db = if args.snr_db.is_empty() {
        None
    } else {
        Some(args.snr_db.clone())
    };
    config.apply_args(
        args.sampling_frequency,
        args.time_duration,
        args.wave_frequency,
        snr_db,
        args.seed,
        args.output_dir.clone(),
        args.format,
    );
    config.validate()?;

    let results = analysis::run(&config)?;

    println!("SNR / PSD analysis");
    println!("------------------");
    for result in &results {
        let (time_name, psd_name) = result.file_names(config.output.format.extension());
        println!("Target SNR {} dB:", result.snr_db);
        println!("- Realized SNR: {:.3} dB", result.measured_snr_db);
        match &result.summary {
            Some(summary) => {
                println!(
                    "- Peak: {} Hz at {:.2} dB",
                    summary.peak_frequency, summary.peak_power_db
                );
                println!("- Noise floor: {:.2} dB", summary.noise_floor_db);
                println!(
                    "- SNR estimated from the PSD: {:.2} dB",
                    summary.estimated_snr_db
                );
            }
            None => println!("- Spectrum summary unavailable"),
        }
        println!("- Plots: {}, {}", time_name, psd_name);
    }

    info!(
        "{} plot(s) written to {}",
        results.len() * 2,
        config.output.directory.display()
    );
    Ok(())
}
