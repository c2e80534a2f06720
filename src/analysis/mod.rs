// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Scenario orchestration
//!
//! For every configured target SNR: generate the noisy sine, estimate its
//! PSD, summarize the spectrum around the tone, then plot the time series and
//! the PSD. A failing scenario stops the run before anything is drawn for it.
//! The summary is informative only: when it cannot be computed the scenario
//! is still plotted, with a warning.
//!
//! ```no_run
//! use rust_snr_psd::analysis;
//! use rust_snr_psd::config::Config;
//!
//! let results = analysis::run(&Config::default()).unwrap();
//! for result in &results {
//!     println!("{} dB -> {:.2} dB measured", result.snr_db, result.measured_snr_db);
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::Rng;

use crate::config::Config;
use crate::signal::{add_noise, generate_clean_wave, measured_snr_db, SamplingParameters, TimeSeries};
use crate::spectral::{
    create_spectrum_estimator, summarize, Spectrum, SpectrumEstimator, SpectrumSummary,
};
use crate::visualization::{LinePlot, PlotRenderer};

/// Everything computed for one target SNR
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Requested SNR in dB
    pub snr_db: f64,
    /// Noisy sine wave
    pub series: TimeSeries,
    /// PSD of the noisy wave
    pub spectrum: Spectrum,
    /// Peak, noise floor and SNR read from the spectrum, when the tone and
    /// the noise floor can both be located
    pub summary: Option<SpectrumSummary>,
    /// SNR realized by the noise draw, from the clean and noisy samples
    pub measured_snr_db: f64,
}

impl ScenarioResult {
    /// Voltage against time
    pub fn time_plot(&self) -> LinePlot {
        LinePlot::new(
            format!("Voltage vs. Time, SNR = {} dB", self.snr_db),
            "Time (s)",
            "Voltage (V)",
            self.series.points(),
        )
    }

    /// PSD in dB against frequency
    pub fn psd_plot(&self) -> LinePlot {
        LinePlot::new(
            format!("Power Spectral Density, SNR = {} dB", self.snr_db),
            "Frequency (Hz)",
            "PSD (dB/Hz)",
            self.spectrum.db_points(),
        )
    }

    /// File names of the time and PSD plots for the given extension
    pub fn file_names(&self, extension: &str) -> (String, String) {
        (
            format!("sine_wave_snr_{}dB.{}", self.snr_db, extension),
            format!("PSD_snr_{}dB.{}", self.snr_db, extension),
        )
    }
}

/// Settings shared by every scenario of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisPlan {
    pub sampling: SamplingParameters,
    pub wave_frequency: f64,
    pub guard_bins: usize,
}

impl AnalysisPlan {
    pub fn from_config(config: &Config) -> Result<Self> {
        let sampling = config
            .signal
            .sampling()
            .context("Invalid sampling parameters")?;
        Ok(Self {
            sampling,
            wave_frequency: config.signal.wave_frequency,
            guard_bins: config.analysis.guard_bins,
        })
    }
}

/// Generate, analyze and summarize one scenario. Nothing is written to disk.
pub fn run_scenario<R: Rng + ?Sized>(
    plan: &AnalysisPlan,
    estimator: &mut SpectrumEstimator,
    snr_db: f64,
    rng: &mut R,
) -> Result<ScenarioResult> {
    let clean = generate_clean_wave(&plan.sampling, plan.wave_frequency)
        .context("Failed to generate the sine wave")?;
    let noisy = add_noise(&clean.amplitude, snr_db, rng)
        .with_context(|| format!("Failed to add noise at {} dB", snr_db))?;
    let measured = measured_snr_db(&clean.amplitude, &noisy)?;

    let spectrum = estimator
        .estimate(&noisy, &plan.sampling)
        .context("Failed to estimate the power spectral density")?;
    let summary = match summarize(&spectrum, plan.wave_frequency, plan.guard_bins) {
        Ok(summary) => {
            debug!(
                "Scenario {} dB: measured {:.3} dB, peak {} Hz at {:.2} dB, floor {:.2} dB",
                snr_db,
                measured,
                summary.peak_frequency,
                summary.peak_power_db,
                summary.noise_floor_db
            );
            Some(summary)
        }
        Err(err) => {
            warn!("No spectrum summary for the {} dB scenario: {}", snr_db, err);
            None
        }
    };

    Ok(ScenarioResult {
        snr_db,
        series: TimeSeries {
            time: clean.time,
            amplitude: noisy,
        },
        spectrum,
        summary,
        measured_snr_db: measured,
    })
}

/// Draw the time and PSD plots of `result` into `output_dir`.
///
/// The directory is created if needed. Returns the written paths, time plot
/// first.
pub fn render_scenario(
    result: &ScenarioResult,
    renderer: &dyn PlotRenderer,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let (time_name, psd_name) = result.file_names(renderer.extension());
    let time_path = output_dir.join(time_name);
    let psd_path = output_dir.join(psd_name);

    renderer
        .render(&result.time_plot(), &time_path)
        .with_context(|| format!("Failed to render {:?}", time_path))?;
    renderer
        .render(&result.psd_plot(), &psd_path)
        .with_context(|| format!("Failed to render {:?}", psd_path))?;

    info!("Saved {:?} and {:?}", time_path, psd_path);
    Ok(vec![time_path, psd_path])
}

/// Run every scenario of `config` with the renderer it describes
pub fn run(config: &Config) -> Result<Vec<ScenarioResult>> {
    let renderer = config.output.renderer();
    run_with_renderer(config, renderer.as_ref())
}

/// Run every scenario of `config`, drawing with `renderer`.
///
/// Scenarios share one noise generator, so a seeded configuration reproduces
/// the whole run. The first failure aborts the run.
pub fn run_with_renderer(config: &Config, renderer: &dyn PlotRenderer) -> Result<Vec<ScenarioResult>> {
    config.validate()?;
    let plan = AnalysisPlan::from_config(config)?;
    let mut generator = config.noise.generator();
    let mut estimator = create_spectrum_estimator();

    info!(
        "Analyzing a {} Hz sine sampled at {} Hz for {} s ({} samples), {} scenario(s)",
        plan.wave_frequency,
        plan.sampling.sampling_frequency(),
        plan.sampling.time_duration(),
        plan.sampling.sample_count(),
        config.scenarios.len()
    );

    let mut results = Vec::with_capacity(config.scenarios.len());
    for scenario in &config.scenarios {
        info!("Running scenario at {} dB SNR", scenario.snr_db);
        let result = run_scenario(&plan, &mut estimator, scenario.snr_db, generator.rng_mut())
            .with_context(|| format!("Scenario at {} dB SNR failed", scenario.snr_db))?;
        render_scenario(&result, renderer, &config.output.directory)?;
        results.push(result);
    }

    Ok(results)
}
