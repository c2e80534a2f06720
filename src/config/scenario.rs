// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! SNR scenarios

use serde::{Deserialize, Serialize};

/// One analysis run: the wave is generated at `snr_db` and plotted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Target signal-to-noise ratio in dB
    pub snr_db: f64,
}

impl ScenarioConfig {
    pub fn new(snr_db: f64) -> Self {
        Self { snr_db }
    }
}

/// The two scenarios run when nothing else is configured: 20 dB and 5 dB
pub fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![ScenarioConfig::new(20.0), ScenarioConfig::new(5.0)]
}
