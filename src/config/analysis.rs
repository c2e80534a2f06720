// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Spectrum summary configuration

use serde::{Deserialize, Serialize};

/// Settings of the spectrum summary printed after each scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Bins on each side of the tone excluded from the noise floor
    #[serde(default = "default_guard_bins")]
    pub guard_bins: usize,
}

fn default_guard_bins() -> usize {
    3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            guard_bins: default_guard_bins(),
        }
    }
}
