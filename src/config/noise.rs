// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Noise source configuration

use serde::{Deserialize, Serialize};

use crate::signal::NoiseGenerator;

/// Random source used for the Gaussian noise.
///
/// With a `seed` every run draws the same noise; without one the generator
/// is seeded from OS entropy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Seed of the random number generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl NoiseConfig {
    /// Noise generator seeded as configured
    pub fn generator(&self) -> NoiseGenerator {
        NoiseGenerator::from_seed(self.seed)
    }
}
