// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Plot output configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::visualization::{create_plot_renderer, ImageFormat, PlotRenderer};

/// Smallest accepted image side, in pixels
pub const MIN_IMAGE_SIDE: u32 = 64;

/// Where and how the plots are written.
///
/// # Example
///
/// ```
/// use rust_snr_psd::config::OutputConfig;
/// use rust_snr_psd::visualization::ImageFormat;
///
/// let output = OutputConfig {
///     directory: "plots".into(),
///     format: ImageFormat::Svg,
///     width: 800,
///     height: 600,
/// };
/// assert_eq!(output.renderer().extension(), "svg");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the images, created if missing
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Image format
    #[serde(default)]
    pub format: ImageFormat,

    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

impl OutputConfig {
    /// Renderer producing images with these settings
    pub fn renderer(&self) -> Box<dyn PlotRenderer> {
        create_plot_renderer(self.width, self.height, self.format)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            format: ImageFormat::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}
