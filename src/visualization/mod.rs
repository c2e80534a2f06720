// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Visualization module
//!
//! Turns labelled (x, y) series into image files. The rest of the crate only
//! sees the [`PlotRenderer`] trait and [`LinePlot`]; `plotters` stays behind
//! [`PlottersRenderer`].

pub mod plot;

pub use plot::{ImageFormat, LinePlot, PlotError, PlotRenderer, PlottersRenderer};

/// Build the default renderer for the given output settings
pub fn create_plot_renderer(width: u32, height: u32, format: ImageFormat) -> Box<dyn PlotRenderer> {
    Box::new(PlottersRenderer::new(width, height, format))
}
