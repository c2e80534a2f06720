// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-snr-psd project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Line chart rendering with plotters

use std::fmt;
use std::path::Path;

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while rendering a plot
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Plot '{0}' has no finite point to draw")]
    EmptySeries(String),
    #[error("Image format '{0}' is not available in this build")]
    UnsupportedFormat(ImageFormat),
    #[error("Drawing backend error: {0}")]
    Backend(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn backend_error<E: fmt::Debug>(error: E) -> PlotError {
    PlotError::Backend(format!("{:?}", error))
}

/// Image file format written by [`PlottersRenderer`]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Scalable vector graphics, always available
    #[default]
    Svg,
    /// Portable network graphics, requires the `bitmap` feature
    Png,
}

impl ImageFormat {
    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A labelled (x, y) series drawn as a single line
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

impl LinePlot {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        points: Vec<(f64, f64)>,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points,
        }
    }

    /// Points with both coordinates finite
    fn finite_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect()
    }
}

/// Anything able to turn a [`LinePlot`] into an image file
pub trait PlotRenderer {
    /// Draw `plot` and write it to `path`
    fn render(&self, plot: &LinePlot, path: &Path) -> Result<(), PlotError>;

    /// Extension of the files written by [`PlotRenderer::render`]
    fn extension(&self) -> &'static str;
}

/// [`PlotRenderer`] backed by plotters
pub struct PlottersRenderer {
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl PlottersRenderer {
    /// Create a renderer producing `width` x `height` images in `format`
    pub fn new(width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            width,
            height,
            format,
        }
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        plot: &LinePlot,
        points: &[(f64, f64)],
    ) -> Result<(), PlotError>
    where
        DB::ErrorType: 'static,
    {
        let (x_range, y_range) = bounds(points);

        root.fill(&WHITE).map_err(backend_error)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&plot.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)
            .map_err(backend_error)?;

        chart
            .configure_mesh()
            .x_desc(plot.x_label.as_str())
            .y_desc(plot.y_label.as_str())
            .axis_desc_style(("sans-serif", 15))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(backend_error)?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
            .map_err(backend_error)?;

        root.present().map_err(backend_error)?;

        Ok(())
    }
}

impl PlotRenderer for PlottersRenderer {
    fn render(&self, plot: &LinePlot, path: &Path) -> Result<(), PlotError> {
        let points = plot.finite_points();
        if points.is_empty() {
            return Err(PlotError::EmptySeries(plot.title.clone()));
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(
            "Rendering '{}' ({} points) to {}",
            plot.title,
            points.len(),
            path.display()
        );

        match self.format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
                self.draw(&root, plot, &points)
            }
            #[cfg(feature = "bitmap")]
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
                self.draw(&root, plot, &points)
            }
            #[cfg(not(feature = "bitmap"))]
            ImageFormat::Png => Err(PlotError::UnsupportedFormat(ImageFormat::Png)),
        }
    }

    fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Axis ranges enclosing `points`, widened when a range would be empty
fn bounds(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    (widen(x_min, x_max, 0.0), widen(y_min, y_max, 0.05))
}

fn widen(min: f64, max: f64, margin: f64) -> std::ops::Range<f64> {
    let span = max - min;
    if span <= 0.0 {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
        return (min - pad)..(max + pad);
    }
    (min - span * margin)..(max + span * margin)
}
