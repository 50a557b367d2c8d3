//! Plot dimensions and South Asian land-area units.
//!
//! Plots are often specified in Marla or Kanal rather than meters. A plot given
//! only by area is resolved to a slightly rectangular footprint
//! (`width = sqrt(area · 0.8)`, `length = area / width`).

use serde::{Deserialize, Serialize};

use crate::constants::dimensions::{DEFAULT_PLOT_EDGE, MARLA_M2, MARLA_PER_KANAL};

/// Width-to-area ratio used when deriving dimensions from an area.
const ASPECT_FACTOR: f32 = 0.8;

/// Plot size carried through to the final layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    pub width_meters: f32,
    pub length_meters: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marla: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kanal: Option<f32>,
}

impl Default for PlotSize {
    fn default() -> Self {
        Self::from_dimensions(DEFAULT_PLOT_EDGE, DEFAULT_PLOT_EDGE)
    }
}

impl PlotSize {
    pub fn from_dimensions(width_meters: f32, length_meters: f32) -> Self {
        Self {
            width_meters,
            length_meters,
            marla: None,
            kanal: None,
        }
    }

    pub fn from_marla(marla: f32) -> Self {
        let (width_meters, length_meters) = dimensions_for_area(marla * MARLA_M2);
        Self {
            width_meters,
            length_meters,
            marla: Some(marla),
            kanal: Some(marla / MARLA_PER_KANAL),
        }
    }

    pub fn from_kanal(kanal: f32) -> Self {
        let marla = kanal * MARLA_PER_KANAL;
        Self {
            kanal: Some(kanal),
            ..Self::from_marla(marla)
        }
    }

    /// Area in square meters.
    pub fn area(&self) -> f32 {
        self.width_meters * self.length_meters
    }
}

fn dimensions_for_area(area_m2: f32) -> (f32, f32) {
    let width = (area_m2 * ASPECT_FACTOR).sqrt();
    if width <= 0.0 {
        return (0.0, 0.0);
    }
    (width, area_m2 / width)
}
