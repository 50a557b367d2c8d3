//! Layout generation settings.
//!
//! `LayoutConfig` collects the tunable constants of the engine: grid
//! resolution, door sizes and the retry budgets of the randomized placement
//! strategy. Every field has a default, so a partial JSON object is a valid
//! config; [`LayoutConfig::from_json`] also rejects values the engine cannot
//! work with.

use serde::{Deserialize, Serialize};

use crate::constants::dimensions;
use crate::error::{RequestError, Result};

/// Attempt counts for the randomized placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryBudgets {
    /// Random positions tried inside the target zone.
    pub zone: u32,
    /// Random positions tried anywhere on the grid at full size.
    pub anywhere: u32,
    /// Random positions tried anywhere after shrinking the footprint.
    pub shrunk: u32,
    /// Random positions tried around a paired bedroom.
    pub near: u32,
}

impl Default for RetryBudgets {
    fn default() -> Self {
        Self {
            zone: 50,
            anywhere: 100,
            shrunk: 50,
            near: 20,
        }
    }
}

/// Configuration for layout generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Meters covered by one grid cell when sizing footprints.
    pub meters_per_cell: f32,
    /// Square meters one cell counts for in min-area checks.
    pub cell_area: f32,
    /// Standard door width in meters.
    pub door_width: f32,
    /// Main entrance width as a multiple of `door_width`.
    pub main_door_factor: f32,
    /// Smallest grid edge, in cells.
    pub min_grid_size: usize,
    /// Largest grid edge, in cells. Caps memory for very large plots.
    pub max_grid_size: usize,
    /// Plot meters per grid cell when deriving the grid size.
    pub meters_per_grid_cell: f32,
    /// Plot width used when the request carries none.
    pub default_plot_width: f32,
    /// Plot length used when the request carries none.
    pub default_plot_length: f32,
    /// Max random offset (cells) around a paired bedroom.
    pub near_radius: i32,
    pub retries: RetryBudgets,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            meters_per_cell: dimensions::METERS_PER_CELL,
            cell_area: dimensions::CELL_AREA_M2,
            door_width: dimensions::DOOR_WIDTH,
            main_door_factor: dimensions::MAIN_DOOR_FACTOR,
            min_grid_size: 5,
            max_grid_size: 100,
            meters_per_grid_cell: 3.0,
            default_plot_width: dimensions::DEFAULT_PLOT_EDGE,
            default_plot_length: dimensions::DEFAULT_PLOT_EDGE,
            near_radius: 3,
            retries: RetryBudgets::default(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> RequestError {
    RequestError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would stall or break generation: non-positive
    /// or non-finite lengths and areas, a negative near radius, and grid
    /// bounds too small for a corridor.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("meters_per_cell", self.meters_per_cell),
            ("cell_area", self.cell_area),
            ("door_width", self.door_width),
            ("main_door_factor", self.main_door_factor),
            ("meters_per_grid_cell", self.meters_per_grid_cell),
            ("default_plot_width", self.default_plot_width),
            ("default_plot_length", self.default_plot_length),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {}", value)));
            }
        }
        if self.near_radius < 0 {
            return Err(invalid(
                "near_radius",
                format!("must not be negative, got {}", self.near_radius),
            ));
        }
        if self.min_grid_size < 3 {
            return Err(invalid(
                "min_grid_size",
                format!("must be at least 3, got {}", self.min_grid_size),
            ));
        }
        if self.max_grid_size < self.min_grid_size {
            return Err(invalid(
                "max_grid_size",
                format!(
                    "must be at least min_grid_size ({}), got {}",
                    self.min_grid_size, self.max_grid_size
                ),
            ));
        }
        Ok(())
    }

    /// Width of the main entrance door in meters.
    pub fn main_door_width(&self) -> f32 {
        self.door_width * self.main_door_factor
    }

    /// Grid edge length for a plot: `max(min_grid_size, floor(min(w, l) / 3))`,
    /// capped at `max_grid_size`.
    pub fn grid_size_for(&self, width_meters: f32, length_meters: f32) -> usize {
        let cells = (width_meters.min(length_meters) / self.meters_per_grid_cell).floor();
        let cells = if cells.is_finite() && cells > 0.0 {
            cells as usize
        } else {
            0
        };
        cells
            .max(self.min_grid_size)
            .min(self.max_grid_size.max(self.min_grid_size))
    }
}
