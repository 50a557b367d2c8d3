//! Grid units to meters.

use crate::grid::GridRect;
use crate::plot::PlotSize;
use crate::routing::Rect;

/// Per-axis meters per grid cell for one layout.
///
/// Applied to rooms once placement is done. No rounding: a grid rectangle
/// `(gx, gy, gw, gh)` maps to `(gx·sx, gy·sy, gw·sx, gh·sy)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateScaler {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl CoordinateScaler {
    pub fn new(plot: &PlotSize, grid_size: usize) -> Self {
        let g = grid_size.max(1) as f32;
        Self {
            scale_x: plot.width_meters / g,
            scale_y: plot.length_meters / g,
        }
    }

    pub fn point(&self, p: [f32; 2]) -> [f32; 2] {
        [p[0] * self.scale_x, p[1] * self.scale_y]
    }

    /// `(position, size)` of a grid rectangle, in meters.
    pub fn rect(&self, r: &GridRect) -> ([f32; 2], [f32; 2]) {
        (
            self.point([r.x as f32, r.y as f32]),
            self.point([r.w as f32, r.h as f32]),
        )
    }

    /// A grid rectangle as a meter rectangle, matching [`Self::rect`].
    pub fn bounds(&self, r: &GridRect) -> Rect {
        let ([x, y], [w, h]) = self.rect(r);
        Rect::new(x, y, w, h)
    }
}
