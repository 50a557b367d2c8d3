//! Randomized trial placement with fixed retry budgets.

use rand::Rng;

use super::{neighbor_candidates, Footprint, PlacementStrategy};
use crate::config::{LayoutConfig, RetryBudgets};
use crate::grid::{GridRect, OccupancyGrid};

/// Tries random top-left corners until one is free or the budget runs out.
///
/// The random source is injected, so a seeded generator gives reproducible
/// layouts.
pub struct RandomPlacement<'r, R: Rng> {
    rng: &'r mut R,
    budgets: RetryBudgets,
    near_radius: i32,
}

impl<'r, R: Rng> RandomPlacement<'r, R> {
    pub fn new(rng: &'r mut R, config: &LayoutConfig) -> Self {
        Self {
            rng,
            budgets: config.retries,
            near_radius: config.near_radius,
        }
    }

    /// Random coordinate so that `[start, start + len)` stays inside
    /// `[lo, lo + extent)`; pinned to `lo` when the span does not fit.
    /// The upper bound `lo + extent - len` is inclusive, so a room can end
    /// flush with the last row or column.
    fn coord(&mut self, lo: usize, extent: usize, len: usize) -> usize {
        if len >= extent {
            lo
        } else {
            self.rng.gen_range(lo..=lo + extent - len)
        }
    }

    fn random_in(
        &mut self,
        grid: &OccupancyGrid,
        area: &GridRect,
        footprint: Footprint,
        attempts: u32,
    ) -> Option<GridRect> {
        for _ in 0..attempts {
            let x = self.coord(area.x, area.w, footprint.w);
            let y = self.coord(area.y, area.h, footprint.h);
            let rect = footprint.at(x, y);
            if grid.can_place(&rect) {
                return Some(rect);
            }
        }
        None
    }
}

impl<R: Rng> PlacementStrategy for RandomPlacement<'_, R> {
    fn place_in_zone(
        &mut self,
        grid: &OccupancyGrid,
        footprint: Footprint,
        zone: &GridRect,
    ) -> Option<GridRect> {
        self.random_in(grid, zone, footprint, self.budgets.zone)
    }

    /// Top-left corners are drawn from `0..=size - w` by `0..=size - h`, so
    /// the last row and column are reachable.
    fn place_anywhere(&mut self, grid: &OccupancyGrid, footprint: Footprint) -> Option<GridRect> {
        let whole = GridRect::new(0, 0, grid.size(), grid.size());
        if let Some(rect) = self.random_in(grid, &whole, footprint, self.budgets.anywhere) {
            return Some(rect);
        }
        let shrunk = footprint.shrunk();
        if shrunk == footprint {
            return None;
        }
        self.random_in(grid, &whole, shrunk, self.budgets.shrunk)
    }

    fn place_near(
        &mut self,
        grid: &OccupancyGrid,
        footprint: Footprint,
        anchor: &GridRect,
    ) -> Option<GridRect> {
        if let Some(rect) = neighbor_candidates(anchor, footprint)
            .into_iter()
            .find(|r| grid.can_place(r))
        {
            return Some(rect);
        }

        let r = self.near_radius.max(0);
        let max_x = grid.size().saturating_sub(footprint.w) as i64;
        let max_y = grid.size().saturating_sub(footprint.h) as i64;
        for _ in 0..self.budgets.near {
            let x = (anchor.x as i64 + self.rng.gen_range(-r..=r) as i64).clamp(0, max_x);
            let y = (anchor.y as i64 + self.rng.gen_range(-r..=r) as i64).clamp(0, max_y);
            let rect = footprint.at(x as usize, y as usize);
            if grid.can_place(&rect) {
                return Some(rect);
            }
        }
        None
    }
}
