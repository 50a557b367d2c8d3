//! Deterministic first-fit placement.

use super::{neighbor_candidates, Footprint, PlacementStrategy};
use crate::grid::{GridRect, OccupancyGrid};

/// Scans shelves top to bottom, left to right, and takes the first free spot.
///
/// Same input, same layout: useful for tests and for reproducible output
/// without threading a seed around.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShelfPlacement;

/// First free position for `footprint` inside `area`, row-major.
fn first_fit(grid: &OccupancyGrid, area: &GridRect, footprint: Footprint) -> Option<GridRect> {
    if footprint.w > area.w || footprint.h > area.h {
        return None;
    }
    for y in area.y..=area.bottom() - footprint.h {
        for x in area.x..=area.right() - footprint.w {
            let rect = footprint.at(x, y);
            if grid.can_place(&rect) {
                return Some(rect);
            }
        }
    }
    None
}

impl PlacementStrategy for ShelfPlacement {
    fn place_in_zone(
        &mut self,
        grid: &OccupancyGrid,
        footprint: Footprint,
        zone: &GridRect,
    ) -> Option<GridRect> {
        first_fit(grid, zone, footprint)
    }

    fn place_anywhere(&mut self, grid: &OccupancyGrid, footprint: Footprint) -> Option<GridRect> {
        let whole = GridRect::new(0, 0, grid.size(), grid.size());
        first_fit(grid, &whole, footprint).or_else(|| {
            let shrunk = footprint.shrunk();
            (shrunk != footprint)
                .then(|| first_fit(grid, &whole, shrunk))
                .flatten()
        })
    }

    fn place_near(
        &mut self,
        grid: &OccupancyGrid,
        footprint: Footprint,
        anchor: &GridRect,
    ) -> Option<GridRect> {
        neighbor_candidates(anchor, footprint)
            .into_iter()
            .find(|r| grid.can_place(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fit_skips_occupied_cells() {
        let mut grid = OccupancyGrid::new(6);
        grid.occupy(&GridRect::new(0, 0, 3, 2), 1);
        let rect = ShelfPlacement.place_anywhere(&grid, Footprint::new(2, 2));
        assert_eq!(rect, Some(GridRect::new(3, 0, 2, 2)));
    }

    #[test]
    fn test_zone_too_small_returns_none() {
        let grid = OccupancyGrid::new(6);
        let zone = GridRect::new(0, 0, 1, 1);
        assert_eq!(
            ShelfPlacement.place_in_zone(&grid, Footprint::new(2, 1), &zone),
            None
        );
    }

    #[test]
    fn test_anywhere_falls_back_to_shrunk() {
        let mut grid = OccupancyGrid::new(4);
        grid.occupy(&GridRect::new(0, 0, 4, 1), 1);
        grid.occupy(&GridRect::new(0, 1, 1, 3), 1);
        // free block is 3x3 at (1, 1); 4x3 cannot fit, 3x2 can
        let rect = ShelfPlacement.place_anywhere(&grid, Footprint::new(4, 3));
        assert_eq!(rect, Some(GridRect::new(1, 1, 3, 2)));
    }

    #[test]
    fn test_near_returns_none_when_boxed_in() {
        let mut grid = OccupancyGrid::new(4);
        grid.occupy(&GridRect::new(0, 0, 4, 4), 1);
        let anchor = GridRect::new(1, 1, 2, 2);
        assert_eq!(
            ShelfPlacement.place_near(&grid, Footprint::new(1, 1), &anchor),
            None
        );
    }
}
