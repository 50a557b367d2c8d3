//! Per-floor occupancy grid.
//!
//! One `OccupancyGrid` exists per floor. The floor routine owns it and lends it
//! out by `&mut` to the corridor router and the placement strategies, so every
//! successful placement is visible to the next attempt.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cell value for an unoccupied cell.
pub const CELL_FREE: u32 = 0;

/// Axis-aligned rectangle on the grid, in cells (top-left corner + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl GridRect {
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> usize {
        self.w * self.h
    }

    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.y + self.h
    }

    /// True if the two rectangles share at least one cell.
    pub fn intersects(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// All `(x, y)` cells covered by the rectangle.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.x..self.right()).flat_map(move |x| (self.y..self.bottom()).map(move |y| (x, y)))
    }
}

/// Square occupancy grid. Cells hold [`CELL_FREE`] or the floor-local
/// occupant index (≥ 1) of the room covering them.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    size: usize,
    /// Indexed `cells[x][y]`.
    cells: Vec<Vec<u32>>,
}

impl OccupancyGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![CELL_FREE; size]; size],
        }
    }

    /// Edge length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupant of a cell; out-of-bounds cells read as `None`.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.cells.get(x).and_then(|col| col.get(y)).copied()
    }

    pub fn is_free(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(CELL_FREE)
    }

    pub fn in_bounds(&self, rect: &GridRect) -> bool {
        rect.w > 0 && rect.h > 0 && rect.right() <= self.size && rect.bottom() <= self.size
    }

    /// True if `rect` lies inside the grid and every cell is free.
    pub fn can_place(&self, rect: &GridRect) -> bool {
        self.in_bounds(rect) && rect.cells().all(|(x, y)| self.cells[x][y] == CELL_FREE)
    }

    /// Mark every cell of `rect` as taken by `occupant`.
    ///
    /// Callers check [`can_place`](Self::can_place) first; cells outside the
    /// grid are ignored.
    pub fn occupy(&mut self, rect: &GridRect, occupant: u32) {
        for (x, y) in rect.cells() {
            if x < self.size && y < self.size {
                self.cells[x][y] = occupant;
            }
        }
    }

    /// Place `rect` if it fits; returns whether it was placed.
    pub fn try_occupy(&mut self, rect: &GridRect, occupant: u32) -> bool {
        if self.can_place(rect) {
            self.occupy(rect, occupant);
            true
        } else {
            false
        }
    }

    /// First free cell in row-major order (top row first, left to right).
    pub fn first_free_cell(&self) -> Option<(usize, usize)> {
        (0..self.size)
            .flat_map(|y| (0..self.size).map(move |x| (x, y)))
            .find(|&(x, y)| self.cells[x][y] == CELL_FREE)
    }

    pub fn free_cells(&self) -> usize {
        self.cells
            .iter()
            .map(|col| col.iter().filter(|&&c| c == CELL_FREE).count())
            .sum()
    }

    pub fn is_full(&self) -> bool {
        self.first_free_cell().is_none()
    }
}

impl fmt::Display for OccupancyGrid {
    /// One text row per grid row: `.` for free cells, otherwise the occupant
    /// index in base 36.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let c = match self.cells[x][y] {
                    CELL_FREE => '.',
                    n => std::char::from_digit(n % 36, 36).unwrap_or('#'),
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = OccupancyGrid::new(6);
        assert_eq!(grid.size(), 6);
        assert_eq!(grid.free_cells(), 36);
        assert_eq!(grid.first_free_cell(), Some((0, 0)));
    }

    #[test]
    fn test_occupy_blocks_overlapping_rect() {
        let mut grid = OccupancyGrid::new(6);
        assert!(grid.try_occupy(&GridRect::new(1, 1, 2, 2), 1));
        assert!(!grid.can_place(&GridRect::new(2, 2, 2, 2)));
        assert!(grid.can_place(&GridRect::new(3, 1, 2, 2)));
        assert_eq!(grid.get(2, 2), Some(1));
        assert_eq!(grid.free_cells(), 32);
    }

    #[test]
    fn test_out_of_bounds_rect_rejected() {
        let grid = OccupancyGrid::new(5);
        assert!(!grid.can_place(&GridRect::new(4, 0, 2, 1)));
        assert!(!grid.can_place(&GridRect::new(0, 4, 1, 2)));
        assert!(!grid.can_place(&GridRect::new(0, 0, 0, 1)));
        assert!(grid.can_place(&GridRect::new(3, 3, 2, 2)));
    }

    #[test]
    fn test_first_free_cell_is_row_major() {
        let mut grid = OccupancyGrid::new(3);
        grid.occupy(&GridRect::new(0, 0, 3, 1), 1);
        grid.occupy(&GridRect::new(0, 1, 1, 1), 2);
        assert_eq!(grid.first_free_cell(), Some((1, 1)));
    }

    #[test]
    fn test_full_grid_has_no_free_cell() {
        let mut grid = OccupancyGrid::new(2);
        grid.occupy(&GridRect::new(0, 0, 2, 2), 3);
        assert!(grid.is_full());
        assert_eq!(grid.first_free_cell(), None);
    }

    #[test]
    fn test_rect_intersection() {
        let a = GridRect::new(0, 0, 2, 2);
        assert!(a.intersects(&GridRect::new(1, 1, 2, 2)));
        assert!(!a.intersects(&GridRect::new(2, 0, 2, 2)));
        assert!(!a.intersects(&GridRect::new(0, 2, 2, 2)));
        assert_eq!(a.cells().count(), 4);
    }

    #[test]
    fn test_display_marks_occupants() {
        let mut grid = OccupancyGrid::new(3);
        grid.occupy(&GridRect::new(0, 1, 3, 1), 1);
        assert_eq!(grid.to_string(), "...\n111\n...\n");
    }
}
