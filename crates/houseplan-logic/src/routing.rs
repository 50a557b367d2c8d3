//! Corridor and door routing.
//!
//! Every floor gets a one-cell corridor strip across its middle, placed before
//! any other room. Each room then gets one door to that corridor, on the wall
//! they share if there is one. The corridor strip lives on the grid; doors are
//! computed on the rooms' meter rectangles, so the wall tolerance and the
//! orientation of virtual doors are judged in meters.

use crate::constants::dimensions::WALL_TOLERANCE;
use crate::grid::{GridRect, OccupancyGrid};
use crate::model::{ConnectionTarget, Door, DoorKind, DoorOrientation};

/// Axis-aligned rectangle in continuous units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> [f32; 2] {
        [self.x + self.w / 2.0, self.y + self.h / 2.0]
    }
}

/// Corridor strip for a grid: one cell high, `size - 2` wide, starting at
/// `x = 1` on the middle row.
pub fn corridor_rect(grid_size: usize) -> GridRect {
    let w = grid_size.saturating_sub(2).max(1);
    let mut y = grid_size / 2;
    if y + 1 > grid_size {
        y = grid_size.saturating_sub(2);
    }
    GridRect::new(1, y, w, 1)
}

/// Mark the corridor strip on an empty grid.
pub fn place_corridor(grid: &mut OccupancyGrid, occupant: u32) -> GridRect {
    let rect = corridor_rect(grid.size());
    if !grid.try_occupy(&rect, occupant) {
        // The grid is fresh, so this only happens for degenerate sizes
        log::warn!("Corridor {:?} does not fit a {} grid", rect, grid.size());
        grid.occupy(&rect, occupant);
    }
    rect
}

fn near(a: f32, b: f32) -> bool {
    (a - b).abs() < WALL_TOLERANCE
}

/// Door position and orientation on the wall `a` and `b` share, if any.
///
/// A shared vertical wall gets a `Horizontal` door at the middle of the
/// shared stretch; a shared horizontal wall gets a `Vertical` one. Extents
/// that only meet at a corner still count.
pub fn shared_wall(a: &Rect, b: &Rect) -> Option<([f32; 2], DoorOrientation)> {
    let spans_y = a.y <= b.bottom() && a.bottom() >= b.y;
    if (near(a.right(), b.x) || near(b.right(), a.x)) && spans_y {
        let mid = (a.y.max(b.y) + a.bottom().min(b.bottom())) / 2.0;
        let wall = if near(a.right(), b.x) { a.right() } else { a.x };
        return Some(([wall, mid], DoorOrientation::Horizontal));
    }

    let spans_x = a.x <= b.right() && a.right() >= b.x;
    if (near(a.bottom(), b.y) || near(b.bottom(), a.y)) && spans_x {
        let mid = (a.x.max(b.x) + a.right().min(b.right())) / 2.0;
        let wall = if near(a.bottom(), b.y) { a.bottom() } else { a.y };
        return Some(([mid, wall], DoorOrientation::Vertical));
    }

    None
}

/// Where a door between `a` and `b` goes, and which way it faces.
///
/// Rooms that share a wall get a door on it (see [`shared_wall`]). Rooms that
/// do not touch get a virtual door halfway between their centers, facing
/// across the axis with the larger center distance.
pub fn find_door_position(a: &Rect, b: &Rect) -> ([f32; 2], DoorOrientation) {
    if let Some(door) = shared_wall(a, b) {
        return door;
    }

    let [ax, ay] = a.center();
    let [bx, by] = b.center();
    let position = [(ax + bx) / 2.0, (ay + by) / 2.0];
    if (ax - bx).abs() > (ay - by).abs() {
        (position, DoorOrientation::Vertical)
    } else {
        (position, DoorOrientation::Horizontal)
    }
}

/// Standard door from the corridor into a room.
pub fn corridor_door(
    corridor_id: u32,
    corridor: &Rect,
    room_id: u32,
    room: &Rect,
    width: f32,
) -> Door {
    let (position, orientation) = find_door_position(corridor, room);
    Door {
        position,
        orientation,
        width,
        connects: (corridor_id, ConnectionTarget::Room(room_id)),
        kind: DoorKind::Standard,
    }
}

/// Exterior door on the front wall of `room`, centered.
pub fn main_entrance_door(room_id: u32, room: &Rect, width: f32) -> Door {
    Door {
        position: [room.x + room.w / 2.0, room.y],
        orientation: DoorOrientation::Vertical,
        width,
        connects: (room_id, ConnectionTarget::Exterior),
        kind: DoorKind::MainEntrance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corridor_strip_geometry() {
        assert_eq!(corridor_rect(5), GridRect::new(1, 2, 3, 1));
        assert_eq!(corridor_rect(10), GridRect::new(1, 5, 8, 1));
        assert_eq!(corridor_rect(11), GridRect::new(1, 5, 9, 1));
    }

    #[test]
    fn test_place_corridor_marks_cells() {
        let mut grid = OccupancyGrid::new(6);
        let rect = place_corridor(&mut grid, 1);
        assert_eq!(rect, GridRect::new(1, 3, 4, 1));
        assert_eq!(grid.free_cells(), 36 - 4);
        assert_eq!(grid.get(1, 3), Some(1));
        assert!(grid.is_free(0, 3));
        assert!(grid.is_free(5, 3));
    }

    #[test]
    fn test_room_above_corridor_gets_vertical_door() {
        let corridor = Rect::new(1.0, 2.0, 3.0, 1.0);
        let room = Rect::new(2.0, 0.0, 2.0, 2.0);
        let (pos, orientation) = find_door_position(&corridor, &room);
        assert_eq!(orientation, DoorOrientation::Vertical);
        assert_eq!(pos, [3.0, 2.0]);
    }

    #[test]
    fn test_room_below_corridor_gets_vertical_door() {
        let corridor = Rect::new(1.0, 2.0, 3.0, 1.0);
        let room = Rect::new(0.0, 3.0, 2.0, 2.0);
        let (pos, orientation) = find_door_position(&corridor, &room);
        assert_eq!(orientation, DoorOrientation::Vertical);
        // shared stretch is x in [1, 2]
        assert_eq!(pos, [1.5, 3.0]);
    }

    #[test]
    fn test_room_beside_corridor_gets_horizontal_door() {
        let corridor = Rect::new(1.0, 2.0, 3.0, 1.0);
        let room = Rect::new(4.0, 1.0, 1.0, 3.0);
        let (pos, orientation) = find_door_position(&corridor, &room);
        assert_eq!(orientation, DoorOrientation::Horizontal);
        assert_eq!(pos, [4.0, 2.5]);

        let left = Rect::new(0.0, 2.0, 1.0, 2.0);
        let (pos, orientation) = find_door_position(&corridor, &left);
        assert_eq!(orientation, DoorOrientation::Horizontal);
        assert_eq!(pos, [1.0, 2.5]);
    }

    #[test]
    fn test_detached_room_gets_virtual_door() {
        let corridor = Rect::new(1.0, 5.0, 8.0, 1.0);
        // centers (5, 5.5) and (1, 1): dx 4 < dy 4.5
        let room = Rect::new(0.0, 0.0, 2.0, 2.0);
        let (pos, orientation) = find_door_position(&corridor, &room);
        assert_eq!(pos, [3.0, 3.25]);
        assert_eq!(orientation, DoorOrientation::Horizontal);

        // centers (5, 5.5) and (9.5, 8): dx 4.5 > dy 2.5
        let far = Rect::new(9.0, 7.0, 1.0, 2.0);
        let (_, orientation) = find_door_position(&corridor, &far);
        assert_eq!(orientation, DoorOrientation::Vertical);
    }

    #[test]
    fn test_shared_wall_none_for_detached_rooms() {
        let corridor = Rect::new(1.0, 5.0, 8.0, 1.0);
        assert_eq!(shared_wall(&corridor, &Rect::new(0.0, 0.0, 2.0, 2.0)), None);
        // touching within tolerance counts
        let above = Rect::new(2.0, 3.05, 2.0, 2.0);
        assert!(shared_wall(&corridor, &above).is_some());
    }

    #[test]
    fn test_virtual_door_orientation_depends_on_units() {
        // grid: corridor (1, 4, 6, 1), room (0, 2, 2, 1); centers 3 apart in x, 2 in y
        let corridor = Rect::new(1.0, 4.0, 6.0, 1.0);
        let room = Rect::new(0.0, 2.0, 2.0, 1.0);
        assert_eq!(find_door_position(&corridor, &room).1, DoorOrientation::Vertical);

        // same rooms at 3 m x 6 m per cell: 9 m apart in x, 12 m in y
        let corridor = Rect::new(3.0, 24.0, 18.0, 6.0);
        let room = Rect::new(0.0, 12.0, 6.0, 6.0);
        let (pos, orientation) = find_door_position(&corridor, &room);
        assert_eq!(orientation, DoorOrientation::Horizontal);
        assert_eq!(pos, [7.5, 21.0]);
    }

    #[test]
    fn test_corridor_door_connects_corridor_to_room() {
        let corridor = Rect::new(1.0, 2.0, 3.0, 1.0);
        let room = Rect::new(1.0, 0.0, 2.0, 2.0);
        let door = corridor_door(0, &corridor, 4, &room, 0.9);
        assert_eq!(door.connects, (0, ConnectionTarget::Room(4)));
        assert_eq!(door.kind, DoorKind::Standard);
        assert_eq!(door.width, 0.9);
    }

    #[test]
    fn test_main_entrance_on_front_wall() {
        let lobby = Rect::new(2.0, 0.0, 1.0, 2.0);
        let door = main_entrance_door(3, &lobby, 1.08);
        assert_eq!(door.position, [2.5, 0.0]);
        assert_eq!(door.orientation, DoorOrientation::Vertical);
        assert_eq!(door.connects, (3, ConnectionTarget::Exterior));
        assert_eq!(door.kind, DoorKind::MainEntrance);
    }
}
