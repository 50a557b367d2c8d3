//! Room placement engine.
//!
//! Places the rooms of one floor onto its occupancy grid. Rooms are processed
//! in a fixed category order (public → kitchen → bedroom → bathroom → garage →
//! other) and each room walks the same fallback chain:
//!
//!   1. zone attempt    -- inside the room category's quadrant
//!   2. anywhere        -- full footprint, then shrunk by one cell
//!   3. last resort     -- 1×1 room in the first free cell (row-major)
//!   4. dropped         -- the grid is full
//!
//! Bathrooms paired with an already-placed bedroom try to sit next to it first.
//!
//! How candidate positions are chosen is delegated to a [`PlacementStrategy`]:
//! [`RandomPlacement`] reproduces the randomized retry search, and
//! [`ShelfPlacement`] is a deterministic first-fit scan for tests and
//! reproducible output. Strategies only propose rectangles; this module owns
//! the grid and commits each placement.

mod random;
mod shelf;

pub use random::RandomPlacement;
pub use shelf::ShelfPlacement;

use crate::catalog;
use crate::config::LayoutConfig;
use crate::constants::room_types;
use crate::grid::{GridRect, OccupancyGrid};
use crate::request::RoomRequest;
use crate::zones::{ZoneKind, Zones};

/// Desired room size in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub w: usize,
    pub h: usize,
}

impl Footprint {
    pub fn new(w: usize, h: usize) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> usize {
        self.w * self.h
    }

    /// Both dimensions reduced by one cell, never below 1.
    pub fn shrunk(&self) -> Self {
        Self {
            w: self.w.saturating_sub(1).max(1),
            h: self.h.saturating_sub(1).max(1),
        }
    }

    /// Clamp to fit inside `rect`.
    pub fn clamped_to(&self, rect: &GridRect) -> Self {
        Self {
            w: self.w.min(rect.w),
            h: self.h.min(rect.h),
        }
    }

    pub fn at(&self, x: usize, y: usize) -> GridRect {
        GridRect::new(x, y, self.w, self.h)
    }
}

/// Grid footprint for a room type.
///
/// Catalog dimensions are divided by the cell size and rounded up, then the
/// larger side grows one cell at a time until the footprint covers
/// `min_area / cell_area` cells. Unknown room types get 2×2. Sides never
/// exceed `config.max_grid_size`, and a non-positive cell size or cell area
/// falls back to single cells with no growth.
pub fn footprint_for(room_type: &str, config: &LayoutConfig) -> Footprint {
    let Some(spec) = catalog::find(room_type) else {
        return Footprint::new(2, 2);
    };

    let max_side = config.max_grid_size.max(1);
    let cells = |meters: f32| {
        let c = (meters / config.meters_per_cell).ceil();
        if c.is_finite() && c >= 1.0 {
            (c as usize).min(max_side)
        } else {
            1
        }
    };
    let mut w = cells(spec.width);
    let mut h = cells(spec.length);

    let min_cells = spec.min_area / config.cell_area;
    let min_cells = if min_cells.is_finite() && min_cells > 0.0 {
        min_cells.min((max_side * max_side) as f32)
    } else {
        0.0
    };
    while ((w * h) as f32) < min_cells {
        if w >= h {
            w += 1;
        } else {
            h += 1;
        }
    }
    Footprint::new(w, h)
}

/// Chooses candidate positions for a footprint. Implementations never mutate
/// the grid; a returned rectangle must satisfy [`OccupancyGrid::can_place`].
pub trait PlacementStrategy {
    /// Find a free spot for `footprint` inside `zone`. The footprint already
    /// fits the zone's extent.
    fn place_in_zone(
        &mut self,
        grid: &OccupancyGrid,
        footprint: Footprint,
        zone: &GridRect,
    ) -> Option<GridRect>;

    /// Find a free spot anywhere on the grid, shrinking the footprint if the
    /// strategy supports it. The 1×1 last resort is not the strategy's job.
    fn place_anywhere(&mut self, grid: &OccupancyGrid, footprint: Footprint) -> Option<GridRect>;

    /// Find a free spot next to `anchor`.
    fn place_near(
        &mut self,
        grid: &OccupancyGrid,
        footprint: Footprint,
        anchor: &GridRect,
    ) -> Option<GridRect>;
}

/// The four positions directly beside `anchor`, offset by the footprint size:
/// right, left, below, above.
pub(crate) fn neighbor_candidates(anchor: &GridRect, footprint: Footprint) -> Vec<GridRect> {
    let (ax, ay) = (anchor.x as i64, anchor.y as i64);
    let (w, h) = (footprint.w as i64, footprint.h as i64);
    [(1, 0), (-1, 0), (0, 1), (0, -1)]
        .iter()
        .filter_map(|&(dx, dy)| {
            let x = ax + dx * w;
            let y = ay + dy * h;
            (x >= 0 && y >= 0).then(|| footprint.at(x as usize, y as usize))
        })
        .collect()
}

/// Placement order bucket of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlacementGroup {
    Public,
    Kitchen,
    Bedroom,
    Bathroom,
    Garage,
    Other,
}

impl PlacementGroup {
    pub const ORDER: [PlacementGroup; 6] = [
        PlacementGroup::Public,
        PlacementGroup::Kitchen,
        PlacementGroup::Bedroom,
        PlacementGroup::Bathroom,
        PlacementGroup::Garage,
        PlacementGroup::Other,
    ];

    pub fn of(room_type: &str) -> Self {
        if room_types::is_public(room_type) {
            PlacementGroup::Public
        } else if room_types::is_kitchen(room_type) {
            PlacementGroup::Kitchen
        } else if room_types::is_bedroom(room_type) {
            PlacementGroup::Bedroom
        } else if room_types::is_bathroom(room_type) {
            PlacementGroup::Bathroom
        } else if room_types::is_garage(room_type) {
            PlacementGroup::Garage
        } else {
            PlacementGroup::Other
        }
    }
}

/// Bedroom a bathroom should sit next to.
///
/// Pairs by position in the request: the i-th bathroom goes with the i-th
/// bedroom of the floor, if that bedroom was placed. This assumes request
/// order says something about which rooms belong together, which is all the
/// input gives us.
pub fn paired_bedroom_for(bathroom_index: usize, bedrooms: &[Option<GridRect>]) -> Option<GridRect> {
    bedrooms.get(bathroom_index).copied().flatten()
}

/// A room committed to the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomPlacement {
    pub request: RoomRequest,
    pub rect: GridRect,
    /// Value written into the occupancy grid for this room.
    pub occupant: u32,
}

/// Result of placing one floor's rooms.
#[derive(Debug, Clone, Default)]
pub struct FloorPlacement {
    /// Placed rooms in processing order.
    pub placed: Vec<RoomPlacement>,
    /// Rooms that found no free cell.
    pub dropped: Vec<RoomRequest>,
}

struct Placer<'a, S: PlacementStrategy + ?Sized> {
    grid: &'a mut OccupancyGrid,
    zones: &'a Zones,
    strategy: &'a mut S,
    config: &'a LayoutConfig,
    next_occupant: u32,
    result: FloorPlacement,
}

impl<'a, S: PlacementStrategy + ?Sized> Placer<'a, S> {
    fn commit(&mut self, request: &RoomRequest, rect: Option<GridRect>) -> Option<GridRect> {
        let Some(rect) = rect else {
            log::warn!(
                "No free cell left for {} (grid {}x{}), dropping it",
                request.room_type,
                self.grid.size(),
                self.grid.size()
            );
            self.result.dropped.push(request.clone());
            return None;
        };
        debug_assert!(self.grid.can_place(&rect));
        let occupant = self.next_occupant;
        self.grid.occupy(&rect, occupant);
        self.next_occupant += 1;
        self.result.placed.push(RoomPlacement {
            request: request.clone(),
            rect,
            occupant,
        });
        Some(rect)
    }

    /// Zone attempt only; `None` when the zone has no room for the footprint.
    fn try_zone(&mut self, footprint: Footprint, kind: ZoneKind) -> Option<GridRect> {
        let zone = self.zones.get(kind).rect;
        let clamped = footprint.clamped_to(&zone);
        if clamped.w == 0 || clamped.h == 0 {
            return None;
        }
        self.strategy
            .place_in_zone(self.grid, clamped, &zone)
            .filter(|r| self.grid.can_place(r))
    }

    /// Anywhere attempt followed by the 1×1 last resort.
    fn try_anywhere(&mut self, footprint: Footprint, room_type: &str) -> Option<GridRect> {
        if let Some(rect) = self
            .strategy
            .place_anywhere(self.grid, footprint)
            .filter(|r| self.grid.can_place(r))
        {
            return Some(rect);
        }
        let (x, y) = self.grid.first_free_cell()?;
        log::debug!("Squeezing {} into a single cell at ({}, {})", room_type, x, y);
        Some(GridRect::new(x, y, 1, 1))
    }

    fn place_in(&mut self, request: &RoomRequest, kind: ZoneKind) -> Option<GridRect> {
        let footprint = footprint_for(&request.room_type, self.config);
        let rect = match self.try_zone(footprint, kind) {
            Some(rect) => Some(rect),
            None => {
                log::debug!(
                    "{} did not fit the {:?} zone, trying anywhere",
                    request.room_type,
                    kind
                );
                self.try_anywhere(footprint, &request.room_type)
            }
        };
        self.commit(request, rect)
    }

    fn place_near(&mut self, request: &RoomRequest, anchor: &GridRect) -> Option<GridRect> {
        let footprint = footprint_for(&request.room_type, self.config);
        let rect = match self
            .strategy
            .place_near(self.grid, footprint, anchor)
            .filter(|r| self.grid.can_place(r))
        {
            Some(rect) => Some(rect),
            None => self.try_anywhere(footprint, &request.room_type),
        };
        self.commit(request, rect)
    }

    fn place_uncategorized(&mut self, request: &RoomRequest) -> Option<GridRect> {
        let footprint = footprint_for(&request.room_type, self.config);
        let mut rect = None;
        for kind in ZoneKind::ALL {
            rect = self.try_zone(footprint, kind);
            if rect.is_some() {
                break;
            }
        }
        if rect.is_none() {
            rect = self.try_anywhere(footprint, &request.room_type);
        }
        self.commit(request, rect)
    }
}

/// Place one floor's rooms on `grid`.
///
/// `first_occupant` is the grid value for the first placed room; later rooms
/// count up from it. The grid must already hold the corridor.
pub fn place_floor_rooms<S: PlacementStrategy + ?Sized>(
    grid: &mut OccupancyGrid,
    zones: &Zones,
    rooms: &[RoomRequest],
    strategy: &mut S,
    config: &LayoutConfig,
    first_occupant: u32,
) -> FloorPlacement {
    let group = |g: PlacementGroup| -> Vec<&RoomRequest> {
        rooms
            .iter()
            .filter(|r| PlacementGroup::of(&r.room_type) == g)
            .collect()
    };

    let mut placer = Placer {
        grid,
        zones,
        strategy,
        config,
        next_occupant: first_occupant,
        result: FloorPlacement::default(),
    };

    let mut bedrooms: Vec<Option<GridRect>> = Vec::new();

    for g in PlacementGroup::ORDER {
        let members = group(g);
        match g {
            PlacementGroup::Public => {
                // First half in the public zone, the rest overflow
                let split = members.len() / 2;
                for (i, room) in members.into_iter().enumerate() {
                    let kind = if i < split {
                        ZoneKind::Public
                    } else {
                        ZoneKind::Other
                    };
                    placer.place_in(room, kind);
                }
            }
            PlacementGroup::Kitchen | PlacementGroup::Garage => {
                for room in members {
                    placer.place_in(room, ZoneKind::Service);
                }
            }
            PlacementGroup::Bedroom => {
                for room in members {
                    let rect = placer.place_in(room, ZoneKind::Private);
                    bedrooms.push(rect);
                }
            }
            PlacementGroup::Bathroom => {
                for (i, room) in members.into_iter().enumerate() {
                    match paired_bedroom_for(i, &bedrooms) {
                        Some(anchor) => placer.place_near(room, &anchor),
                        None => placer.place_in(room, ZoneKind::Private),
                    };
                }
            }
            PlacementGroup::Other => {
                for room in members {
                    placer.place_uncategorized(room);
                }
            }
        }
    }

    placer.result
}
