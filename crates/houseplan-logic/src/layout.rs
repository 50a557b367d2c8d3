//! Layout generation pipeline.
//!
//! Grid-first multi-story layout:
//!   1. distribute_rooms  -- assign requested rooms to stories
//!   2. plan_floor        -- per story: corridor strip, zones, room placement,
//!                           one corridor door per room
//!   3. main entrance     -- one exterior door for the whole house
//!   4. to_layout         -- scale rooms to meters, mirror doors as
//!                           connections
//!
//! Rooms stay in grid units until step 4. Doors are computed on the rooms'
//! meter rectangles, so a stretched plot does not skew their orientation.
//! Room ids are handed out from a single counter that runs across stories,
//! corridor first on each story.

use rand::Rng;

use crate::config::LayoutConfig;
use crate::constants::room_types;
use crate::grid::{GridRect, OccupancyGrid};
use crate::model::{Connection, Door, Layout, PlacedRoom};
use crate::placement::{place_floor_rooms, PlacementStrategy, RandomPlacement};
use crate::plot::PlotSize;
use crate::request::{HouseRequest, RoomRequest};
use crate::routing;
use crate::scale::CoordinateScaler;
use crate::stories::distribute_rooms;
use crate::zones::Zones;

/// Grid value of the corridor on every floor.
const CORRIDOR_OCCUPANT: u32 = 1;

/// A room on its floor grid, before scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRoom {
    pub id: u32,
    pub room_type: String,
    pub rect: GridRect,
}

/// One story in grid units.
#[derive(Debug, Clone)]
pub struct FloorPlan {
    /// 1-based.
    pub story: u32,
    pub grid: OccupancyGrid,
    pub corridor: GridRoom,
    /// Non-corridor rooms in placement order.
    pub rooms: Vec<GridRoom>,
    /// Corridor doors, positions in meters.
    pub doors: Vec<Door>,
    /// Requests that found no free cell.
    pub dropped: Vec<RoomRequest>,
}

impl FloorPlan {
    /// Corridor followed by the placed rooms.
    pub fn all_rooms(&self) -> impl Iterator<Item = &GridRoom> {
        std::iter::once(&self.corridor).chain(self.rooms.iter())
    }

    pub fn room_count(&self) -> usize {
        1 + self.rooms.len()
    }
}

/// A whole house in grid units.
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    pub plot: PlotSize,
    pub grid_size: usize,
    pub floors: Vec<FloorPlan>,
    /// The single exterior door, position in meters.
    pub main_entrance: Door,
}

impl LayoutPlan {
    pub fn scaler(&self) -> CoordinateScaler {
        CoordinateScaler::new(&self.plot, self.grid_size)
    }

    pub fn dropped(&self) -> impl Iterator<Item = &RoomRequest> {
        self.floors.iter().flat_map(|f| f.dropped.iter())
    }

    /// Scale rooms to meters and build the output model.
    pub fn to_layout(&self) -> Layout {
        let scaler = self.scaler();

        let rooms: Vec<PlacedRoom> = self
            .floors
            .iter()
            .flat_map(|floor| {
                floor.all_rooms().map(move |room| {
                    let (position, size) = scaler.rect(&room.rect);
                    PlacedRoom {
                        id: room.id,
                        room_type: room.room_type.clone(),
                        name: display_name(&room.room_type),
                        position,
                        size,
                        story: floor.story,
                    }
                })
            })
            .collect();

        let doors: Vec<Door> = self
            .floors
            .iter()
            .flat_map(|floor| floor.doors.iter())
            .chain(std::iter::once(&self.main_entrance))
            .cloned()
            .collect();

        let connections = doors.iter().map(Connection::from).collect();

        Layout {
            rooms,
            connections,
            doors,
            stories: self.floors.len() as u32,
            plot_size: self.plot,
        }
    }
}

/// Room type as shown to people: first letter upper case, rest lower case.
pub fn display_name(room_type: &str) -> String {
    let lower = room_type.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lay out one story.
///
/// The corridor takes id `first_id`; placed rooms follow in placement order.
/// `scaler` turns the placed rooms into meters for door placement.
pub fn plan_floor<S: PlacementStrategy + ?Sized>(
    story: u32,
    requests: &[RoomRequest],
    grid_size: usize,
    scaler: &CoordinateScaler,
    first_id: u32,
    strategy: &mut S,
    config: &LayoutConfig,
) -> FloorPlan {
    let mut grid = OccupancyGrid::new(grid_size);
    let corridor_rect = routing::place_corridor(&mut grid, CORRIDOR_OCCUPANT);
    let corridor = GridRoom {
        id: first_id,
        room_type: room_types::CORRIDOR.to_string(),
        rect: corridor_rect,
    };

    let zones = Zones::partition(grid_size);
    let placement = place_floor_rooms(
        &mut grid,
        &zones,
        requests,
        strategy,
        config,
        CORRIDOR_OCCUPANT + 1,
    );

    let rooms: Vec<GridRoom> = placement
        .placed
        .into_iter()
        .enumerate()
        .map(|(i, p)| GridRoom {
            id: first_id + 1 + i as u32,
            room_type: p.request.room_type,
            rect: p.rect,
        })
        .collect();

    let corridor_bounds = scaler.bounds(&corridor.rect);
    let doors = rooms
        .iter()
        .map(|room| {
            routing::corridor_door(
                corridor.id,
                &corridor_bounds,
                room.id,
                &scaler.bounds(&room.rect),
                config.door_width,
            )
        })
        .collect();

    log::debug!(
        "Story {}: {} rooms placed, {} dropped, {} cells free",
        story,
        rooms.len(),
        placement.dropped.len(),
        grid.free_cells()
    );

    FloorPlan {
        story,
        grid,
        corridor,
        rooms,
        doors,
        dropped: placement.dropped,
    }
}

/// Exterior door for the house: on the first entrance-like room (lowest story
/// first), otherwise on the ground-floor corridor.
fn main_entrance_for(
    floors: &[FloorPlan],
    grid_size: usize,
    scaler: &CoordinateScaler,
    config: &LayoutConfig,
) -> Door {
    let (id, rect) = floors
        .iter()
        .flat_map(|f| f.rooms.iter())
        .find(|room| room_types::is_entrance(&room.room_type))
        .or_else(|| floors.first().map(|f| &f.corridor))
        .map(|room| (room.id, room.rect))
        .unwrap_or((0, routing::corridor_rect(grid_size)));
    routing::main_entrance_door(id, &scaler.bounds(&rect), config.main_door_width())
}

/// Run the grid-space pipeline with the given placement strategy.
pub fn plan_layout<S: PlacementStrategy + ?Sized>(
    request: &HouseRequest,
    config: &LayoutConfig,
    strategy: &mut S,
) -> LayoutPlan {
    let plot = request.plot_size.unwrap_or_else(|| {
        PlotSize::from_dimensions(config.default_plot_width, config.default_plot_length)
    });
    let grid_size = config.grid_size_for(plot.width_meters, plot.length_meters);
    let scaler = CoordinateScaler::new(&plot, grid_size);

    let assignment = distribute_rooms(&request.rooms, request.stories);

    let mut floors = Vec::with_capacity(assignment.len());
    let mut next_id = 0u32;
    for (i, requests) in assignment.iter().enumerate() {
        let floor = plan_floor(
            i as u32 + 1,
            requests,
            grid_size,
            &scaler,
            next_id,
            strategy,
            config,
        );
        next_id += floor.room_count() as u32;
        floors.push(floor);
    }

    let main_entrance = main_entrance_for(&floors, grid_size, &scaler, config);

    LayoutPlan {
        plot,
        grid_size,
        floors,
        main_entrance,
    }
}

/// Generate a layout with an explicit placement strategy.
pub fn generate_layout_with<S: PlacementStrategy + ?Sized>(
    request: &HouseRequest,
    config: &LayoutConfig,
    strategy: &mut S,
) -> Layout {
    let plan = plan_layout(request, config, strategy);
    let layout = plan.to_layout();
    log::info!(
        "Generated layout: {} rooms on {} stories, {} doors, {} rooms dropped (grid {}x{}, plot {:.1}x{:.1} m)",
        layout.rooms.len(),
        layout.stories,
        layout.doors.len(),
        plan.dropped().count(),
        plan.grid_size,
        plan.grid_size,
        plan.plot.width_meters,
        plan.plot.length_meters,
    );
    layout
}

/// Generate a layout with randomized placement driven by `rng`.
pub fn generate_layout<R: Rng>(request: &HouseRequest, config: &LayoutConfig, rng: &mut R) -> Layout {
    let mut strategy = RandomPlacement::new(rng, config);
    generate_layout_with(request, config, &mut strategy)
}
