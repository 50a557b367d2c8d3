//! Room type names and category predicates.
//!
//! Room types travel through the engine as plain strings (they come straight
//! from the request), so every predicate here matches case-insensitively.

pub mod room_types {
    // Public / living
    pub const LIVING_ROOM: &str = "living room";
    pub const TV_LOUNGE: &str = "tv lounge";
    pub const DINING_ROOM: &str = "dining room";
    pub const LOBBY: &str = "lobby";
    pub const ENTRANCE: &str = "entrance";
    pub const MAIN_ENTRANCE: &str = "main entrance";
    // Service
    pub const KITCHEN: &str = "kitchen";
    pub const GARAGE: &str = "garage";
    pub const CAR_PARKING: &str = "car parking";
    // Private
    pub const BEDROOM: &str = "bedroom";
    pub const BATHROOM: &str = "bathroom";
    pub const WASHROOM: &str = "washroom";
    // Circulation
    pub const HALLWAY: &str = "hallway";
    pub const CORRIDOR: &str = "corridor";

    fn is_one_of(rt: &str, names: &[&str]) -> bool {
        let rt = rt.trim();
        names.iter().any(|n| rt.eq_ignore_ascii_case(n))
    }

    /// Rooms that always live on the ground floor.
    pub fn is_ground_floor(rt: &str) -> bool {
        is_one_of(
            rt,
            &[
                LIVING_ROOM,
                TV_LOUNGE,
                KITCHEN,
                DINING_ROOM,
                LOBBY,
                ENTRANCE,
                GARAGE,
                CAR_PARKING,
            ],
        )
    }
    /// Returns true for living areas placed in the public zone
    pub fn is_public(rt: &str) -> bool {
        is_one_of(rt, &[LIVING_ROOM, TV_LOUNGE, DINING_ROOM, LOBBY, ENTRANCE])
    }
    pub fn is_kitchen(rt: &str) -> bool {
        is_one_of(rt, &[KITCHEN])
    }
    pub fn is_garage(rt: &str) -> bool {
        is_one_of(rt, &[GARAGE, CAR_PARKING])
    }
    pub fn is_bedroom(rt: &str) -> bool {
        is_one_of(rt, &[BEDROOM])
    }
    /// Returns true for bathrooms and washrooms
    pub fn is_bathroom(rt: &str) -> bool {
        is_one_of(rt, &[BATHROOM, WASHROOM])
    }
    /// Returns true if a room of this type can host the main entrance door
    pub fn is_entrance(rt: &str) -> bool {
        is_one_of(rt, &[ENTRANCE, LOBBY, MAIN_ENTRANCE])
    }
    pub fn is_corridor(rt: &str) -> bool {
        is_one_of(rt, &[CORRIDOR])
    }
}

/// Physical constants shared by the catalog, router and scaler.
pub mod dimensions {
    /// Meters covered by one grid cell along each axis.
    pub const METERS_PER_CELL: f32 = 2.0;
    /// Approximate floor area of one grid cell, used for min-area checks.
    pub const CELL_AREA_M2: f32 = 4.0;
    /// Standard interior door width in meters.
    pub const DOOR_WIDTH: f32 = 0.9;
    /// Main entrance doors are this much wider than a standard door.
    pub const MAIN_DOOR_FACTOR: f32 = 1.2;
    /// Edge distance below which two walls count as shared.
    pub const WALL_TOLERANCE: f32 = 0.1;
    /// Square meters per Marla.
    pub const MARLA_M2: f32 = 25.2929;
    /// Marla per Kanal.
    pub const MARLA_PER_KANAL: f32 = 20.0;
    /// Default plot edge in meters when the request has no plot size.
    pub const DEFAULT_PLOT_EDGE: f32 = 15.0;
    /// Upper bound on the number of stories a request may ask for.
    pub const MAX_STORIES: u32 = 5;
}
