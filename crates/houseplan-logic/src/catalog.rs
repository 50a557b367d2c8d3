//! Standard room dimensions.
//!
//! A static table of typical residential room sizes in meters. Lookups never
//! fail: unknown room types fall back to [`DEFAULT_SPEC`], which maps to a 2×2
//! cell footprint.

use serde::{Deserialize, Serialize};

use crate::constants::room_types;

/// Standard size of a room type, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub width: f32,
    pub length: f32,
    /// Minimum floor area in square meters.
    pub min_area: f32,
}

/// Spec used for room types missing from the catalog.
pub const DEFAULT_SPEC: RoomSpec = RoomSpec {
    width: 4.0,
    length: 4.0,
    min_area: 0.0,
};

const CATALOG: &[(&str, RoomSpec)] = &[
    (room_types::BEDROOM, spec(3.5, 4.0, 12.0)),
    (room_types::KITCHEN, spec(3.0, 3.5, 9.0)),
    (room_types::BATHROOM, spec(2.0, 2.5, 4.5)),
    (room_types::WASHROOM, spec(2.0, 2.5, 4.5)),
    (room_types::LIVING_ROOM, spec(4.0, 5.0, 15.0)),
    (room_types::TV_LOUNGE, spec(4.0, 4.5, 15.0)),
    (room_types::DINING_ROOM, spec(3.5, 4.0, 10.0)),
    (room_types::GARAGE, spec(3.5, 5.5, 16.0)),
    (room_types::CAR_PARKING, spec(3.5, 5.5, 16.0)),
    (room_types::LOBBY, spec(2.0, 4.0, 8.0)),
    (room_types::HALLWAY, spec(1.5, 4.0, 6.0)),
    (room_types::CORRIDOR, spec(1.2, 3.0, 3.6)),
];

const fn spec(width: f32, length: f32, min_area: f32) -> RoomSpec {
    RoomSpec {
        width,
        length,
        min_area,
    }
}

/// Find the catalog entry for a room type, if there is one.
pub fn find(room_type: &str) -> Option<RoomSpec> {
    let rt = room_type.trim();
    CATALOG
        .iter()
        .find(|(name, _)| rt.eq_ignore_ascii_case(name))
        .map(|(_, spec)| *spec)
}

/// Standard spec for a room type; unknown types get [`DEFAULT_SPEC`].
pub fn lookup(room_type: &str) -> RoomSpec {
    find(room_type).unwrap_or(DEFAULT_SPEC)
}

pub fn is_known(room_type: &str) -> bool {
    find(room_type).is_some()
}
