//! Layout data model: the contract with the mesh builder and renderer.
//!
//! Field names and JSON shapes here are what downstream consumers index on:
//! rooms by position in `rooms` and by `story`, doors by their `connects`
//! pair, where `-1` means "outside the building".

use serde::{Deserialize, Serialize};

use crate::constants::room_types;
use crate::plot::PlotSize;

/// Wire value of [`ConnectionTarget::Exterior`].
pub const EXTERIOR_SENTINEL: i64 = -1;

/// A room in the final layout. Position and size are in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub id: u32,
    #[serde(rename = "type")]
    pub room_type: String,
    pub name: String,
    /// Top-left corner `[x, y]`.
    pub position: [f32; 2],
    /// `[width, length]`.
    pub size: [f32; 2],
    /// 1-based floor number.
    pub story: u32,
}

impl PlacedRoom {
    pub fn is_corridor(&self) -> bool {
        room_types::is_corridor(&self.room_type)
    }

    pub fn right(&self) -> f32 {
        self.position[0] + self.size[0]
    }

    pub fn bottom(&self) -> f32 {
        self.position[1] + self.size[1]
    }
}

/// Which way a door opening faces.
///
/// `Horizontal` pierces a wall whose boundary runs vertically (walk through it
/// left-right); `Vertical` pierces a horizontal wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorKind {
    Standard,
    MainEntrance,
}

/// Far side of a door or connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum ConnectionTarget {
    Room(u32),
    Exterior,
}

impl ConnectionTarget {
    pub fn room_id(&self) -> Option<u32> {
        match self {
            ConnectionTarget::Room(id) => Some(*id),
            ConnectionTarget::Exterior => None,
        }
    }
}

impl From<ConnectionTarget> for i64 {
    fn from(target: ConnectionTarget) -> i64 {
        match target {
            ConnectionTarget::Room(id) => id as i64,
            ConnectionTarget::Exterior => EXTERIOR_SENTINEL,
        }
    }
}

impl TryFrom<i64> for ConnectionTarget {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == EXTERIOR_SENTINEL {
            return Ok(ConnectionTarget::Exterior);
        }
        u32::try_from(value)
            .map(ConnectionTarget::Room)
            .map_err(|_| format!("invalid connection target {}", value))
    }
}

/// A door opening. Position in meters in the final layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub position: [f32; 2],
    pub orientation: DoorOrientation,
    /// Opening width in meters.
    pub width: f32,
    /// `[source_room_id, target]`.
    pub connects: (u32, ConnectionTarget),
    #[serde(rename = "type")]
    pub kind: DoorKind,
}

impl Door {
    /// True if this door joins the two given rooms, in either direction.
    pub fn joins(&self, a: u32, b: u32) -> bool {
        let (src, target) = self.connects;
        match target {
            ConnectionTarget::Room(dst) => (src == a && dst == b) || (src == b && dst == a),
            ConnectionTarget::Exterior => false,
        }
    }

    pub fn touches(&self, room_id: u32) -> bool {
        self.connects.0 == room_id || self.connects.1 == ConnectionTarget::Room(room_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Door,
}

/// Logical edge mirroring a [`Door`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: u32,
    pub target: ConnectionTarget,
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
}

impl From<&Door> for Connection {
    fn from(door: &Door) -> Self {
        Self {
            source: door.connects.0,
            target: door.connects.1,
            kind: ConnectionKind::Door,
        }
    }
}

/// A complete multi-story layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub rooms: Vec<PlacedRoom>,
    pub connections: Vec<Connection>,
    pub doors: Vec<Door>,
    pub stories: u32,
    pub plot_size: PlotSize,
}

impl Layout {
    pub fn rooms_on(&self, story: u32) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms.iter().filter(move |r| r.story == story)
    }

    pub fn corridor_of(&self, story: u32) -> Option<&PlacedRoom> {
        self.rooms_on(story).find(|r| r.is_corridor())
    }

    pub fn room(&self, id: u32) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn main_entrances(&self) -> impl Iterator<Item = &Door> {
        self.doors
            .iter()
            .filter(|d| d.kind == DoorKind::MainEntrance)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
