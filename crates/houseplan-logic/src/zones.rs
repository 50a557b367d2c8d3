//! Functional zones of a floor.
//!
//! The grid is split into four equal quadrants, one per room category. Zones
//! are recomputed for every floor and only steer where placement starts
//! looking; they are not stored in the layout.

use serde::{Deserialize, Serialize};

use crate::grid::GridRect;

/// Functional quadrant of a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Public,
    Private,
    Service,
    Other,
}

impl ZoneKind {
    /// Every zone, in the order uncategorized rooms try them.
    pub const ALL: [ZoneKind; 4] = [
        ZoneKind::Public,
        ZoneKind::Private,
        ZoneKind::Service,
        ZoneKind::Other,
    ];
}

/// A named quadrant of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub rect: GridRect,
}

/// The four zones of one floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zones {
    zones: [Zone; 4],
}

impl Zones {
    /// Partition a `grid_size` × `grid_size` grid into quadrants of
    /// `grid_size / 2` cells: public top-left, private top-right, service
    /// bottom-left, other bottom-right.
    pub fn partition(grid_size: usize) -> Self {
        let half = grid_size / 2;
        let zone = |kind, x, y| Zone {
            kind,
            rect: GridRect::new(x, y, half, half),
        };
        Self {
            zones: [
                zone(ZoneKind::Public, 0, 0),
                zone(ZoneKind::Private, half, 0),
                zone(ZoneKind::Service, 0, half),
                zone(ZoneKind::Other, half, half),
            ],
        }
    }

    pub fn get(&self, kind: ZoneKind) -> &Zone {
        match kind {
            ZoneKind::Public => &self.zones[0],
            ZoneKind::Private => &self.zones[1],
            ZoneKind::Service => &self.zones[2],
            ZoneKind::Other => &self.zones[3],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }
}
