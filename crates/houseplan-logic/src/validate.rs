//! Layout validation.
//!
//! Pure functions over a finished [`Layout`] (meters) that return validation
//! errors. Used by the integration tests and the simtest harness.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::model::{ConnectionTarget, Door, DoorKind, Layout, PlacedRoom};
use crate::routing::{self, Rect};

/// Slack for edge comparisons after scaling to meters.
const EDGE_TOLERANCE: f32 = 0.01;

/// A layout validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

fn warning(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Warning,
        message,
    }
}

fn bounds(r: &PlacedRoom) -> Rect {
    Rect::new(r.position[0], r.position[1], r.size[0], r.size[1])
}

fn by_story(rooms: &[PlacedRoom]) -> BTreeMap<u32, Vec<&PlacedRoom>> {
    let mut stories: BTreeMap<u32, Vec<&PlacedRoom>> = BTreeMap::new();
    for r in rooms {
        stories.entry(r.story).or_default().push(r);
    }
    stories
}

// ── A. Stories and ids ──────────────────────────────────────────────────

/// Check that each of stories `1..=stories` has exactly one corridor, holding
/// the lowest id on that story.
pub fn check_story_corridors(rooms: &[PlacedRoom], stories: u32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let grouped = by_story(rooms);
    for story in 1..=stories {
        let Some(story_rooms) = grouped.get(&story) else {
            errors.push(error("corridor", format!("Story {} has no rooms", story)));
            continue;
        };
        let corridors: Vec<&&PlacedRoom> = story_rooms.iter().filter(|r| r.is_corridor()).collect();
        if corridors.len() != 1 {
            errors.push(error(
                "corridor",
                format!("Story {} has {} corridors", story, corridors.len()),
            ));
            continue;
        }
        let corridor_id = corridors[0].id;
        if story_rooms.iter().any(|r| r.id < corridor_id) {
            errors.push(error(
                "corridor",
                format!(
                    "Story {}: corridor #{} is not the first id on the story",
                    story, corridor_id
                ),
            ));
        }
    }
    errors
}

/// Check that no two rooms share an id.
pub fn check_unique_ids(rooms: &[PlacedRoom]) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    rooms
        .iter()
        .filter(|r| !seen.insert(r.id))
        .map(|r| error("room_ids", format!("Room id #{} is used more than once", r.id)))
        .collect()
}

// ── B. Room geometry (per-room) ─────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(rooms: &[PlacedRoom]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in rooms {
        if r.size[0] <= 0.0 || r.size[1] <= 0.0 {
            errors.push(error(
                "room_geometry",
                format!(
                    "Room #{} ({}) has non-positive dimensions: {}×{}",
                    r.id, r.room_type, r.size[0], r.size[1]
                ),
            ));
        }
    }
    errors
}

/// Check rooms stay inside the plot.
pub fn check_rooms_within_plot(
    rooms: &[PlacedRoom],
    plot_width: f32,
    plot_length: f32,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for r in rooms {
        if r.position[0] < -EDGE_TOLERANCE
            || r.position[1] < -EDGE_TOLERANCE
            || r.right() > plot_width + EDGE_TOLERANCE
            || r.bottom() > plot_length + EDGE_TOLERANCE
        {
            errors.push(error(
                "room_geometry",
                format!(
                    "Room #{} extends outside plot: ({:.1},{:.1})→({:.1},{:.1}) vs plot {}×{}",
                    r.id,
                    r.position[0],
                    r.position[1],
                    r.right(),
                    r.bottom(),
                    plot_width,
                    plot_length
                ),
            ));
        }
    }
    errors
}

// ── C. Room-to-room (pairwise) ──────────────────────────────────────────

/// AABB overlap test per story. Touching edges are fine.
pub fn check_room_overlaps(rooms: &[PlacedRoom]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (story, story_rooms) in by_story(rooms) {
        for i in 0..story_rooms.len() {
            for j in (i + 1)..story_rooms.len() {
                let a = story_rooms[i];
                let b = story_rooms[j];
                let overlap_x = (a.right() - EDGE_TOLERANCE) > b.position[0]
                    && (b.right() - EDGE_TOLERANCE) > a.position[0];
                let overlap_y = (a.bottom() - EDGE_TOLERANCE) > b.position[1]
                    && (b.bottom() - EDGE_TOLERANCE) > a.position[1];
                if overlap_x && overlap_y {
                    errors.push(error(
                        "room_overlap",
                        format!("Rooms #{} and #{} overlap on story {}", a.id, b.id, story),
                    ));
                }
            }
        }
    }
    errors
}

// ── D. Door validity ────────────────────────────────────────────────────

/// Check that every room a door references exists.
pub fn check_door_rooms_exist(doors: &[Door], rooms: &[PlacedRoom]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let room_ids: HashSet<u32> = rooms.iter().map(|r| r.id).collect();

    for (i, d) in doors.iter().enumerate() {
        let (source, target) = d.connects;
        if !room_ids.contains(&source) {
            errors.push(error(
                "door_validity",
                format!("Door {} references non-existent source room {}", i, source),
            ));
        }
        if let ConnectionTarget::Room(id) = target {
            if !room_ids.contains(&id) {
                errors.push(error(
                    "door_validity",
                    format!("Door {} references non-existent target room {}", i, id),
                ));
            }
        }
    }
    errors
}

/// Check that every non-corridor room has exactly one standard door to its
/// story's corridor.
pub fn check_corridor_doors(rooms: &[PlacedRoom], doors: &[Door]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let corridor_of: HashMap<u32, u32> = rooms
        .iter()
        .filter(|r| r.is_corridor())
        .map(|r| (r.story, r.id))
        .collect();

    for r in rooms.iter().filter(|r| !r.is_corridor()) {
        let Some(&corridor_id) = corridor_of.get(&r.story) else {
            continue; // reported by check_story_corridors
        };
        let count = doors
            .iter()
            .filter(|d| d.kind == DoorKind::Standard && d.joins(corridor_id, r.id))
            .count();
        if count != 1 {
            errors.push(error(
                "door_validity",
                format!(
                    "Room #{} ({}) has {} doors to corridor #{}",
                    r.id, r.room_type, count, corridor_id
                ),
            ));
        }
    }
    errors
}

/// Warn about rooms whose corridor door is virtual: the room does not share
/// a wall with its corridor, so the door sits between the two centers.
pub fn check_virtual_doors(rooms: &[PlacedRoom], doors: &[Door]) -> Vec<ValidationError> {
    let mut warnings = Vec::new();
    let by_id: HashMap<u32, &PlacedRoom> = rooms.iter().map(|r| (r.id, r)).collect();

    for d in doors.iter().filter(|d| d.kind == DoorKind::Standard) {
        let (Some(a), Some(b)) = (
            by_id.get(&d.connects.0),
            d.connects.1.room_id().and_then(|id| by_id.get(&id)),
        ) else {
            continue; // reported by check_door_rooms_exist
        };
        if routing::shared_wall(&bounds(a), &bounds(b)).is_none() {
            warnings.push(warning(
                "door_placement",
                format!(
                    "Room #{} ({}) does not touch room #{} ({}); door is virtual",
                    b.id, b.room_type, a.id, a.room_type
                ),
            ));
        }
    }
    warnings
}

/// Check that the layout has exactly one main entrance, leading outside.
pub fn check_main_entrance(doors: &[Door]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let entrances: Vec<&Door> = doors
        .iter()
        .filter(|d| d.kind == DoorKind::MainEntrance)
        .collect();
    if entrances.len() != 1 {
        errors.push(error(
            "main_entrance",
            format!("Layout has {} main entrances", entrances.len()),
        ));
    }
    for d in entrances {
        if d.connects.1 != ConnectionTarget::Exterior {
            errors.push(error(
                "main_entrance",
                format!("Main entrance of room #{} does not lead outside", d.connects.0),
            ));
        }
    }
    errors
}

// ── E. Connectivity (graph-level) ───────────────────────────────────────

/// Check that every room on each story is reachable from its corridor.
pub fn check_story_connectivity(rooms: &[PlacedRoom], doors: &[Door]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut adj: HashMap<u32, Vec<u32>> = HashMap::new();
    for d in doors {
        if let ConnectionTarget::Room(b) = d.connects.1 {
            let a = d.connects.0;
            adj.entry(a).or_default().push(b);
            adj.entry(b).or_default().push(a);
        }
    }

    for (story, story_rooms) in by_story(rooms) {
        let Some(corridor) = story_rooms.iter().find(|r| r.is_corridor()) else {
            continue;
        };
        let ids: HashSet<u32> = story_rooms.iter().map(|r| r.id).collect();

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(corridor.id);
        queue.push_back(corridor.id);
        while let Some(current) = queue.pop_front() {
            if let Some(neighbors) = adj.get(&current) {
                for &next in neighbors {
                    if ids.contains(&next) && visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        let unreached: Vec<u32> = story_rooms
            .iter()
            .map(|r| r.id)
            .filter(|id| !visited.contains(id))
            .collect();
        if !unreached.is_empty() {
            errors.push(error(
                "connectivity",
                format!(
                    "Story {}: {} of {} rooms unreachable (e.g. room #{})",
                    story,
                    unreached.len(),
                    story_rooms.len(),
                    unreached[0]
                ),
            ));
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all layout validations and return combined results.
pub fn validate_all(layout: &Layout) -> Vec<ValidationError> {
    let rooms = &layout.rooms;
    let doors = &layout.doors;
    let mut all = Vec::new();
    all.extend(check_story_corridors(rooms, layout.stories));
    all.extend(check_unique_ids(rooms));
    all.extend(check_room_dimensions(rooms));
    all.extend(check_rooms_within_plot(
        rooms,
        layout.plot_size.width_meters,
        layout.plot_size.length_meters,
    ));
    all.extend(check_room_overlaps(rooms));
    all.extend(check_door_rooms_exist(doors, rooms));
    all.extend(check_corridor_doors(rooms, doors));
    all.extend(check_virtual_doors(rooms, doors));
    all.extend(check_main_entrance(doors));
    all.extend(check_story_connectivity(rooms, doors));
    all
}
