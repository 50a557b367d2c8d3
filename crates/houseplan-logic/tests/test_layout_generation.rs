//! Integration tests for the full layout pipeline.
//!
//! Exercises: HouseRequest → distribute_rooms → plan_floor (corridor, zones,
//! placement, doors) → main entrance → CoordinateScaler → Layout JSON
//!
//! Randomized runs loop over fixed seeds, so failures are reproducible.

use houseplan_logic::config::LayoutConfig;
use houseplan_logic::grid::GridRect;
use houseplan_logic::layout::{generate_layout, generate_layout_with, plan_layout, LayoutPlan};
use houseplan_logic::model::{ConnectionTarget, DoorKind, Layout, PlacedRoom};
use houseplan_logic::placement::{RandomPlacement, ShelfPlacement};
use houseplan_logic::plot::PlotSize;
use houseplan_logic::request::HouseRequest;
use houseplan_logic::routing::{find_door_position, Rect};
use houseplan_logic::validate::{validate_all, Severity, ValidationError};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEEDS: u64 = 40;

// ── Helpers ────────────────────────────────────────────────────────────

fn scenario() -> HouseRequest {
    HouseRequest::from_types(
        &["bedroom", "bedroom", "kitchen", "bathroom", "living room"],
        Some(PlotSize::from_dimensions(15.0, 15.0)),
        1,
    )
}

fn requests() -> Vec<HouseRequest> {
    vec![
        scenario(),
        HouseRequest::from_types(
            &[
                "lobby", "living room", "dining room", "kitchen", "bedroom", "bedroom",
                "bedroom", "bathroom", "bathroom", "study", "garage",
            ],
            Some(PlotSize::from_marla(10.0)),
            2,
        ),
        HouseRequest::from_types(
            &[
                "bedroom", "bedroom", "bedroom", "bedroom", "bedroom", "washroom", "washroom",
                "tv lounge", "kitchen", "car parking", "terrace",
            ],
            Some(PlotSize::from_kanal(1.0)),
            3,
        ),
        // More rooms than a 5x5 grid can hold
        HouseRequest::from_types(
            &[
                "garage", "living room", "tv lounge", "kitchen", "bedroom", "bedroom",
                "bedroom", "bathroom", "bathroom", "bathroom", "study", "gym",
            ],
            None,
            1,
        ),
        HouseRequest::from_types::<&str>(&[], None, 4),
    ]
}

fn plan_seeded(request: &HouseRequest, seed: u64) -> LayoutPlan {
    let config = LayoutConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut strategy = RandomPlacement::new(&mut rng, &config);
    plan_layout(request, &config, &mut strategy)
}

fn layout_seeded(request: &HouseRequest, seed: u64) -> Layout {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_layout(request, &LayoutConfig::default(), &mut rng)
}

/// Validation errors, ignoring warnings such as virtual doors.
fn layout_errors(layout: &Layout) -> Vec<ValidationError> {
    validate_all(layout)
        .into_iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}

fn meter_bounds(room: &PlacedRoom) -> Rect {
    Rect::new(room.position[0], room.position[1], room.size[0], room.size[1])
}

// ── Grid invariants ────────────────────────────────────────────────────

#[test]
fn no_overlapping_rooms_on_any_floor() {
    for request in requests() {
        for seed in 0..SEEDS {
            let plan = plan_seeded(&request, seed);
            for floor in &plan.floors {
                let rects: Vec<GridRect> = floor.all_rooms().map(|r| r.rect).collect();
                for i in 0..rects.len() {
                    assert!(
                        rects[i].right() <= plan.grid_size && rects[i].bottom() <= plan.grid_size,
                        "seed {}: {:?} leaves the grid",
                        seed,
                        rects[i]
                    );
                    for j in (i + 1)..rects.len() {
                        assert!(
                            !rects[i].intersects(&rects[j]),
                            "seed {} story {}: {:?} overlaps {:?}",
                            seed,
                            floor.story,
                            rects[i],
                            rects[j]
                        );
                    }
                }
                let covered: usize = rects.iter().map(|r| r.area()).sum();
                assert_eq!(
                    covered + floor.grid.free_cells(),
                    plan.grid_size * plan.grid_size,
                    "grid cells and room areas disagree"
                );
            }
        }
    }
}

#[test]
fn corridor_first_on_every_floor() {
    for request in requests() {
        for seed in 0..SEEDS {
            let plan = plan_seeded(&request, seed);
            assert_eq!(plan.floors.len() as u32, request.stories);
            for floor in &plan.floors {
                assert!(floor.all_rooms().all(|r| r.id >= floor.corridor.id));
                assert_eq!(floor.corridor.rect.h, 1);
                assert_eq!(floor.corridor.rect.w, plan.grid_size - 2);
            }
        }
    }
}

#[test]
fn rooms_only_lost_when_grid_is_full() {
    for request in requests() {
        for seed in 0..SEEDS {
            let plan = plan_seeded(&request, seed);
            for floor in &plan.floors {
                if !floor.dropped.is_empty() {
                    assert!(floor.grid.is_full(), "seed {}: room dropped with free cells", seed);
                }
            }
        }
    }
}

// ── Layout invariants ──────────────────────────────────────────────────

#[test]
fn generated_layouts_validate() {
    for request in requests() {
        for seed in 0..SEEDS {
            let layout = layout_seeded(&request, seed);
            let errors = layout_errors(&layout);
            assert!(
                errors.is_empty(),
                "seed {} ({} stories): {:?}",
                seed,
                request.stories,
                errors
            );
        }
    }
}

#[test]
fn exactly_one_main_entrance() {
    for request in requests() {
        for seed in 0..SEEDS {
            let layout = layout_seeded(&request, seed);
            let entrances: Vec<_> = layout.main_entrances().collect();
            assert_eq!(entrances.len(), 1, "seed {}", seed);
            assert_eq!(entrances[0].connects.1, ConnectionTarget::Exterior);
        }
    }
}

#[test]
fn every_room_has_one_corridor_door() {
    for request in requests() {
        for seed in 0..SEEDS {
            let layout = layout_seeded(&request, seed);
            for room in layout.rooms.iter().filter(|r| !r.is_corridor()) {
                let corridor = layout.corridor_of(room.story).expect("corridor on story");
                let doors = layout
                    .doors
                    .iter()
                    .filter(|d| d.kind == DoorKind::Standard && d.joins(corridor.id, room.id))
                    .count();
                assert_eq!(doors, 1, "seed {}: room #{} has {} doors", seed, room.id, doors);
            }
        }
    }
}

#[test]
fn room_ids_unique_across_stories() {
    let all = requests();
    let request = &all[2];
    for seed in 0..SEEDS {
        let layout = layout_seeded(request, seed);
        let mut ids: Vec<u32> = layout.rooms.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), layout.rooms.len());
    }
}

// ── Scaling ────────────────────────────────────────────────────────────

#[test]
fn scaling_is_exact_per_axis() {
    let request = HouseRequest::from_types(
        &["bedroom", "kitchen", "bathroom"],
        Some(PlotSize::from_dimensions(18.0, 27.0)),
        1,
    );
    let plan = plan_seeded(&request, 11);
    let layout = plan.to_layout();
    // min(18, 27) / 3 = 6 cells
    assert_eq!(plan.grid_size, 6);
    let (sx, sy) = (18.0_f32 / 6.0, 27.0_f32 / 6.0);

    for (grid_room, room) in plan.floors[0].all_rooms().zip(layout.rooms.iter()) {
        let r = grid_room.rect;
        assert_eq!(room.id, grid_room.id);
        assert_eq!(room.position, [r.x as f32 * sx, r.y as f32 * sy]);
        assert_eq!(room.size, [r.w as f32 * sx, r.h as f32 * sy]);
    }
    for (planned, door) in plan.floors[0].doors.iter().zip(layout.doors.iter()) {
        assert_eq!(door, planned, "doors are planned in meters");
    }
}

#[test]
fn doors_follow_meter_geometry_on_long_plots() {
    // 24 x 48 m on an 8-cell grid: 3 m per cell across, 6 m down
    let request = HouseRequest::from_types(
        &[
            "living room", "kitchen", "bedroom", "bedroom", "bathroom", "study", "garage",
        ],
        Some(PlotSize::from_dimensions(24.0, 48.0)),
        1,
    );
    for seed in 0..SEEDS {
        let layout = layout_seeded(&request, seed);
        let corridor = layout.corridor_of(1).expect("corridor");
        for door in layout.doors.iter().filter(|d| d.kind == DoorKind::Standard) {
            let room = door
                .connects
                .1
                .room_id()
                .and_then(|id| layout.room(id))
                .expect("door target exists");
            let expected = find_door_position(&meter_bounds(corridor), &meter_bounds(room));
            assert_eq!(
                (door.position, door.orientation),
                expected,
                "seed {}: door to room #{} ({})",
                seed,
                room.id,
                room.room_type
            );
        }
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn five_room_scenario() {
    for seed in 0..SEEDS {
        let layout = layout_seeded(&scenario(), seed);
        assert_eq!(layout.rooms.len(), 6, "seed {}: 5 rooms + corridor", seed);
        assert_eq!(layout.doors.len(), 6, "seed {}: 5 corridor doors + entrance", seed);
        assert_eq!(layout.connections.len(), 6);
        assert_eq!(layout.main_entrances().count(), 1);
        assert_eq!(layout.stories, 1);
        // no lobby, so the corridor hosts the entrance
        let corridor = layout.corridor_of(1).expect("corridor");
        assert_eq!(corridor.id, 0);
        let entrance = layout.main_entrances().next().expect("entrance");
        assert_eq!(entrance.connects.0, corridor.id);
    }
}

#[test]
fn two_story_distribution() {
    let request = HouseRequest::from_types(
        &["bedroom", "bedroom", "bathroom", "kitchen", "living room"],
        None,
        2,
    );
    let layout = layout_seeded(&request, 5);
    let story_types = |story: u32| -> Vec<String> {
        let mut types: Vec<String> = layout
            .rooms_on(story)
            .filter(|r| !r.is_corridor())
            .map(|r| r.room_type.clone())
            .collect();
        types.sort();
        types
    };
    assert_eq!(story_types(1), vec!["kitchen", "living room"]);
    assert_eq!(story_types(2), vec!["bathroom", "bedroom", "bedroom"]);
}

#[test]
fn lobby_on_ground_floor_hosts_entrance() {
    let all = requests();
    let request = &all[1];
    for seed in 0..SEEDS {
        let layout = layout_seeded(request, seed);
        let entrance = layout.main_entrances().next().expect("entrance");
        let host = layout.room(entrance.connects.0).expect("host room");
        assert_eq!(host.room_type, "lobby", "seed {}", seed);
        assert_eq!(host.story, 1);
    }
}

#[test]
fn empty_request_gets_hallway_per_story() {
    let request = HouseRequest::from_types::<&str>(&[], None, 3);
    let layout = layout_seeded(&request, 0);
    for story in 1..=3 {
        let types: Vec<&str> = layout.rooms_on(story).map(|r| r.room_type.as_str()).collect();
        assert_eq!(types, vec!["corridor", "hallway"]);
    }
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn same_seed_same_layout() {
    let all = requests();
    let request = &all[1];
    assert_eq!(layout_seeded(request, 99), layout_seeded(request, 99));
}

#[test]
fn shelf_strategy_is_deterministic() {
    let config = LayoutConfig::default();
    for request in requests() {
        let a = generate_layout_with(&request, &config, &mut ShelfPlacement);
        let b = generate_layout_with(&request, &config, &mut ShelfPlacement);
        assert_eq!(a, b);
        assert!(layout_errors(&a).is_empty());
    }
}

// ── JSON contract ──────────────────────────────────────────────────────

#[test]
fn layout_json_shape() {
    let layout = layout_seeded(&scenario(), 3);
    let json = serde_json::to_value(&layout).expect("serialize layout");

    assert_eq!(json["stories"], 1);
    assert_eq!(json["plot_size"]["width_meters"], 15.0);
    assert_eq!(json["rooms"].as_array().map(|a| a.len()), Some(6));

    let room = &json["rooms"][0];
    assert_eq!(room["type"], "corridor");
    assert_eq!(room["name"], "Corridor");
    assert_eq!(room["story"], 1);

    let doors = json["doors"].as_array().expect("doors array");
    let main: Vec<_> = doors.iter().filter(|d| d["type"] == "main_entrance").collect();
    assert_eq!(main.len(), 1);
    assert_eq!(main[0]["connects"][1], -1);
    assert_eq!(main[0]["orientation"], "vertical");
    assert!(doors
        .iter()
        .filter(|d| d["type"] == "standard")
        .all(|d| d["connects"][1].as_i64().is_some_and(|id| id > 0)));

    let connections = json["connections"].as_array().expect("connections array");
    assert!(connections.iter().all(|c| c["type"] == "door"));
    assert!(connections.iter().any(|c| c["target"] == -1));

    let back: Layout = serde_json::from_value(json).expect("layout parses back");
    assert_eq!(back.doors.len(), layout.doors.len());
}

#[test]
fn request_json_to_layout() {
    let request = HouseRequest::from_json(
        r#"{"rooms": [{"type": "Lobby"}, {"type": "bedroom"}, {"type": "Kitchen"}],
            "plot_size": {"width_meters": 20, "length_meters": 30},
            "stories": 1}"#,
    )
    .expect("valid request");
    let layout = layout_seeded(&request, 1);
    assert_eq!(layout.rooms.len(), 4);
    let entrance = layout.main_entrances().next().expect("entrance");
    let host = layout.room(entrance.connects.0).expect("host");
    assert_eq!(host.name, "Lobby");
    assert!(layout_errors(&layout).is_empty());
}
