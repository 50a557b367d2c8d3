//! houseplan Headless Layout Harness
//!
//! Runs bundled house requests (or a request file) through the layout engine
//! across a range of seeds and validates the layout invariants.
//! Runs entirely in-process: no rendering and no mesh export.
//!
//! Usage:
//!   cargo run -p houseplan-simtest
//!   cargo run -p houseplan-simtest -- --verbose
//!   cargo run -p houseplan-simtest -- --seed 100 --seeds 50
//!   cargo run -p houseplan-simtest -- --request house.json --json
//!   cargo run -p houseplan-simtest -- --shelf
//!   cargo run -p houseplan-simtest -- --config layout.json

use houseplan_logic::catalog;
use houseplan_logic::config::LayoutConfig;
use houseplan_logic::constants::room_types;
use houseplan_logic::layout::{plan_layout, LayoutPlan};
use houseplan_logic::model::{ConnectionTarget, DoorKind, Layout};
use houseplan_logic::placement::{footprint_for, RandomPlacement, ShelfPlacement};
use houseplan_logic::request::HouseRequest;
use houseplan_logic::stories::distribute_rooms;
use houseplan_logic::validate::{validate_all, Severity};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

// ── Bundled scenarios ───────────────────────────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    request: serde_json::Value,
    /// Exact room count (corridors included) when everything must fit.
    #[serde(default)]
    expect_rooms: Option<usize>,
    #[serde(default)]
    expect_doors: Option<usize>,
    /// Room type expected to carry the main entrance.
    #[serde(default)]
    entrance_host: Option<String>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    json: bool,
    shelf: bool,
    first_seed: u64,
    seeds: u64,
    request_path: Option<String>,
    config_path: Option<String>,
}

impl Options {
    fn from_args() -> Result<Self, String> {
        let mut opts = Options {
            verbose: false,
            json: false,
            shelf: false,
            first_seed: 0,
            seeds: 25,
            request_path: None,
            config_path: None,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--verbose" => opts.verbose = true,
                "--json" => opts.json = true,
                "--shelf" => opts.shelf = true,
                "--seed" => opts.first_seed = parse_value(&arg, args.next())?,
                "--seeds" => opts.seeds = parse_value(&arg, args.next())?,
                "--request" => {
                    opts.request_path = Some(args.next().ok_or("--request needs a path")?)
                }
                "--config" => {
                    opts.config_path = Some(args.next().ok_or("--config needs a path")?)
                }
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        if opts.seeds == 0 {
            return Err("--seeds must be at least 1".into());
        }
        Ok(opts)
    }

    fn seed_range(&self) -> std::ops::Range<u64> {
        // The shelf strategy ignores the seed, one run is enough
        let count = if self.shelf { 1 } else { self.seeds };
        self.first_seed..self.first_seed + count
    }
}

fn parse_value(flag: &str, value: Option<String>) -> Result<u64, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|e| format!("{} {}: {}", flag, value, e))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .init();

    let opts = match Options::from_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    let config = match load_config(&opts) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    println!("=== houseplan Layout Harness ===\n");

    let mut results = Vec::new();

    // 1. Load requests
    let scenarios = match load_scenarios(&opts) {
        Ok(s) => s,
        Err(result) => {
            results.push(result);
            Vec::new()
        }
    };

    // 2. Catalog and footprints
    results.extend(validate_catalog(&config, opts.verbose));

    // 3. Story distribution
    results.extend(validate_story_distribution(&scenarios, opts.verbose));

    // 4. Layouts across seeds
    results.extend(validate_layouts(&scenarios, &config, &opts));

    // 5. Determinism
    results.extend(validate_determinism(&scenarios, &config, &opts));

    // 6. JSON contract
    results.extend(validate_json_contract(&scenarios, &config, &opts));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(opts: &Options) -> Result<LayoutConfig, String> {
    let Some(path) = &opts.config_path else {
        return Ok(LayoutConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    LayoutConfig::from_json(&text).map_err(|e| format!("{}: {}", path, e))
}

/// A named request ready to run.
struct Case {
    name: String,
    request: HouseRequest,
    scenario: Option<Scenario>,
}

fn load_scenarios(opts: &Options) -> Result<Vec<Case>, TestResult> {
    if let Some(path) = &opts.request_path {
        let text = std::fs::read_to_string(path).map_err(|e| TestResult {
            name: "request_read".into(),
            passed: false,
            detail: format!("{}: {}", path, e),
        })?;
        let request = HouseRequest::from_json(&text).map_err(|e| TestResult {
            name: "request_parse".into(),
            passed: false,
            detail: format!("{}: {}", path, e),
        })?;
        return Ok(vec![Case {
            name: path.clone(),
            request,
            scenario: None,
        }]);
    }

    let scenarios: Vec<Scenario> = serde_json::from_str(SCENARIOS_JSON).map_err(|e| TestResult {
        name: "scenarios_parse".into(),
        passed: false,
        detail: format!("JSON parse error: {}", e),
    })?;

    let mut cases = Vec::new();
    for scenario in scenarios {
        let request =
            HouseRequest::from_json(&scenario.request.to_string()).map_err(|e| TestResult {
                name: format!("{}_parse", scenario.name),
                passed: false,
                detail: e.to_string(),
            })?;
        cases.push(Case {
            name: scenario.name.clone(),
            request,
            scenario: Some(scenario),
        });
    }
    Ok(cases)
}

fn plan_for(request: &HouseRequest, config: &LayoutConfig, seed: u64, shelf: bool) -> LayoutPlan {
    if shelf {
        plan_layout(request, config, &mut ShelfPlacement)
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut strategy = RandomPlacement::new(&mut rng, config);
        plan_layout(request, config, &mut strategy)
    }
}

// ── 2. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(config: &LayoutConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Room Catalog ---");
    let mut results = Vec::new();

    let known = [
        room_types::BEDROOM,
        room_types::KITCHEN,
        room_types::BATHROOM,
        room_types::WASHROOM,
        room_types::LIVING_ROOM,
        room_types::TV_LOUNGE,
        room_types::DINING_ROOM,
        room_types::GARAGE,
        room_types::CAR_PARKING,
        room_types::LOBBY,
        room_types::HALLWAY,
        room_types::CORRIDOR,
    ];

    let missing: Vec<&str> = known
        .iter()
        .copied()
        .filter(|t| !catalog::is_known(t))
        .collect();
    results.push(TestResult {
        name: "catalog_complete".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            format!("{} room types in catalog", known.len())
        } else {
            format!("missing: {:?}", missing)
        },
    });

    // Footprints cover the minimum area
    let mut undersized = Vec::new();
    for t in known {
        let spec = catalog::lookup(t);
        let fp = footprint_for(t, config);
        let covered = fp.area() as f32 * config.cell_area;
        if verbose {
            println!(
                "  {:<12} {:.1}x{:.1} m, min {:>4.1} m² → {}x{} cells",
                t, spec.width, spec.length, spec.min_area, fp.w, fp.h
            );
        }
        if covered < spec.min_area {
            undersized.push(t);
        }
    }
    results.push(TestResult {
        name: "footprints_cover_min_area".into(),
        passed: undersized.is_empty(),
        detail: if undersized.is_empty() {
            "all footprints cover their minimum area".into()
        } else {
            format!("undersized: {:?}", undersized)
        },
    });

    let stable = catalog::lookup("bedroom") == catalog::lookup("BEDROOM");
    results.push(TestResult {
        name: "lookup_case_insensitive".into(),
        passed: stable,
        detail: "bedroom == BEDROOM".into(),
    });

    let unknown = footprint_for("wine cellar", config);
    results.push(TestResult {
        name: "unknown_type_default".into(),
        passed: unknown.w == 2 && unknown.h == 2 && !catalog::is_known("wine cellar"),
        detail: format!("unknown type → {}x{} cells", unknown.w, unknown.h),
    });

    results
}

// ── 3. Story distribution ───────────────────────────────────────────────

fn validate_story_distribution(cases: &[Case], verbose: bool) -> Vec<TestResult> {
    println!("--- Story Distribution ---");
    let mut results = Vec::new();

    for case in cases {
        let floors = distribute_rooms(&case.request.rooms, case.request.stories);
        let requested = case.request.rooms.len();
        let is_hallway = |t: &str| t.trim().eq_ignore_ascii_case(room_types::HALLWAY);
        let hallways = floors
            .iter()
            .flatten()
            .filter(|r| is_hallway(r.room_type.as_str()))
            .count();
        let requested_hallways = case.request.room_types().filter(|t| is_hallway(*t)).count();
        let synthetic = hallways.saturating_sub(requested_hallways);
        let assigned = floors.iter().map(|f| f.len()).sum::<usize>() - synthetic;

        let ground_ok = floors
            .iter()
            .skip(1)
            .flatten()
            .all(|r| !room_types::is_ground_floor(&r.room_type));
        let no_empty = floors.iter().all(|f| !f.is_empty());

        if verbose {
            for (i, floor) in floors.iter().enumerate() {
                let types: Vec<&str> = floor.iter().map(|r| r.room_type.as_str()).collect();
                println!("  {} story {}: {:?}", case.name, i + 1, types);
            }
        }

        results.push(TestResult {
            name: format!("{}_distribution", case.name),
            passed: assigned == requested && ground_ok && no_empty,
            detail: format!(
                "{} of {} rooms assigned over {} stories (ground-floor rule {}, no empty story {})",
                assigned,
                requested,
                floors.len(),
                if ground_ok { "ok" } else { "BROKEN" },
                if no_empty { "ok" } else { "BROKEN" }
            ),
        });
    }
    results
}

// ── 4. Layouts across seeds ─────────────────────────────────────────────

fn validate_layouts(cases: &[Case], config: &LayoutConfig, opts: &Options) -> Vec<TestResult> {
    println!("--- Layouts ---");
    let mut results = Vec::new();

    for case in cases {
        let mut failures = Vec::new();
        let mut warnings = 0;
        let mut dropped = 0;
        let runs = opts.seed_range().count();

        for seed in opts.seed_range() {
            let plan = plan_for(&case.request, config, seed, opts.shelf);
            let layout = plan.to_layout();
            dropped += plan.dropped().count();

            if opts.verbose && seed == opts.first_seed {
                print_plan(&case.name, &plan);
            }

            for err in validate_all(&layout) {
                match err.severity {
                    Severity::Error => {
                        failures.push(format!("seed {}: [{}] {}", seed, err.category, err.message))
                    }
                    Severity::Warning => warnings += 1,
                }
            }

            if let Some(scenario) = &case.scenario {
                failures.extend(
                    check_expectations(scenario, &layout)
                        .into_iter()
                        .map(|m| format!("seed {}: {}", seed, m)),
                );
            }
        }

        results.push(TestResult {
            name: format!("{}_layouts", case.name),
            passed: failures.is_empty(),
            detail: if failures.is_empty() {
                format!(
                    "{} runs valid ({} warnings, {} rooms dropped)",
                    runs, warnings, dropped
                )
            } else {
                format!(
                    "{} failures over {} runs, first: {}",
                    failures.len(),
                    runs,
                    failures[0]
                )
            },
        });
    }
    results
}

fn check_expectations(scenario: &Scenario, layout: &Layout) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(n) = scenario.expect_rooms {
        if layout.rooms.len() != n {
            problems.push(format!("expected {} rooms, got {}", n, layout.rooms.len()));
        }
    }
    if let Some(n) = scenario.expect_doors {
        if layout.doors.len() != n {
            problems.push(format!("expected {} doors, got {}", n, layout.doors.len()));
        }
    }
    if let Some(host_type) = &scenario.entrance_host {
        let host = layout
            .main_entrances()
            .next()
            .and_then(|d| layout.room(d.connects.0));
        match host {
            Some(room) if room.room_type.eq_ignore_ascii_case(host_type) => {}
            Some(room) => problems.push(format!(
                "main entrance on {} #{}, expected {}",
                room.room_type, room.id, host_type
            )),
            None => problems.push("main entrance has no host room".into()),
        }
    }
    problems
}

fn print_plan(name: &str, plan: &LayoutPlan) {
    println!(
        "  {} (grid {}x{}, plot {:.1}x{:.1} m)",
        name, plan.grid_size, plan.grid_size, plan.plot.width_meters, plan.plot.length_meters
    );
    for floor in &plan.floors {
        println!("  story {}:", floor.story);
        for line in floor.grid.to_string().lines() {
            println!("    {}", line);
        }
        for room in floor.all_rooms() {
            println!(
                "    #{:<3} {:<14} ({}, {}) {}x{}",
                room.id, room.room_type, room.rect.x, room.rect.y, room.rect.w, room.rect.h
            );
        }
        for req in &floor.dropped {
            println!("    dropped: {}", req.room_type);
        }
    }
}

// ── 5. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(cases: &[Case], config: &LayoutConfig, opts: &Options) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    let mismatched: Vec<&str> = cases
        .iter()
        .filter(|case| {
            let a = plan_for(&case.request, config, opts.first_seed, opts.shelf).to_layout();
            let b = plan_for(&case.request, config, opts.first_seed, opts.shelf).to_layout();
            a != b
        })
        .map(|case| case.name.as_str())
        .collect();

    results.push(TestResult {
        name: "same_seed_same_layout".into(),
        passed: mismatched.is_empty(),
        detail: if mismatched.is_empty() {
            format!("{} requests reproduced from seed {}", cases.len(), opts.first_seed)
        } else {
            format!("differs: {:?}", mismatched)
        },
    });
    results
}

// ── 6. JSON contract ────────────────────────────────────────────────────

fn validate_json_contract(cases: &[Case], config: &LayoutConfig, opts: &Options) -> Vec<TestResult> {
    println!("--- JSON Contract ---");
    let mut results = Vec::new();

    let Some(case) = cases.first() else {
        return results;
    };
    let layout = plan_for(&case.request, config, opts.first_seed, opts.shelf).to_layout();

    let json = match layout.to_json_pretty() {
        Ok(j) => j,
        Err(e) => {
            results.push(TestResult {
                name: "layout_serialize".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    if opts.json {
        println!("{}", json);
    }

    let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
    let exterior_doors = value["doors"]
        .as_array()
        .map(|doors| {
            doors
                .iter()
                .filter(|d| d["connects"][1] == -1 && d["type"] == "main_entrance")
                .count()
        })
        .unwrap_or(0);
    results.push(TestResult {
        name: "exterior_door_wire_format".into(),
        passed: exterior_doors == 1,
        detail: format!("{} main entrance door(s) with connects[1] == -1", exterior_doors),
    });

    let round_trip: Result<Layout, _> = serde_json::from_str(&json);
    let matches = round_trip
        .as_ref()
        .map(|l| {
            l.rooms.len() == layout.rooms.len()
                && l.doors.iter().filter(|d| d.kind == DoorKind::MainEntrance).count() == 1
                && l.connections.iter().any(|c| c.target == ConnectionTarget::Exterior)
        })
        .unwrap_or(false);
    results.push(TestResult {
        name: "layout_json_parses_back".into(),
        passed: matches,
        detail: match round_trip {
            Ok(l) => format!(
                "{} rooms, {} doors, {} connections",
                l.rooms.len(),
                l.doors.len(),
                l.connections.len()
            ),
            Err(e) => e.to_string(),
        },
    });

    results
}
