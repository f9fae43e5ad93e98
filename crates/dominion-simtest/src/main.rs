//! Dominion Headless Simulation Harness
//!
//! Builds seeded colonies and drives them through scripted scenarios using
//! only events and ticks. Runs entirely in-process: no rendering, no input.
//!
//! Usage:
//!   cargo run -p dominion-simtest
//!   cargo run -p dominion-simtest -- --verbose

use dominion_core::generation::{self, ColonistTemplate};
use dominion_core::map;
use dominion_core::prelude::*;
use dominion_logic::combat::WeaponType;
use dominion_logic::constants::{ARRIVAL_TOLERANCE, MAX_IDEAL_PATH, TILE_OFFSET};
use dominion_logic::geometry::Vec2;
use dominion_logic::growth::CropType;
use dominion_logic::pathfinding::Pathfinder;
use dominion_logic::skills::{SkillType, Skills};
use dominion_logic::tiles::{TileGrid, TileType};

// ── Colony config (same JSON format `SimConfig::from_path` reads) ──────
const COLONY_JSON: &str = include_str!("../../../data/colony.json");

const DT: f64 = 0.1;
const MAX_TICKS: u32 = 50_000;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: String) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

/// Route every event. Any routing failure fails the returned check.
fn dispatch_all(game: &mut GameWorld, name: &str, events: Vec<EntityEvent>) -> TestResult {
    let count = events.len();
    let failures: Vec<String> = events
        .into_iter()
        .filter_map(|event| game.dispatch(event).err().map(|e| e.to_string()))
        .collect();
    let detail = if failures.is_empty() {
        format!("{} events routed", count)
    } else {
        failures.join("; ")
    };
    check(name, failures.is_empty(), detail)
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("=== Dominion Simulation Harness ===\n");

    let config = match SimConfig::from_json_str(COLONY_JSON) {
        Ok(config) => config,
        Err(e) => {
            println!("  ✗ colony_config: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("loaded colony config with seed {}", config.seed);

    let mut results = Vec::new();

    // 1. World generation
    results.extend(validate_generation(&config));

    // 2. Pathfinding across the generated map
    results.extend(validate_pathfinding(&config));

    // 3. Tools and harvesting
    results.extend(validate_harvest());

    // 4. Tilling, planting and growth
    results.extend(validate_farming());

    // 5. Combat
    results.extend(validate_combat());

    // 6. Hauling into a stockpile
    results.extend(validate_stockpile());

    // 7. Long run of the full colony
    results.extend(validate_long_run(&config));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
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

// ── Helpers ─────────────────────────────────────────────────────────────

fn open_world(rows: usize, cols: usize) -> Option<GameWorld> {
    GameWorld::new(SimConfig::empty(rows, cols)).ok()
}

fn worker(game: &mut GameWorld, position: Vec2, melee: i32) -> hecs::Entity {
    let template = ColonistTemplate {
        name: Name("Crank Copperbottom".into()),
        skills: Skills::default().with(SkillType::Melee, melee),
        health: 40.0,
        speed: 5.0,
    };
    game.spawn_colonist(template, position)
}

fn failed_setup(name: &str) -> Vec<TestResult> {
    vec![check(name, false, "could not build world".into())]
}

// ── 1. World generation ────────────────────────────────────────────────

fn validate_generation(config: &SimConfig) -> Vec<TestResult> {
    println!("--- World Generation ---");
    let mut results = Vec::new();

    let (a, b) = match (GameWorld::new(config.clone()), GameWorld::new(config.clone())) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            return vec![check("generation_build", false, e.to_string())];
        }
    };

    results.push(check(
        "generation_colonists",
        a.colonist_count() == config.colonist_count as usize,
        format!("{} colonists spawned", a.colonist_count()),
    ));

    results.push(check(
        "generation_animals",
        a.animal_count() == AnimalKind::ALL.len(),
        format!("{} animals spawned", a.animal_count()),
    ));

    let expected_items = ToolType::CRAFTABLE.len() + WeaponType::ALL.len();
    results.push(check(
        "generation_items",
        a.item_count() == expected_items,
        format!("{} items spawned", a.item_count()),
    ));

    let (stone, water) = {
        let grid = map::read(a.tiles());
        (grid.count_of(TileType::Stone), grid.count_of(TileType::Water))
    };
    results.push(check(
        "generation_terrain",
        stone > 0 && water > 0,
        format!("{} stone tiles, {} water tiles", stone, water),
    ));

    let same_tiles = {
        let ga = map::read(a.tiles());
        let gb = map::read(b.tiles());
        let same = ga
            .iter()
            .zip(gb.iter())
            .all(|(x, y)| x.tile_type() == y.tile_type());
        same
    };
    results.push(check(
        "generation_deterministic",
        same_tiles && a.entity_count() == b.entity_count(),
        format!("{} entities per world", a.entity_count()),
    ));

    let on_open_ground = a.population().colonists.iter().all(|&c| {
        let Some(position) = a.position(c) else {
            return false;
        };
        let grid = map::read(a.tiles());
        let (x, y) = grid.clamped_tile_at(position);
        grid.can_enter(y, x)
    });
    results.push(check(
        "generation_colonists_on_open_ground",
        on_open_ground,
        "every colonist starts on an enterable tile".into(),
    ));

    results
}

// ── 2. Pathfinding ─────────────────────────────────────────────────────

fn validate_pathfinding(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Pathfinding ---");
    let mut results = Vec::new();

    let mut game = match GameWorld::new(config.clone()) {
        Ok(game) => game,
        Err(_) => return failed_setup("pathfinding_world"),
    };
    let open = generation::open_spots(game.tiles());
    let colonists = game.population().colonists.clone();

    // Ceiling holds for a sweep of start/end pairs
    let longest = {
        let grid = map::read(game.tiles());
        let mut pathfinder = Pathfinder::new(&grid);
        let step = (open.len() / 25).max(1);
        let mut longest = 0;
        for start in open.iter().step_by(step) {
            for end in open.iter().rev().step_by(step) {
                pathfinder.find_waypoints(*start, *end);
                longest = longest.max(pathfinder.ideal_path().len());
            }
        }
        longest
    };
    results.push(check(
        "pathfinding_ceiling",
        longest <= MAX_IDEAL_PATH + 1,
        format!("longest ideal path {} tiles", longest),
    ));

    // Every colonist reaches a far-away tile center
    let mut arrived = 0;
    for (i, &colonist) in colonists.iter().enumerate() {
        let Some(corner) = open.get(open.len().saturating_sub(1 + i * 7)) else {
            continue;
        };
        let target = Vec2::new(corner.x + TILE_OFFSET, corner.y + TILE_OFFSET);
        if game
            .dispatch(EntityEvent::MoveEntity {
                entity: colonist,
                x: target.x,
                y: target.y,
            })
            .is_err()
        {
            continue;
        }
        game.run_until_idle(colonist, MAX_TICKS, DT);
        let reached = game
            .position(colonist)
            .map_or(false, |p| p.distance(&target) <= ARRIVAL_TOLERANCE);
        if reached {
            arrived += 1;
        }
    }
    results.push(check(
        "pathfinding_colonists_arrive",
        arrived == colonists.len(),
        format!("{}/{} colonists arrived", arrived, colonists.len()),
    ));

    // Route out of a walled pocket only crosses open tiles
    let wall = TileGrid::from_rows(&[".....", ".###.", ".#...", ".#.#.", "....."]);
    let route = wall.ok().map(|grid| {
        let mut pathfinder = Pathfinder::new(&grid);
        pathfinder.find_waypoints(Vec2::new(250.0, 250.0), Vec2::new(50.0, 50.0));
        let path = pathfinder.ideal_path();
        let clear = path.iter().all(|&(x, y)| grid.can_enter(y, x));
        (path.len(), clear && path.last() == Some(&(0, 0)))
    });
    results.push(check(
        "pathfinding_avoids_walls",
        route.map_or(false, |(_, ok)| ok),
        format!("{:?} tiles out of the pocket", route.map(|(len, _)| len)),
    ));

    results
}

// ── 3. Harvesting ──────────────────────────────────────────────────────

fn validate_harvest() -> Vec<TestResult> {
    println!("--- Harvesting ---");
    let mut results = Vec::new();
    let Some(mut game) = open_world(10, 10) else {
        return failed_setup("harvest_world");
    };

    let bot = worker(&mut game, Vec2::new(50.0, 50.0), 1);
    let axe = game.spawn_tool(ToolType::Axe, Vec2::new(250.0, 50.0));
    let tree = game.spawn_static(StaticKind::Tree, 2.0, Vec2::new(620.0, 480.0));
    let ore = game.spawn_static(StaticKind::Ore, 2.0, Vec2::new(100.0, 700.0));

    let routed = dispatch_all(
        &mut game,
        "harvest_orders_routed",
        vec![
            EntityEvent::PickUpItem { entity: bot, item: axe },
            EntityEvent::HarvestStaticEntity {
                entity: bot,
                target: tree,
            },
            EntityEvent::HarvestStaticEntity {
                entity: bot,
                target: ore,
            },
        ],
    );
    let ok = routed.passed;
    results.push(routed);
    if !ok {
        return results;
    }
    let ticks = game.run_until_idle(bot, MAX_TICKS, DT);

    let felled = game
        .world
        .get::<&Harvestable>(tree)
        .map_or(false, |h| h.on_ground);
    results.push(check(
        "harvest_tree_with_axe",
        felled,
        format!("tree on ground after {} ticks", ticks),
    ));

    let ore_health = game.vitals(ore).map(|v| v.health);
    results.push(check(
        "harvest_ore_needs_pickaxe",
        ore_health == Some(2.0),
        format!("ore health {:?}", ore_health),
    ));

    results
}

// ── 4. Farming ─────────────────────────────────────────────────────────

fn validate_farming() -> Vec<TestResult> {
    println!("--- Farming ---");
    let mut results = Vec::new();
    let Some(mut game) = open_world(6, 6) else {
        return failed_setup("farming_world");
    };

    let bot = worker(&mut game, Vec2::new(50.0, 50.0), 1);
    game.set_tile_type(4, 4, TileType::Stone);
    let mut orders: Vec<EntityEvent> = [(2, 2), (2, 3), (4, 4)]
        .into_iter()
        .map(|(row, col)| EntityEvent::TileTill {
            entity: bot,
            row,
            col,
        })
        .collect();
    orders.push(EntityEvent::PlantCrop {
        entity: bot,
        row: 2,
        col: 2,
        crop_type: CropType::Strawberry,
    });
    let routed = dispatch_all(&mut game, "farming_orders_routed", orders);
    let ok = routed.passed;
    results.push(routed);
    if !ok {
        return results;
    }
    game.run_until_idle(bot, MAX_TICKS, DT);

    let farmland = map::read(game.tiles()).count_of(TileType::Farmland);
    results.push(check(
        "farming_till",
        farmland == 2 && game.tile_type(4, 4) == Some(TileType::Stone),
        format!("{} farmland tiles", farmland),
    ));

    let crop = game
        .world
        .query::<&Crop>()
        .iter()
        .map(|(entity, _)| entity)
        .next();
    let Some(crop) = crop else {
        results.push(check("farming_plant", false, "no crop spawned".into()));
        return results;
    };
    results.push(check(
        "farming_plant",
        game.position(crop) == Some(Vec2::new(200.0, 200.0)),
        format!("crop at {:?}", game.position(crop)),
    ));

    let mut ticks = 0;
    while ticks < 100 && !game.world.get::<&Crop>(crop).map_or(true, |c| c.is_grown()) {
        game.update(10.5);
        ticks += 1;
    }
    let health = game.vitals(crop).map(|v| v.health);
    results.push(check(
        "farming_growth",
        health == Some(100.0),
        format!("grown after {} growth ticks, health {:?}", ticks, health),
    ));

    results
}

// ── 5. Combat ──────────────────────────────────────────────────────────

fn validate_combat() -> Vec<TestResult> {
    println!("--- Combat ---");
    let mut results = Vec::new();
    let Some(mut game) = open_world(6, 6) else {
        return failed_setup("combat_world");
    };

    let fighter = worker(&mut game, Vec2::new(50.0, 50.0), 9);
    let rival = worker(&mut game, Vec2::new(450.0, 350.0), 2);
    let sword = game.spawn_weapon(WeaponType::Sword, Vec2::new(60.0, 60.0));
    let goose = game.spawn_animal(AnimalKind::Goose, Vec2::new(300.0, 300.0));

    let armed = dispatch_all(
        &mut game,
        "combat_pickup_routed",
        vec![EntityEvent::PickUpItem {
            entity: fighter,
            item: sword,
        }],
    );
    let ok = armed.passed;
    results.push(armed);
    if !ok {
        return results;
    }
    game.run_until_idle(fighter, MAX_TICKS, DT);

    let attack = dispatch_all(
        &mut game,
        "combat_attack_routed",
        vec![EntityEvent::DamageDealt {
            attacker: fighter,
            target: rival,
            weapon: Some(sword),
        }],
    );
    let ok = attack.passed;
    results.push(attack);
    if !ok {
        return results;
    }
    let ticks = game.run_until_idle(fighter, MAX_TICKS, 0.11);

    let dead = [fighter, rival]
        .iter()
        .filter(|&&e| game.vitals(e).map_or(false, |v| !v.alive && v.health == 0.0))
        .count();
    results.push(check(
        "combat_ends_in_death",
        dead == 1,
        format!("fight over after {} ticks", ticks),
    ));

    let sword_health = game.vitals(sword).map(|v| v.health);
    results.push(check(
        "combat_weapon_wears",
        sword_health.map_or(false, |h| h < 50.0),
        format!("sword health {:?}", sword_health),
    ));

    let routed = game.dispatch(EntityEvent::HarvestStaticEntity {
        entity: goose,
        target: rival,
    });
    results.push(check(
        "combat_animals_restricted",
        routed.is_ok() && game.actions_remaining(goose) == 0,
        match routed {
            Ok(()) => "goose ignored harvest order".into(),
            Err(e) => e.to_string(),
        },
    ));

    results
}

// ── 6. Stockpile ───────────────────────────────────────────────────────

fn validate_stockpile() -> Vec<TestResult> {
    println!("--- Stockpile ---");
    let mut results = Vec::new();
    let Some(mut game) = open_world(8, 8) else {
        return failed_setup("stockpile_world");
    };

    let bot = worker(&mut game, Vec2::new(50.0, 50.0), 1);
    let stockpile = game.create_stockpile(&[(5, 5)]);
    let crates: Vec<hecs::Entity> = (0..5)
        .map(|i| game.spawn_item("Crate", Vec2::new(100.0 + 60.0 * i as f32, 150.0)))
        .collect();

    let orders = crates
        .iter()
        .flat_map(|&item| {
            [
                EntityEvent::PickUpItem { entity: bot, item },
                EntityEvent::DepositItemInStockpile {
                    entity: bot,
                    item,
                    stockpile,
                },
            ]
        })
        .collect();
    let routed = dispatch_all(&mut game, "stockpile_orders_routed", orders);
    let ok = routed.passed;
    results.push(routed);
    if !ok {
        return results;
    }
    game.run_until_idle(bot, MAX_TICKS, DT);

    let overflow = crates[crates.len() - 1];
    let (stored, full, has_overflow) = game
        .world
        .get::<&Stockpile>(stockpile)
        .map_or((0, false, false), |s| {
            (s.items().len(), s.is_full(), s.items().contains(&overflow))
        });
    results.push(check(
        "stockpile_capacity",
        stored == 4 && full,
        format!("{} items stored in a one-tile stockpile", stored),
    ));

    let on_ground = game
        .world
        .get::<&Item>(overflow)
        .map_or(false, |item| !item.is_held());
    results.push(check(
        "stockpile_overflow_left_on_ground",
        on_ground && !has_overflow,
        format!("fifth item at {:?}", game.position(overflow)),
    ));

    results
}

// ── 7. Long run ────────────────────────────────────────────────────────

fn validate_long_run(config: &SimConfig) -> Vec<TestResult> {
    println!("--- Long Run ---");
    let mut results = Vec::new();
    let mut game = match GameWorld::new(config.clone()) {
        Ok(game) => game,
        Err(_) => return failed_setup("long_run_world"),
    };

    let colonists = game.population().colonists.clone();
    let animals = game.population().animals.clone();
    let open = generation::open_spots(game.tiles());

    let mut routing_errors = 0;
    for round in 0..20usize {
        for (i, &agent) in colonists.iter().chain(animals.iter()).enumerate() {
            let Some(spot) = open.get((round * 31 + i * 17) % open.len().max(1)) else {
                continue;
            };
            let event = EntityEvent::MoveEntity {
                entity: agent,
                x: spot.x + TILE_OFFSET,
                y: spot.y + TILE_OFFSET,
            };
            if game.dispatch(event).is_err() {
                routing_errors += 1;
            }
        }
        game.run(500, DT);
    }

    results.push(check(
        "long_run_routing",
        routing_errors == 0,
        format!("{} routing errors", routing_errors),
    ));
    results.push(check(
        "long_run_clock",
        (game.clock().time - 20.0 * 500.0 * DT * config.time_scale).abs() < 1e-6,
        format!("{} ticks, {:.1}s of game time", game.ticks(), game.clock().time),
    ));
    results.push(check(
        "long_run_colonists_alive",
        game.living_colonist_count() == colonists.len(),
        format!("{} colonists alive", game.living_colonist_count()),
    ));

    results
}
