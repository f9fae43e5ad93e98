//! Generation - procedural terrain and starting population

mod entities;
mod names;
mod terrain;

pub use entities::*;
pub use names::*;
pub use terrain::*;

use crate::components::{AnimalKind, StaticKind, ToolType};
use crate::config::SimConfig;
use crate::map::{self, SharedGrid};
use dominion_logic::combat::WeaponType;
use dominion_logic::constants::TILE_SIZE;
use dominion_logic::geometry::Vec2;
use dominion_logic::skills::{SkillType, Skills};
use dominion_logic::tiles::TileType;
use hecs::{Entity, World};
use rand::Rng;

/// Skill points a new colonist spreads over their skills.
pub const COLONIST_SKILL_POINTS: i32 = 25;
/// Highest level a new colonist can start with in one skill.
pub const COLONIST_SKILL_CAP: i32 = 10;
pub const MIN_COLONIST_HEALTH: i32 = 30;

/// Per-tile roll for trees or ore; only 1 and 2 spawn anything.
const STATIC_ROLL: std::ops::Range<i32> = -50..3;
const STATIC_HEALTH_VARIANCE: std::ops::Range<i32> = -10..500;

/// Entities created at world construction, by kind.
#[derive(Debug, Default, Clone)]
pub struct Population {
    pub colonists: Vec<Entity>,
    pub animals: Vec<Entity>,
    pub items: Vec<Entity>,
    pub statics: Vec<Entity>,
}

/// Spread [`COLONIST_SKILL_POINTS`] one at a time over random skills.
pub fn random_skills(rng: &mut impl Rng) -> Skills {
    let mut skills = Skills::default();
    let mut points = COLONIST_SKILL_POINTS;
    while points > 0 {
        let skill = SkillType::ALL[rng.gen_range(0..SkillType::ALL.len())];
        if skills.get(skill) < COLONIST_SKILL_CAP {
            skills.increase(skill, 1);
            points -= 1;
        }
    }
    skills
}

/// A colonist with a random name, random skills and between
/// [`MIN_COLONIST_HEALTH`] and the configured health.
pub fn random_colonist(config: &SimConfig, rng: &mut impl Rng) -> ColonistTemplate {
    let max = config.colonist_health.round().max(1.0) as i32;
    let health = rng.gen_range(MIN_COLONIST_HEALTH.min(max)..=max) as f32;
    ColonistTemplate {
        name: generate_name(rng),
        skills: random_skills(rng),
        health,
        speed: config.colonist_speed,
    }
}

/// Top-left corner of a random enterable tile.
fn random_open_spot(open: &[Vec2], rng: &mut impl Rng) -> Option<Vec2> {
    if open.is_empty() {
        None
    } else {
        Some(open[rng.gen_range(0..open.len())])
    }
}

/// Enterable tiles of the grid, as top-left corners.
pub fn open_spots(tiles: &SharedGrid) -> Vec<Vec2> {
    map::read(tiles)
        .iter()
        .filter(|t| t.can_enter())
        .map(|t| t.location())
        .collect()
}

/// The configured number of random colonists, each on a random spot from
/// `open`. Nothing is spawned if `open` is empty.
pub fn spawn_colonists(
    world: &mut World,
    tiles: &SharedGrid,
    config: &SimConfig,
    open: &[Vec2],
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let mut colonists = Vec::with_capacity(config.colonist_count as usize);
    for _ in 0..config.colonist_count {
        if let Some(spot) = random_open_spot(open, rng) {
            let template = random_colonist(config, rng);
            colonists.push(spawn_colonist(world, tiles, template, spot));
        }
    }
    colonists
}

/// Fill a fresh world: trees and ore on dirt, one of every tool and weapon,
/// and one animal of each kind. Colonists are spawned separately by
/// [`spawn_colonists`].
pub fn populate_world(
    world: &mut World,
    tiles: &SharedGrid,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Population {
    let mut population = Population::default();

    let dirt: Vec<Vec2> = map::read(tiles)
        .iter()
        .filter(|t| t.row > 0 && t.col > 0 && t.tile_type() == TileType::Dirt)
        .map(|t| t.location())
        .collect();
    let open = open_spots(tiles);

    for kind in [StaticKind::Tree, StaticKind::Ore] {
        for &corner in &dirt {
            for _ in 0..rng.gen_range(STATIC_ROLL).max(0) {
                let offset = Vec2::new(
                    rng.gen_range(0.0..TILE_SIZE),
                    rng.gen_range(0.0..TILE_SIZE),
                );
                let health = STATIC_BASE_HEALTH + rng.gen_range(STATIC_HEALTH_VARIANCE) as f32;
                population
                    .statics
                    .push(spawn_static(world, kind, health, corner + offset));
            }
        }
    }

    for tool_type in ToolType::CRAFTABLE {
        if let Some(spot) = random_open_spot(&open, rng) {
            population.items.push(spawn_tool(world, tiles, tool_type, spot));
        }
    }
    for weapon_type in WeaponType::ALL {
        if let Some(spot) = random_open_spot(&open, rng) {
            population.items.push(spawn_weapon(world, tiles, weapon_type, spot));
        }
    }
    for kind in AnimalKind::ALL {
        if let Some(spot) = random_open_spot(&open, rng) {
            population
                .animals
                .push(spawn_animal(world, tiles, kind, config.animal_speed, spot));
        }
    }

    log::info!(
        "populated world: {} animals, {} items, {} trees and ore",
        population.animals.len(),
        population.items.len(),
        population.statics.len()
    );
    population
}
