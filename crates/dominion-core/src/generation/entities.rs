//! Entity spawning: one function per kind of thing in the colony

use crate::ai::{AgentController, ControllerKind};
use crate::components::*;
use crate::map::{self, SharedGrid};
use dominion_logic::combat::WeaponType;
use dominion_logic::geometry::Vec2;
use dominion_logic::growth::{CropType, FULL_GROWTH, SEEDLING_HEALTH};
use dominion_logic::skills::Skills;
use hecs::{Entity, EntityBuilder, World};

/// Health of a freshly made item, tool or weapon.
pub const ITEM_HEALTH: f32 = 50.0;
/// Base health of trees and ore before per-entity variance.
pub const STATIC_BASE_HEALTH: f32 = 50.0;
pub const ANIMAL_HEALTH: f32 = 30.0;

/// Everything a colonist starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct ColonistTemplate {
    pub name: Name,
    pub skills: Skills,
    pub health: f32,
    pub speed: f32,
}

/// Reserve an entity, attach a controller wired to `tiles`, then spawn.
fn spawn_agent(
    world: &mut World,
    tiles: &SharedGrid,
    kind: ControllerKind,
    builder: &mut EntityBuilder,
) -> Entity {
    let entity = world.reserve_entity();
    let mut controller = AgentController::new(entity, kind);
    controller.set_map_tiles(tiles.clone());
    builder.add(controller);
    world.spawn_at(entity, builder.build());
    entity
}

fn base(builder: &mut EntityBuilder, name: impl Into<String>, position: Vec2, vitals: Vitals) {
    builder
        .add(EntityId::next())
        .add(Name(name.into()))
        .add(Position(position))
        .add(vitals)
        .add(Pose::default());
}

pub fn spawn_colonist(
    world: &mut World,
    tiles: &SharedGrid,
    template: ColonistTemplate,
    position: Vec2,
) -> Entity {
    let mut builder = EntityBuilder::new();
    base(&mut builder, template.name.0, position, Vitals::new(template.health));
    builder
        .add(MovementSpeed(template.speed))
        .add(Inventory::default())
        .add(Colonist::with_skills(template.skills));
    let entity = spawn_agent(world, tiles, ControllerKind::Base, &mut builder);
    log::debug!("spawned colonist {:?} at {:?}", entity, position);
    entity
}

pub fn spawn_animal(
    world: &mut World,
    tiles: &SharedGrid,
    kind: AnimalKind,
    speed: f32,
    position: Vec2,
) -> Entity {
    let mut builder = EntityBuilder::new();
    base(&mut builder, kind.label(), position, Vitals::new(ANIMAL_HEALTH));
    builder
        .add(MovementSpeed(speed))
        .add(Inventory::default())
        .add(Animal { kind });
    spawn_agent(world, tiles, ControllerKind::Animal, &mut builder)
}

fn item_builder(name: &str, position: Vec2) -> EntityBuilder {
    let mut builder = EntityBuilder::new();
    base(&mut builder, name, position, Vitals::new(ITEM_HEALTH));
    builder.add(Item::default());
    builder
}

pub fn spawn_item(world: &mut World, tiles: &SharedGrid, name: &str, position: Vec2) -> Entity {
    let mut builder = item_builder(name, position);
    spawn_agent(world, tiles, ControllerKind::Item, &mut builder)
}

pub fn spawn_tool(
    world: &mut World,
    tiles: &SharedGrid,
    tool_type: ToolType,
    position: Vec2,
) -> Entity {
    let mut builder = item_builder(tool_type.label(), position);
    builder.add(Tool::new(tool_type));
    spawn_agent(world, tiles, ControllerKind::Item, &mut builder)
}

pub fn spawn_weapon(
    world: &mut World,
    tiles: &SharedGrid,
    weapon_type: WeaponType,
    position: Vec2,
) -> Entity {
    let mut builder = item_builder(weapon_type.label(), position);
    builder.add(Weapon::new(weapon_type));
    spawn_agent(world, tiles, ControllerKind::Item, &mut builder)
}

/// Trees, ore and other fixtures. They have no controller.
pub fn spawn_static(world: &mut World, kind: StaticKind, health: f32, position: Vec2) -> Entity {
    let mut builder = EntityBuilder::new();
    base(&mut builder, kind.label(), position, Vitals::new(health));
    builder.add(Harvestable::new(kind, kind.required_tool()));
    world.spawn(builder.build())
}

/// An unplanted seed. It stays put and does not grow until a `PlantCrop`
/// action places it.
pub fn spawn_crop(
    world: &mut World,
    tiles: &SharedGrid,
    crop_type: CropType,
    position: Vec2,
) -> Entity {
    let mut vitals = Vitals::new(FULL_GROWTH);
    vitals.health = SEEDLING_HEALTH;

    let mut builder = EntityBuilder::new();
    base(&mut builder, format!("{:?}", crop_type), position, vitals);
    builder
        .add(Harvestable::new(StaticKind::Crop, StaticKind::Crop.required_tool()))
        .add(Crop::unplanted(crop_type));
    spawn_agent(world, tiles, ControllerKind::Base, &mut builder)
}

/// A stockpile over the given `(row, col)` tiles. Tiles that are not dirt
/// or lie outside the grid are skipped.
pub fn spawn_stockpile(world: &mut World, tiles: &SharedGrid, cells: &[(usize, usize)]) -> Entity {
    let stockpile = {
        let grid = map::read(tiles);
        Stockpile::from_tiles(cells.iter().filter_map(|&(row, col)| grid.get(row, col)))
    };
    world.spawn((
        EntityId::next(),
        Name("Stockpile".to_string()),
        Position(stockpile.center()),
        stockpile,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dominion_logic::tiles::{TileGrid, TileType};

    fn grid() -> SharedGrid {
        map::share(TileGrid::new(4, 4).unwrap())
    }

    #[test]
    fn test_agents_own_their_controller() {
        let mut world = World::new();
        let tiles = grid();
        let goose = spawn_animal(&mut world, &tiles, AnimalKind::Goose, 0.1, Vec2::ZERO);
        let axe = spawn_tool(&mut world, &tiles, ToolType::Axe, Vec2::ZERO);

        let controller = world.get::<&AgentController>(goose).unwrap();
        assert_eq!(controller.owner(), goose);
        assert_eq!(controller.kind(), ControllerKind::Animal);
        assert_eq!(
            world.get::<&AgentController>(axe).unwrap().kind(),
            ControllerKind::Item
        );
        assert_eq!(world.get::<&Tool>(axe).unwrap().quality, 1.0);
    }

    #[test]
    fn test_statics_need_the_right_tool() {
        let mut world = World::new();
        let tree = spawn_static(&mut world, StaticKind::Tree, 60.0, Vec2::ZERO);
        let harvestable = *world.get::<&Harvestable>(tree).unwrap();
        assert!(harvestable.can_interact(ToolType::Axe));
        assert!(!harvestable.can_interact(ToolType::Pickaxe));
        assert!(world.get::<&AgentController>(tree).is_err());
    }

    #[test]
    fn test_crop_starts_as_seedling() {
        let mut world = World::new();
        let crop = spawn_crop(&mut world, &grid(), CropType::Corn, Vec2::ZERO);
        let vitals = *world.get::<&Vitals>(crop).unwrap();
        assert_eq!(vitals.health, SEEDLING_HEALTH);
        assert_eq!(vitals.max_health, FULL_GROWTH);
        assert!(!world.get::<&Crop>(crop).unwrap().is_planted());
    }

    #[test]
    fn test_stockpile_skips_non_dirt() {
        let mut world = World::new();
        let tiles = grid();
        map::write(&tiles).change_tile_type(1, 1, TileType::Water);
        let pile = spawn_stockpile(&mut world, &tiles, &[(0, 0), (1, 1), (0, 1), (9, 9)]);

        let stockpile = world.get::<&Stockpile>(pile).unwrap();
        assert_eq!(stockpile.zones().len(), 2);
        assert_eq!(stockpile.center(), Vec2::new(50.0, 0.0));
        assert_eq!(world.get::<&Position>(pile).unwrap().0, Vec2::new(50.0, 0.0));
    }
}
