//! Simulation engine - owns the world, the map, the clock and the RNG

use crate::ai::{ActionContext, AgentController};
use crate::clock::GameClock;
use crate::components::*;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::events::{route_event, EntityEvent};
use crate::generation::{self, ColonistTemplate, Population};
use crate::map::{self, SharedGrid};
use crate::systems::agent_system;
use dominion_logic::combat::WeaponType;
use dominion_logic::geometry::Vec2;
use dominion_logic::tiles::{TileGrid, TileType};
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Main simulation engine
pub struct GameWorld {
    /// ECS world containing all entities
    pub world: World,
    tiles: SharedGrid,
    clock: GameClock,
    rng: StdRng,
    config: SimConfig,
    population: Population,
    ticks: u64,
}

impl GameWorld {
    /// Build a world from config: grid, optional terrain, optional
    /// population, then the configured colonists.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut grid = TileGrid::new(config.grid_rows, config.grid_cols)?;
        if config.generate_terrain {
            generation::generate_terrain(&mut grid, &mut rng);
        }
        Ok(Self::assemble(config, grid, rng))
    }

    /// Build a world on a fixed map. Terrain generation is skipped.
    pub fn with_grid(config: SimConfig, grid: TileGrid) -> Result<Self, SimError> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: SimConfig, grid: TileGrid, mut rng: StdRng) -> Self {
        let tiles = map::share(grid);
        let mut world = World::new();

        let mut population = if config.populate {
            generation::populate_world(&mut world, &tiles, &config, &mut rng)
        } else {
            Population::default()
        };
        let open = generation::open_spots(&tiles);
        population.colonists =
            generation::spawn_colonists(&mut world, &tiles, &config, &open, &mut rng);

        let mut clock = GameClock::new();
        clock.start_game();

        Self {
            world,
            tiles,
            clock,
            rng,
            config,
            population,
            ticks: 0,
        }
    }

    fn ctx(&mut self) -> ActionContext<'_> {
        ActionContext {
            world: &mut self.world,
            clock: &self.clock,
            rng: &mut self.rng,
        }
    }

    /// Deliver an event to its recipient's controller.
    pub fn dispatch(&mut self, event: EntityEvent) -> Result<(), SimError> {
        route_event(&mut self.ctx(), &event)
    }

    /// Advance the clock by `delta_seconds` (scaled) and run one tick.
    pub fn update(&mut self, delta_seconds: f64) {
        self.clock.advance(delta_seconds * self.config.time_scale);
        agent_system(&mut self.ctx());
        self.ticks += 1;
    }

    /// Run `ticks` updates of `delta_seconds` each.
    pub fn run(&mut self, ticks: u32, delta_seconds: f64) {
        for _ in 0..ticks {
            self.update(delta_seconds);
        }
    }

    /// Update until `entity` has nothing queued, or `max_ticks` pass.
    /// Returns the number of ticks run.
    pub fn run_until_idle(&mut self, entity: Entity, max_ticks: u32, delta_seconds: f64) -> u32 {
        let mut ran = 0;
        while ran < max_ticks && self.actions_remaining(entity) > 0 {
            self.update(delta_seconds);
            ran += 1;
        }
        ran
    }

    // Spawning

    pub fn spawn_colonist(&mut self, template: ColonistTemplate, position: Vec2) -> Entity {
        generation::spawn_colonist(&mut self.world, &self.tiles, template, position)
    }

    /// A colonist with random name and skills, using configured health and speed.
    pub fn spawn_random_colonist(&mut self, position: Vec2) -> Entity {
        let template = generation::random_colonist(&self.config, &mut self.rng);
        self.spawn_colonist(template, position)
    }

    pub fn spawn_animal(&mut self, kind: AnimalKind, position: Vec2) -> Entity {
        let speed = self.config.animal_speed;
        generation::spawn_animal(&mut self.world, &self.tiles, kind, speed, position)
    }

    pub fn spawn_item(&mut self, name: &str, position: Vec2) -> Entity {
        generation::spawn_item(&mut self.world, &self.tiles, name, position)
    }

    pub fn spawn_tool(&mut self, tool_type: ToolType, position: Vec2) -> Entity {
        generation::spawn_tool(&mut self.world, &self.tiles, tool_type, position)
    }

    pub fn spawn_weapon(&mut self, weapon_type: WeaponType, position: Vec2) -> Entity {
        generation::spawn_weapon(&mut self.world, &self.tiles, weapon_type, position)
    }

    pub fn spawn_static(&mut self, kind: StaticKind, health: f32, position: Vec2) -> Entity {
        generation::spawn_static(&mut self.world, kind, health, position)
    }

    pub fn create_stockpile(&mut self, cells: &[(usize, usize)]) -> Entity {
        generation::spawn_stockpile(&mut self.world, &self.tiles, cells)
    }

    // Map

    pub fn tiles(&self) -> &SharedGrid {
        &self.tiles
    }

    pub fn tile_type(&self, row: usize, col: usize) -> Option<TileType> {
        map::read(&self.tiles).get(row, col).map(|t| t.tile_type())
    }

    /// Change a tile for every controller at once. False if out of range.
    pub fn set_tile_type(&mut self, row: usize, col: usize, tile_type: TileType) -> bool {
        map::write(&self.tiles).change_tile_type(row, col, tile_type)
    }

    // Queries

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Entities spawned at construction.
    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<Entity> {
        self.world
            .query::<&EntityId>()
            .iter()
            .find(|(_, entity_id)| **entity_id == id)
            .map(|(entity, _)| entity)
    }

    pub fn actions_remaining(&self, entity: Entity) -> usize {
        self.world
            .get::<&AgentController>(entity)
            .map_or(0, |c| c.actions_remaining())
    }

    pub fn has_task(&self, entity: Entity) -> bool {
        self.world
            .get::<&AgentController>(entity)
            .map_or(false, |c| c.has_task())
    }

    pub fn queued_actions(&self, entity: Entity) -> Vec<&'static str> {
        self.world
            .get::<&AgentController>(entity)
            .map(|c| c.queued_names())
            .unwrap_or_default()
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.world.get::<&Position>(entity).ok().map(|p| p.0)
    }

    pub fn vitals(&self, entity: Entity) -> Option<Vitals> {
        self.world.get::<&Vitals>(entity).ok().map(|v| *v)
    }

    pub fn colonist_count(&self) -> usize {
        self.world.query::<&Colonist>().iter().count()
    }

    pub fn living_colonist_count(&self) -> usize {
        self.world
            .query::<(&Colonist, &Vitals)>()
            .iter()
            .filter(|(_, (_, vitals))| vitals.alive)
            .count()
    }

    pub fn animal_count(&self) -> usize {
        self.world.query::<&Animal>().iter().count()
    }

    pub fn item_count(&self) -> usize {
        self.world.query::<&Item>().iter().count()
    }

    pub fn entity_count(&self) -> usize {
        self.world.len() as usize
    }
}
