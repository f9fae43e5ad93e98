use super::actions::*;
use super::{Action, ActionContext};
use crate::components::{Position, Stockpile, Vitals};
use crate::error::SimError;
use crate::events::EntityEvent;
use crate::generation::spawn_crop;
use crate::map::{self, SharedGrid};
use crate::systems::update_hunger;
use dominion_logic::constants::OFF_MAP;
use dominion_logic::geometry::Vec2;
use dominion_logic::growth::CropType;
use dominion_logic::pathfinding::find_waypoints;
use dominion_logic::tiles::tile_location;
use hecs::{Entity, World};
use std::collections::VecDeque;
use std::fmt;

/// Which events a controller acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    /// Colonists and crops: every event.
    Base,
    Animal,
    Item,
}

impl ControllerKind {
    /// Animals and items ignore work events: tilling, planting, hauling,
    /// harvesting and crop growth.
    pub fn accepts(self, event: &EntityEvent) -> bool {
        match self {
            ControllerKind::Base => true,
            ControllerKind::Animal | ControllerKind::Item => !matches!(
                event,
                EntityEvent::TileTill { .. }
                    | EntityEvent::PlantCrop { .. }
                    | EntityEvent::DepositItemInStockpile { .. }
                    | EntityEvent::PickUpItem { .. }
                    | EntityEvent::DropItem { .. }
                    | EntityEvent::HarvestStaticEntity { .. }
                    | EntityEvent::CropGrowth { .. }
            ),
        }
    }
}

/// The slot a controller advanced on its last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSlot {
    Immediate,
    Queue,
    Passive,
    Idle,
}

/// Per-entity action scheduler.
///
/// Holds an immediate slot, a FIFO queue and a passive slot. Each update
/// advances one action, by priority immediate > queue > passive, and drops
/// it once it reports done. Events are turned into queued actions by
/// [`AgentController::handle_event`]; no handler ever blocks.
pub struct AgentController {
    owner: Entity,
    kind: ControllerKind,
    queue: VecDeque<Box<dyn Action>>,
    immediate: Option<Box<dyn Action>>,
    passive: Option<Box<dyn Action>>,
    tiles: Option<SharedGrid>,
}

impl fmt::Debug for AgentController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentController")
            .field("owner", &self.owner)
            .field("kind", &self.kind)
            .field("queue", &self.queued_names())
            .field("immediate", &self.immediate.as_ref().map(|a| a.name()))
            .field("passive", &self.passive.as_ref().map(|a| a.name()))
            .field("has_tiles", &self.tiles.is_some())
            .finish()
    }
}

impl AgentController {
    pub fn new(owner: Entity, kind: ControllerKind) -> Self {
        Self {
            owner,
            kind,
            queue: VecDeque::new(),
            immediate: None,
            passive: None,
            tiles: None,
        }
    }

    pub fn with_tiles(mut self, tiles: SharedGrid) -> Self {
        self.tiles = Some(tiles);
        self
    }

    /// Give the controller the grid it pathfinds and tills on.
    pub fn set_map_tiles(&mut self, tiles: SharedGrid) {
        self.tiles = Some(tiles);
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    pub fn actions_remaining(&self) -> usize {
        self.queue.len()
    }

    /// True while the queue holds work. The immediate and passive slots do
    /// not count.
    pub fn has_task(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn enqueue(&mut self, action: Box<dyn Action>) {
        self.queue.push_back(action);
    }

    pub fn set_immediate_action(&mut self, action: Box<dyn Action>) {
        self.immediate = Some(action);
    }

    pub fn set_passive_action(&mut self, action: Box<dyn Action>) {
        self.passive = Some(action);
    }

    pub fn queued_names(&self) -> Vec<&'static str> {
        self.queue.iter().map(|a| a.name()).collect()
    }

    /// Destinations of the queued movement steps, in queue order.
    pub fn queued_destinations(&self) -> Vec<Vec2> {
        self.queue.iter().filter_map(|a| a.move_destination()).collect()
    }

    /// Advance at most one action.
    pub fn update(&mut self, ctx: &mut ActionContext<'_>) -> ActionSlot {
        if let Some(action) = self.immediate.as_mut() {
            if action.advance(ctx) {
                self.immediate = None;
            }
            return ActionSlot::Immediate;
        }

        if let Some(action) = self.queue.front_mut() {
            if action.advance(ctx) {
                self.queue.pop_front();
            }
            return ActionSlot::Queue;
        }

        if let Some(action) = self.passive.as_mut() {
            if action.advance(ctx) {
                self.passive = None;
            }
            return ActionSlot::Passive;
        }

        ActionSlot::Idle
    }

    /// Translate an event into actions. Returns false if this kind of
    /// controller ignores the event.
    pub fn handle_event(&mut self, ctx: &mut ActionContext<'_>, event: &EntityEvent) -> bool {
        if !self.kind.accepts(event) {
            log::debug!(
                "{:?} controller of {:?} ignores {}",
                self.kind,
                self.owner,
                event.name()
            );
            return false;
        }

        match *event {
            EntityEvent::MoveEntity { x, y, .. } => self.on_move(ctx.world, Vec2::new(x, y)),
            EntityEvent::DamageDealt { target, weapon, .. } => self.on_damage(ctx, target, weapon),
            EntityEvent::Heal { amount, .. } => {
                UpdateHealth::new(self.owner).increment(ctx.world, amount)
            }
            EntityEvent::PickUpItem { item, .. } => self.on_pick_up(ctx.world, item),
            EntityEvent::DropItem { item, .. } => {
                self.enqueue(Box::new(DropItem::new(self.owner, item)))
            }
            EntityEvent::HarvestStaticEntity { target, .. } => {
                self.on_harvest(ctx.world, target)
            }
            EntityEvent::UpdateHunger { .. } => update_hunger(ctx.world, self.owner, ctx.clock),
            EntityEvent::DepositItemInStockpile {
                item, stockpile, ..
            } => self.on_deposit(ctx.world, item, stockpile),
            EntityEvent::CropGrowth { .. } => {
                GrowCrop::new(self.owner).advance(ctx);
            }
            EntityEvent::StopActions { .. } => self.queue.clear(),
            EntityEvent::TileTill { row, col, .. } => self.on_till(ctx.world, row, col),
            EntityEvent::PlantCrop {
                row,
                col,
                crop_type,
                ..
            } => self.on_plant(ctx, row, col, crop_type),
        }
        true
    }

    /// Path from the end of the last queued move, or from where the entity
    /// stands, and queue a move per waypoint.
    fn on_move(&mut self, world: &World, destination: Vec2) {
        let start = self
            .queue
            .iter()
            .rev()
            .find_map(|a| a.move_destination())
            .or_else(|| world.get::<&Position>(self.owner).ok().map(|p| p.0));
        let Some(start) = start else {
            return;
        };

        let waypoints = match &self.tiles {
            Some(tiles) => find_waypoints(&map::read(tiles), start, destination),
            None => vec![destination],
        };
        for waypoint in waypoints {
            self.enqueue(Box::new(Move::new(self.owner, waypoint)));
        }
    }

    fn on_move_to_entity(&mut self, world: &World, target: Entity) {
        let destination = world.get::<&Position>(target).map(|p| p.0);
        if let Ok(destination) = destination {
            self.on_move(world, destination);
        }
    }

    fn on_damage(&mut self, ctx: &mut ActionContext<'_>, target: Entity, weapon: Option<Entity>) {
        let healthy = |e: Entity| ctx.world.get::<&Vitals>(e).map_or(false, |v| v.health > 0.0);
        if !(healthy(self.owner) && healthy(target)) {
            return;
        }
        self.on_move_to_entity(ctx.world, target);
        let fight = Fight::new(ctx.world, self.owner, target, weapon, ctx.clock.time);
        self.enqueue(Box::new(fight));
    }

    fn on_pick_up(&mut self, world: &World, item: Entity) {
        self.on_move_to_entity(world, item);
        let mut pickup = PickupItem::new(self.owner);
        pickup.set_item(item);
        self.enqueue(Box::new(pickup));
    }

    fn on_harvest(&mut self, world: &World, target: Entity) {
        self.on_move_to_entity(world, target);
        self.enqueue(Box::new(HarvestStaticEntity::new(self.owner, target)));
    }

    fn on_deposit(&mut self, world: &World, item: Entity, stockpile: Entity) {
        let Ok(center) = world.get::<&Stockpile>(stockpile).map(|s| s.center()) else {
            return;
        };
        self.on_move(world, center);
        self.enqueue(Box::new(DropItem::new(self.owner, item)));
        self.enqueue(Box::new(DepositInStockpile::new(item, stockpile)));
    }

    fn on_till(&mut self, world: &World, row: usize, col: usize) {
        let Some(tiles) = self.tiles.clone() else {
            log::debug!("{:?} cannot till without a map", self.owner);
            return;
        };
        self.on_move(world, tile_location(row, col));
        self.enqueue(Box::new(TillGround::new(tiles, row, col)));
    }

    fn on_plant(&mut self, ctx: &mut ActionContext<'_>, row: usize, col: usize, crop_type: CropType) {
        let Some(tiles) = self.tiles.clone() else {
            log::debug!("{:?} cannot plant without a map", self.owner);
            return;
        };
        self.on_move(ctx.world, tile_location(row, col));
        let crop = spawn_crop(
            ctx.world,
            &tiles,
            crop_type,
            Vec2::new(OFF_MAP, OFF_MAP),
        );
        self.enqueue(Box::new(PlantCrop::new(crop, row, col)));
    }
}

/// Run `f` with `entity`'s controller lifted out of the world, so the
/// controller and the world can be borrowed mutably at the same time.
pub fn with_controller<R>(
    ctx: &mut ActionContext<'_>,
    entity: Entity,
    f: impl FnOnce(&mut AgentController, &mut ActionContext<'_>) -> R,
) -> Result<R, SimError> {
    if !ctx.world.contains(entity) {
        return Err(SimError::UnknownEntity(entity));
    }

    let mut controller = {
        let mut slot = ctx
            .world
            .get::<&mut AgentController>(entity)
            .map_err(|_| SimError::MissingComponent {
                entity,
                component: "AgentController",
            })?;
        let placeholder = AgentController::new(entity, slot.kind);
        std::mem::replace(&mut *slot, placeholder)
    };

    let result = f(&mut controller, &mut *ctx);

    if let Ok(mut slot) = ctx.world.get::<&mut AgentController>(entity) {
        *slot = controller;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::TestWorld;
    use crate::components::{Crop, Item};
    use dominion_logic::tiles::{TileGrid, TileType};
    use std::sync::{Arc, Mutex};

    /// Records its tag each time it runs and finishes after `ticks` runs.
    struct Recorder {
        tag: &'static str,
        ticks: u32,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Action for Recorder {
        fn advance(&mut self, _ctx: &mut ActionContext<'_>) -> bool {
            self.log.lock().unwrap().push(self.tag);
            self.ticks = self.ticks.saturating_sub(1);
            self.ticks == 0
        }

        fn name(&self) -> &'static str {
            self.tag
        }
    }

    fn recorder(
        log: &Arc<Mutex<Vec<&'static str>>>,
        tag: &'static str,
        ticks: u32,
    ) -> Box<dyn Action> {
        Box::new(Recorder {
            tag,
            ticks,
            log: Arc::clone(log),
        })
    }

    fn setup(kind: ControllerKind) -> (TestWorld, Entity, AgentController) {
        let mut t = TestWorld::new();
        let e = t.walker(50.0, 50.0, 5.0);
        let grid = map::share(TileGrid::new(5, 5).unwrap());
        let controller = AgentController::new(e, kind).with_tiles(grid);
        (t, e, controller)
    }

    #[test]
    fn test_priority_immediate_queue_passive() {
        let (mut t, _, mut c) = setup(ControllerKind::Base);
        let log = Arc::new(Mutex::new(Vec::new()));
        c.set_passive_action(recorder(&log, "passive", 1));
        c.enqueue(recorder(&log, "queued", 2));
        c.set_immediate_action(recorder(&log, "immediate", 1));

        let slots: Vec<ActionSlot> = (0..5).map(|_| c.update(&mut t.ctx())).collect();
        assert_eq!(
            slots,
            vec![
                ActionSlot::Immediate,
                ActionSlot::Queue,
                ActionSlot::Queue,
                ActionSlot::Passive,
                ActionSlot::Idle,
            ]
        );
        assert_eq!(
            *log.lock().unwrap(),
            vec!["immediate", "queued", "queued", "passive"]
        );
        assert!(!c.has_task());
    }

    #[test]
    fn test_queue_is_fifo() {
        let (mut t, _, mut c) = setup(ControllerKind::Base);
        let log = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            c.enqueue(recorder(&log, tag, 1));
        }
        assert_eq!(c.queued_names(), vec!["a", "b", "c"]);
        while c.update(&mut t.ctx()) != ActionSlot::Idle {}
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_stop_clears_only_the_queue() {
        let (mut t, e, mut c) = setup(ControllerKind::Base);
        let log = Arc::new(Mutex::new(Vec::new()));
        c.enqueue(recorder(&log, "queued", 1));
        c.set_passive_action(recorder(&log, "passive", 1));
        c.handle_event(&mut t.ctx(), &EntityEvent::StopActions { entity: e });

        assert_eq!(c.actions_remaining(), 0);
        assert!(!c.has_task());
        assert_eq!(c.update(&mut t.ctx()), ActionSlot::Passive);
    }

    #[test]
    fn test_has_task_tracks_the_queue_only() {
        let (_t, e, mut c) = setup(ControllerKind::Base);
        c.set_passive_action(Box::new(Move::new(e, Vec2::ZERO)));
        c.set_immediate_action(Box::new(Move::new(e, Vec2::ZERO)));
        assert!(!c.has_task());

        c.enqueue(Box::new(Move::new(e, Vec2::ZERO)));
        assert!(c.has_task());
        assert_eq!(c.has_task(), c.actions_remaining() != 0);
    }

    #[test]
    fn test_move_follows_reduced_path() {
        let (mut t, e, mut c) = setup(ControllerKind::Base);
        let event = EntityEvent::MoveEntity {
            entity: e,
            x: 250.0,
            y: 250.0,
        };
        c.handle_event(&mut t.ctx(), &event);
        assert_eq!(
            c.queued_destinations(),
            vec![
                Vec2::new(50.0, 50.0),
                Vec2::new(150.0, 150.0),
                Vec2::new(250.0, 250.0)
            ]
        );
    }

    #[test]
    fn test_second_move_starts_where_first_ends() {
        let (mut t, e, mut c) = setup(ControllerKind::Base);
        for (x, y) in [(250.0, 50.0), (250.0, 250.0)] {
            c.handle_event(&mut t.ctx(), &EntityEvent::MoveEntity { entity: e, x, y });
        }
        assert_eq!(
            c.queued_destinations(),
            vec![Vec2::new(250.0, 50.0), Vec2::new(250.0, 250.0)]
        );
    }

    #[test]
    fn test_move_without_map_goes_direct() {
        let mut t = TestWorld::new();
        let e = t.walker(0.0, 0.0, 1.0);
        let mut c = AgentController::new(e, ControllerKind::Base);
        c.handle_event(
            &mut t.ctx(),
            &EntityEvent::MoveEntity {
                entity: e,
                x: 900.0,
                y: 10.0,
            },
        );
        assert_eq!(c.queued_destinations(), vec![Vec2::new(900.0, 10.0)]);
    }

    #[test]
    fn test_heal_applies_at_once() {
        let (mut t, e, mut c) = setup(ControllerKind::Animal);
        t.world.get::<&mut Vitals>(e).unwrap().health = 10.0;
        c.handle_event(
            &mut t.ctx(),
            &EntityEvent::Heal {
                target: e,
                amount: 5.0,
            },
        );
        assert_eq!(t.health(e), 15.0);
        assert!(!c.has_task());
    }

    #[test]
    fn test_animal_ignores_work_events() {
        let (mut t, e, mut c) = setup(ControllerKind::Animal);
        let item = t.world.spawn((Item::default(), Position(Vec2::ZERO)));

        assert!(!c.handle_event(&mut t.ctx(), &EntityEvent::TileTill { entity: e, row: 1, col: 1 }));
        assert!(!c.handle_event(&mut t.ctx(), &EntityEvent::PickUpItem { entity: e, item }));
        assert!(!c.handle_event(&mut t.ctx(), &EntityEvent::CropGrowth { crop: e }));
        assert_eq!(c.actions_remaining(), 0);

        assert!(c.handle_event(&mut t.ctx(), &EntityEvent::MoveEntity { entity: e, x: 50.0, y: 150.0 }));
        assert_eq!(c.actions_remaining(), 1);
    }

    #[test]
    fn test_damage_needs_two_living_combatants() {
        let (mut t, e, mut c) = setup(ControllerKind::Base);
        let victim = t.walker(300.0, 50.0, 1.0);
        let event = EntityEvent::DamageDealt {
            attacker: e,
            target: victim,
            weapon: None,
        };

        c.handle_event(&mut t.ctx(), &event);
        assert_eq!(c.queued_names(), vec!["Move", "Fight"]);

        c.handle_event(&mut t.ctx(), &EntityEvent::StopActions { entity: e });
        t.world.get::<&mut Vitals>(victim).unwrap().health = 0.0;
        c.handle_event(&mut t.ctx(), &event);
        assert_eq!(c.actions_remaining(), 0);
    }

    #[test]
    fn test_work_events_queue_expected_actions() {
        let (mut t, e, mut c) = setup(ControllerKind::Base);
        let item = t.world.spawn((Item::default(), Position(Vec2::new(120.0, 80.0))));
        let tree = t.world.spawn((Position(Vec2::new(300.0, 300.0)),));
        let stockpile = {
            let grid = TileGrid::new(3, 3).unwrap();
            t.world.spawn((Stockpile::from_tiles(grid.get(1, 1)),))
        };

        let events = [
            EntityEvent::PickUpItem { entity: e, item },
            EntityEvent::DropItem { entity: e, item },
            EntityEvent::HarvestStaticEntity { entity: e, target: tree },
            EntityEvent::DepositItemInStockpile {
                entity: e,
                item,
                stockpile,
            },
            EntityEvent::TileTill {
                entity: e,
                row: 2,
                col: 3,
            },
        ];
        for event in &events {
            c.handle_event(&mut t.ctx(), event);
        }
        let mut names = c.queued_names();
        names.dedup();
        assert_eq!(
            names,
            vec![
                "Move",
                "PickupItem",
                "DropItem",
                "Move",
                "HarvestStaticEntity",
                "Move",
                "DropItem",
                "DepositInStockpile",
                "Move",
                "TillGround",
            ]
        );

        // Each walk is pathed from where the previous one ends.
        assert_eq!(
            c.queued_destinations(),
            vec![
                Vec2::new(50.0, 50.0),
                Vec2::new(120.0, 80.0),
                Vec2::new(150.0, 50.0),
                Vec2::new(250.0, 150.0),
                Vec2::new(350.0, 250.0),
                Vec2::new(300.0, 300.0),
                Vec2::new(250.0, 350.0),
                Vec2::new(150.0, 250.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(350.0, 150.0),
                Vec2::new(300.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_work_walks_route_around_stone() {
        let mut t = TestWorld::new();
        let e = t.walker(50.0, 50.0, 5.0);
        let grid = map::share(TileGrid::from_rows(&[".#.", ".#.", "..."]).unwrap());
        let mut c = AgentController::new(e, ControllerKind::Base).with_tiles(grid.clone());

        c.handle_event(&mut t.ctx(), &EntityEvent::TileTill { entity: e, row: 0, col: 2 });
        let till_walk = c.queued_destinations();

        let mut plain = AgentController::new(e, ControllerKind::Base).with_tiles(grid.clone());
        plain.handle_event(
            &mut t.ctx(),
            &EntityEvent::MoveEntity {
                entity: e,
                x: 200.0,
                y: 0.0,
            },
        );
        assert_eq!(till_walk, plain.queued_destinations());
        assert_eq!(
            till_walk,
            vec![
                Vec2::new(50.0, 150.0),
                Vec2::new(150.0, 250.0),
                Vec2::new(250.0, 150.0),
                Vec2::new(200.0, 0.0),
            ]
        );
        for waypoint in &till_walk {
            let (x, y) = map::read(&grid).clamped_tile_at(*waypoint);
            let tile = map::read(&grid).get(y as usize, x as usize).map(|m| m.tile_type());
            assert_ne!(tile, Some(TileType::Stone), "waypoint {waypoint:?} is on stone");
        }

        while c.update(&mut t.ctx()) != ActionSlot::Idle {}
        assert_eq!(map::read(&grid).get(0, 2).unwrap().tile_type(), TileType::Farmland);
    }

    #[test]
    fn test_plant_spawns_an_off_map_seed() {
        let (mut t, e, mut c) = setup(ControllerKind::Base);
        let before = t.world.len();
        c.handle_event(
            &mut t.ctx(),
            &EntityEvent::PlantCrop {
                entity: e,
                row: 1,
                col: 2,
                crop_type: CropType::Strawberry,
            },
        );
        assert_eq!(t.world.len(), before + 1);
        assert_eq!(c.queued_names(), vec!["Move", "Move", "PlantCrop"]);

        let (crop, position) = t
            .world
            .query::<(&Crop, &Position)>()
            .iter()
            .map(|(e, (_, p))| (e, p.0))
            .next()
            .unwrap();
        assert_eq!(position, Vec2::new(OFF_MAP, OFF_MAP));

        while c.update(&mut t.ctx()) != ActionSlot::Idle {}
        assert_eq!(t.position(crop), Vec2::new(200.0, 100.0));
        assert!(t.world.get::<&Crop>(crop).unwrap().is_planted());
    }

    #[test]
    fn test_till_through_controller() {
        let (mut t, e, mut c) = setup(ControllerKind::Base);
        let grid = c.tiles.clone().unwrap();
        map::write(&grid).change_tile_type(0, 1, TileType::Stone);
        for col in [0, 1] {
            c.handle_event(&mut t.ctx(), &EntityEvent::TileTill { entity: e, row: 0, col });
        }
        while c.update(&mut t.ctx()) != ActionSlot::Idle {}

        let grid = map::read(&grid);
        assert_eq!(grid.get(0, 0).unwrap().tile_type(), TileType::Farmland);
        assert_eq!(grid.get(0, 1).unwrap().tile_type(), TileType::Stone);
    }

    #[test]
    fn test_with_controller_restores_component() {
        let (mut t, e, c) = setup(ControllerKind::Base);
        t.world.insert_one(e, c).unwrap();
        with_controller(&mut t.ctx(), e, |c, _| {
            c.enqueue(Box::new(Move::new(e, Vec2::ZERO)))
        })
        .unwrap();
        assert_eq!(t.world.get::<&AgentController>(e).unwrap().actions_remaining(), 1);
    }
}
