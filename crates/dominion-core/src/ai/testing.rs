//! Test scaffolding: a bare world with a clock and a seeded RNG.

use super::ActionContext;
use crate::clock::GameClock;
use crate::components::*;
use dominion_logic::geometry::Vec2;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub(crate) struct TestWorld {
    pub world: World,
    pub clock: GameClock,
    pub rng: StdRng,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            clock: GameClock::new(),
            rng: StdRng::seed_from_u64(1),
        }
    }

    pub fn ctx(&mut self) -> ActionContext<'_> {
        ActionContext {
            world: &mut self.world,
            clock: &self.clock,
            rng: &mut self.rng,
        }
    }

    /// A minimal walker: position, speed, health and an empty inventory.
    pub fn walker(&mut self, x: f32, y: f32, speed: f32) -> Entity {
        self.world.spawn((
            EntityId::next(),
            Position(Vec2::new(x, y)),
            MovementSpeed(speed),
            Vitals::new(40.0),
            Inventory::default(),
        ))
    }

    pub fn position(&self, entity: Entity) -> Vec2 {
        self.world.get::<&Position>(entity).map(|p| p.0).unwrap()
    }

    pub fn health(&self, entity: Entity) -> f32 {
        self.world.get::<&Vitals>(entity).map(|v| v.health).unwrap()
    }
}
