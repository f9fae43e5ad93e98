use crate::ai::{Action, ActionContext};
use crate::components::{MovementSpeed, Position};
use dominion_logic::constants::{ARRIVAL_TOLERANCE, DEFAULT_MOVEMENT_SPEED};
use dominion_logic::geometry::Vec2;
use hecs::Entity;

/// Walk toward a point at the entity's movement speed on each axis.
pub struct Move {
    entity: Entity,
    destination: Vec2,
    tolerance: f32,
}

impl Move {
    pub fn new(entity: Entity, destination: Vec2) -> Self {
        Self {
            entity,
            destination,
            tolerance: ARRIVAL_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }
}

impl Action for Move {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let speed = ctx
            .world
            .get::<&MovementSpeed>(self.entity)
            .map(|s| s.0)
            .unwrap_or(DEFAULT_MOVEMENT_SPEED);

        let Ok(mut position) = ctx.world.get::<&mut Position>(self.entity) else {
            return true;
        };
        position.0 = position.0.step_toward(&self.destination, speed);
        position.0.distance(&self.destination) <= self.tolerance
    }

    fn move_destination(&self) -> Option<Vec2> {
        Some(self.destination)
    }

    fn name(&self) -> &'static str {
        "Move"
    }
}
