use crate::ai::{Action, ActionContext};
use crate::components::Vitals;
use hecs::{Entity, World};

/// Clamped health adjustments, used directly by event handlers.
pub struct UpdateHealth {
    entity: Entity,
}

impl UpdateHealth {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn increment(&self, world: &mut World, amount: f32) {
        if let Ok(mut vitals) = world.get::<&mut Vitals>(self.entity) {
            vitals.increment(amount);
        }
    }

    pub fn decrement(&self, world: &mut World, amount: f32) {
        if let Ok(mut vitals) = world.get::<&mut Vitals>(self.entity) {
            vitals.decrement(amount);
        }
    }
}

impl Action for UpdateHealth {
    fn advance(&mut self, _ctx: &mut ActionContext<'_>) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "UpdateHealth"
    }
}
