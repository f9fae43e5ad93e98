//! Agent system - one controller step per living agent per tick

use crate::ai::{with_controller, ActionContext, AgentController};
use crate::components::{Colonist, Crop, Vitals};
use crate::events::{route_event, EntityEvent};
use hecs::Entity;

/// Advance every living agent's controller once, then feed colonists their
/// hunger tick and un-grown crops their growth tick.
///
/// Dead agents are skipped but never despawned.
pub fn agent_system(ctx: &mut ActionContext<'_>) {
    let agents: Vec<Entity> = ctx
        .world
        .query::<&AgentController>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in agents {
        let alive = ctx.world.get::<&Vitals>(entity).map_or(true, |v| v.alive);
        if !alive {
            continue;
        }

        if with_controller(ctx, entity, |controller, ctx| controller.update(ctx)).is_err() {
            continue;
        }

        let follow_up = if ctx.world.get::<&Colonist>(entity).is_ok() {
            Some(EntityEvent::UpdateHunger { colonist: entity })
        } else {
            match ctx.world.get::<&Crop>(entity) {
                Ok(crop) if !crop.is_grown() => Some(EntityEvent::CropGrowth { crop: entity }),
                _ => None,
            }
        };
        if let Some(event) = follow_up {
            // Recipient was just updated, so routing cannot fail.
            let _ = route_event(ctx, &event);
        }
    }
}
