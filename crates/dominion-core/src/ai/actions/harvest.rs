use crate::ai::{Action, ActionContext};
use crate::components::{Harvestable, Inventory, Position, Tool, Vitals};
use dominion_logic::constants::MAX_HARVEST_DISTANCE;
use dominion_logic::geometry::Vec2;
use hecs::{Entity, World};

/// Chip away at a static entity with the best tool the harvester carries.
///
/// Each in-range tick removes `tool quality * 0.1` health. Finishes when the
/// target is on the ground or when a swing could not land (out of reach,
/// wrong tool, already felled).
pub struct HarvestStaticEntity {
    entity: Entity,
    target: Entity,
    tool: Option<Tool>,
}

/// Health removed per swing, per unit of tool quality.
pub const HARVEST_RATE: f32 = 0.1;

impl HarvestStaticEntity {
    pub fn new(entity: Entity, target: Entity) -> Self {
        Self {
            entity,
            target,
            tool: None,
        }
    }

    /// Tool chosen on the first advance, if any advance has happened.
    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }
}

/// Highest-quality carried tool that works on `target`; bare hands if none.
fn best_tool(world: &World, entity: Entity, target: &Harvestable) -> Tool {
    let Ok(inventory) = world.get::<&Inventory>(entity) else {
        return Tool::bare_hands();
    };
    let mut usable = inventory
        .0
        .iter()
        .filter_map(|&item| world.get::<&Tool>(item).ok().map(|t| *t))
        .filter(|tool| target.can_interact(tool.tool_type));

    let first = usable.next().unwrap_or_else(Tool::bare_hands);
    usable.fold(first, |best, tool| {
        if tool.quality > best.quality {
            tool
        } else {
            best
        }
    })
}

fn position(world: &World, entity: Entity) -> Option<Vec2> {
    world.get::<&Position>(entity).map(|p| p.0).ok()
}

impl Action for HarvestStaticEntity {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let world = &mut *ctx.world;
        let Ok(target) = world.get::<&Harvestable>(self.target).map(|h| *h) else {
            return true;
        };
        let tool = match self.tool {
            Some(tool) => tool,
            None => {
                let tool = best_tool(world, self.entity, &target);
                self.tool = Some(tool);
                tool
            }
        };

        let in_range = match (position(world, self.entity), position(world, self.target)) {
            (Some(a), Some(b)) => a.distance(&b) <= MAX_HARVEST_DISTANCE,
            _ => false,
        };

        let mut harvested = false;
        let mut on_ground = target.on_ground;
        if in_range && target.can_interact(tool.tool_type) && !target.on_ground {
            if let Ok((state, vitals)) =
                world.query_one_mut::<(&mut Harvestable, &mut Vitals)>(self.target)
            {
                harvested = true;
                vitals.health = (vitals.health - tool.quality * HARVEST_RATE).max(0.0);
                if vitals.health <= 0.0 {
                    state.on_ground = true;
                    on_ground = true;
                    log::debug!("{:?} harvested {:?}", self.entity, self.target);
                }
            }
        }

        !harvested || on_ground
    }

    fn name(&self) -> &'static str {
        "HarvestStaticEntity"
    }
}
