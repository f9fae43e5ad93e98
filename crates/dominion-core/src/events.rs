//! The closed set of events agents react to, and the router that delivers
//! each one to the controller of the entity it is addressed to.

use crate::ai::{with_controller, ActionContext};
use crate::error::SimError;
use dominion_logic::growth::CropType;
use hecs::Entity;

/// A request for an entity to do something.
///
/// Events carry just enough to build the actions that carry them out and
/// are consumed by exactly one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityEvent {
    MoveEntity {
        entity: Entity,
        x: f32,
        y: f32,
    },
    /// Delivered to the attacker, who walks over and starts a fight.
    DamageDealt {
        attacker: Entity,
        target: Entity,
        weapon: Option<Entity>,
    },
    Heal {
        target: Entity,
        amount: f32,
    },
    PickUpItem {
        entity: Entity,
        item: Entity,
    },
    DropItem {
        entity: Entity,
        item: Entity,
    },
    HarvestStaticEntity {
        entity: Entity,
        target: Entity,
    },
    UpdateHunger {
        colonist: Entity,
    },
    DepositItemInStockpile {
        entity: Entity,
        item: Entity,
        stockpile: Entity,
    },
    CropGrowth {
        crop: Entity,
    },
    StopActions {
        entity: Entity,
    },
    TileTill {
        entity: Entity,
        row: usize,
        col: usize,
    },
    PlantCrop {
        entity: Entity,
        row: usize,
        col: usize,
        crop_type: CropType,
    },
}

impl EntityEvent {
    /// The entity whose controller handles this event.
    pub fn recipient(&self) -> Entity {
        match *self {
            EntityEvent::MoveEntity { entity, .. }
            | EntityEvent::PickUpItem { entity, .. }
            | EntityEvent::DropItem { entity, .. }
            | EntityEvent::HarvestStaticEntity { entity, .. }
            | EntityEvent::DepositItemInStockpile { entity, .. }
            | EntityEvent::StopActions { entity }
            | EntityEvent::TileTill { entity, .. }
            | EntityEvent::PlantCrop { entity, .. } => entity,
            EntityEvent::DamageDealt { attacker, .. } => attacker,
            EntityEvent::Heal { target, .. } => target,
            EntityEvent::UpdateHunger { colonist } => colonist,
            EntityEvent::CropGrowth { crop } => crop,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EntityEvent::MoveEntity { .. } => "MoveEntity",
            EntityEvent::DamageDealt { .. } => "DamageDealt",
            EntityEvent::Heal { .. } => "Heal",
            EntityEvent::PickUpItem { .. } => "PickUpItem",
            EntityEvent::DropItem { .. } => "DropItem",
            EntityEvent::HarvestStaticEntity { .. } => "HarvestStaticEntity",
            EntityEvent::UpdateHunger { .. } => "UpdateHunger",
            EntityEvent::DepositItemInStockpile { .. } => "DepositItemInStockpile",
            EntityEvent::CropGrowth { .. } => "CropGrowth",
            EntityEvent::StopActions { .. } => "StopActions",
            EntityEvent::TileTill { .. } => "TileTill",
            EntityEvent::PlantCrop { .. } => "PlantCrop",
        }
    }
}

/// Deliver `event` to its recipient's controller.
///
/// Fails only when the recipient is missing or has no controller. An event
/// the recipient's kind does not act on is dropped without error.
pub fn route_event(ctx: &mut ActionContext<'_>, event: &EntityEvent) -> Result<(), SimError> {
    let recipient = event.recipient();
    let result = with_controller(ctx, recipient, |controller, ctx| {
        controller.handle_event(ctx, event);
    });
    if let Err(err) = &result {
        log::warn!("dropping {} event: {}", event.name(), err);
    }
    result
}
