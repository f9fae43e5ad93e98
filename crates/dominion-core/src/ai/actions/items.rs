use crate::ai::{Action, ActionContext};
use crate::components::{Inventory, Item, Position, Stockpile};
use dominion_logic::constants::{DROP_OFFSET_X, DROP_OFFSET_Y, OFF_MAP};
use dominion_logic::geometry::Vec2;
use hecs::{Entity, World};

/// Take an item into the entity's inventory.
///
/// The item is bound after construction with [`PickupItem::set_item`]; with
/// no item bound the action finishes without doing anything.
pub struct PickupItem {
    entity: Entity,
    item: Option<Entity>,
}

impl PickupItem {
    pub fn new(entity: Entity) -> Self {
        Self { entity, item: None }
    }

    pub fn set_item(&mut self, item: Entity) {
        self.item = Some(item);
    }

    pub fn item(&self) -> Option<Entity> {
        self.item
    }
}

impl Action for PickupItem {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        if let Some(item) = self.item.take() {
            pick_up(ctx.world, self.entity, item);
        }
        true
    }

    fn name(&self) -> &'static str {
        "PickupItem"
    }
}

/// Hand `item` to `holder` and park it off the map. No-op if already held.
fn pick_up(world: &mut World, holder: Entity, item: Entity) {
    {
        let Ok(mut state) = world.get::<&mut Item>(item) else {
            return;
        };
        if state.is_held() {
            return;
        }
        state.held_by = Some(holder);
    }
    if let Ok(mut position) = world.get::<&mut Position>(item) {
        position.0 = Vec2::new(OFF_MAP, OFF_MAP);
    }
    if let Ok(mut inventory) = world.get::<&mut Inventory>(holder) {
        inventory.add(item);
    }
}

/// Take an item out of the entity's inventory and set it down beside the holder.
pub struct DropItem {
    entity: Entity,
    item: Entity,
}

impl DropItem {
    pub fn new(entity: Entity, item: Entity) -> Self {
        Self { entity, item }
    }
}

impl Action for DropItem {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let world = &mut *ctx.world;
        if let Ok(mut inventory) = world.get::<&mut Inventory>(self.entity) {
            inventory.remove(self.item);
        }

        let holder = world.get::<&Item>(self.item).ok().and_then(|i| i.held_by);
        let Some(holder) = holder else {
            return true;
        };

        let origin = world
            .get::<&Position>(holder)
            .map(|p| p.0)
            .unwrap_or_default();
        if let Ok(mut inventory) = world.get::<&mut Inventory>(holder) {
            inventory.remove(self.item);
        }
        if let Ok(mut position) = world.get::<&mut Position>(self.item) {
            position.0 = origin + Vec2::new(DROP_OFFSET_X, DROP_OFFSET_Y);
        }
        if let Ok(mut state) = world.get::<&mut Item>(self.item) {
            state.held_by = None;
        }
        true
    }

    fn name(&self) -> &'static str {
        "DropItem"
    }
}

/// Store an item in the first free stockpile slot.
pub struct DepositInStockpile {
    item: Entity,
    stockpile: Entity,
}

impl DepositInStockpile {
    pub fn new(item: Entity, stockpile: Entity) -> Self {
        Self { item, stockpile }
    }
}

impl Action for DepositInStockpile {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let spot = ctx
            .world
            .get::<&mut Stockpile>(self.stockpile)
            .ok()
            .and_then(|mut s| s.add_item(self.item));

        match spot {
            Some(location) => {
                if let Ok(mut position) = ctx.world.get::<&mut Position>(self.item) {
                    position.0 = location;
                }
            }
            None => log::warn!(
                "stockpile {:?} has no room for item {:?}",
                self.stockpile,
                self.item
            ),
        }
        true
    }

    fn name(&self) -> &'static str {
        "DepositInStockpile"
    }
}
