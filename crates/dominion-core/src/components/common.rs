//! Components shared by every kind of entity.

use dominion_logic::geometry::Vec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(1);

/// Process-wide entity id. Never reused, never changed after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Allocate the next id. Ids only ever increase.
    pub fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name(pub String);

/// World position in units; one tile is `TILE_SIZE` units wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Units moved per tick along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementSpeed(pub f32);

/// Health and liveness.
///
/// Writers keep `0 <= health <= max_health`. `alive` flips to false once,
/// when health is driven to zero by combat or starvation, and never back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            alive: true,
        }
    }

    /// Add `|amount|` health, capped at max.
    pub fn increment(&mut self, amount: f32) {
        self.health = (self.health + amount.abs()).min(self.max_health);
    }

    /// Remove `|amount|` health, floored at zero.
    pub fn decrement(&mut self, amount: f32) {
        self.health = (self.health - amount.abs()).max(0.0);
    }

    /// Mark dead if health is depleted. Returns true only on the transition.
    pub fn mark_dead_if_depleted(&mut self) -> bool {
        if self.health <= 0.0 && self.alive {
            self.health = 0.0;
            self.alive = false;
            true
        } else {
            false
        }
    }
}

/// Items an entity is carrying. An item is in at most one inventory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory(pub Vec<Entity>);

impl Inventory {
    pub fn contains(&self, item: Entity) -> bool {
        self.0.contains(&item)
    }

    /// Add an item unless it is already held.
    pub fn add(&mut self, item: Entity) {
        if !self.contains(item) {
            self.0.push(item);
        }
    }

    pub fn remove(&mut self, item: Entity) -> bool {
        let before = self.0.len();
        self.0.retain(|&held| held != item);
        self.0.len() != before
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Visual state a renderer would pick a sprite from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Normal,
    Hurt,
}
