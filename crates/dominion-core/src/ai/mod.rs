//! Agent behavior: the action abstraction, concrete actions, and the
//! per-entity controller that queues and advances them.
//!
//! Every tick a controller advances exactly one action: the immediate slot if
//! occupied, else the head of its FIFO queue, else its passive slot. Actions
//! reach the rest of the simulation only through [`ActionContext`].

pub mod actions;
mod controller;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::*;

use crate::clock::GameClock;
use dominion_logic::geometry::Vec2;
use hecs::World;
use rand::rngs::StdRng;

/// Everything an action or event handler may touch during one call.
pub struct ActionContext<'a> {
    pub world: &'a mut World,
    pub clock: &'a GameClock,
    pub rng: &'a mut StdRng,
}

/// One unit of per-tick work.
///
/// Actions hold only what they captured at construction: entity handles,
/// targets and numbers. `advance` runs synchronously and reports whether the
/// action is finished. Actions whose targets have vanished from the world
/// finish without effect.
pub trait Action: Send + Sync {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool;

    /// Where this action walks to, if it is a movement step.
    fn move_destination(&self) -> Option<Vec2> {
        None
    }

    fn name(&self) -> &'static str;
}
