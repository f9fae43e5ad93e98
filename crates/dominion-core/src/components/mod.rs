//! Component definitions for the ECS simulation.
//!
//! Components are plain data attached to entities. Behavior lives in the
//! actions and controllers under [`crate::ai`] and in [`crate::systems`].

mod agents;
mod common;
mod items;
mod structures;

pub use agents::*;
pub use common::*;
pub use items::*;
pub use structures::*;
