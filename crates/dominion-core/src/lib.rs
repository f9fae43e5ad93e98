//! Dominion Core - Colony Simulation Engine
//!
//! Colonists, animals, items and crops living on a tile map. Each agent owns
//! a controller that queues small actions (walk, pick up, chop, fight, till)
//! and advances one of them per tick. Outside code steers agents by
//! dispatching [`events::EntityEvent`]s.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Colonists, animals, items, trees, crops, stockpiles
//! - **Components**: Pure data attached to entities (Position, Vitals, Colonist, etc.)
//! - **Controllers**: Per-entity action queues fed by events ([`ai`])
//! - **Systems**: Logic that runs over all entities each tick
//!
//! Pure rules (pathfinding, combat math, growth and hunger timers) live in
//! `dominion-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use dominion_core::prelude::*;
//!
//! let mut game = GameWorld::new(SimConfig::default()).unwrap();
//! let colonist = game.population().colonists[0];
//!
//! game.dispatch(EntityEvent::MoveEntity { entity: colonist, x: 800.0, y: 450.0 })
//!     .unwrap();
//!
//! loop {
//!     game.update(1.0 / 60.0); // 60 FPS
//! }
//! ```

pub mod ai;
pub mod clock;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod generation;
pub mod map;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::ai::{Action, ActionContext, AgentController, ControllerKind};
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::GameWorld;
    pub use crate::error::SimError;
    pub use crate::events::EntityEvent;
}
