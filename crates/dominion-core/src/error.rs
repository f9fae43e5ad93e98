//! Errors surfaced by the simulation engine.

use dominion_logic::tiles::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("entity {0:?} is not in the world")]
    UnknownEntity(hecs::Entity),

    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: hecs::Entity,
        component: &'static str,
    },

    #[error("invalid tile grid: {0}")]
    Grid(#[from] GridError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
