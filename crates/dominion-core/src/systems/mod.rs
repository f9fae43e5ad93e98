//! Systems - per-tick logic over the world

mod agents;
mod needs;

pub use agents::*;
pub use needs::*;
