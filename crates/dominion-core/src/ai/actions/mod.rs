//! Concrete actions.

mod farming;
mod fight;
mod harvest;
mod health;
mod items;
mod movement;

pub use farming::*;
pub use fight::*;
pub use harvest::*;
pub use health::*;
pub use items::*;
pub use movement::*;
