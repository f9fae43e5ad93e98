//! Pure colony logic for Dominion.
//!
//! Everything here works on plain data: no ECS, no clock, no RNG. Callers
//! pass in the current time and random rolls, which keeps the rules
//! deterministic and unit-testable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`combat`] | Melee tiers, hit chance, weapon damage |
//! | [`constants`] | Tile size, path ceiling, distances, off-map location |
//! | [`geometry`] | 2D world coordinates and per-axis stepping |
//! | [`growth`] | Crop growth timer and stages |
//! | [`hunger`] | Colonist battery drain, mood and starvation |
//! | [`pathfinding`] | Greedy tile pathfinder with backtracking |
//! | [`skills`] | Colonist skill levels |
//! | [`tiles`] | Tile types, map tiles and the tile grid |

pub mod combat;
pub mod constants;
pub mod geometry;
pub mod growth;
pub mod hunger;
pub mod pathfinding;
pub mod skills;
pub mod tiles;
