//! The tile grid as shared between the world and agent controllers.
//!
//! Controllers keep a handle to the grid for pathfinding, and tilling
//! rewrites tiles in place. The lock is only ever taken on the tick thread,
//! so contention never happens; it exists so the grid can live inside ECS
//! components, which must be `Send + Sync`.

use dominion_logic::tiles::TileGrid;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type SharedGrid = Arc<RwLock<TileGrid>>;

pub fn share(grid: TileGrid) -> SharedGrid {
    Arc::new(RwLock::new(grid))
}

pub fn read(grid: &SharedGrid) -> RwLockReadGuard<'_, TileGrid> {
    grid.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write(grid: &SharedGrid) -> RwLockWriteGuard<'_, TileGrid> {
    grid.write().unwrap_or_else(PoisonError::into_inner)
}
