//! Fixed world constants shared by the logic and simulation crates.

/// Edge length of one map tile in world units.
pub const TILE_SIZE: f32 = 100.0;

/// Offset from a tile's top-left corner to its center.
pub const TILE_OFFSET: f32 = 50.0;

/// Longest ideal path the pathfinder builds before it gives up and jumps.
pub const MAX_IDEAL_PATH: usize = 150;

/// Default distance at which a move counts as arrived.
pub const ARRIVAL_TOLERANCE: f32 = 10.0;

/// Furthest an entity can stand from a static entity and still harvest it.
pub const MAX_HARVEST_DISTANCE: f32 = 15.0;

/// Number of item slots in one stockpile zone.
pub const STOCKPILE_ZONE_CAPACITY: usize = 4;

/// Where held or unplaced entities are parked, outside any map.
pub const OFF_MAP: f32 = -5000.0;

/// Offset from the holder's position at which a dropped item lands.
pub const DROP_OFFSET_X: f32 = 40.0;
pub const DROP_OFFSET_Y: f32 = 25.0;

/// Seconds of game time per hunger or crop growth interval.
pub const GROWTH_INTERVAL: f64 = 10.0;

/// Default movement speed for colonists and items.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 1.0;
