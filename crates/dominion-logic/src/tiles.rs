//! Tile grid: per-cell terrain type and enterability.
//!
//! The grid is a fixed-size row-major array of [`MapTile`]s. Tile `(row, col)`
//! covers world coordinates `[col * TILE_SIZE, (col + 1) * TILE_SIZE)` on the
//! x-axis and the same span of rows on the y-axis.

use crate::constants::{TILE_OFFSET, TILE_SIZE};
use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Terrain carried by a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    None,
    Dirt,
    Stone,
    Water,
    Farmland,
    Building,
}

impl TileType {
    /// Whether an entity may stand on this terrain.
    pub fn is_enterable(self) -> bool {
        !matches!(self, TileType::Stone | TileType::Water | TileType::Building)
    }

    /// Single-character form used by [`TileGrid::from_rows`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(TileType::Dirt),
            '#' => Some(TileType::Stone),
            '~' => Some(TileType::Water),
            'F' => Some(TileType::Farmland),
            'B' => Some(TileType::Building),
            ' ' => Some(TileType::None),
            _ => None,
        }
    }
}

/// One cell of the grid. Coordinates are fixed; the type is not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapTile {
    pub row: usize,
    pub col: usize,
    tile_type: TileType,
    can_enter: bool,
}

impl MapTile {
    pub fn new(row: usize, col: usize, tile_type: TileType) -> Self {
        Self {
            row,
            col,
            tile_type,
            can_enter: tile_type.is_enterable(),
        }
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn can_enter(&self) -> bool {
        self.can_enter
    }

    /// Set the terrain and recompute enterability.
    pub fn change_tile_type(&mut self, tile_type: TileType) {
        self.tile_type = tile_type;
        self.can_enter = tile_type.is_enterable();
    }

    /// Top-left corner of the tile in world coordinates.
    pub fn location(&self) -> Vec2 {
        tile_location(self.row, self.col)
    }

    /// Center of the tile in world coordinates.
    pub fn center(&self) -> Vec2 {
        tile_center(self.row, self.col)
    }
}

/// Top-left corner of tile `(row, col)`.
pub fn tile_location(row: usize, col: usize) -> Vec2 {
    Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE)
}

/// Center of tile `(row, col)`.
pub fn tile_center(row: usize, col: usize) -> Vec2 {
    Vec2::new(
        col as f32 * TILE_SIZE + TILE_OFFSET,
        row as f32 * TILE_SIZE + TILE_OFFSET,
    )
}

/// Errors raised while building a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must have at least one tile, got {rows}x{cols}")]
    Empty { rows: usize, cols: usize },
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown tile character {0:?}")]
    UnknownTile(char),
}

/// Fixed-size 2D tile array owned by the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<MapTile>,
}

impl TileGrid {
    /// Create a grid filled with dirt.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(rows, cols, TileType::Dirt)
    }

    pub fn filled(rows: usize, cols: usize, tile_type: TileType) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        let tiles = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| MapTile::new(row, col, tile_type)))
            .collect();
        Ok(Self { rows, cols, tiles })
    }

    /// Parse a grid from text rows, one character per tile.
    ///
    /// `.` dirt, `#` stone, `~` water, `F` farmland, `B` building, space none.
    pub fn from_rows(lines: &[&str]) -> Result<Self, GridError> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut grid = Self::new(rows, cols)?;
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::Ragged {
                    row,
                    found,
                    expected: cols,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let tile_type = TileType::from_char(c).ok_or(GridError::UnknownTile(c))?;
                grid.tiles[row * cols + col].change_tile_type(tile_type);
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&MapTile> {
        if row < self.rows && col < self.cols {
            self.tiles.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut MapTile> {
        if row < self.rows && col < self.cols {
            self.tiles.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Whether tile `(row, col)` exists and can be entered.
    ///
    /// Signed so callers can probe neighbors of edge tiles directly.
    pub fn can_enter(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.get(row as usize, col as usize)
            .map(MapTile::can_enter)
            .unwrap_or(false)
    }

    /// Change the type of tile `(row, col)`. Returns false if out of range.
    pub fn change_tile_type(&mut self, row: usize, col: usize, tile_type: TileType) -> bool {
        match self.get_mut(row, col) {
            Some(tile) => {
                tile.change_tile_type(tile_type);
                true
            }
            None => false,
        }
    }

    /// Tile containing a world position, clamped into the grid on each axis.
    ///
    /// Returns `(col, row)`, i.e. tile x then tile y.
    pub fn clamped_tile_at(&self, position: Vec2) -> (i32, i32) {
        let x = (position.x / TILE_SIZE).floor() as i32;
        let y = (position.y / TILE_SIZE).floor() as i32;
        (
            x.clamp(0, self.cols as i32 - 1),
            y.clamp(0, self.rows as i32 - 1),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapTile> {
        self.tiles.iter()
    }

    pub fn count_of(&self, tile_type: TileType) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.tile_type() == tile_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_enter_by_type() {
        assert!(TileType::Dirt.is_enterable());
        assert!(TileType::Farmland.is_enterable());
        assert!(TileType::None.is_enterable());
        assert!(!TileType::Stone.is_enterable());
        assert!(!TileType::Water.is_enterable());
        assert!(!TileType::Building.is_enterable());
    }

    #[test]
    fn test_change_tile_type_recomputes_can_enter() {
        let mut grid = TileGrid::new(2, 2).unwrap();
        assert!(grid.can_enter(1, 1));
        assert!(grid.change_tile_type(1, 1, TileType::Stone));
        assert!(!grid.can_enter(1, 1));
        grid.change_tile_type(1, 1, TileType::Farmland);
        assert!(grid.can_enter(1, 1));
    }

    #[test]
    fn test_out_of_bounds_is_not_enterable() {
        let mut grid = TileGrid::new(3, 3).unwrap();
        assert!(!grid.can_enter(-1, 0));
        assert!(!grid.can_enter(0, -1));
        assert!(!grid.can_enter(3, 0));
        assert!(!grid.can_enter(0, 3));
        assert!(!grid.change_tile_type(3, 3, TileType::Water));
        assert!(grid.get(3, 3).is_none());
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            TileGrid::new(0, 5),
            Err(GridError::Empty { rows: 0, cols: 5 })
        );
    }

    #[test]
    fn test_from_rows() {
        let grid = TileGrid::from_rows(&["..#", "~F."]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(0, 2).unwrap().tile_type(), TileType::Stone);
        assert_eq!(grid.get(1, 0).unwrap().tile_type(), TileType::Water);
        assert_eq!(grid.get(1, 1).unwrap().tile_type(), TileType::Farmland);
        assert!(matches!(
            TileGrid::from_rows(&["..", "."]),
            Err(GridError::Ragged { row: 1, .. })
        ));
        assert_eq!(
            TileGrid::from_rows(&["x"]),
            Err(GridError::UnknownTile('x'))
        );
    }

    #[test]
    fn test_tile_location_and_center() {
        assert_eq!(tile_location(2, 3), Vec2::new(300.0, 200.0));
        assert_eq!(tile_center(2, 3), Vec2::new(350.0, 250.0));
    }

    #[test]
    fn test_clamped_tile_at() {
        let grid = TileGrid::new(4, 5).unwrap();
        assert_eq!(grid.clamped_tile_at(Vec2::new(250.0, 120.0)), (2, 1));
        assert_eq!(grid.clamped_tile_at(Vec2::new(-30.0, 9000.0)), (0, 3));
        assert_eq!(grid.clamped_tile_at(Vec2::new(99999.0, -1.0)), (4, 0));
    }
}
