//! Static entities: harvestables, crops and stockpiles.

use super::ToolType;
use dominion_logic::constants::{STOCKPILE_ZONE_CAPACITY, TILE_OFFSET};
use dominion_logic::geometry::Vec2;
use dominion_logic::growth::{CropGrowth, CropType};
use dominion_logic::tiles::{tile_location, MapTile, TileType};
use hecs::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticKind {
    Crop,
    Furniture,
    Ore,
    Tree,
    Spaceship,
}

impl StaticKind {
    /// Tool needed to harvest this kind of entity.
    pub fn required_tool(self) -> ToolType {
        match self {
            StaticKind::Tree => ToolType::Axe,
            StaticKind::Ore => ToolType::Pickaxe,
            StaticKind::Crop => ToolType::Hoe,
            StaticKind::Furniture | StaticKind::Spaceship => ToolType::Hammer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StaticKind::Crop => "Crop",
            StaticKind::Furniture => "Furniture",
            StaticKind::Ore => "Ore",
            StaticKind::Tree => "Tree",
            StaticKind::Spaceship => "Spaceship",
        }
    }
}

/// A static entity that can be chopped, mined or reaped with the right tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harvestable {
    pub kind: StaticKind,
    pub required_tool: ToolType,
    /// Set once the entity has been harvested down to nothing.
    pub on_ground: bool,
}

impl Harvestable {
    pub fn new(kind: StaticKind, required_tool: ToolType) -> Self {
        Self {
            kind,
            required_tool,
            on_ground: false,
        }
    }

    /// Whether a tool of this type works on this entity.
    pub fn can_interact(&self, tool_type: ToolType) -> bool {
        self.required_tool == tool_type || self.required_tool == ToolType::None
    }
}

/// A planted crop and its growth timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub crop_type: CropType,
    pub growth: CropGrowth,
}

impl Crop {
    pub fn planted_at(crop_type: CropType, time: f64) -> Self {
        Self {
            crop_type,
            growth: CropGrowth::planted_at(time),
        }
    }

    /// A seed that will not grow until planted.
    pub fn unplanted(crop_type: CropType) -> Self {
        let mut growth = CropGrowth::planted_at(0.0);
        growth.planted = false;
        Self { crop_type, growth }
    }

    pub fn is_planted(&self) -> bool {
        self.growth.planted
    }

    pub fn is_grown(&self) -> bool {
        self.growth.grown
    }
}

/// One tile of a stockpile with room for four items.
#[derive(Debug, Clone, PartialEq)]
pub struct StockpileZone {
    pub row: usize,
    pub col: usize,
    slots: [Option<Entity>; STOCKPILE_ZONE_CAPACITY],
}

impl StockpileZone {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            slots: [None; STOCKPILE_ZONE_CAPACITY],
        }
    }

    /// Place an item in the first free slot; returns where it should sit.
    ///
    /// Slots fill the tile's quadrants left to right, top to bottom.
    pub fn add_item(&mut self, item: Entity) -> Option<Vec2> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(item);
        let origin = tile_location(self.row, self.col);
        let dx = if slot % 2 == 1 { TILE_OFFSET } else { 0.0 };
        let dy = if slot > 1 { TILE_OFFSET } else { 0.0 };
        Some(Vec2::new(origin.x + dx, origin.y + dy))
    }

    pub fn remove_item(&mut self, item: Entity) -> bool {
        let mut removed = false;
        for slot in self.slots.iter_mut() {
            if *slot == Some(item) {
                *slot = None;
                removed = true;
            }
        }
        removed
    }

    pub fn items(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn has_room(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    pub fn is_same_tile(&self, row: usize, col: usize) -> bool {
        self.row == row && self.col == col
    }

    /// Same tile or sharing an edge with it.
    pub fn is_touching(&self, row: usize, col: usize) -> bool {
        self.row.abs_diff(row) + self.col.abs_diff(col) <= 1
    }
}

/// A group of dirt tiles used for storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stockpile {
    zones: Vec<StockpileZone>,
    center: Vec2,
}

impl Stockpile {
    /// Build from selected tiles. Only dirt tiles become zones.
    pub fn from_tiles<'a>(tiles: impl IntoIterator<Item = &'a MapTile>) -> Self {
        let mut stockpile = Self::default();
        stockpile.add_tiles(tiles);
        stockpile
    }

    /// Add dirt tiles that are not already zones.
    pub fn add_tiles<'a>(&mut self, tiles: impl IntoIterator<Item = &'a MapTile>) {
        for tile in tiles {
            let duplicate = self.zones.iter().any(|z| z.is_same_tile(tile.row, tile.col));
            if !duplicate && tile.tile_type() == TileType::Dirt {
                self.zones.push(StockpileZone::new(tile.row, tile.col));
            }
        }
        self.center = self.compute_center();
    }

    /// Midpoint of the bounding box of the zones' top-left corners.
    fn compute_center(&self) -> Vec2 {
        let mut corners = self.zones.iter().map(|z| tile_location(z.row, z.col));
        let Some(first) = corners.next() else {
            return Vec2::ZERO;
        };
        let (min, max) = corners.fold((first, first), |(min, max), p| {
            (
                Vec2::new(min.x.min(p.x), min.y.min(p.y)),
                Vec2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Vec2::new((max.x - min.x) / 2.0 + min.x, (max.y - min.y) / 2.0 + min.y)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn zones(&self) -> &[StockpileZone] {
        &self.zones
    }

    /// Store an item in the first zone with room; returns its new location.
    pub fn add_item(&mut self, item: Entity) -> Option<Vec2> {
        self.zones
            .iter_mut()
            .find(|z| z.has_room())
            .and_then(|z| z.add_item(item))
    }

    pub fn remove_item(&mut self, item: Entity) -> bool {
        self.zones
            .iter_mut()
            .fold(false, |removed, z| z.remove_item(item) || removed)
    }

    pub fn items(&self) -> Vec<Entity> {
        self.zones.iter().flat_map(StockpileZone::items).collect()
    }

    pub fn is_full(&self) -> bool {
        self.items().len() == self.zones.len() * STOCKPILE_ZONE_CAPACITY
    }

    /// Whether any of `tiles` overlaps or borders this stockpile.
    pub fn is_touching<'a>(&self, tiles: impl IntoIterator<Item = &'a MapTile>) -> bool {
        tiles
            .into_iter()
            .any(|t| self.zones.iter().any(|z| z.is_touching(t.row, t.col)))
    }
}
