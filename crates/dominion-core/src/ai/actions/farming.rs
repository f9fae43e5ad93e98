use crate::ai::{Action, ActionContext};
use crate::components::{Crop, Position, Vitals};
use crate::map::{self, SharedGrid};
use dominion_logic::tiles::{tile_location, TileType};
use hecs::Entity;

/// Background growth tick for a crop.
///
/// Not queued: the crop's owner calls it every tick and ignores the result,
/// so it always reports done.
pub struct GrowCrop {
    crop: Entity,
}

impl GrowCrop {
    pub fn new(crop: Entity) -> Self {
        Self { crop }
    }
}

impl Action for GrowCrop {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let now = ctx.clock.time;
        if let Ok((crop, vitals)) = ctx.world.query_one_mut::<(&mut Crop, &mut Vitals)>(self.crop) {
            let was_grown = crop.is_grown();
            crop.growth.advance(now, &mut vitals.health);
            if crop.is_grown() && !was_grown {
                log::debug!("{:?} crop {:?} fully grown", crop.crop_type, self.crop);
            }
        }
        true
    }

    fn name(&self) -> &'static str {
        "GrowCrop"
    }
}

/// Turn a dirt tile into farmland. Any other tile is left alone.
pub struct TillGround {
    tiles: SharedGrid,
    row: usize,
    col: usize,
}

impl TillGround {
    pub fn new(tiles: SharedGrid, row: usize, col: usize) -> Self {
        Self { tiles, row, col }
    }
}

impl Action for TillGround {
    fn advance(&mut self, _ctx: &mut ActionContext<'_>) -> bool {
        let mut grid = map::write(&self.tiles);
        let tillable = grid
            .get(self.row, self.col)
            .map_or(false, |t| t.tile_type() == TileType::Dirt);
        if tillable {
            grid.change_tile_type(self.row, self.col, TileType::Farmland);
        }
        true
    }

    fn name(&self) -> &'static str {
        "TillGround"
    }
}

/// Put a seed crop on its tile and start its growth clock.
pub struct PlantCrop {
    crop: Entity,
    row: usize,
    col: usize,
}

impl PlantCrop {
    pub fn new(crop: Entity, row: usize, col: usize) -> Self {
        Self { crop, row, col }
    }
}

impl Action for PlantCrop {
    fn advance(&mut self, ctx: &mut ActionContext<'_>) -> bool {
        let now = ctx.clock.time;
        if let Ok((crop, position)) = ctx.world.query_one_mut::<(&mut Crop, &mut Position)>(self.crop) {
            position.0 = tile_location(self.row, self.col);
            *crop = Crop::planted_at(crop.crop_type, now);
        }
        true
    }

    fn name(&self) -> &'static str {
        "PlantCrop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::TestWorld;
    use dominion_logic::geometry::Vec2;
    use dominion_logic::growth::{CropType, GrowthStage, SEEDLING_HEALTH};
    use dominion_logic::tiles::TileGrid;

    fn seedling(t: &mut TestWorld) -> Entity {
        let mut vitals = Vitals::new(100.0);
        vitals.health = SEEDLING_HEALTH;
        t.world.spawn((
            Crop::unplanted(CropType::Corn),
            vitals,
            Position(Vec2::new(-5000.0, -5000.0)),
        ))
    }

    #[test]
    fn test_till_is_idempotent() {
        let mut t = TestWorld::new();
        let grid = map::share(TileGrid::from_rows(&[".#", "F."]).unwrap());

        for _ in 0..2 {
            for (row, col) in [(0, 0), (0, 1), (1, 0)] {
                assert!(TillGround::new(grid.clone(), row, col).advance(&mut t.ctx()));
            }
        }
        let grid = map::read(&grid);
        assert_eq!(grid.get(0, 0).unwrap().tile_type(), TileType::Farmland);
        assert_eq!(grid.get(0, 1).unwrap().tile_type(), TileType::Stone);
        assert_eq!(grid.get(1, 0).unwrap().tile_type(), TileType::Farmland);
        assert_eq!(grid.get(1, 1).unwrap().tile_type(), TileType::Dirt);
        assert!(grid.get(0, 0).unwrap().can_enter());
    }

    #[test]
    fn test_till_out_of_range_is_ignored() {
        let mut t = TestWorld::new();
        let grid = map::share(TileGrid::new(2, 2).unwrap());
        assert!(TillGround::new(grid.clone(), 9, 9).advance(&mut t.ctx()));
        assert_eq!(map::read(&grid).count_of(TileType::Farmland), 0);
    }

    #[test]
    fn test_unplanted_crop_does_not_grow() {
        let mut t = TestWorld::new();
        let crop = seedling(&mut t);
        t.clock.advance(500.0);
        for _ in 0..50 {
            assert!(GrowCrop::new(crop).advance(&mut t.ctx()));
        }
        assert_eq!(t.health(crop), SEEDLING_HEALTH);
    }

    #[test]
    fn test_planted_crop_grows_to_full() {
        let mut t = TestWorld::new();
        let crop = seedling(&mut t);
        t.clock.advance(3.0);
        assert!(PlantCrop::new(crop, 2, 4).advance(&mut t.ctx()));
        assert_eq!(t.position(crop), Vec2::new(400.0, 200.0));

        for _ in 0..200 {
            t.clock.advance(10.0);
            GrowCrop::new(crop).advance(&mut t.ctx());
        }
        let state = *t.world.get::<&Crop>(crop).unwrap();
        assert!(state.is_grown());
        assert_eq!(state.growth.stage, GrowthStage::Grown);
        assert_eq!(t.health(crop), 100.0);
    }
}
