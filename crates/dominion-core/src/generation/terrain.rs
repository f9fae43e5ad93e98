//! Terrain generation: stone and water blobs grown by random walks over dirt

use dominion_logic::tiles::{TileGrid, TileType};
use rand::Rng;

/// Blob seeds keep this many tiles from the top and left edges.
const EDGE_MARGIN: usize = 5;
const STONE_BLOBS: usize = 3;
/// Attempts at finding a dirt tile to seed one water blob.
const SEED_ATTEMPTS: usize = 100;

const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Scatter stone and water over a grid.
///
/// Three stone blobs, then between 5 and `cols` water blobs seeded on dirt.
/// Grids too small to keep seeds off the edges are left untouched.
pub fn generate_terrain(grid: &mut TileGrid, rng: &mut impl Rng) {
    let (rows, cols) = (grid.rows(), grid.cols());
    if rows <= EDGE_MARGIN + 1 || cols <= EDGE_MARGIN + 1 {
        log::debug!("{}x{} grid too small for terrain", rows, cols);
        return;
    }

    for _ in 0..STONE_BLOBS {
        let row = rng.gen_range(EDGE_MARGIN..rows - 1);
        let col = rng.gen_range(EDGE_MARGIN..cols - 1);
        place_blob(grid, row, col, TileType::Stone, rng);
    }

    let water_blobs = rng.gen_range(EDGE_MARGIN..cols);
    for _ in 0..water_blobs {
        for _ in 0..SEED_ATTEMPTS {
            let row = rng.gen_range(EDGE_MARGIN..rows - 1);
            let col = rng.gen_range(EDGE_MARGIN..cols - 1);
            if tile_is(grid, row as i32, col as i32, TileType::Dirt) {
                place_blob(grid, row, col, TileType::Water, rng);
                break;
            }
        }
    }
}

fn tile_is(grid: &TileGrid, row: i32, col: i32, tile_type: TileType) -> bool {
    row >= 0
        && col >= 0
        && grid
            .get(row as usize, col as usize)
            .map_or(false, |t| t.tile_type() == tile_type)
}

/// Fill the seed tile, then grow a walk out of each of its four neighbors.
fn place_blob(grid: &mut TileGrid, row: usize, col: usize, tile_type: TileType, rng: &mut impl Rng) {
    grid.change_tile_type(row, col, tile_type);
    let budget = grid.rows() as i32;
    for (dr, dc) in NEIGHBORS {
        spread(grid, row as i32 + dr, col as i32 + dc, budget, tile_type, rng);
    }
}

/// Random walk over dirt. Each step costs 1 to 4 points of budget, and a
/// failed direction roll costs 1.
fn spread(
    grid: &mut TileGrid,
    mut row: i32,
    mut col: i32,
    mut budget: i32,
    tile_type: TileType,
    rng: &mut impl Rng,
) {
    loop {
        if row < 0 || col < 0 || !grid.change_tile_type(row as usize, col as usize, tile_type) {
            return;
        }

        let mut next = None;
        while next.is_none() && budget > 0 {
            let (dr, dc) = NEIGHBORS[rng.gen_range(0..NEIGHBORS.len())];
            if tile_is(grid, row + dr, col + dc, TileType::Dirt) {
                next = Some((row + dr, col + dc, budget - rng.gen_range(1..5)));
            }
            budget -= 1;
        }

        match next {
            Some((r, c, b)) => {
                row = r;
                col = c;
                budget = b;
            }
            None => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_terrain_places_stone_and_water() {
        let mut grid = TileGrid::new(40, 40).unwrap();
        generate_terrain(&mut grid, &mut StdRng::seed_from_u64(3));
        assert!(grid.count_of(TileType::Stone) > 0);
        assert!(grid.count_of(TileType::Water) > 0);
        assert!(grid.count_of(TileType::Dirt) > 0);
    }

    #[test]
    fn test_terrain_is_deterministic_per_seed() {
        let mut a = TileGrid::new(30, 30).unwrap();
        let mut b = TileGrid::new(30, 30).unwrap();
        generate_terrain(&mut a, &mut StdRng::seed_from_u64(9));
        generate_terrain(&mut b, &mut StdRng::seed_from_u64(9));
        let types = |g: &TileGrid| g.iter().map(|t| t.tile_type()).collect::<Vec<_>>();
        assert_eq!(types(&a), types(&b));
    }

    #[test]
    fn test_small_grid_untouched() {
        let mut grid = TileGrid::new(6, 20).unwrap();
        generate_terrain(&mut grid, &mut StdRng::seed_from_u64(1));
        assert_eq!(grid.count_of(TileType::Dirt), 120);
    }
}
