//! Greedy tile pathfinding with one-step backtracking.
//!
//! The pathfinder walks from the start tile toward the end tile one tile at a
//! time, always preferring the axis with the larger remaining distance. When
//! that direction is blocked it falls back to the first open direction in the
//! order right, left, down, up. When a node has no open direction left the
//! search steps back to the node's predecessor, closes the direction that led
//! into the dead end, and continues from there.
//!
//! Nodes live in an arena for the duration of one search; `previous` links are
//! arena indices. Each node tracks which of its four exits are still open.
//! Taking an exit closes it, and a fresh node never offers the exit back to
//! its predecessor.
//!
//! The search is not optimal and gives no collision guarantee when it fails:
//! if no route is found, or the path grows to [`MAX_IDEAL_PATH`] nodes, the
//! destination is appended as a direct jump.

use crate::constants::MAX_IDEAL_PATH;
use crate::geometry::Vec2;
use crate::tiles::{tile_center, TileGrid};

/// Cardinal direction on the grid. Down is increasing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Fallback order used when the preferred direction is blocked.
    pub const FALLBACK_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
        }
    }

    /// Direction that leads from `from` into the adjacent tile `to`.
    fn between(from: (i32, i32), to: (i32, i32)) -> Option<Direction> {
        if to.0 > from.0 {
            Some(Direction::Right)
        } else if to.0 < from.0 {
            Some(Direction::Left)
        } else if to.1 < from.1 {
            Some(Direction::Up)
        } else if to.1 > from.1 {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// A tile visited during one search.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementNode {
    pub tile_x: i32,
    pub tile_y: i32,
    pub can_move_right: bool,
    pub can_move_left: bool,
    pub can_move_down: bool,
    pub can_move_up: bool,
    /// Arena index of the node this one was reached from.
    pub previous: Option<usize>,
}

impl MovementNode {
    /// Node at `(tile_x, tile_y)` with exits open wherever the grid allows.
    fn probe(grid: &TileGrid, tile_x: i32, tile_y: i32, previous: Option<usize>) -> Self {
        Self {
            tile_x,
            tile_y,
            can_move_right: grid.can_enter(tile_y, tile_x + 1),
            can_move_left: grid.can_enter(tile_y, tile_x - 1),
            can_move_down: grid.can_enter(tile_y + 1, tile_x),
            can_move_up: grid.can_enter(tile_y - 1, tile_x),
            previous,
        }
    }

    pub fn tile(&self) -> (i32, i32) {
        (self.tile_x, self.tile_y)
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        match direction {
            Direction::Right => self.can_move_right,
            Direction::Left => self.can_move_left,
            Direction::Down => self.can_move_down,
            Direction::Up => self.can_move_up,
        }
    }

    fn close(&mut self, direction: Direction) {
        match direction {
            Direction::Right => self.can_move_right = false,
            Direction::Left => self.can_move_left = false,
            Direction::Down => self.can_move_down = false,
            Direction::Up => self.can_move_up = false,
        }
    }
}

/// One pathfinding search over a borrowed grid.
pub struct Pathfinder<'g> {
    grid: &'g TileGrid,
    nodes: Vec<MovementNode>,
    ideal_path: Vec<usize>,
    end: (i32, i32),
}

impl<'g> Pathfinder<'g> {
    pub fn new(grid: &'g TileGrid) -> Self {
        Self {
            grid,
            nodes: Vec::new(),
            ideal_path: Vec::new(),
            end: (0, 0),
        }
    }

    /// Build the waypoints an entity at `start` follows to reach `destination`.
    ///
    /// Never empty. Every waypoint but the last is a tile center; the last is
    /// exactly `destination`. Coordinates outside the grid are clamped to the
    /// nearest tile before searching.
    pub fn find_waypoints(&mut self, start: Vec2, destination: Vec2) -> Vec<Vec2> {
        self.search(start, destination);

        let last = self.ideal_path.len().saturating_sub(1);
        let waypoints: Vec<Vec2> = self
            .ideal_path
            .iter()
            .enumerate()
            .map(|(i, &index)| {
                if i == last {
                    destination
                } else {
                    let node = &self.nodes[index];
                    tile_center(node.tile_y as usize, node.tile_x as usize)
                }
            })
            .collect();

        reduce_redundant_moves(&waypoints)
    }

    /// Tiles of the ideal path built by the last search, start first.
    pub fn ideal_path(&self) -> Vec<(i32, i32)> {
        self.ideal_path
            .iter()
            .map(|&index| self.nodes[index].tile())
            .collect()
    }

    fn search(&mut self, start: Vec2, destination: Vec2) {
        self.nodes.clear();
        self.ideal_path.clear();

        let (end_x, end_y) = self.grid.clamped_tile_at(destination);
        let (start_x, start_y) = self.grid.clamped_tile_at(start);
        self.end = (end_x, end_y);

        let start_node = MovementNode::probe(self.grid, start_x, start_y, None);
        self.nodes.push(start_node);
        self.ideal_path.push(0);

        let mut current = Some(0);
        while let Some(index) = current {
            if self.nodes[index].tile() == self.end {
                break;
            }
            current = self.next_node(index);
        }

        let reached = self
            .ideal_path
            .last()
            .map(|&index| self.nodes[index].tile() == self.end)
            .unwrap_or(false);
        if !reached {
            if current.is_none() && self.ideal_path.len() < MAX_IDEAL_PATH {
                log::debug!(
                    "no route from ({start_x}, {start_y}) to ({end_x}, {end_y}), jumping"
                );
            }
            let end_node = MovementNode::probe(self.grid, end_x, end_y, None);
            self.nodes.push(end_node);
            self.ideal_path.push(self.nodes.len() - 1);
        }
    }

    /// Extend the path by one step from `index`. `None` ends the search.
    fn next_node(&mut self, index: usize) -> Option<usize> {
        let (x, y) = self.nodes[index].tile();
        let distance_x = self.end.0 - x;
        let distance_y = self.end.1 - y;

        let preferred = if distance_x.abs() >= distance_y.abs() {
            match distance_x.signum() {
                1 => Some(Direction::Right),
                -1 => Some(Direction::Left),
                _ => None,
            }
        } else if distance_y > 0 {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        };

        let mut next = preferred
            .filter(|&d| self.is_open(index, d))
            .map(|d| self.step(index, d));

        if next.is_none() && (distance_x != 0 || distance_y != 0) {
            next = self.non_ideal_step(index);
        }

        if let Some(next_index) = next {
            let repeats_last = self
                .ideal_path
                .last()
                .map(|&last| self.nodes[last].tile() == self.nodes[next_index].tile())
                .unwrap_or(false);
            if !repeats_last {
                self.ideal_path.push(next_index);
            }
        }

        if self.ideal_path.len() >= MAX_IDEAL_PATH {
            log::debug!("ideal path hit {MAX_IDEAL_PATH} nodes, jumping");
            return None;
        }

        next
    }

    fn is_open(&self, index: usize, direction: Direction) -> bool {
        let node = &self.nodes[index];
        let (dx, dy) = direction.offset();
        node.can_move(direction) && self.grid.can_enter(node.tile_y + dy, node.tile_x + dx)
    }

    /// Take the first open exit in fallback order, or back out of a dead end.
    fn non_ideal_step(&mut self, index: usize) -> Option<usize> {
        let open = Direction::FALLBACK_ORDER
            .into_iter()
            .find(|&d| self.is_open(index, d));
        match open {
            Some(direction) => Some(self.step(index, direction)),
            None => self.backtrack(index),
        }
    }

    /// Leave `index` through `direction`, closing that exit behind us.
    fn step(&mut self, index: usize, direction: Direction) -> usize {
        self.nodes[index].close(direction);
        let (x, y) = self.nodes[index].tile();
        let (dx, dy) = direction.offset();

        let mut node = MovementNode::probe(self.grid, x + dx, y + dy, Some(index));
        if let Some(back) = Direction::between(node.tile(), (x, y)) {
            node.close(back);
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Return to the predecessor of a dead-end node and close the way back in.
    ///
    /// The path is truncated to end at the predecessor. A dead end with no
    /// predecessor means the start itself is boxed in.
    fn backtrack(&mut self, stuck: usize) -> Option<usize> {
        let before = self.nodes[stuck].previous?;
        if let Some(direction) = Direction::between(self.nodes[before].tile(), self.nodes[stuck].tile())
        {
            self.nodes[before].close(direction);
        }
        if let Some(position) = self.ideal_path.iter().rposition(|&i| i == before) {
            self.ideal_path.truncate(position + 1);
        }
        Some(before)
    }
}

/// Convenience wrapper around a single [`Pathfinder`] search.
pub fn find_waypoints(grid: &TileGrid, start: Vec2, destination: Vec2) -> Vec<Vec2> {
    Pathfinder::new(grid).find_waypoints(start, destination)
}

/// Drop waypoints that share an axis with the next kept waypoint.
///
/// Scanning backward from the destination, a waypoint is kept only when it
/// differs from the most recently kept one on both x and y. The destination
/// itself is always kept.
pub fn reduce_redundant_moves(moves: &[Vec2]) -> Vec<Vec2> {
    let Some(&last) = moves.last() else {
        return Vec::new();
    };

    let mut kept = vec![last];
    for waypoint in moves[..moves.len() - 1].iter().rev() {
        let anchor = kept[kept.len() - 1];
        if (waypoint.x - anchor.x).abs() > 0.0 && (waypoint.y - anchor.y).abs() > 0.0 {
            kept.push(*waypoint);
        }
    }
    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TILE_SIZE;

    fn open_grid(rows: usize, cols: usize) -> TileGrid {
        TileGrid::new(rows, cols).unwrap()
    }

    #[test]
    fn test_same_tile_gives_single_move() {
        let grid = open_grid(5, 5);
        let mut finder = Pathfinder::new(&grid);
        let dest = Vec2::new(260.0, 240.0);
        let moves = finder.find_waypoints(Vec2::new(210.0, 220.0), dest);
        assert_eq!(moves, vec![dest]);
        assert_eq!(finder.ideal_path(), vec![(2, 2)]);
    }

    #[test]
    fn test_straight_line_prefers_larger_axis() {
        let grid = open_grid(5, 5);
        let mut finder = Pathfinder::new(&grid);
        finder.find_waypoints(Vec2::new(50.0, 50.0), Vec2::new(350.0, 150.0));
        // Right while |dx| >= |dy| (the third step is a tie), then down.
        assert_eq!(
            finder.ideal_path(),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)]
        );
    }

    #[test]
    fn test_tie_breaks_toward_x() {
        let grid = open_grid(3, 3);
        let mut finder = Pathfinder::new(&grid);
        finder.find_waypoints(Vec2::new(50.0, 50.0), Vec2::new(150.0, 150.0));
        assert_eq!(finder.ideal_path(), vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_routes_around_single_stone() {
        let grid = TileGrid::from_rows(&[".....", "..#..", "....."]).unwrap();
        let mut finder = Pathfinder::new(&grid);
        finder.find_waypoints(Vec2::new(50.0, 150.0), Vec2::new(450.0, 150.0));
        assert_eq!(
            finder.ideal_path(),
            vec![(0, 1), (1, 1), (1, 2), (2, 2), (3, 2), (4, 2), (4, 1)]
        );
    }

    #[test]
    fn test_boxed_in_start_jumps_to_destination() {
        let grid = TileGrid::from_rows(&[".#...", ".#...", ".#..."]).unwrap();
        let mut finder = Pathfinder::new(&grid);
        let dest = Vec2::new(450.0, 50.0);
        let moves = finder.find_waypoints(Vec2::new(50.0, 50.0), dest);
        assert_eq!(finder.ideal_path(), vec![(0, 0), (4, 0)]);
        assert_eq!(moves.last(), Some(&dest));
    }

    #[test]
    fn test_backtracks_out_of_dead_end() {
        // Down is blocked, so the fallback goes right into a one-tile pocket,
        // backs out, and goes left around the wall instead.
        let grid = TileGrid::from_rows(&["####", "...#", ".###", "...."]).unwrap();
        let mut finder = Pathfinder::new(&grid);
        let dest = Vec2::new(150.0, 350.0);
        let moves = finder.find_waypoints(Vec2::new(150.0, 150.0), dest);
        assert_eq!(
            finder.ideal_path(),
            vec![(1, 1), (0, 1), (0, 2), (0, 3), (1, 3)]
        );
        assert_eq!(moves.last(), Some(&dest));
    }

    #[test]
    fn test_boxed_in_after_backtrack() {
        // The only exit from the start leads into a dead end.
        let grid = TileGrid::from_rows(&["..#", "##.", "..."]).unwrap();
        let mut finder = Pathfinder::new(&grid);
        finder.find_waypoints(Vec2::new(50.0, 50.0), Vec2::new(50.0, 250.0));
        assert_eq!(finder.ideal_path(), vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn test_greedy_cycle_is_bounded_by_ceiling() {
        // Preferring right keeps the search circling the block above the wall.
        let grid = TileGrid::from_rows(&["...#.", "...#.", "..##.", "....."]).unwrap();
        let mut finder = Pathfinder::new(&grid);
        let dest = Vec2::new(450.0, 150.0);
        let moves = finder.find_waypoints(Vec2::new(50.0, 150.0), dest);
        let path = finder.ideal_path();
        assert_eq!(path.len(), MAX_IDEAL_PATH + 1);
        assert_eq!(path.last(), Some(&(4, 1)));
        for pair in path[..MAX_IDEAL_PATH].windows(2) {
            let step = (pair[1].0 - pair[0].0).abs() + (pair[1].1 - pair[0].1).abs();
            assert_eq!(step, 1, "non-adjacent step {:?}", pair);
        }
        assert_eq!(moves.last(), Some(&dest));
    }

    #[test]
    fn test_ceiling_appends_destination() {
        let grid = open_grid(1, 200);
        let mut finder = Pathfinder::new(&grid);
        let dest = Vec2::new(199.0 * TILE_SIZE + 50.0, 50.0);
        let moves = finder.find_waypoints(Vec2::new(50.0, 50.0), dest);
        let path = finder.ideal_path();
        assert_eq!(path.len(), MAX_IDEAL_PATH + 1);
        assert_eq!(path[MAX_IDEAL_PATH - 1], (MAX_IDEAL_PATH as i32 - 1, 0));
        assert_eq!(path.last(), Some(&(199, 0)));
        assert_eq!(moves, vec![dest]);
    }

    #[test]
    fn test_destination_clamped_into_grid() {
        let grid = open_grid(4, 4);
        let mut finder = Pathfinder::new(&grid);
        let dest = Vec2::new(5000.0, -700.0);
        let moves = finder.find_waypoints(Vec2::new(-80.0, 390.0), dest);
        let path = finder.ideal_path();
        assert_eq!(path.first(), Some(&(0, 3)));
        assert_eq!(path.last(), Some(&(3, 0)));
        assert_eq!(moves.last(), Some(&dest));
    }

    #[test]
    fn test_reduce_keeps_only_moves_differing_on_both_axes() {
        let moves = vec![
            Vec2::new(50.0, 50.0),
            Vec2::new(150.0, 50.0),
            Vec2::new(150.0, 150.0),
            Vec2::new(250.0, 150.0),
            Vec2::new(260.0, 240.0),
        ];
        // (150,150) shares y with (250,150) and (50,50) shares y with
        // (150,50), so both are dropped.
        assert_eq!(
            reduce_redundant_moves(&moves),
            vec![
                Vec2::new(150.0, 50.0),
                Vec2::new(250.0, 150.0),
                Vec2::new(260.0, 240.0)
            ]
        );
    }

    #[test]
    fn test_reduce_drops_straight_run() {
        let moves = vec![
            Vec2::new(50.0, 50.0),
            Vec2::new(150.0, 50.0),
            Vec2::new(250.0, 50.0),
        ];
        assert_eq!(reduce_redundant_moves(&moves), vec![Vec2::new(250.0, 50.0)]);
        assert!(reduce_redundant_moves(&[]).is_empty());
    }
}
