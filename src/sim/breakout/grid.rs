//! Block grid layout and lookup
//!
//! Cells are stored column-major so iteration order matches the collision
//! scan: outer loop columns, inner loop rows.

use glam::Vec2;

use crate::config::BreakoutConfig;
use crate::sim::collision::{Rect, ball_overlaps_rect};

/// Block status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockStatus {
    Destroyed,
    /// Plain red block
    #[default]
    Normal,
    /// Green block that wins the game when destroyed
    Goal,
}

impl BlockStatus {
    pub fn is_alive(&self) -> bool {
        !matches!(self, BlockStatus::Destroyed)
    }
}

/// A grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub rect: Rect,
    pub status: BlockStatus,
}

/// The breakout wall
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Block>,
}

impl BlockGrid {
    /// Lay out a full grid for the playfield, with the goal block at the
    /// middle column of the top row.
    ///
    /// A playfield too small for a single block gives an empty grid.
    pub fn build(config: &BreakoutConfig, playfield: Vec2) -> Self {
        let padding = config.block_padding(playfield.x);
        let pitch_x = config.block_width + padding;
        let pitch_y = config.block_height + padding;

        let available_w = (playfield.x - config.block_offset_left * 2.0).max(0.0);
        let available_h =
            (playfield.y - config.block_offset_top - config.block_reserved_bottom).max(0.0);
        let columns = fit_count(available_w, pitch_x);
        let rows = fit_count(available_h, pitch_y);

        let mut cells = Vec::with_capacity(columns * rows);
        for c in 0..columns {
            for r in 0..rows {
                let rect = Rect::new(
                    c as f32 * pitch_x + config.block_offset_left,
                    r as f32 * pitch_y + config.block_offset_top,
                    config.block_width,
                    config.block_height,
                );
                cells.push(Block {
                    rect,
                    status: BlockStatus::Normal,
                });
            }
        }

        let mut grid = Self {
            columns,
            rows,
            cells,
        };
        if let Some(goal) = grid.get_mut(columns / 2, 0) {
            goal.status = BlockStatus::Goal;
        }
        grid
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| column * self.rows + row)
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Block> {
        self.index(column, row).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Block> {
        self.index(column, row).map(move |i| &mut self.cells[i])
    }

    /// All cells as `(column, row, block)`, column-major
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Block)> + '_ {
        let rows = self.rows.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, block)| (i / rows, i % rows, block))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Block> + '_ {
        self.cells.iter_mut()
    }

    /// Blocks still standing
    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|b| b.status.is_alive()).count()
    }

    /// First live block the ball overlaps, in scan order
    pub fn first_overlap(&self, center: Vec2, radius: f32) -> Option<(usize, usize)> {
        self.iter()
            .find(|(_, _, b)| b.status.is_alive() && ball_overlaps_rect(center, radius, &b.rect))
            .map(|(c, r, _)| (c, r))
    }

    /// Destroy a block, returning what it was.
    ///
    /// Out-of-range or already destroyed cells are a no-op returning `None`.
    pub fn destroy(&mut self, column: usize, row: usize) -> Option<BlockStatus> {
        let block = self.get_mut(column, row)?;
        if !block.status.is_alive() {
            return None;
        }
        let was = block.status;
        block.status = BlockStatus::Destroyed;
        Some(was)
    }
}

/// How many `pitch`-sized slots fit in `span` (zero for degenerate pitch)
fn fit_count(span: f32, pitch: f32) -> usize {
    if pitch > 0.0 && span.is_finite() {
        (span / pitch).floor() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: f32, height: f32) -> BlockGrid {
        BlockGrid::build(&BreakoutConfig::default(), Vec2::new(width, height))
    }

    fn goal(g: &BlockGrid) -> Option<(usize, usize)> {
        g.iter()
            .find(|(_, _, b)| b.status == BlockStatus::Goal)
            .map(|(c, r, _)| (c, r))
    }

    #[test]
    fn test_dimensions_follow_playfield() {
        // 800 wide -> padding 5: (800 - 70) / 65 = 11.2, (600 - 250) / 25 = 14
        let g = grid(800.0, 600.0);
        assert_eq!((g.columns(), g.rows()), (11, 14));
        assert_eq!(g.remaining(), 154);

        // 1200 wide -> padding 8: (1200 - 70) / 68 = 16.6, (700 - 250) / 28 = 16.07
        let g = grid(1200.0, 700.0);
        assert_eq!((g.columns(), g.rows()), (16, 16));
    }

    #[test]
    fn test_block_positions() {
        // 800 wide -> padding 5, so pitch is 65 x 25
        let g = grid(800.0, 600.0);
        let block = g.get(2, 3).unwrap();
        assert_eq!(block.rect, Rect::new(2.0 * 65.0 + 35.0, 3.0 * 25.0 + 100.0, 60.0, 20.0));
        assert!(g.get(11, 0).is_none());
        assert!(g.get(0, 14).is_none());
    }

    #[test]
    fn test_goal_is_top_middle() {
        let g = grid(800.0, 600.0);
        assert_eq!(goal(&g), Some((5, 0)));
        assert_eq!(g.get(4, 0).unwrap().status, BlockStatus::Normal);
        assert_eq!(g.get(5, 1).unwrap().status, BlockStatus::Normal);
    }

    #[test]
    fn test_degenerate_playfield_is_empty() {
        let g = grid(60.0, 600.0);
        assert_eq!(g.columns(), 0);
        assert_eq!(g.remaining(), 0);
        assert_eq!(goal(&g), None);

        let g = grid(800.0, 200.0);
        assert_eq!(g.rows(), 0);
        assert_eq!(g.iter().count(), 0);

        let config = BreakoutConfig {
            block_width: 0.0,
            block_padding_medium: 0.0,
            ..Default::default()
        };
        let g = BlockGrid::build(&config, Vec2::new(800.0, 600.0));
        assert_eq!(g.columns(), 0);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut g = grid(800.0, 600.0);
        assert_eq!(g.destroy(5, 0), Some(BlockStatus::Goal));
        assert_eq!(g.destroy(5, 0), None);
        assert_eq!(g.destroy(99, 0), None);
        assert_eq!(g.remaining(), 153);
        assert_eq!(goal(&g), None);
    }

    #[test]
    fn test_iter_is_column_major() {
        let g = grid(800.0, 600.0);
        let order: Vec<_> = g.iter().take(3).map(|(c, r, _)| (c, r)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (0, 2)]);
        let (c, r, _) = g.iter().nth(14).unwrap();
        assert_eq!((c, r), (1, 0));
    }

    #[test]
    fn test_first_overlap_prefers_earlier_column() {
        let mut g = grid(800.0, 600.0);
        // Ball straddling rows 0 and 1 of column 0: row 0 wins
        let a = g.get(0, 0).unwrap().rect;
        let center = Vec2::new(a.center_x(), a.bottom() + 2.5);
        assert_eq!(g.first_overlap(center, 12.0), Some((0, 0)));

        // Destroyed blocks are skipped
        g.destroy(0, 0);
        assert_eq!(g.first_overlap(center, 12.0), Some((0, 1)));

        assert_eq!(g.first_overlap(Vec2::new(400.0, 560.0), 12.0), None);
    }
}
