//! Breakout game state and entity types
//!
//! Everything the step function reads or writes lives in [`BreakoutState`];
//! there is no process-level game data.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::BlockGrid;
use crate::config::BreakoutConfig;
use crate::sim::collision::Rect;
use crate::sim::motion::{clamp_to_span, intent_velocity};

/// Current phase of a breakout run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    /// Goal block destroyed
    Won,
    /// Last ball fell out
    Lost,
}

impl GameStatus {
    /// Won and Lost halt the simulation until restart
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Past positions for rendering (oldest first)
    pub trail: VecDeque<Vec2>,
    /// Next block hit sweeps the row instead of breaking a single block
    pub multi_hit: bool,
    /// Blocks destroyed by the current multi-hit sweep
    pub multi_hit_count: u32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            trail: VecDeque::new(),
            multi_hit: false,
            multi_hit_count: 0,
        }
    }

    /// Record current position to trail, dropping the oldest beyond `max_len`
    pub fn record_trail(&mut self, max_len: usize) {
        self.trail.push_back(self.pos);
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }

    /// Arm the multi-hit power-up
    pub fn arm_multi_hit(&mut self) {
        self.multi_hit = true;
        self.multi_hit_count = 0;
    }

    pub fn clear_multi_hit(&mut self) {
        self.multi_hit = false;
        self.multi_hit_count = 0;
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity from the held direction keys
    pub vel_x: f32,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Set velocity from left/right intent
    pub fn steer(&mut self, left: bool, right: bool, speed: f32) {
        self.vel_x = intent_velocity(left, right, speed);
    }

    /// Move by the current velocity and clamp into the playfield
    pub fn advance(&mut self, playfield_width: f32) {
        self.pos.x = clamp_to_span(self.pos.x + self.vel_x, self.width, playfield_width);
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Spawns an extra ball above the paddle
    MultiBall,
    /// Arms every ball to sweep a row of blocks on its next hit
    MultiHit,
}

/// A falling power-up capsule
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub fall_speed: f32,
    /// Cleared once the capsule drops out of the playfield
    pub active: bool,
}

impl PowerUp {
    /// Capsule hanging under the center of `block`
    pub fn below_block(kind: PowerUpKind, block: &Rect, config: &BreakoutConfig) -> Self {
        let size = config.powerup_size;
        Self {
            rect: Rect::new(block.center_x() - size / 2.0, block.bottom(), size, size),
            kind,
            fall_speed: config.powerup_fall_speed,
            active: true,
        }
    }

    /// Fall one step; deactivates once the top passes `floor`
    pub fn fall(&mut self, floor: f32) {
        self.rect.y += self.fall_speed;
        if self.rect.y > floor {
            self.active = false;
        }
    }
}

/// Complete breakout state
#[derive(Debug, Clone)]
pub struct BreakoutState {
    pub config: BreakoutConfig,
    /// Playfield size (width, height)
    pub playfield: Vec2,
    pub paddle: Paddle,
    /// Active balls, in spawn order
    pub balls: Vec<Ball>,
    pub grid: BlockGrid,
    /// Falling power-ups, in spawn order
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    pub status: GameStatus,
    /// Steps simulated since the last (re)start
    pub frame: u64,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(super) rng: Pcg32,
}

impl BreakoutState {
    /// Create a fresh game for a playfield of the given size
    pub fn new(config: BreakoutConfig, width: f32, height: f32, seed: u64) -> Self {
        let playfield = Vec2::new(width.max(0.0), height.max(0.0));
        let grid = BlockGrid::build(&config, playfield);
        let paddle = Paddle {
            pos: Vec2::ZERO,
            width: config.paddle_width,
            height: config.paddle_height,
            vel_x: 0.0,
        };

        let mut state = Self {
            config,
            playfield,
            paddle,
            balls: Vec::new(),
            grid,
            power_ups: Vec::new(),
            score: 0,
            status: GameStatus::Playing,
            frame: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.center_paddle();
        state.serve();
        state
    }

    /// Ball at the playfield center with the configured start velocity
    pub fn serve(&mut self) {
        let ball = Ball::new(
            self.playfield / 2.0,
            self.config.ball_start_velocity,
            self.config.ball_radius,
        );
        self.balls.push(ball);
    }

    /// Back to a fresh run on the current playfield.
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn restart(&mut self) {
        self.score = 0;
        self.status = GameStatus::Playing;
        self.frame = 0;
        self.balls.clear();
        self.power_ups.clear();
        self.grid = BlockGrid::build(&self.config, self.playfield);
        self.paddle.vel_x = 0.0;
        self.center_paddle();
        self.serve();
        log::info!(
            "Breakout restarted: {}x{} grid",
            self.grid.columns(),
            self.grid.rows()
        );
    }

    /// Adopt a new playfield size. The block grid is rebuilt from scratch.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Vec2::new(width.max(0.0), height.max(0.0));
        self.grid = BlockGrid::build(&self.config, self.playfield);
        self.paddle.pos.y = self.paddle_top();
        self.paddle.pos.x = clamp_to_span(self.paddle.pos.x, self.paddle.width, self.playfield.x);
        log::debug!(
            "Playfield resized to {}x{}: {}x{} grid",
            self.playfield.x,
            self.playfield.y,
            self.grid.columns(),
            self.grid.rows()
        );
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn paddle_top(&self) -> f32 {
        self.playfield.y - self.config.paddle_bottom_offset
    }

    fn center_paddle(&mut self) {
        let x = self.playfield.x / 2.0 - self.paddle.width / 2.0;
        self.paddle.pos = Vec2::new(
            clamp_to_span(x, self.paddle.width, self.playfield.x),
            self.paddle_top(),
        );
    }
}
