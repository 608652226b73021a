//! Breakout: paddle, ball(s), a block wall with one goal block, and falling
//! power-ups

pub mod grid;
pub mod powerup;
pub mod state;
pub mod tick;

pub use grid::{Block, BlockGrid, BlockStatus};
pub use state::{Ball, BreakoutState, GameStatus, Paddle, PowerUp, PowerUpKind};
pub use tick::{TickInput, autopilot, tick};
