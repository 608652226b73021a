//! Paddle Arcade - neon breakout and two-player pong
//!
//! Core modules:
//! - `sim`: Pure simulation (motion, collisions, game state, one step per call)
//! - `renderer`: Surface trait, scene drawing, canvas 2D backend
//! - `scene`: Per-game wrappers the frame loop drives
//! - `driver`: Fixed-step frame pacing
//! - `config`: Data-driven game constants
//! - `audio`: Sound effects

pub mod audio;
pub mod config;
pub mod driver;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use config::ArcadeConfig;
pub use driver::FrameDriver;
pub use scene::{GameKind, Scene, scene_for};
