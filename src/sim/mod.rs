//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One logical step per call, no wall-clock time
//! - RNG owned by the game state
//! - Stable iteration order (spawn order, column-major grid)
//! - No rendering or platform dependencies

pub mod breakout;
pub mod collision;
pub mod events;
pub mod motion;
pub mod pong;

pub use collision::{Rect, WallContact, Walls, ball_overlaps_rect, bounce_off_walls};
pub use events::GameEvent;
pub use motion::{Axis, clamp_to_span, integrate, reflect};

use rand::Rng;

/// +1.0 or -1.0 with equal odds
#[inline]
pub fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
