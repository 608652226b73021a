//! Per-step motion shared by both games
//!
//! One step is one loop invocation; velocities are in units per step.

use glam::Vec2;

/// Velocity axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Euler step: `position += velocity`
#[inline]
pub fn integrate(position: &mut Vec2, velocity: Vec2) {
    *position += velocity;
}

/// Perfectly elastic bounce: negate the velocity component on `axis`
#[inline]
pub fn reflect(velocity: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(-velocity.x, velocity.y),
        Axis::Y => Vec2::new(velocity.x, -velocity.y),
    }
}

/// Keep a segment of length `extent` starting at `pos` inside `[0, span]`.
///
/// When the segment is longer than the span it is pinned at 0.
#[inline]
pub fn clamp_to_span(pos: f32, extent: f32, span: f32) -> f32 {
    pos.clamp(0.0, (span - extent).max(0.0))
}

/// Velocity along one axis from a pair of opposing direction flags
#[inline]
pub fn intent_velocity(negative: bool, positive: bool, speed: f32) -> f32 {
    match (negative, positive) {
        (true, false) => -speed,
        (false, true) => speed,
        _ => 0.0,
    }
}
