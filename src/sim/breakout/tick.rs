//! Breakout simulation step
//!
//! Advances the game by one logical step. Order within a step:
//! balls (move, walls, paddle, floor, blocks), then paddle, then power-ups.

use super::grid::BlockStatus;
use super::powerup;
use super::state::{Ball, BreakoutState, GameStatus};
use crate::sim::collision::{Walls, ball_reaches_top, bounce_off_walls};
use crate::sim::events::GameEvent;
use crate::sim::motion::{Axis, integrate, reflect};

/// Input for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Demo mode - the paddle steers itself
    pub autopilot: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut BreakoutState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Terminal states wait for restart
    if state.is_terminal() {
        return events;
    }

    state.frame += 1;

    // Balls: rebuild the list from survivors
    let balls = std::mem::take(&mut state.balls);
    let mut survivors = Vec::with_capacity(balls.len());
    let mut lost = 0;
    for mut ball in balls {
        if advance_ball(state, &mut ball, &mut events) {
            collide_blocks(state, &mut ball, &mut events);
            survivors.push(ball);
        } else {
            lost += 1;
        }
    }
    state.balls = survivors;
    let remaining = state.balls.len();
    events.extend((0..lost).map(|_| GameEvent::BallLost { remaining }));

    if state.balls.is_empty() {
        state.status = GameStatus::Lost;
        events.push(GameEvent::Lost);
        log::info!("Game over - score {}", state.score);
    }
    if state.is_terminal() {
        return events;
    }

    let input = if input.autopilot {
        autopilot(state)
    } else {
        *input
    };
    state.paddle.steer(input.left, input.right, state.config.paddle_speed);
    state.paddle.advance(state.playfield.x);

    powerup::update_power_ups(state, &mut events);

    events
}

/// Move a ball and bounce it off walls and the paddle.
///
/// Returns false once the ball has dropped out of the bottom.
fn advance_ball(state: &BreakoutState, ball: &mut Ball, events: &mut Vec<GameEvent>) -> bool {
    integrate(&mut ball.pos, ball.vel);
    ball.record_trail(state.config.trail_length);

    bounce_off_walls(
        ball.pos,
        &mut ball.vel,
        ball.radius,
        state.playfield,
        Walls::SIDES_AND_CEILING,
    );

    let paddle = state.paddle.rect();
    if ball_reaches_top(ball.pos, ball.radius, &paddle) {
        ball.vel = reflect(ball.vel, Axis::Y);
        // Rest on the paddle so the next step can't catch it again
        ball.pos.y = paddle.y - ball.radius;
        events.push(GameEvent::PaddleHit);
    }

    ball.pos.y - ball.radius <= state.playfield.y
}

/// Resolve the first block the ball overlaps, if any
fn collide_blocks(state: &mut BreakoutState, ball: &mut Ball, events: &mut Vec<GameEvent>) {
    let Some((column, row)) = state.grid.first_overlap(ball.pos, ball.radius) else {
        return;
    };
    let Some(hit_rect) = state.grid.get(column, row).map(|b| b.rect) else {
        return;
    };

    if ball.multi_hit {
        sweep_row(state, ball, column, row, events);
    } else {
        destroy_block(state, column, row, events);
    }

    ball.vel = reflect(ball.vel, Axis::Y);
    events.push(GameEvent::BlockHit { column, row });

    powerup::maybe_drop(state, &hit_rect, events);
}

/// Multi-hit: break live blocks rightward from `column` until the cap.
///
/// Cells already destroyed are stepped over without counting toward the cap.
fn sweep_row(
    state: &mut BreakoutState,
    ball: &mut Ball,
    column: usize,
    row: usize,
    events: &mut Vec<GameEvent>,
) {
    let cap = state.config.multi_hit_cap;
    ball.multi_hit_count = 0;
    for c in column..state.grid.columns() {
        if ball.multi_hit_count >= cap {
            break;
        }
        if destroy_block(state, c, row, events) {
            ball.multi_hit_count += 1;
        }
    }
    log::debug!("Multi-hit swept {} blocks in row {}", ball.multi_hit_count, row);
    ball.clear_multi_hit();
}

/// Break one block, scoring it. Returns false if it was already gone.
fn destroy_block(
    state: &mut BreakoutState,
    column: usize,
    row: usize,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(was) = state.grid.destroy(column, row) else {
        return false;
    };
    state.score += 1;
    events.push(GameEvent::BlockDestroyed { column, row, was });

    if was == BlockStatus::Goal && state.status == GameStatus::Playing {
        state.status = GameStatus::Won;
        events.push(GameEvent::Won);
        log::info!("Goal block destroyed - won with score {}", state.score);
    }
    true
}

/// Steer toward the most urgent ball, or a falling power-up when no ball is
/// on its way down
pub fn autopilot(state: &BreakoutState) -> TickInput {
    let floor = state.paddle.pos.y;
    let target = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|b| predict_landing_x(b, floor, state.playfield.x))
        .or_else(|| {
            state
                .power_ups
                .iter()
                .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
                .map(|p| p.rect.center_x())
        });

    let Some(target) = target else {
        return TickInput {
            autopilot: true,
            ..Default::default()
        };
    };

    // Dead zone keeps the paddle from dithering around the target
    let center = state.paddle.center_x();
    let dead_zone = state.paddle.width / 4.0;
    TickInput {
        left: target < center - dead_zone,
        right: target > center + dead_zone,
        autopilot: true,
    }
}

/// Where a descending ball crosses `floor`, folding wall bounces back in
fn predict_landing_x(ball: &Ball, floor: f32, width: f32) -> f32 {
    if ball.vel.y <= 0.0 || width <= 0.0 {
        return ball.pos.x;
    }
    let steps = ((floor - ball.pos.y) / ball.vel.y).max(0.0);
    let raw = ball.pos.x + ball.vel.x * steps;
    let period = width * 2.0;
    let folded = raw.rem_euclid(period);
    if folded > width { period - folded } else { folded }
}
