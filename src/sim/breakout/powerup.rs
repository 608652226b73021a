//! Power-up drops and effects

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, BreakoutState, PowerUp, PowerUpKind};
use crate::config::BreakoutConfig;
use crate::sim::collision::{Rect, rect_reaches_top};
use crate::sim::events::GameEvent;
use crate::sim::random_sign;

/// Roll for a drop after a block hit
pub fn roll_drop<R: Rng>(rng: &mut R, config: &BreakoutConfig) -> Option<PowerUpKind> {
    if !rng.random_bool(config.powerup_spawn_chance) {
        return None;
    }
    let kind = if rng.random_bool(config.multi_ball_share) {
        PowerUpKind::MultiBall
    } else {
        PowerUpKind::MultiHit
    };
    Some(kind)
}

/// Possibly drop a power-up under the block that was just hit
pub(crate) fn maybe_drop(state: &mut BreakoutState, block: &Rect, events: &mut Vec<GameEvent>) {
    if let Some(kind) = roll_drop(&mut state.rng, &state.config) {
        state
            .power_ups
            .push(PowerUp::below_block(kind, block, &state.config));
        events.push(GameEvent::PowerUpSpawned(kind));
        log::debug!("Power-up dropped: {:?}", kind);
    }
}

/// Advance every falling power-up: caught ones apply their effect, ones that
/// left the playfield are dropped, the rest are kept in order.
pub(crate) fn update_power_ups(state: &mut BreakoutState, events: &mut Vec<GameEvent>) {
    let paddle = state.paddle.rect();
    let floor = state.playfield.y;
    let falling = std::mem::take(&mut state.power_ups);
    let mut survivors = Vec::with_capacity(falling.len());

    for mut power_up in falling {
        power_up.fall(floor);
        if rect_reaches_top(&power_up.rect, &paddle) {
            apply(state, power_up.kind);
            events.push(GameEvent::PowerUpCollected(power_up.kind));
        } else if !power_up.active {
            events.push(GameEvent::PowerUpMissed(power_up.kind));
        } else {
            survivors.push(power_up);
        }
    }

    // Effects never spawn power-ups, but keep anything that appeared meanwhile
    survivors.append(&mut state.power_ups);
    state.power_ups = survivors;
}

/// Apply a caught power-up's effect exactly once
pub fn apply(state: &mut BreakoutState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::MultiBall => {
            let ball = spawn_multi_ball(state);
            log::debug!("Multi-ball: {} balls in play", state.balls.len() + 1);
            state.balls.push(ball);
        }
        PowerUpKind::MultiHit => {
            for ball in &mut state.balls {
                ball.arm_multi_hit();
            }
            log::debug!("Multi-hit armed on {} balls", state.balls.len());
        }
    }
}

/// New ball at the paddle's top-center heading upward at a random angle
fn spawn_multi_ball(state: &mut BreakoutState) -> Ball {
    let pos = Vec2::new(
        state.paddle.center_x(),
        state.paddle.pos.y - state.config.multi_ball_spawn_lift,
    );
    let (min, max) = (
        state.config.multi_ball_speed_min,
        state.config.multi_ball_speed_max,
    );
    let radius = state.config.ball_radius;

    let rng = &mut state.rng;
    let dx = sample_speed(rng, min, max) * random_sign(rng);
    let dy = -sample_speed(rng, min, max);
    Ball::new(pos, Vec2::new(dx, dy), radius)
}

fn sample_speed<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
