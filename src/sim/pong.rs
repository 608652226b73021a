//! Two-player pong
//!
//! No terminal state: the ball is re-served from the center whenever it
//! leaves through a side, and the opposite player scores.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Rect, Walls, bounce_off_walls};
use super::events::GameEvent;
use super::motion::{Axis, clamp_to_span, integrate, intent_velocity, reflect};
use super::random_sign;
use crate::config::PongConfig;

/// Which player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Input for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PongInput {
    /// W held
    pub left_up: bool,
    /// S held
    pub left_down: bool,
    /// Arrow up held
    pub right_up: bool,
    /// Arrow down held
    pub right_down: bool,
    /// Demo mode - both paddles follow the ball
    pub autopilot: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PongBall {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub left: u32,
    pub right: u32,
}

/// Complete pong state
#[derive(Debug, Clone)]
pub struct PongState {
    pub config: PongConfig,
    pub playfield: Vec2,
    pub ball: PongBall,
    /// Top edge of the left paddle
    pub left_y: f32,
    /// Top edge of the right paddle
    pub right_y: f32,
    pub score: Scoreboard,
    pub frame: u64,
    rng: Pcg32,
}

impl PongState {
    pub fn new(config: PongConfig, width: f32, height: f32, seed: u64) -> Self {
        let playfield = Vec2::new(width.max(0.0), height.max(0.0));
        let paddle_y = (playfield.y - config.paddle_height) / 2.0;
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = PongBall {
            pos: playfield / 2.0,
            vel: random_velocity(&mut rng, config.serve_velocity),
            radius: config.ball_radius,
        };

        let mut state = Self {
            config,
            playfield,
            ball,
            left_y: paddle_y,
            right_y: paddle_y,
            score: Scoreboard::default(),
            frame: 0,
            rng,
        };
        state.clamp_paddles();
        state
    }

    pub fn left_paddle(&self) -> Rect {
        Rect::new(
            self.config.paddle_margin,
            self.left_y,
            self.config.paddle_width,
            self.config.paddle_height,
        )
    }

    pub fn right_paddle(&self) -> Rect {
        Rect::new(
            self.playfield.x - self.config.paddle_width - self.config.paddle_margin,
            self.right_y,
            self.config.paddle_width,
            self.config.paddle_height,
        )
    }

    /// Adopt a new playfield size; paddles are pulled back inside
    pub fn resize(&mut self, width: f32, height: f32) {
        self.playfield = Vec2::new(width.max(0.0), height.max(0.0));
        self.clamp_paddles();
    }

    /// Ball back to the center with the slower re-serve speed
    pub fn reserve(&mut self) {
        self.ball.pos = self.playfield / 2.0;
        self.ball.vel = random_velocity(&mut self.rng, self.config.reserve_velocity);
    }

    fn clamp_paddles(&mut self) {
        let h = self.config.paddle_height;
        self.left_y = clamp_to_span(self.left_y, h, self.playfield.y);
        self.right_y = clamp_to_span(self.right_y, h, self.playfield.y);
    }
}

/// Random signs on both components of `magnitude`
fn random_velocity(rng: &mut Pcg32, magnitude: Vec2) -> Vec2 {
    let dx = magnitude.x * random_sign(rng);
    let dy = magnitude.y * random_sign(rng);
    Vec2::new(dx, dy)
}

/// Advance the game state by one step
pub fn tick(state: &mut PongState, input: &PongInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;

    let ball = &mut state.ball;
    integrate(&mut ball.pos, ball.vel);
    bounce_off_walls(
        ball.pos,
        &mut ball.vel,
        ball.radius,
        state.playfield,
        Walls::CEILING_AND_FLOOR,
    );

    let left = state.left_paddle();
    let right = state.right_paddle();
    let ball = &mut state.ball;
    let hits_left = ball.pos.x - ball.radius < left.right() && left.spans_y(ball.pos.y);
    let hits_right = ball.pos.x + ball.radius > right.x && right.spans_y(ball.pos.y);
    for hit in [hits_left, hits_right] {
        if hit {
            ball.vel = reflect(ball.vel, Axis::X);
            ball.vel.y = state.config.rebound_dy * random_sign(&mut state.rng);
            events.push(GameEvent::PaddleHit);
        }
    }

    let ball = &state.ball;
    let out_left = ball.pos.x + ball.radius < 0.0;
    let out_right = ball.pos.x - ball.radius > state.playfield.x;
    if out_left || out_right {
        let side = if out_left { Side::Right } else { Side::Left };
        match side {
            Side::Left => state.score.left += 1,
            Side::Right => state.score.right += 1,
        }
        events.push(GameEvent::PointScored { side });
        log::debug!(
            "Point to {:?}: {} - {}",
            side,
            state.score.left,
            state.score.right
        );
        state.reserve();
    }

    let input = if input.autopilot {
        autopilot(state)
    } else {
        *input
    };
    let speed = state.config.paddle_speed;
    let h = state.config.paddle_height;
    state.left_y = clamp_to_span(
        state.left_y + intent_velocity(input.left_up, input.left_down, speed),
        h,
        state.playfield.y,
    );
    state.right_y = clamp_to_span(
        state.right_y + intent_velocity(input.right_up, input.right_down, speed),
        h,
        state.playfield.y,
    );

    events
}

/// Both paddles chase the ball's height
pub fn autopilot(state: &PongState) -> PongInput {
    let target = state.ball.pos.y;
    let half = state.config.paddle_height / 2.0;
    let dead_zone = state.config.paddle_height / 5.0;
    let left_center = state.left_y + half;
    let right_center = state.right_y + half;
    PongInput {
        left_up: target < left_center - dead_zone,
        left_down: target > left_center + dead_zone,
        right_up: target < right_center - dead_zone,
        right_down: target > right_center + dead_zone,
        autopilot: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> PongState {
        PongState::new(PongConfig::default(), 800.0, 600.0, 3)
    }

    #[test]
    fn test_serve_from_center() {
        let state = state();
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel.abs(), Vec2::new(5.0, 3.0));
        assert_eq!(state.left_y, 250.0);
        assert_eq!(state.right_y, 250.0);
        assert_eq!(state.right_paddle(), Rect::new(780.0, 250.0, 10.0, 100.0));
    }

    #[test]
    fn test_floor_and_ceiling_bounce() {
        let mut state = state();
        // y = 591 after the step, so the bottom edge (601) is past the floor
        state.ball.pos = Vec2::new(400.0, 588.0);
        state.ball.vel = Vec2::new(5.0, 3.0);
        tick(&mut state, &PongInput::default());
        assert_eq!(state.ball.vel, Vec2::new(5.0, -3.0));

        state.ball.pos = Vec2::new(400.0, 12.0);
        state.ball.vel = Vec2::new(5.0, -3.0);
        tick(&mut state, &PongInput::default());
        assert_eq!(state.ball.vel, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_left_paddle_rebound() {
        let mut state = state();
        state.ball.pos = Vec2::new(28.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 3.0);
        let events = tick(&mut state, &PongInput::default());
        // x = 23, x - r = 13 < 20 with y inside 250..350
        assert_eq!(state.ball.vel.x, 5.0);
        assert_eq!(state.ball.vel.y.abs(), 3.0);
        assert!(events.contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_right_paddle_rebound() {
        let mut state = state();
        state.ball.pos = Vec2::new(770.0, 300.0);
        state.ball.vel = Vec2::new(5.0, -1.0);
        tick(&mut state, &PongInput::default());
        assert_eq!(state.ball.vel.x, -5.0);
        assert_eq!(state.ball.vel.y.abs(), 3.0);
    }

    #[test]
    fn test_miss_beside_paddle() {
        let mut state = state();
        state.left_y = 0.0;
        state.ball.pos = Vec2::new(28.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        tick(&mut state, &PongInput::default());
        assert_eq!(state.ball.vel, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_exit_scores_and_reserves() {
        let mut state = state();
        state.left_y = 0.0;
        state.ball.pos = Vec2::new(-8.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        let events = tick(&mut state, &PongInput::default());
        assert_eq!(state.score, Scoreboard { left: 0, right: 1 });
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel.abs(), Vec2::new(3.0, 2.0));
        assert_eq!(events, vec![GameEvent::PointScored { side: Side::Right }]);

        state.ball.pos = Vec2::new(808.0, 300.0);
        state.ball.vel = Vec2::new(5.0, 0.0);
        state.right_y = 0.0;
        tick(&mut state, &PongInput::default());
        assert_eq!(state.score, Scoreboard { left: 1, right: 1 });
    }

    #[test]
    fn test_paddles_move_and_clamp() {
        let mut state = state();
        let input = PongInput {
            left_up: true,
            right_down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.left_y, 243.0);
        assert_eq!(state.right_y, 257.0);

        for _ in 0..100 {
            tick(&mut state, &input);
        }
        assert_eq!(state.left_y, 0.0);
        assert_eq!(state.right_y, 500.0);
    }

    #[test]
    fn test_autopilot_follows_ball() {
        let mut state = state();
        state.ball.pos.y = 50.0;
        let input = autopilot(&state);
        assert!(input.left_up && input.right_up);
        assert!(!input.left_down && !input.right_down);
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_in_bounds(
            height in 0.0f32..900.0,
            moves in proptest::collection::vec(any::<(bool, bool, bool, bool)>(), 1..200),
        ) {
            let mut state = state();
            state.resize(800.0, height);
            let max_y = (height - state.config.paddle_height).max(0.0);
            for (left_up, left_down, right_up, right_down) in moves {
                let input = PongInput { left_up, left_down, right_up, right_down, autopilot: false };
                tick(&mut state, &input);
                prop_assert!((0.0..=max_y).contains(&state.left_y));
                prop_assert!((0.0..=max_y).contains(&state.right_y));
            }
        }
    }
}
