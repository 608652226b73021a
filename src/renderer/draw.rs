//! Scene drawing
//!
//! Neon look: every shape carries a glow in its own color.

use glam::Vec2;

use super::{Color, Surface, TextAlign, TextStyle};
use crate::sim::breakout::{BlockStatus, BreakoutState, GameStatus, PowerUpKind};
use crate::sim::pong::PongState;

pub const NEON_CYAN: Color = Color::rgb(0x00, 0xff, 0xcc);
pub const BLOCK_RED: Color = Color::rgb(0xff, 0x00, 0x00);
pub const GOAL_GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
pub const MULTI_HIT_MAGENTA: Color = Color::rgb(0xff, 0x00, 0xff);
pub const GAME_OVER_RED: Color = Color::rgb(0xff, 0x00, 0x40);
pub const PONG_PADDLE_BLUE: Color = Color::rgb(0x66, 0xaa, 0xff);

const HEADING_FONT: &str = "Orbitron, sans-serif";
const BODY_FONT: &str = "Roboto, sans-serif";

pub fn draw_breakout(state: &BreakoutState, surface: &mut dyn Surface) {
    surface.clear();

    surface.set_glow(NEON_CYAN, 15.0);
    surface.fill_rect(&state.paddle.rect(), NEON_CYAN);

    for (_, _, block) in state.grid.iter() {
        let color = match block.status {
            BlockStatus::Destroyed => continue,
            BlockStatus::Normal => BLOCK_RED,
            BlockStatus::Goal => GOAL_GREEN,
        };
        surface.set_glow(color, 15.0);
        surface.fill_rect(&block.rect, color);
    }

    surface.set_glow(Color::TRANSPARENT, 0.0);
    surface.fill_text(
        &format!("Score: {}", state.score),
        Vec2::new(20.0, 30.0),
        &TextStyle {
            size_px: 20.0,
            family: HEADING_FONT,
            color: NEON_CYAN,
            align: TextAlign::Left,
        },
    );

    for ball in &state.balls {
        // Older positions fade out
        let len = ball.trail.len() as f32;
        surface.set_glow(NEON_CYAN, 10.0);
        for (i, pos) in ball.trail.iter().enumerate() {
            let alpha = (i as f32 + 1.0) / len / 2.0;
            surface.fill_circle(*pos, ball.radius, NEON_CYAN.with_alpha(alpha));
        }
        surface.set_glow(NEON_CYAN, 20.0);
        surface.fill_circle(ball.pos, ball.radius, NEON_CYAN);
    }

    for power_up in &state.power_ups {
        let color = match power_up.kind {
            PowerUpKind::MultiBall => GOAL_GREEN,
            PowerUpKind::MultiHit => MULTI_HIT_MAGENTA,
        };
        surface.set_glow(color, 15.0);
        surface.fill_rect(&power_up.rect, color);
    }
    surface.set_glow(Color::TRANSPARENT, 0.0);

    match state.status {
        GameStatus::Playing => {}
        GameStatus::Won => draw_banner(surface, state.playfield, "You Win!", GOAL_GREEN),
        GameStatus::Lost => draw_banner(surface, state.playfield, "Game Over", GAME_OVER_RED),
    }
}

/// Centered headline with the restart hint beneath
fn draw_banner(surface: &mut dyn Surface, playfield: Vec2, title: &str, color: Color) {
    let center = playfield / 2.0;
    surface.fill_text(
        title,
        center - Vec2::new(0.0, 20.0),
        &TextStyle {
            size_px: 48.0,
            family: HEADING_FONT,
            color,
            align: TextAlign::Center,
        },
    );
    surface.fill_text(
        "Press Space to Restart",
        center + Vec2::new(0.0, 20.0),
        &TextStyle {
            size_px: 24.0,
            family: BODY_FONT,
            color,
            align: TextAlign::Center,
        },
    );
}

pub fn draw_pong(state: &PongState, surface: &mut dyn Surface) {
    surface.clear();

    surface.set_glow(Color::WHITE, 15.0);
    surface.fill_circle(state.ball.pos, state.ball.radius, Color::WHITE);

    surface.set_glow(PONG_PADDLE_BLUE, 10.0);
    surface.fill_rect(&state.left_paddle(), PONG_PADDLE_BLUE);
    surface.fill_rect(&state.right_paddle(), PONG_PADDLE_BLUE);

    surface.set_glow(Color::TRANSPARENT, 0.0);
    surface.fill_text(
        &format!("{}   {}", state.score.left, state.score.right),
        Vec2::new(state.playfield.x / 2.0, 40.0),
        &TextStyle {
            size_px: 32.0,
            family: HEADING_FONT,
            color: Color::WHITE.with_alpha(0.8),
            align: TextAlign::Center,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BreakoutConfig, PongConfig};
    use crate::sim::Rect;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Glow(Color, f32),
        Circle(Vec2, f32, Color),
        Rect(Rect, Color),
        Text(String, Vec2, Color),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn rects(&self, color: Color) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Rect(_, col) if *col == color))
                .count()
        }

        fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(t, _, _) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn set_glow(&mut self, color: Color, blur: f32) {
            self.calls.push(Call::Glow(color, blur));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.calls.push(Call::Circle(center, radius, color));
        }
        fn fill_rect(&mut self, rect: &Rect, color: Color) {
            self.calls.push(Call::Rect(*rect, color));
        }
        fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
            self.calls.push(Call::Text(text.to_string(), pos, style.color));
        }
    }

    fn breakout() -> BreakoutState {
        BreakoutState::new(BreakoutConfig::default(), 800.0, 600.0, 1)
    }

    #[test]
    fn test_breakout_frame_contents() {
        let state = breakout();
        let mut rec = Recorder::default();
        draw_breakout(&state, &mut rec);

        assert_eq!(rec.calls[0], Call::Clear);
        // Paddle
        assert_eq!(rec.rects(NEON_CYAN), 1);
        // 11 x 14 grid, one goal
        assert_eq!(rec.rects(BLOCK_RED), 153);
        assert_eq!(rec.rects(GOAL_GREEN), 1);
        assert_eq!(rec.texts(), vec!["Score: 0"]);
        assert!(rec.calls.contains(&Call::Circle(Vec2::new(400.0, 300.0), 12.0, NEON_CYAN)));
    }

    #[test]
    fn test_destroyed_blocks_are_skipped() {
        let mut state = breakout();
        state.grid.destroy(0, 0);
        state.grid.destroy(1, 0);
        let mut rec = Recorder::default();
        draw_breakout(&state, &mut rec);
        assert_eq!(rec.rects(BLOCK_RED), 151);
    }

    #[test]
    fn test_trail_fades_in() {
        let mut state = breakout();
        for _ in 0..4 {
            state.balls[0].record_trail(15);
        }
        let mut rec = Recorder::default();
        draw_breakout(&state, &mut rec);
        let alphas: Vec<f32> = rec
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Circle(_, _, col) if col.a < 1.0 => Some(col.a),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.125, 0.25, 0.375, 0.5]);
    }

    #[test]
    fn test_terminal_banners() {
        let mut state = breakout();
        state.status = GameStatus::Lost;
        let mut rec = Recorder::default();
        draw_breakout(&state, &mut rec);
        assert_eq!(
            rec.texts(),
            vec!["Score: 0", "Game Over", "Press Space to Restart"]
        );
        assert!(rec.calls.contains(&Call::Text(
            "Game Over".into(),
            Vec2::new(400.0, 280.0),
            GAME_OVER_RED
        )));

        state.status = GameStatus::Won;
        let mut rec = Recorder::default();
        draw_breakout(&state, &mut rec);
        assert_eq!(rec.texts()[1], "You Win!");
    }

    #[test]
    fn test_tiny_playfield_draws_no_blocks() {
        let state = BreakoutState::new(BreakoutConfig::default(), 40.0, 40.0, 1);
        let mut rec = Recorder::default();
        draw_breakout(&state, &mut rec);
        assert_eq!(rec.rects(BLOCK_RED) + rec.rects(GOAL_GREEN), 0);
    }

    #[test]
    fn test_pong_frame_contents() {
        let mut state = PongState::new(PongConfig::default(), 800.0, 600.0, 1);
        state.score.left = 2;
        state.score.right = 5;
        let mut rec = Recorder::default();
        draw_pong(&state, &mut rec);

        assert_eq!(rec.rects(PONG_PADDLE_BLUE), 2);
        assert!(rec.calls.contains(&Call::Rect(
            Rect::new(10.0, 250.0, 10.0, 100.0),
            PONG_PADDLE_BLUE
        )));
        assert!(rec.calls.contains(&Call::Circle(
            Vec2::new(400.0, 300.0),
            10.0,
            Color::WHITE
        )));
        assert_eq!(rec.texts(), vec!["2   5"]);
    }
}
