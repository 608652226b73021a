//! Keyboard input mapping
//!
//! Key names are `KeyboardEvent.key` values. Direction intents are held
//! while the key is down; commands fire on press only.

use crate::sim::pong::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Left,
    Right,
    Up(Side),
    Down(Side),
    /// New run after a win or loss
    Restart,
    ToggleAutopilot,
}

/// Breakout keys: arrows steer, space restarts
pub fn breakout_intent(key: &str) -> Option<Intent> {
    match key {
        "ArrowLeft" => Some(Intent::Left),
        "ArrowRight" => Some(Intent::Right),
        " " | "Spacebar" => Some(Intent::Restart),
        "i" | "I" => Some(Intent::ToggleAutopilot),
        _ => None,
    }
}

/// Pong keys: W/S for the left paddle, arrows for the right
pub fn pong_intent(key: &str) -> Option<Intent> {
    match key {
        "w" | "W" => Some(Intent::Up(Side::Left)),
        "s" | "S" => Some(Intent::Down(Side::Left)),
        "ArrowUp" => Some(Intent::Up(Side::Right)),
        "ArrowDown" => Some(Intent::Down(Side::Right)),
        "i" | "I" => Some(Intent::ToggleAutopilot),
        _ => None,
    }
}
