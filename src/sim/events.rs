//! Events emitted by a simulation step
//!
//! The step functions stay pure; anything the outside world reacts to
//! (sound effects, logging, HUD flashes) is reported here instead.

use super::breakout::{BlockStatus, PowerUpKind};
use super::pong::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A ball struck a block (once per collision, even for multi-hit sweeps)
    BlockHit { column: usize, row: usize },
    /// A block went from alive to destroyed
    BlockDestroyed {
        column: usize,
        row: usize,
        was: BlockStatus,
    },
    PaddleHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    /// Fell off the bottom without being caught
    PowerUpMissed(PowerUpKind),
    /// A ball dropped out of the bottom; `remaining` counts balls still in
    /// play once the step finished
    BallLost { remaining: usize },
    /// The ball left the pong playfield; `side` wins the point
    PointScored { side: Side },
    Won,
    Lost,
    Restarted,
}
