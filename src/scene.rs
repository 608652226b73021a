//! Scenes: one playable game each, behind a common interface for the loop

use crate::config::ArcadeConfig;
use crate::input::{Intent, breakout_intent, pong_intent};
use crate::renderer::{Surface, draw_breakout, draw_pong};
use crate::sim::GameEvent;
use crate::sim::breakout::{self, BreakoutState, TickInput};
use crate::sim::pong::{self, PongInput, PongState, Side};

/// Which game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameKind {
    #[default]
    Breakout,
    Pong,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Breakout => "breakout",
            GameKind::Pong => "pong",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakout" => Some(GameKind::Breakout),
            "pong" => Some(GameKind::Pong),
            _ => None,
        }
    }

    /// Pick the game from a URL query string such as `?game=pong&x=1`
    pub fn from_query(query: &str) -> Option<Self> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "game")
            .and_then(|(_, value)| Self::from_str(value))
    }
}

pub trait Scene {
    fn kind(&self) -> GameKind;
    /// Feed a key transition. Returns true when the key belongs to this game.
    fn key(&mut self, key: &str, pressed: bool) -> bool;
    /// One logical simulation step
    fn step(&mut self) -> Vec<GameEvent>;
    fn render(&self, surface: &mut dyn Surface);
    fn resize(&mut self, width: f32, height: f32);
    /// False while the game waits in a terminal state
    fn is_running(&self) -> bool;
}

pub fn scene_for(
    kind: GameKind,
    config: &ArcadeConfig,
    width: f32,
    height: f32,
    seed: u64,
) -> Box<dyn Scene> {
    match kind {
        GameKind::Breakout => Box::new(BreakoutScene::new(
            BreakoutState::new(config.breakout.clone(), width, height, seed),
        )),
        GameKind::Pong => Box::new(PongScene::new(PongState::new(
            config.pong.clone(),
            width,
            height,
            seed,
        ))),
    }
}

pub struct BreakoutScene {
    pub state: BreakoutState,
    input: TickInput,
    /// Events raised outside a step, reported with the next one
    pending: Vec<GameEvent>,
}

impl BreakoutScene {
    pub fn new(state: BreakoutState) -> Self {
        Self {
            state,
            input: TickInput::default(),
            pending: Vec::new(),
        }
    }

    pub fn input(&self) -> TickInput {
        self.input
    }
}

impl Scene for BreakoutScene {
    fn kind(&self) -> GameKind {
        GameKind::Breakout
    }

    fn key(&mut self, key: &str, pressed: bool) -> bool {
        let Some(intent) = breakout_intent(key) else {
            return false;
        };
        match intent {
            Intent::Left => self.input.left = pressed,
            Intent::Right => self.input.right = pressed,
            Intent::Restart if pressed && self.state.is_terminal() => {
                self.state.restart();
                self.pending.push(GameEvent::Restarted);
            }
            Intent::ToggleAutopilot if pressed => {
                self.input.autopilot = !self.input.autopilot;
                log::info!("Breakout autopilot: {}", self.input.autopilot);
            }
            _ => {}
        }
        true
    }

    fn step(&mut self) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.pending);
        events.extend(breakout::tick(&mut self.state, &self.input));
        events
    }

    fn render(&self, surface: &mut dyn Surface) {
        draw_breakout(&self.state, surface);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    fn is_running(&self) -> bool {
        !self.state.is_terminal()
    }
}

pub struct PongScene {
    pub state: PongState,
    input: PongInput,
}

impl PongScene {
    pub fn new(state: PongState) -> Self {
        Self {
            state,
            input: PongInput::default(),
        }
    }

    pub fn input(&self) -> PongInput {
        self.input
    }
}

impl Scene for PongScene {
    fn kind(&self) -> GameKind {
        GameKind::Pong
    }

    fn key(&mut self, key: &str, pressed: bool) -> bool {
        let Some(intent) = pong_intent(key) else {
            return false;
        };
        match intent {
            Intent::Up(Side::Left) => self.input.left_up = pressed,
            Intent::Down(Side::Left) => self.input.left_down = pressed,
            Intent::Up(Side::Right) => self.input.right_up = pressed,
            Intent::Down(Side::Right) => self.input.right_down = pressed,
            Intent::ToggleAutopilot if pressed => {
                self.input.autopilot = !self.input.autopilot;
                log::info!("Pong autopilot: {}", self.input.autopilot);
            }
            _ => {}
        }
        true
    }

    fn step(&mut self) -> Vec<GameEvent> {
        pong::tick(&mut self.state, &self.input)
    }

    fn render(&self, surface: &mut dyn Surface) {
        draw_pong(&self.state, surface);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    fn is_running(&self) -> bool {
        true
    }
}
