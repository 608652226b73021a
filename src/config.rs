//! Game tuning and preferences
//!
//! Every gameplay constant lives here so the simulation code never carries
//! bare numbers. Loaded once at startup; partial JSON overrides are merged
//! over the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Breakout tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutConfig {
    // === Ball ===
    /// Ball radius
    pub ball_radius: f32,
    /// Velocity of the ball served at game start (units per step)
    pub ball_start_velocity: Vec2,
    /// Number of past positions kept for the trail
    pub trail_length: usize,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the playfield bottom to the paddle top
    pub paddle_bottom_offset: f32,
    /// Horizontal speed while a direction key is held (units per step)
    pub paddle_speed: f32,

    // === Block grid ===
    pub block_width: f32,
    pub block_height: f32,
    /// Space above the first row (score line lives here)
    pub block_offset_top: f32,
    /// Margin on both sides of the grid
    pub block_offset_left: f32,
    /// Space kept free below the grid for the paddle
    pub block_reserved_bottom: f32,
    /// Gap between blocks on playfields narrower than `narrow_breakpoint`
    pub block_padding_narrow: f32,
    /// Gap between blocks on playfields narrower than `medium_breakpoint`
    pub block_padding_medium: f32,
    /// Gap between blocks on wider playfields
    pub block_padding_wide: f32,
    pub narrow_breakpoint: f32,
    pub medium_breakpoint: f32,

    // === Power-ups ===
    /// Edge length of the square power-up capsule
    pub powerup_size: f32,
    /// Fall speed (units per step)
    pub powerup_fall_speed: f32,
    /// Chance that a block hit drops a power-up
    pub powerup_spawn_chance: f64,
    /// Share of dropped power-ups that are multi-ball (the rest are multi-hit)
    pub multi_ball_share: f64,
    /// Blocks a multi-hit ball may destroy in one sweep
    pub multi_hit_cap: u32,
    /// Lower bound of each velocity component of a multi-ball spawn
    pub multi_ball_speed_min: f32,
    /// Upper bound (exclusive) of each velocity component of a multi-ball spawn
    pub multi_ball_speed_max: f32,
    /// Height above the paddle top where multi-ball spawns appear
    pub multi_ball_spawn_lift: f32,
}

impl Default for BreakoutConfig {
    fn default() -> Self {
        Self {
            ball_radius: 12.0,
            ball_start_velocity: Vec2::new(4.0, -4.0),
            trail_length: 15,

            paddle_width: 120.0,
            paddle_height: 15.0,
            paddle_bottom_offset: 30.0,
            paddle_speed: 15.0,

            block_width: 60.0,
            block_height: 20.0,
            block_offset_top: 100.0,
            block_offset_left: 35.0,
            block_reserved_bottom: 150.0,
            block_padding_narrow: 3.0,
            block_padding_medium: 5.0,
            block_padding_wide: 8.0,
            narrow_breakpoint: 600.0,
            medium_breakpoint: 900.0,

            powerup_size: 20.0,
            powerup_fall_speed: 3.0,
            powerup_spawn_chance: 0.3,
            multi_ball_share: 0.5,
            multi_hit_cap: 5,
            multi_ball_speed_min: 2.0,
            multi_ball_speed_max: 6.0,
            multi_ball_spawn_lift: 20.0,
        }
    }
}

impl BreakoutConfig {
    /// Block gap for a playfield of the given width
    pub fn block_padding(&self, playfield_width: f32) -> f32 {
        if playfield_width < self.narrow_breakpoint {
            self.block_padding_narrow
        } else if playfield_width < self.medium_breakpoint {
            self.block_padding_medium
        } else {
            self.block_padding_wide
        }
    }
}

/// Pong tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    pub ball_radius: f32,
    /// Speed magnitudes of the opening serve (signs are random)
    pub serve_velocity: Vec2,
    /// Speed magnitudes after the ball leaves through a side
    pub reserve_velocity: Vec2,
    /// Vertical speed magnitude given to the ball by a paddle rebound
    pub rebound_dy: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between each paddle and its side of the playfield
    pub paddle_margin: f32,
    pub paddle_speed: f32,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            ball_radius: 10.0,
            serve_velocity: Vec2::new(5.0, 3.0),
            reserve_velocity: Vec2::new(3.0, 2.0),
            rebound_dy: 3.0,
            paddle_width: 10.0,
            paddle_height: 100.0,
            paddle_margin: 10.0,
            paddle_speed: 7.0,
        }
    }
}

/// How simulation steps are tied to display frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StepMode {
    /// Accumulate wall-clock time and run steps at `steps_per_second`
    #[default]
    Fixed,
    /// One step per display frame, whatever the refresh rate
    PerFrame,
}

impl StepMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepMode::Fixed => "Fixed",
            StepMode::PerFrame => "PerFrame",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(StepMode::Fixed),
            "per_frame" | "perframe" | "frame" => Some(StepMode::PerFrame),
            _ => None,
        }
    }
}

/// Loop driver timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub mode: StepMode,
    /// Logical steps per second in `Fixed` mode
    pub steps_per_second: f32,
    /// Maximum steps per frame to prevent spiral of death
    pub max_substeps: u32,
    /// Longest frame delta accepted (seconds), e.g. after a background tab
    pub max_frame_delta: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            mode: StepMode::Fixed,
            steps_per_second: 60.0,
            max_substeps: 8,
            max_frame_delta: 0.1,
        }
    }
}

/// Sound effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Effect volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,
    pub block_hit_src: String,
    pub block_destroyed_src: String,
    pub goal_src: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            muted: false,
            block_hit_src: "sfx/block_hit.wav".to_string(),
            block_destroyed_src: "sfx/destroyed.wav".to_string(),
            goal_src: "sfx/destroyed.wav".to_string(),
        }
    }
}

/// Complete arcade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArcadeConfig {
    pub breakout: BreakoutConfig,
    pub pong: PongConfig,
    pub timing: TimingConfig,
    pub audio: AudioConfig,
}

impl ArcadeConfig {
    /// Native env var naming a JSON config file
    pub const ENV_PATH: &'static str = "PADDLE_ARCADE_CONFIG";

    /// DOM id of the `<script type="application/json">` holding overrides
    pub const ELEMENT_ID: &'static str = "arcade-config";

    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Serialize for display/debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would make the simulation misbehave
    pub fn sanitized(mut self) -> Self {
        let b = &mut self.breakout;
        for v in [
            &mut b.ball_radius,
            &mut b.paddle_width,
            &mut b.paddle_height,
            &mut b.paddle_bottom_offset,
            &mut b.paddle_speed,
            &mut b.block_width,
            &mut b.block_height,
            &mut b.block_offset_top,
            &mut b.block_offset_left,
            &mut b.block_reserved_bottom,
            &mut b.block_padding_narrow,
            &mut b.block_padding_medium,
            &mut b.block_padding_wide,
            &mut b.powerup_size,
            &mut b.powerup_fall_speed,
            &mut b.multi_ball_speed_min,
            &mut b.multi_ball_speed_max,
            &mut b.multi_ball_spawn_lift,
        ] {
            *v = v.max(0.0);
        }
        b.powerup_spawn_chance = b.powerup_spawn_chance.clamp(0.0, 1.0);
        b.multi_ball_share = b.multi_ball_share.clamp(0.0, 1.0);
        b.multi_hit_cap = b.multi_hit_cap.max(1);
        if b.multi_ball_speed_max < b.multi_ball_speed_min {
            b.multi_ball_speed_max = b.multi_ball_speed_min;
        }

        let p = &mut self.pong;
        for v in [
            &mut p.ball_radius,
            &mut p.rebound_dy,
            &mut p.paddle_width,
            &mut p.paddle_height,
            &mut p.paddle_margin,
            &mut p.paddle_speed,
        ] {
            *v = v.max(0.0);
        }
        p.serve_velocity = p.serve_velocity.abs();
        p.reserve_velocity = p.reserve_velocity.abs();

        let t = &mut self.timing;
        if !(t.steps_per_second > 0.0) {
            t.steps_per_second = TimingConfig::default().steps_per_second;
        }
        t.max_substeps = t.max_substeps.max(1);
        t.max_frame_delta = t.max_frame_delta.max(0.0);

        self.audio.volume = self.audio.volume.clamp(0.0, 1.0);
        self
    }

    /// Load overrides from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => Self::parse_or_default(&json),
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Load overrides from the file named by `PADDLE_ARCADE_CONFIG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default config");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json),
            Err(e) => {
                log::warn!("Could not read config {}: {} - using defaults", path, e);
                Self::default()
            }
        }
    }

    fn parse_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded config overrides");
                config
            }
            Err(e) => {
                log::warn!("Malformed config ({}) - using defaults", e);
                Self::default()
            }
        }
    }
}
