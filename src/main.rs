//! Paddle Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, Window};

    use paddle_arcade::audio::AudioManager;
    use paddle_arcade::renderer::CanvasSurface;
    use paddle_arcade::{ArcadeConfig, FrameDriver, GameKind, Scene, scene_for};

    /// Share of the window the canvas covers
    const VIEWPORT_FRACTION: (f64, f64) = (0.9, 0.7);

    /// Game instance holding all state
    struct Game {
        scene: Box<dyn Scene>,
        surface: CanvasSurface,
        driver: FrameDriver,
        audio: AudioManager,
        /// An animation frame is queued
        looping: bool,
    }

    impl Game {
        /// Run the steps owed for this frame, then draw
        fn frame(&mut self, time: f64) {
            let steps = self.driver.frame(time);
            for _ in 0..steps {
                let events = self.scene.step();
                self.audio.handle_events(&events);
                if !self.scene.is_running() {
                    break;
                }
            }
            self.scene.render(&mut self.surface);
        }

        fn resize(&mut self, width: u32, height: u32) {
            let size = self.surface.resize(width, height);
            self.scene.resize(size.x, size.y);
            // Parked scenes still need a fresh frame at the new size
            self.scene.render(&mut self.surface);
        }
    }

    fn viewport_size(window: &Window) -> (u32, u32) {
        let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let w = inner(window.inner_width()) * VIEWPORT_FRACTION.0;
        let h = inner(window.inner_height()) * VIEWPORT_FRACTION.1;
        (w.max(0.0) as u32, h.max(0.0) as u32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Paddle Arcade starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let config = ArcadeConfig::load();
        let kind = window
            .location()
            .search()
            .ok()
            .and_then(|q| GameKind::from_query(&q))
            .unwrap_or_default();

        let mut surface = CanvasSurface::new(canvas).inspect_err(|_| {
            log::warn!("Canvas 2D context unavailable - nothing will be drawn");
        })?;
        let (width, height) = viewport_size(&window);
        let size = surface.resize(width, height);

        let seed = js_sys::Date::now() as u64;
        let scene = scene_for(kind, &config, size.x, size.y, seed);
        log::info!(
            "Starting {} on a {}x{} playfield with seed {}",
            kind.as_str(),
            size.x,
            size.y,
            seed
        );

        let game = Rc::new(RefCell::new(Game {
            scene,
            surface,
            driver: FrameDriver::new(config.timing.clone()),
            audio: AudioManager::new(&config.audio),
            looping: false,
        }));

        setup_keyboard(&window, game.clone())?;
        setup_resize(&window, game.clone())?;
        setup_audio_unlock(&window, game.clone())?;

        start_loop(&game);
        log::info!("Paddle Arcade running!");
        Ok(())
    }

    fn setup_keyboard(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let resume = {
                    let mut g = game.borrow_mut();
                    if pressed {
                        g.audio.unlock();
                        if matches!(event.key().as_str(), "m" | "M") {
                            let muted = !g.audio.is_muted();
                            g.audio.set_muted(muted);
                            log::info!("Sound {}", if muted { "muted" } else { "on" });
                        }
                    }
                    let was_running = g.scene.is_running();
                    if g.scene.key(&event.key(), pressed) {
                        // Keep arrows and space from scrolling the page
                        event.prevent_default();
                    }
                    !was_running && g.scene.is_running()
                };
                if resume {
                    start_loop(&game);
                }
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_size(&window);
            game.borrow_mut().resize(width, height);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_audio_unlock(window: &Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().audio.unlock();
        });
        window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn start_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.looping {
                return;
            }
            g.looping = true;
            g.driver.resume();
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.looping = g.scene.is_running();
            g.looping
        };

        if running {
            request_animation_frame(game);
        } else {
            log::info!("Game over - loop parked until restart");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Paddle Arcade (native) starting...");

    let options = headless::Options::parse();
    headless::run(&options);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: the autopilot plays while the outcome is logged
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clap::Parser;
    use paddle_arcade::audio::AudioManager;
    use paddle_arcade::config::StepMode;
    use paddle_arcade::sim::GameEvent;
    use paddle_arcade::sim::pong::Side;
    use paddle_arcade::{ArcadeConfig, FrameDriver, GameKind, scene_for};

    const PLAYFIELD: (f32, f32) = (800.0, 600.0);
    const DISPLAY_HZ: f64 = 60.0;

    /// Run a game headless with the autopilot at the paddles
    #[derive(Parser, Debug)]
    #[command(name = "paddle-arcade", version, about)]
    pub struct Options {
        /// Game to play: breakout or pong
        #[arg(value_parser = parse_game, default_value = "breakout")]
        pub game: GameKind,

        /// Display frames to simulate at 60 Hz
        #[arg(default_value_t = 3600)]
        pub frames: u64,

        /// RNG seed
        #[arg(default_value_t = 1)]
        pub seed: u64,

        /// Override the configured stepping: fixed or perframe
        #[arg(long, value_parser = parse_step_mode)]
        pub step: Option<StepMode>,

        /// Silence sound effects
        #[arg(long)]
        pub mute: bool,

        /// Print the effective configuration as JSON and exit
        #[arg(long)]
        pub print_config: bool,
    }

    fn parse_game(name: &str) -> Result<GameKind, String> {
        GameKind::from_str(name).ok_or_else(|| format!("unknown game `{name}` (breakout or pong)"))
    }

    fn parse_step_mode(name: &str) -> Result<StepMode, String> {
        StepMode::from_str(name).ok_or_else(|| format!("unknown step mode `{name}` (fixed or perframe)"))
    }

    #[derive(Debug, Default)]
    struct Tally {
        steps: u64,
        blocks: u32,
        power_ups: u32,
        balls_lost: u32,
        sounds: usize,
        points: (u32, u32),
        outcome: Option<GameEvent>,
    }

    impl Tally {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::BlockDestroyed { .. } => self.blocks += 1,
                GameEvent::PowerUpCollected(_) => self.power_ups += 1,
                GameEvent::BallLost { .. } => self.balls_lost += 1,
                GameEvent::PointScored { side: Side::Left } => self.points.0 += 1,
                GameEvent::PointScored { side: Side::Right } => self.points.1 += 1,
                GameEvent::Won | GameEvent::Lost => self.outcome = Some(*event),
                _ => {}
            }
        }
    }

    /// Loaded configuration with command-line overrides applied
    fn effective_config(options: &Options) -> ArcadeConfig {
        let mut config = ArcadeConfig::load();
        if let Some(mode) = options.step {
            config.timing.mode = mode;
        }
        if options.mute {
            config.audio.muted = true;
        }
        config
    }

    pub fn run(options: &Options) {
        let config = effective_config(options);
        if options.print_config {
            match config.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Could not serialize config: {}", e),
            }
            return;
        }

        let mut driver = FrameDriver::new(config.timing.clone());
        let mut audio = AudioManager::new(&config.audio);
        audio.unlock();
        if audio.is_muted() {
            log::debug!("Sound effects muted");
        }
        let mut scene = scene_for(options.game, &config, PLAYFIELD.0, PLAYFIELD.1, options.seed);
        scene.key("i", true);

        log::info!(
            "Running {} for {} frames (seed {}, {} stepping)",
            options.game.as_str(),
            options.frames,
            options.seed,
            driver.mode().as_str()
        );
        if driver.mode() == StepMode::PerFrame {
            log::debug!("Per-frame stepping ignores the display rate");
        }

        let mut tally = Tally::default();
        'frames: for frame in 0..options.frames {
            let now_ms = frame as f64 * 1000.0 / DISPLAY_HZ;
            for _ in 0..driver.frame(now_ms) {
                let events = scene.step();
                tally.sounds += audio.handle_events(&events);
                events.iter().for_each(|e| tally.record(e));
                tally.steps += 1;
                if !scene.is_running() {
                    break 'frames;
                }
            }
        }

        let outcome = match tally.outcome {
            Some(GameEvent::Won) => "Won",
            Some(_) => "Lost",
            None => "Still playing",
        };
        match options.game {
            GameKind::Breakout => log::info!(
                "{} after {} steps: {} blocks, {} power-ups caught, {} balls lost, {} sounds",
                outcome,
                tally.steps,
                tally.blocks,
                tally.power_ups,
                tally.balls_lost,
                tally.sounds
            ),
            GameKind::Pong => log::info!(
                "Score after {} steps: {} - {}",
                tally.steps,
                tally.points.0,
                tally.points.1
            ),
        }
    }

}
