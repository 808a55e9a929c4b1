//! Turtle Stomp entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use turtle_stomp::renderer::{CanvasSink, Frame, RenderSink};
    use turtle_stomp::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use turtle_stomp::{HighScore, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        sink: Option<CanvasSink>,
        input: TickInput,
        high_score: HighScore,
        /// True while an animation frame is scheduled
        loop_active: bool,
    }

    impl Game {
        fn new(tuning: Tuning, seed: u64) -> Self {
            let high_score = HighScore::load();
            Self {
                state: GameState::new(tuning, seed, high_score.best),
                sink: None,
                input: TickInput::default(),
                high_score,
                loop_active: false,
            }
        }

        /// Run one loop invocation; returns false once the loop should stop
        fn frame(&mut self, time: f64) -> bool {
            let report = tick(&mut self.state, &self.input, time);
            let ended = report
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::SessionEnded { .. }));

            if report.stepped || ended {
                self.present();
            }
            self.handle_events(&report.events);
            self.state.is_running()
        }

        fn present(&mut self) {
            if let Some(sink) = self.sink.as_mut() {
                sink.present(&Frame::capture(&self.state));
            }
        }

        fn handle_events(&mut self, events: &[GameEvent]) {
            for event in events {
                match *event {
                    GameEvent::PickupCollected { .. } => self.update_hud(),
                    GameEvent::NewHighScore { score } => {
                        if self.high_score.record(score) {
                            self.high_score.save();
                        }
                        self.update_hud();
                    }
                    GameEvent::SessionEnded { score, .. } => {
                        if self.high_score.record(score) {
                            self.high_score.save();
                        }
                        set_display("restartButton", "block");
                    }
                    GameEvent::SessionStarted
                    | GameEvent::PickupSpawned { .. }
                    | GameEvent::PlayerCrushed => {}
                }
            }
        }

        /// Start or restart; keyboard state survives, everything else resets
        fn start(&mut self) {
            let event = self.state.start();
            self.handle_events(&[event]);
            set_display("gameIntro", "none");
            set_display("gameCanvasContainer", "block");
            set_display("restartButton", "none");
            set_text("startButton", "Restart");
            self.update_hud();
        }

        /// Update score elements in DOM
        fn update_hud(&self) {
            set_text("score", &self.state.score.to_string());
            set_text("highScore", &self.state.high_score.to_string());
        }
    }

    fn element(id: &str) -> Option<web_sys::Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(id: &str, value: &str) {
        if let Some(el) = element(id).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            let _ = el.style().set_property("display", value);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("logger init failed: {}", e)));
        }

        log::info!("Turtle Stomp starting...");

        let canvas: HtmlCanvasElement = element("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
            .dyn_into()?;

        let mut tuning = Tuning::load();
        tuning.world_width = canvas.width() as f32;
        tuning.world_height = canvas.height() as f32;
        if let Err(e) = tuning.validate() {
            log::warn!("Canvas size unusable ({}), using defaults", e);
            tuning = Tuning::default();
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, seed)));
        game.borrow_mut().sink = Some(CanvasSink::new(&canvas)?);
        game.borrow().update_hud();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_start_buttons(game.clone());

        // Draw the idle scene once so the canvas is not blank behind the intro
        game.borrow_mut().present();

        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(game: Rc<RefCell<Game>>) {
        for id in ["startButton", "restartButton"] {
            let Some(btn) = element(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let resume = {
                    let mut g = game.borrow_mut();
                    g.start();
                    let resume = !g.loop_active;
                    g.loop_active = true;
                    resume
                };
                if resume {
                    request_animation_frame(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let keep_running = {
            let mut g = game.borrow_mut();
            let keep = g.frame(time);
            if !keep {
                g.loop_active = false;
                if g.state.phase == GamePhase::GameOver {
                    log::info!("Loop stopped at game over");
                }
            }
            keep
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use turtle_stomp::renderer::{Frame, LogSink, RenderSink};
    use turtle_stomp::sim::{GameEvent, GameState, autopilot, tick};
    use turtle_stomp::{HighScore, Tuning};

    env_logger::init();
    log::info!("Turtle Stomp (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let tuning = Tuning::load();
    let mut high_score = HighScore::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x7075_7274);

    // Whole milliseconds so every refresh clears the budget
    let frame_ms = tuning.frame_budget_ms().ceil();
    let mut state = GameState::new(tuning, seed, high_score.best);
    let mut sink = LogSink::default();
    state.start();

    // Two minutes of simulated 60 Hz display refreshes
    let mut now = 0.0;
    while state.is_running() && now < 120_000.0 {
        now += frame_ms;
        let input = autopilot(&state);
        let report = tick(&mut state, &input, now);
        if report.stepped {
            sink.present(&Frame::capture(&state));
        }
        for event in report.events {
            match event {
                GameEvent::NewHighScore { score } | GameEvent::SessionEnded { score, .. } => {
                    if high_score.record(score) {
                        high_score.save();
                    }
                }
                GameEvent::PlayerCrushed => log::info!("Crushed at {:.0} ms", now),
                _ => {}
            }
        }
    }

    println!(
        "Demo finished after {:.1}s ({} frames): score {}, high score {}, phase {:?}",
        now / 1000.0,
        sink.frames,
        state.score,
        high_score.best,
        state.phase
    );
}
