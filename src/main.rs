//! Skyflap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use skyflap::Tuning;
    use skyflap::platform::{FrameClock, InputEvent, InputQueue};
    use skyflap::renderer::{Color, ImageId, Painter, Renderer, TextAlign, css_color, select_renderer};
    use skyflap::sim::{GamePhase, GameState, Rect, autopilot, tick};

    /// Log a failed canvas call and keep drawing
    fn log_canvas_error(op: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::debug!("Canvas {} failed: {:?}", op, e);
        }
    }

    /// Painter backed by a 2D canvas context
    struct CanvasPainter {
        ctx: CanvasRenderingContext2d,
        background: HtmlImageElement,
        entity: HtmlImageElement,
    }

    impl Painter for CanvasPainter {
        fn clear(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.ctx.set_fill_style_str(&css_color(color));
            self.ctx.fill_rect(
                rect.left as f64,
                rect.top as f64,
                rect.width as f64,
                rect.height as f64,
            );
        }

        fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32) {
            self.ctx.set_stroke_style_str(&css_color(color));
            self.ctx.set_line_width(line_width as f64);
            self.ctx.stroke_rect(
                rect.left as f64,
                rect.top as f64,
                rect.width as f64,
                rect.height as f64,
            );
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ctx.begin_path();
            let result = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            log_canvas_error("arc", result);
            self.ctx.set_fill_style_str(&css_color(color));
            self.ctx.fill();
            self.ctx.close_path();
        }

        fn draw_image(&mut self, image: ImageId, rect: Rect) {
            let element = match image {
                ImageId::Background => &self.background,
                ImageId::Entity => &self.entity,
            };
            let result = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                element,
                rect.left as f64,
                rect.top as f64,
                rect.width as f64,
                rect.height as f64,
            );
            log_canvas_error("draw_image", result);
        }

        fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign) {
            self.ctx.set_fill_style_str(&css_color(color));
            self.ctx.set_font(&format!("{}px Arial", size));
            self.ctx.set_text_align(match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
            });
            let result = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
            log_canvas_error("fill_text", result);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        renderer: Box<dyn Renderer>,
        painter: CanvasPainter,
        clock: FrameClock,
        input: InputQueue,
        /// Demo mode - autopilot plays the game
        idle_mode: bool,
        last_phase: GamePhase,
    }

    impl Game {
        /// Run the simulation steps due this frame
        fn update(&mut self, time: f64) {
            let steps = self.clock.frame(time);
            for _ in 0..steps {
                let command = if self.idle_mode {
                    autopilot::decide(&self.state, &self.tuning)
                } else {
                    self.input.pop(self.state.phase)
                };
                tick(&mut self.state, command, &self.tuning);
            }

            if self.state.phase != self.last_phase {
                log::info!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
                self.last_phase = self.state.phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.renderer
                .render(&self.state, &self.tuning, &mut self.painter);
        }
    }

    /// Load an image and wait until it is decoded
    async fn load_image(id: ImageId) -> Option<HtmlImageElement> {
        let image = HtmlImageElement::new().ok()?;
        image.set_src(id.path());
        match JsFuture::from(image.decode()).await {
            Ok(_) => Some(image),
            Err(e) => {
                log::warn!("Image {} unavailable: {:?}", id.path(), e);
                None
            }
        }
    }

    /// Playfield sized to the canvas, or the default canvas if that is unplayable
    fn tuning_for_canvas(canvas: &HtmlCanvasElement) -> Tuning {
        let tuning = Tuning::for_playfield(canvas.width() as f32, canvas.height() as f32);
        match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Canvas size rejected ({}), using default playfield", e);
                let tuning = Tuning::default();
                canvas.set_width(tuning.playfield_width as u32);
                canvas.set_height(tuning.playfield_height as u32);
                tuning
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skyflap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let tuning = tuning_for_canvas(&canvas);

        // Renderer is chosen once, from what actually loaded
        let background = load_image(ImageId::Background).await;
        let entity = load_image(ImageId::Entity).await;
        let images_ready = background.is_some() && entity.is_some();
        let renderer = select_renderer(images_ready);
        log::info!("Using {} renderer", renderer.name());

        let placeholder = || HtmlImageElement::new().expect("image element");
        let painter = CanvasPainter {
            ctx,
            background: background.unwrap_or_else(placeholder),
            entity: entity.unwrap_or_else(placeholder),
        };

        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, &tuning),
            clock: FrameClock::new(tuning.tick_rate),
            tuning,
            renderer,
            painter,
            input: InputQueue::new(),
            idle_mode: false,
            last_phase: GamePhase::AwaitingStart,
        }));

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Skyflap running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.press(&InputEvent::Click);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.press(&InputEvent::Touch);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Held keys auto-repeat; only the first press counts
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                let code = event.code();
                if code == "KeyI" {
                    g.idle_mode = !g.idle_mode;
                    g.input.clear();
                    g.clock.reset();
                    log::info!("Idle mode: {}", g.idle_mode);
                    return;
                }
                if code == "Space" {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
                g.input.press(&InputEvent::Key(code));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Skyflap (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` to play");

    let tuning = load_tuning(std::env::args().nth(1));
    let seed = env_or("SKYFLAP_SEED", 1);
    let ticks = env_or("SKYFLAP_TICKS", 3600);

    let summary = headless::run_demo(seed, ticks, &tuning);
    println!(
        "\nDemo finished: {} ticks, {} runs, best score {} ({} draw commands in last frame)",
        ticks, summary.runs, summary.best_score, summary.last_frame_commands
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn env_or(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}: not a number", name, value);
            default
        }),
        Err(_) => default,
    }
}

/// Tuning from an optional JSON file, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<String>) -> skyflap::Tuning {
    use skyflap::Tuning;

    let Some(path) = path else {
        return Tuning::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Using default tuning, {} unusable: {}", path, e);
            Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use skyflap::Tuning;
    use skyflap::renderer::{CommandList, Renderer, select_renderer};
    use skyflap::sim::{Command, GameEvent, GameState, autopilot, tick};

    pub struct DemoSummary {
        pub runs: u32,
        pub best_score: u32,
        pub last_frame_commands: usize,
    }

    /// Let the autopilot play for `ticks` steps
    pub fn run_demo(seed: u64, ticks: u64, tuning: &Tuning) -> DemoSummary {
        let mut state = GameState::new(seed, tuning);
        let mut runs = 0;

        for _ in 0..ticks {
            let command = autopilot::decide(&state, tuning);
            tick(&mut state, command, tuning);
            if command == Command::Start && state.events.contains(&GameEvent::Started) {
                runs += 1;
            }
        }

        // No images natively, so the fallback renderer describes the last frame
        let renderer = select_renderer(false);
        let mut frame = CommandList::new();
        renderer.render(&state, tuning, &mut frame);

        DemoSummary {
            runs,
            best_score: state.best_score,
            last_frame_commands: frame.len(),
        }
    }
}
