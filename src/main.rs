//! Heart Breakout entry point
//!
//! The web build drives the game from requestAnimationFrame. The native build
//! runs a headless autopilot game and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use heart_breakout::platform::keymap::{command_for_key, is_game_key};
    use heart_breakout::platform::titles::{ORIGINAL_TITLE_ID, WIN_TITLE_ID, title_classes};
    use heart_breakout::renderer::{Palette, RenderState, TextRun, VertexBatch, draw_scene};
    use heart_breakout::sim::GameEvent;
    use heart_breakout::{GameConfig, GameSession, InputCommand};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        palette: Palette,
        batch: VertexBatch,
        render_state: Option<RenderState>,
        text_layer: Option<CanvasRenderingContext2d>,
        dpr: f64,
        /// A requestAnimationFrame callback is outstanding
        frame_pending: bool,
    }

    impl Game {
        fn new(session: GameSession, seed: u64, dpr: f64) -> Self {
            let blocks = session.state().total_blocks() as usize;
            Self {
                session,
                palette: Palette::new(seed, blocks),
                batch: VertexBatch::new(),
                render_state: None,
                text_layer: None,
                dpr,
                frame_pending: false,
            }
        }

        /// Apply a command; returns true if a new frame loop should start
        fn apply(&mut self, command: InputCommand) -> bool {
            let restarting =
                command == InputCommand::StartOrRestart && self.session.phase().has_ended();
            if let Err(e) = self.session.apply_input(command) {
                log::error!("Failed to apply {:?}: {}", command, e);
                return false;
            }
            if restarting {
                let blocks = self.session.state().total_blocks() as usize;
                self.palette.shuffle(blocks);
                self.update_titles();
            }

            if self.session.wants_frames() && !self.frame_pending {
                self.frame_pending = true;
                return true;
            }
            false
        }

        /// Swap the page heading for the win banner (or back)
        fn update_titles(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let classes = title_classes(self.session.phase());
            for (id, class) in [
                (ORIGINAL_TITLE_ID, classes.original),
                (WIN_TITLE_ID, classes.win),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", class);
                }
            }
        }

        /// Render the current snapshot
        fn render(&mut self) {
            self.batch.clear();
            draw_scene(&self.session, &self.palette, &mut self.batch);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }

            if let Some(ref ctx) = self.text_layer {
                draw_text_runs(ctx, &self.batch.text, self.dpr);
            }
        }
    }

    fn css_color(color: [f32; 4]) -> String {
        format!(
            "rgb({}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8
        )
    }

    /// Paint queued text (emoji actors and prompts) on the 2D overlay canvas
    fn draw_text_runs(ctx: &CanvasRenderingContext2d, runs: &[TextRun], dpr: f64) {
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        let canvas = ctx.canvas();
        let (w, h) = canvas
            .map(|c| (c.width() as f64 / dpr, c.height() as f64 / dpr))
            .unwrap_or((0.0, 0.0));
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        for run in runs {
            let height = run.style.height as f64;
            ctx.save();
            let _ = ctx.translate(run.center_x as f64, run.top_y as f64 + height / 2.0);
            let _ = ctx.rotate((run.style.angle_deg as f64).to_radians());
            if run.style.flipped_x {
                let _ = ctx.scale(-1.0, 1.0);
            }
            ctx.set_font(&format!("{}px sans-serif", height));
            ctx.set_global_alpha(run.color[3] as f64);
            ctx.set_fill_style_str(&css_color(run.color));
            let _ = match run.style.max_width {
                Some(max_width) => {
                    ctx.fill_text_with_max_width(&run.text, 0.0, 0.0, max_width as f64)
                }
                None => ctx.fill_text(&run.text, 0.0, 0.0),
            };
            ctx.restore();
        }
    }

    fn sized_canvas(
        document: &web_sys::Document,
        id: &str,
        width: f32,
        height: f32,
        dpr: f64,
    ) -> Option<HtmlCanvasElement> {
        let canvas: HtmlCanvasElement = document.get_element_by_id(id)?.dyn_into().ok()?;
        canvas.set_width((width as f64 * dpr) as u32);
        canvas.set_height((height as f64 * dpr) as u32);
        let _ = canvas.set_attribute("style", &format!("width:{}px;height:{}px", width, height));
        Some(canvas)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Breakout starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GameConfig::load();
        // Persist the effective config under the LocalStorage key
        config.save();
        let (width, height) = (config.arena_width, config.canvas_height());
        let session = match GameSession::new(config) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                return;
            }
        };

        let dpr = window.device_pixel_ratio();
        let canvas = sized_canvas(&document, "canvas", width, height, dpr).expect("no canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(session, seed, dpr)));
        log::info!("Block palette seed: {}", seed);

        if let Some(layer) = sized_canvas(&document, "text-layer", width, height, dpr) {
            let ctx = layer
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
            game.borrow_mut().text_layer = ctx;
        } else {
            log::warn!("No text layer canvas; emoji and prompts are hidden");
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            (width, height),
        )
        .await
        {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(game.clone());

        // Static first frame; the loop starts with the first start key
        game.borrow_mut().render();

        log::info!("Heart Breakout ready");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if is_game_key(&key) {
                    event.prevent_default();
                }
                if pressed && event.repeat() {
                    return;
                }
                let Some(command) = command_for_key(&key, pressed) else {
                    return;
                };
                let start_loop = game.borrow_mut().apply(command);
                if start_loop {
                    request_animation_frame(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
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
        let keep_running = {
            let mut g = game.borrow_mut();
            let status = g.session.advance_to(time);

            for event in &status.events {
                match event {
                    GameEvent::GameOver => log::info!("Game over"),
                    GameEvent::Won => {
                        log::info!("All blocks cleared!");
                        g.update_titles();
                    }
                    other => log::debug!("{:?}", other),
                }
            }

            g.render();
            g.frame_pending = status.keep_running;
            status.keep_running
        };

        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use heart_breakout::sim::{Direction, GameEvent, paddle_offset};
    use heart_breakout::{GameConfig, GameError, GameSession, InputCommand};

    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Ten minutes of frames
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    fn down(direction: Direction) -> InputCommand {
        match direction {
            Direction::Left => InputCommand::MoveLeftDown,
            Direction::Right => InputCommand::MoveRightDown,
        }
    }

    fn up(direction: Direction) -> InputCommand {
        match direction {
            Direction::Left => InputCommand::MoveLeftUp,
            Direction::Right => InputCommand::MoveRightUp,
        }
    }

    /// Play one game with the paddle chasing the ball
    pub fn run(config: GameConfig) -> Result<(), GameError> {
        let dead_zone = config.paddle_width / 4.0;
        let mut session = GameSession::new(config)?;
        session.apply_input(InputCommand::StartOrRestart)?;

        let mut held: Option<Direction> = None;
        let mut destroyed = 0u32;
        let mut paddle_hits = 0u32;

        for frame in 0..MAX_FRAMES {
            let offset = paddle_offset(session.state());
            let wanted = if offset < -dead_zone {
                Some(Direction::Left)
            } else if offset > dead_zone {
                Some(Direction::Right)
            } else {
                None
            };
            if wanted != held {
                if let Some(direction) = held {
                    session.apply_input(up(direction))?;
                }
                if let Some(direction) = wanted {
                    session.apply_input(down(direction))?;
                }
                held = wanted;
            }

            let status = session.advance_frame(FRAME_MS);
            for event in &status.events {
                match event {
                    GameEvent::PaddleHit { percent_along } => {
                        paddle_hits += 1;
                        log::debug!("Paddle hit at {:.2}", percent_along);
                    }
                    GameEvent::BlockDestroyed { index } => {
                        destroyed += 1;
                        log::debug!("Block {} destroyed", index);
                    }
                    GameEvent::GameOver => log::info!("Game over after {} frames", frame + 1),
                    GameEvent::Won => log::info!("Won after {} frames", frame + 1),
                }
            }

            if session.phase().has_ended() {
                break;
            }
        }

        log::info!(
            "Finished in {:?}: {}/{} blocks destroyed, {} paddle hits",
            session.phase(),
            destroyed,
            session.state().total_blocks(),
            paddle_hits
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Heart Breakout (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let config = match native_config(std::env::args().skip(1)) {
        Ok(Some(config)) => config,
        Ok(None) => return,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = autopilot::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Build the autopilot config from `[config.json] [--ease <curve>] [--print-config]`.
/// Returns `None` when the config was only printed.
#[cfg(not(target_arch = "wasm32"))]
fn native_config(
    mut args: impl Iterator<Item = String>,
) -> Result<Option<heart_breakout::GameConfig>, Box<dyn std::error::Error>> {
    use heart_breakout::{EaseCurve, GameConfig};

    let mut path = None;
    let mut ease_curve = None;
    let mut print_only = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ease" => {
                let name = args.next().ok_or("--ease needs a curve name")?;
                ease_curve = Some(name.parse::<EaseCurve>()?);
            }
            "--print-config" => print_only = true,
            _ => path = Some(arg),
        }
    }

    let mut config = match path {
        Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(curve) = ease_curve {
        config.ease_curve = curve;
    }

    config.validate()?;
    if print_only {
        println!("{}", config.to_json()?);
        return Ok(None);
    }
    Ok(Some(config))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
