//! FPS Arena entry point
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
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use fps_arena::consts::FRAME_MS;
    use fps_arena::highscores::now_ms;
    use fps_arena::persistence::{LocalStorage, MemoryStorage, Storage, StorageError};
    use fps_arena::platform::{InputState, to_arena};
    use fps_arena::renderer::CanvasRenderer;
    use fps_arena::sim::GamePhase;
    use fps_arena::{Leaderboard, Session};

    /// LocalStorage when the browser allows it, memory otherwise
    enum BrowserStorage {
        Local(LocalStorage),
        Memory(MemoryStorage),
    }

    impl BrowserStorage {
        fn open() -> Self {
            match LocalStorage::open() {
                Ok(storage) => BrowserStorage::Local(storage),
                Err(e) => {
                    log::warn!("{}; scores will not be kept", e);
                    BrowserStorage::Memory(MemoryStorage::new())
                }
            }
        }
    }

    impl Storage for BrowserStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            match self {
                BrowserStorage::Local(s) => s.get(key),
                BrowserStorage::Memory(s) => s.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            match self {
                BrowserStorage::Local(s) => s.set(key, value),
                BrowserStorage::Memory(s) => s.set(key, value),
            }
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            match self {
                BrowserStorage::Local(s) => s.remove(key),
                BrowserStorage::Memory(s) => s.remove(key),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<BrowserStorage>,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        input: InputState,
        last_time: f64,
        /// A frame callback is scheduled
        looping: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        /// Canvas-relative position of a viewport point
        fn arena_point(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            to_arena(
                Vec2::new(client_x as f32, client_y as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
            )
        }

        fn start(&mut self) {
            let (w, h) = self.renderer.fit_to_display();
            self.session.resize(w, h);
            self.session.start();
            self.input = InputState::new();
            self.last_time = 0.0;
            self.frame_times = [0.0; 60];
        }

        /// Run one frame
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FRAME_MS
            };
            self.last_time = time;

            let input = self.input.snapshot();
            self.session.update(&input, dt, now_ms());
            self.input.end_frame();

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 && time > oldest_time {
                self.fps = (60000.0 / (time - oldest_time)).round() as u32;
            }

            self.renderer
                .render(&self.session.state, &self.session.settings);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_display(id: &str, display: &str) {
        let element = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if let Some(element) = element {
            let _ = element.style().set_property("display", display);
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn update_hud(game: &Game) {
        let state = &game.session.state;
        set_text("score", &state.score.to_string());
        set_text("health", &state.health.max(0).to_string());
        set_text("wave", &state.wave.to_string());

        if game.session.settings.show_fps {
            set_display("hud-fps", "inline");
            set_text("fps", &game.fps.to_string());
        } else {
            set_display("hud-fps", "none");
        }
    }

    /// Show Start in the menu, Shoot while playing
    fn update_buttons(playing: bool) {
        set_display("startBtn", if playing { "none" } else { "inline-block" });
        set_display("shootBtn", if playing { "flex" } else { "none" });
    }

    fn update_leaderboard(board: &Leaderboard) {
        let Some(list) = document().and_then(|d| d.get_element_by_id("leaderboardList")) else {
            return;
        };

        if board.is_empty() {
            list.set_inner_html(r#"<p class="no-scores">No scores yet. Be the first!</p>"#);
            return;
        }

        let html: String = board
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let rank = i + 1;
                let rank_class = match rank {
                    1 => "rank-1",
                    2 => "rank-2",
                    3 => "rank-3",
                    _ => "",
                };
                format!(
                    r#"<div class="leaderboard-item {rank_class}">
                    <span class="leaderboard-rank {rank_class}">#{rank}</span>
                    <div style="flex: 1; margin-left: 15px;">
                        <div class="leaderboard-score">{score} points</div>
                        <div class="leaderboard-date">{date}</div>
                    </div>
                </div>"#,
                    score = entry.score,
                    date = escape_html(&entry.date),
                )
            })
            .collect();
        list.set_inner_html(&html);
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("FPS Arena starting...");

        let document = document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(canvas.clone()).ok_or("no 2d context")?;
        let (w, h) = renderer.fit_to_display();

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(BrowserStorage::open(), seed, w, h);

        update_leaderboard(&session.leaderboard);
        update_buttons(false);
        renderer.render(&session.state, &session.settings);

        let game = Game {
            session,
            renderer,
            canvas: canvas.clone(),
            input: InputState::new(),
            last_time: 0.0,
            looping: false,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        };
        update_hud(&game);
        let game = Rc::new(RefCell::new(game));

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_resize(game)?;

        log::info!("FPS Arena ready");
        Ok(())
    }

    fn listen<E, F>(target: &web_sys::EventTarget, name: &str, handler: F) -> Result<(), JsValue>
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard (WASD / arrows / space / escape)
        {
            let game = game.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                game.borrow_mut().input.key_down(&event.key());
            })?;
        }
        {
            let game = game.clone();
            listen(&window, "keyup", move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            })?;
        }
        {
            let game = game.clone();
            listen(&window, "blur", move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            })?;
        }

        // Mouse aim and click-to-shoot
        {
            let game = game.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.arena_point(event.client_x(), event.client_y());
                g.input.pointer_moved(pos);
            })?;
        }
        {
            let game = game.clone();
            listen(canvas, "click", move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.session.state.phase == GamePhase::Playing {
                    g.input.clicked();
                }
            })?;
        }

        // Touch: left side steers, right side shoots
        {
            let game = game.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g.arena_point(touch.client_x(), touch.client_y());
                    g.input.touch_started(pos);
                }
            })?;
        }
        {
            let game = game.clone();
            listen(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g.arena_point(touch.client_x(), touch.client_y());
                    g.input.touch_moved(pos);
                }
            })?;
        }
        {
            listen(canvas, "touchend", move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.touch_ended();
            })?;
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(shoot) = document.get_element_by_id("shootBtn") {
            for (name, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("mousedown", true),
                ("mouseup", false),
            ] {
                let game = game.clone();
                listen(&shoot, name, move |event: web_sys::Event| {
                    if name.starts_with("touch") {
                        event.prevent_default();
                        event.stop_propagation();
                    }
                    game.borrow_mut().input.shoot_button(pressed);
                })?;
            }
        }

        if let Some(start) = document.get_element_by_id("startBtn") {
            listen(&start, "click", move |_event: MouseEvent| {
                let schedule = {
                    let mut g = game.borrow_mut();
                    g.start();
                    update_hud(&g);
                    update_buttons(true);
                    let schedule = !g.looping;
                    g.looping = true;
                    schedule
                };
                if schedule {
                    request_animation_frame(game.clone());
                }
            })?;
        }

        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        listen(&window, "resize", move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let (w, h) = g.renderer.fit_to_display();
            g.session.resize(w, h);
            if !g.session.is_running() {
                g.renderer.render(&g.session.state, &g.session.settings);
            }
        })
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
            update_hud(&g);

            let running = g.session.is_running();
            if !running {
                // Run over: back to the menu
                g.looping = false;
                update_buttons(false);
                update_leaderboard(&g.session.leaderboard);
                if let Some(rank) = g.session.last_rank() {
                    log::info!("New leaderboard entry at #{}", rank);
                }
            }
            running
        };

        if running {
            request_animation_frame(game);
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
    env_logger::init();
    log::info!("FPS Arena (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let variant = std::env::var("FPS_ARENA_VARIANT")
        .ok()
        .and_then(|v| fps_arena::Variant::from_str(&v))
        .unwrap_or_default();
    let seed = std::env::var("FPS_ARENA_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);

    let summary = autopilot::run(variant, seed, autopilot::MAX_FRAMES);
    println!(
        "{} variant, seed {}: score {}, wave {}, health {}, {} frames{}",
        variant.as_str(),
        seed,
        summary.score,
        summary.wave,
        summary.health,
        summary.frames,
        summary
            .rank
            .map(|r| format!(", leaderboard #{}", r))
            .unwrap_or_default()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless play: aim at the nearest enemy and keep firing
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use fps_arena::consts::FRAME_MS;
    use fps_arena::persistence::MemoryStorage;
    use fps_arena::sim::TickInput;
    use fps_arena::{Session, Variant};

    /// Ten minutes at 60 fps
    pub const MAX_FRAMES: u64 = 60 * 60 * 10;

    pub struct Summary {
        pub score: u64,
        pub wave: u32,
        pub health: i32,
        pub frames: u64,
        pub rank: Option<usize>,
    }

    pub fn run(variant: Variant, seed: u64, max_frames: u64) -> Summary {
        let mut session = Session::new(MemoryStorage::new(), seed, 800.0, 600.0);
        session.set_variant(variant);
        session.start();

        let mut frames = 0;
        let mut clock = 0.0;
        while session.is_running() && frames < max_frames {
            let state = &session.state;
            let target = state
                .enemies
                .iter()
                .min_by(|a, b| {
                    let da = a.pos.distance_squared(state.player.pos);
                    let db = b.pos.distance_squared(state.player.pos);
                    da.total_cmp(&db)
                })
                .map(|e| e.pos);

            let input = TickInput {
                fire: target.is_some(),
                pointer: target,
                ..Default::default()
            };
            clock += FRAME_MS;
            session.update(&input, FRAME_MS, clock);
            frames += 1;
        }

        Summary {
            score: session.state.score,
            wave: session.state.wave,
            health: session.state.health,
            frames,
            rank: session.last_rank(),
        }
    }
}
