//! Zombie Dash entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use zombie_dash::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use zombie_dash::persistence::{KeyValueStore, LocalStorage, MemoryStore, StorageError};
    use zombie_dash::platform::web::{CanvasSurface, WindowPrompt};
    use zombie_dash::platform::{Key, KeyState};
    use zombie_dash::{FrameDriver, FrameStatus};

    /// Storage backend chosen at startup
    enum Store {
        Local(LocalStorage),
        Memory(MemoryStore),
    }

    impl KeyValueStore for Store {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            match self {
                Store::Local(s) => s.get(key),
                Store::Memory(s) => s.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            match self {
                Store::Local(s) => s.set(key, value),
                Store::Memory(s) => s.set(key, value),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver<Store, WindowPrompt>,
        keys: KeyState,
        surface: CanvasSurface,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Zombie Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let surface = CanvasSurface::new(&canvas).expect("no 2d context");

        let store = match LocalStorage::open() {
            Ok(storage) => Store::Local(storage),
            Err(e) => {
                log::warn!("{}; scores will not persist", e);
                Store::Memory(MemoryStore::new())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            driver: FrameDriver::new(seed, store, WindowPrompt),
            keys: KeyState::new(),
            surface,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_auto_pause(game.clone());

        // Start the one and only frame loop
        request_animation_frame(game);

        log::info!("Zombie Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down: record held key, toggle pause on its own event
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                if Key::Fire.matches(&key) {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }

                // Busy while the frame holds a modal prompt
                let Ok(mut g) = game.try_borrow_mut() else {
                    return;
                };
                g.keys.press(&key);
                if Key::Pause.matches(&key) && !event.repeat() {
                    g.driver.toggle_pause();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Ok(mut g) = game.try_borrow_mut() {
                    g.keys.release(&event.key());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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
        let status = {
            let mut g = game.borrow_mut();
            let Game {
                driver,
                keys,
                surface,
            } = &mut *g;
            driver.frame(time, keys, surface)
        };

        match status {
            FrameStatus::Continue => request_animation_frame(game),
            FrameStatus::Finished => log::info!("Frame loop stopped"),
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    if let Ok(mut g) = game.try_borrow_mut() {
                        g.keys.clear();
                        g.driver.auto_pause("tab hidden");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if let Ok(mut g) = game.try_borrow_mut() {
                    g.keys.clear();
                    g.driver.auto_pause("window blur");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Zombie Dash (native) starting...");
    log::info!("Native mode runs a headless scripted session - serve the wasm build to play");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use zombie_dash::persistence::MemoryStore;
    use zombie_dash::platform::{FixedPrompt, KeyState, RecordingSurface};
    use zombie_dash::{FrameDriver, FrameStatus};

    /// Ten minutes at 60 Hz
    const MAX_FRAMES: u32 = 36_000;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Hold fire, hop every second, drift right and back
    pub fn run() {
        let seed = 0x5eed;
        let mut driver = FrameDriver::new(seed, MemoryStore::new(), FixedPrompt::new(Some("headless")));
        let mut keys = KeyState::new();
        keys.press(" ");
        let mut surface = RecordingSurface::new();

        let mut frames = 0;
        while frames < MAX_FRAMES {
            keys.release("w");
            if frames % 60 == 0 {
                keys.press("w");
            }
            keys.release("a");
            keys.release("d");
            keys.press(if (frames / 180) % 2 == 0 { "d" } else { "a" });

            let status = driver.frame(frames as f64 * FRAME_MS, &keys, &mut surface);
            // Only the latest frame matters
            surface.commands.clear();
            frames += 1;
            if status == FrameStatus::Finished {
                break;
            }
        }

        let state = driver.state();
        log::info!(
            "Session ended after {} frames: score {}, health {}, phase {:?}",
            frames,
            state.score,
            state.player.health,
            state.phase
        );
        if let Some(board) = driver.leaderboard() {
            for (i, entry) in board.entries.iter().enumerate() {
                log::info!("{}. {} - {}", i + 1, entry.name, entry.score);
            }
        }
    }
}
