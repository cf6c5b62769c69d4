//! Gravitron entry point
//!
//! The browser build attaches to `#canvas`. The native build runs the
//! simulation headless for a fixed number of frames and logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = gravitron::platform::web::start("canvas", gravitron::Settings::default()) {
        log::error!("failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Ten simulated minutes at the default rate
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_HEADLESS_FRAMES: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gravitron::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Gravitron (native) starting headless...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_HEADLESS_FRAMES);

    run_headless(settings, frames);
}

/// Drive the game by hand: tick while running, wait out the reset delay when stopped
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: gravitron::Settings, frames: u64) {
    use gravitron::Game;
    use gravitron::input::InputAdapter;
    use gravitron::renderer::RecordingSurface;
    use gravitron::scheduler::ManualScheduler;

    let fps = settings.fps as f64;
    let surface = RecordingSurface::new(settings.width, settings.height);
    let mut game = Game::new(settings, InputAdapter::new(), ManualScheduler::new(), surface);
    game.run();

    let mut games = 1;
    let mut best_room = 0;
    let mut reset_in: Option<u64> = None;
    for _ in 0..frames {
        if game.is_running() {
            game.frame();
            best_room = best_room.max(game.state().room_index);
            continue;
        }
        if let Some(delay) = game.scheduler_mut().take_reset() {
            reset_in = Some((delay.as_secs_f64() * fps).round() as u64);
        }
        match reset_in {
            Some(0) => {
                reset_in = None;
                games += 1;
                game.reset();
            }
            Some(left) => reset_in = Some(left - 1),
            None => {}
        }
    }

    let state = game.state();
    let room = state.current_room().map_or("none", |room| room.name.as_str());
    log::info!(
        "Finished: {} game(s), furthest room {}, current room {} ({}) at frame {}, {} live entities",
        games,
        best_room,
        state.room_index,
        room,
        state.frames,
        state.entities.len()
    );
    game.shutdown();
}
