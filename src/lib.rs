//! Boss Battle core crate.
//!
//! A single-screen platformer: stomp three escalating bosses on one ground
//! platform. The fight rules (`game`) and the screen flow (`scene`) are
//! plain Rust and run under `cargo test`; `app`, `render`, `assets` and
//! `audio` bind them to a browser canvas.

use wasm_bindgen::prelude::*;

mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod error;
pub mod game;
mod logger;
pub mod render;
pub mod scene;

pub use audio::{AudioSink, MusicTrack, SilentAudio, Sfx};
pub use config::{ConfigError, GameConfig};
pub use error::GameError;
pub use game::{GameState, Outcome, Phase, Stage};
pub use scene::{SceneKind, SceneMachine, UiEvent};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Mount the canvas and start on the title screen with default settings.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    launch(GameConfig::default())
}

/// Like [`start_game`], with tuning overrides from a JSON object. Missing
/// fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(GameError::from)?;
    launch(config)
}

fn launch(config: GameConfig) -> Result<(), JsValue> {
    if config.debug {
        logger::init(log::LevelFilter::Debug);
    }
    app::start(config).map_err(|e| {
        log::error!("{e}");
        JsValue::from(e)
    })
}
