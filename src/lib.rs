//! Sequence Dash core crate.
//!
//! Numbered markers are scattered over a fixed play surface; the player clicks
//! them in ascending order while a tenth-of-a-second clock runs. One wrong
//! click ends the round. The round state machine (`game`), its timer wiring
//! (`controller`, `scheduler`) and configuration are plain Rust and testable on
//! the host; `start_game()` mounts the DOM front-end in the browser.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod error;
pub mod game;
mod logging;
pub mod scheduler;
mod web;

pub use config::GameConfig;
pub use controller::Controller;
pub use error::{ConfigError, GameError};
pub use game::view::{Marker, RenderModel, Title};
pub use game::{ClickOutcome, GameState, Phase, RoundClock, Target, parse_count};
pub use scheduler::{ManualScheduler, Scheduler, Task, TaskHandle};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::mount(GameConfig::default())?;
    Ok(())
}

/// Mount with a JSON `GameConfig`; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(GameError::from)?;
    web::mount(config)?;
    Ok(())
}
