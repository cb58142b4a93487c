//! Neon Tetris core crate.
//!
//! The game rules (arena, pieces, collision, rotation with wall kick, row sweep,
//! scoring and the drop timer) are plain Rust and run natively under
//! `cargo test`. `start_game()` mounts them into a browser page: canvas
//! rendering, the score element and keyboard / touch / click input live in
//! `web`.

use wasm_bindgen::prelude::*;

pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod piece;
pub mod player;
pub mod render;
mod web;

pub use arena::{Arena, Position, Sweep};
pub use config::GameConfig;
pub use error::{ConfigError, WebError};
pub use game::{DropOutcome, Game};
pub use input::Command;
pub use piece::{Cell, PieceKind, Rotation, Shape};
pub use player::Player;
pub use render::{Surface, render_frame, score_text};

#[cfg(feature = "serde_json")]
pub use render::snapshot_json;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    web::init_logging(log::LevelFilter::Info);
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}
