//! Word Match core crate.
//!
//! A vocabulary matching game: the page asks the `/generate` service for word
//! pairs in two languages, shows them as two independently shuffled columns of
//! buttons and lets the player pair them up against the clock. The matching
//! rules live in [`game`] and run natively; [`ui`] adapts them to the DOM.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod fetch;
pub mod game;
pub mod history;
pub mod pairs;
mod ui;

pub use config::AppConfig;
pub use error::{FETCH_FAILED_MESSAGE, FetchError, HistoryError};
pub use fetch::fetch_pairs;
pub use game::timer::{Stopwatch, format_time};
pub use game::{ClickInput, ClickOutcome, GameSession, Side, is_match};
pub use pairs::{PairList, PairRequest, WordPair};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Wire the game to `#language-pair-form`, posting to `/generate`.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    ui::start_app(AppConfig::default())
}

#[wasm_bindgen]
pub fn start_app_with_endpoint(endpoint: String) -> Result<(), JsValue> {
    ui::start_app(AppConfig::with_endpoint(endpoint))
}

/// Append a configuration to the `matching-game` history; returns the whole
/// list as JSON.
#[wasm_bindgen]
pub fn add_game(l1: &str, l2: &str, n: &str, reading_level: &str) -> Result<String, JsValue> {
    let games = history::add_game(l1, l2, n, reading_level)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&games).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen(js_name = formatTime)]
pub fn format_time_js(seconds: u32) -> String {
    format_time(u64::from(seconds))
}
