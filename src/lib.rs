//! Pad Timeline WASM Module
//!
//! Timeline event engine for the pad sampler's sequencer. It keeps, per
//! track, a canonical set of non-overlapping trigger intervals and provides
//! the editing operations the timeline UI dispatches (add, toggle, select,
//! move, repeat, cut/paste, snap).

pub mod api;
pub mod error;
pub mod intervals;
pub mod models;
pub mod persistence;
pub mod store;
pub mod undo;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use models::*;
pub use store::{Action, ClearScope, Sequencer};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Pad timeline WASM module initialized");
}
