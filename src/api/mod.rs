//! Pad Timeline WASM API
//!
//! This module provides the JavaScript-facing API for the timeline sequencer.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, validation, error handling, and logging
//! - `types`: Result shapes returned to JavaScript
//! - `sequencer`: The sequencer instance and the functions that drive it

pub mod helpers;
pub mod types;
pub mod sequencer;

pub use sequencer::*;
