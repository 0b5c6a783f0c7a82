//! Event store: operations, selection, actions, and the state container
//!
//! ## Modules
//!
//! - `operations`: pure mutators over the full event collection
//! - `selection`: selection as the working set for group edits
//! - `actions`: the tagged actions the application dispatches
//! - `sequencer`: owns the current snapshot and applies actions to it

pub mod actions;
pub mod operations;
pub mod selection;
pub mod sequencer;

// Re-exports for convenience
pub use actions::{Action, ClearScope};
pub use sequencer::Sequencer;
