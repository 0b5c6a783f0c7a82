//! Data models for the timeline engine
//!
//! Events, their identifiers, the timeline bounds, and engine configuration.

pub mod config;
pub mod defaults;
pub mod event;
pub mod timeline;

// Re-export commonly used types
pub use config::EngineConfig;
pub use event::{Event, EventId, IdGenerator, TrackId};
pub use timeline::Timeline;
