//! Interval algebra and quantization
//!
//! Pure functions over event slices. Nothing here knows about selection
//! state or history; see `store` for the operations built on top.

pub mod algebra;
pub mod quantize;

pub use algebra::{bounds, intersecting_window, intersects, join, merge, repeat, sort_by_time};
pub use quantize::{quantize, quantize_duration};
