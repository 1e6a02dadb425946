//! Core geometry types for the zoom lens
//!
//! Page coordinates and element sizes are CSS pixels, kept as `f64`
//! so that rounding matches what the browser reports.

mod size;
mod vec2;

pub use size::Size;
pub use vec2::Vec2;
