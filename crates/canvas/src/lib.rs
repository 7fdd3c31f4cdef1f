//! Drawing surface abstractions for report rendering.
//!
//! This crate provides the primitives every layout component draws through:
//! - `Canvas` trait: fill rectangles, draw and measure text, manage pages
//! - `Font` and `TextStyle` for the built-in Helvetica family
//! - `RecordingCanvas`, an in-memory backend that keeps every command
//! - Error types for drawing operations

mod error;
pub mod metrics;
mod recording;
mod traits;

pub use error::CanvasError;
pub use recording::{DrawCommand, RecordingCanvas};
pub use traits::{Canvas, Font, TextStyle};
