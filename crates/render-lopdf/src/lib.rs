//! PDF canvas backend using lopdf.
//!
//! `LopdfCanvas` buffers content operations per page so that earlier pages
//! can be revisited (the footer pass does this), then serializes everything
//! into a single PDF using the standard Type1 Helvetica faces.

mod canvas;
mod helpers;

pub use canvas::LopdfCanvas;
pub use helpers::{flip_y, to_win_ansi};
