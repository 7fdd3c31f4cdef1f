//! Text measurement, greedy line wrapping and styled inline flow.

mod inline;
mod wrapper;

pub use inline::{InlineBuilder, InlineLine, InlineToken, PositionedRun, flow_inline};
pub use wrapper::wrap_text;
