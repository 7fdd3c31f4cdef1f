/// Outcome of checking whether content fits below the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Centralized logic to check if content fits in the remaining space.
///
/// * `cursor_y`: The current Y position on the page.
/// * `required_height`: The height the next piece of content will consume.
/// * `content_bottom`: The lowest Y position content may reach.
///
/// The comparison is exact: a cursor already past `content_bottom` must
/// break even for zero-height content.
pub fn check_fit(cursor_y: f32, required_height: f32, content_bottom: f32) -> BreakAnalysis {
    BreakAnalysis {
        should_break: cursor_y + required_height > content_bottom,
        remaining_height: (content_bottom - cursor_y).max(0.0),
    }
}
