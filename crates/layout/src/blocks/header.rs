use super::{center_offset, ContentBlock};
use crate::cursor::LayoutState;
use crate::theme::Theme;
use crate::LayoutError;
use medreport_canvas::{Canvas, TextStyle};
use medreport_types::{Color, Rect};

/// A full-width colored band with a bold title, opening a report section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionHeader {
    pub title: String,
}

impl SectionHeader {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl ContentBlock for SectionHeader {
    fn estimate_height(&self, _canvas: &dyn Canvas, theme: &Theme, _width: f32) -> f32 {
        theme.section_header_height + theme.block_gap
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        theme: &Theme,
    ) -> Result<(), LayoutError> {
        let width = state.geometry().content_width();
        let height = self.estimate_height(canvas, theme, width);
        // Keep at least one body line with the header.
        state.ensure_space(canvas, height + theme.line_height)?;

        let x = state.geometry().content_left();
        let y = state.cursor_y();
        canvas.fill_rect(
            Rect::new(x, y, width, theme.section_header_height),
            theme.accent_color,
        )?;
        canvas.draw_text(
            x + theme.cell_padding,
            y + center_offset(theme.section_header_height, theme.section_header_size),
            &self.title,
            TextStyle::bold(theme.section_header_size, Color::WHITE),
        )?;
        state.advance(height);
        Ok(())
    }
}
