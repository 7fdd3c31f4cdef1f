use super::ContentBlock;
use crate::cursor::LayoutState;
use crate::text::wrap_text;
use crate::theme::Theme;
use crate::LayoutError;
use medreport_canvas::{Canvas, Font, TextStyle};

/// A bold label with its value to the right; the value wraps in its own column.
///
/// A field without a value (absent, empty or whitespace) has zero height and
/// draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledField {
    pub label: String,
    pub value: Option<String>,
}

impl LabeledField {
    pub fn new(label: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self {
            label: label.into(),
            value: value.map(Into::into),
        }
    }

    /// The value to draw, if any.
    pub fn present_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }

    /// Horizontal offset of the value column from the content left edge.
    pub fn value_offset(&self, canvas: &dyn Canvas, theme: &Theme) -> f32 {
        let label_width =
            canvas.measure_text_width(&self.label_text(), Font::Bold, theme.body_size);
        theme.label_width.max(label_width + theme.cell_padding)
    }

    /// The value wrapped to its column for a content area of `width`.
    pub fn value_lines(&self, canvas: &dyn Canvas, theme: &Theme, width: f32) -> Vec<String> {
        match self.present_value() {
            Some(value) => {
                let column = width - self.value_offset(canvas, theme);
                wrap_text(canvas, value, Font::Regular, theme.body_size, column)
            }
            None => Vec::new(),
        }
    }

    fn label_text(&self) -> String {
        format!("{}:", self.label)
    }
}

impl ContentBlock for LabeledField {
    fn estimate_height(&self, canvas: &dyn Canvas, theme: &Theme, width: f32) -> f32 {
        if self.present_value().is_none() {
            return 0.0;
        }
        let lines = self.value_lines(canvas, theme, width).len().max(1);
        lines as f32 * theme.line_height
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        theme: &Theme,
    ) -> Result<(), LayoutError> {
        if self.present_value().is_none() {
            return Ok(());
        }
        let left = state.geometry().content_left();
        let width = state.geometry().content_width();
        let value_x = left + self.value_offset(canvas, theme);
        let lines = self.value_lines(canvas, theme, width);

        for (i, line) in lines.iter().enumerate() {
            // A label moved to a new page together with its first line.
            state.ensure_space(canvas, theme.line_height)?;
            if i == 0 {
                canvas.draw_text(
                    left,
                    state.cursor_y(),
                    &self.label_text(),
                    TextStyle::bold(theme.body_size, theme.label_color),
                )?;
            }
            canvas.draw_text(
                value_x,
                state.cursor_y(),
                line,
                TextStyle::regular(theme.body_size, theme.text_color),
            )?;
            state.advance(theme.line_height);
        }
        Ok(())
    }
}
