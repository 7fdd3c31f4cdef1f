use super::{center_offset, ContentBlock};
use crate::cursor::LayoutState;
use crate::text::wrap_text;
use crate::theme::Theme;
use crate::LayoutError;
use medreport_canvas::{Canvas, Font, TextStyle};
use medreport_types::Rect;

/// Space left below the last row of a table.
pub const TABLE_TRAILING_GAP: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub label: String,
    pub value: String,
    /// Draws the value bold in the warning color.
    pub emphasis: bool,
}

impl TableRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            emphasis: false,
        }
    }

    pub fn emphasized(mut self, emphasis: bool) -> Self {
        self.emphasis = emphasis;
        self
    }

    fn value_style(&self, theme: &Theme) -> TextStyle {
        if self.emphasis {
            TextStyle::bold(theme.body_size, theme.warning_color)
        } else {
            TextStyle::regular(theme.body_size, theme.text_color)
        }
    }
}

/// Label/value rows with alternating backgrounds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TwoColumnTable {
    pub rows: Vec<TableRow>,
}

/// Both cells of one row after wrapping.
struct RowLayout {
    label: Vec<String>,
    value: Vec<String>,
}

impl RowLayout {
    fn line_count(&self) -> usize {
        self.label.len().max(self.value.len()).max(1)
    }

    fn height(&self, theme: &Theme) -> f32 {
        self.line_count() as f32 * theme.row_height
    }
}

impl TwoColumnTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn columns(theme: &Theme, width: f32) -> (f32, f32) {
        let label = width * theme.label_column_ratio;
        (label, width - label)
    }

    fn layout_row(canvas: &dyn Canvas, row: &TableRow, theme: &Theme, width: f32) -> RowLayout {
        let (label_width, value_width) = Self::columns(theme, width);
        let inner = |w: f32| (w - 2.0 * theme.cell_padding).max(0.0);
        let value_font = row.value_style(theme).font;
        RowLayout {
            label: wrap_text(
                canvas,
                &row.label,
                Font::Regular,
                theme.body_size,
                inner(label_width),
            ),
            value: wrap_text(
                canvas,
                &row.value,
                value_font,
                theme.body_size,
                inner(value_width),
            ),
        }
    }

    /// Height of a single row at the given table width.
    pub fn row_height(
        &self,
        canvas: &dyn Canvas,
        row: &TableRow,
        theme: &Theme,
        width: f32,
    ) -> f32 {
        Self::layout_row(canvas, row, theme, width).height(theme)
    }
}

impl ContentBlock for TwoColumnTable {
    fn estimate_height(&self, canvas: &dyn Canvas, theme: &Theme, width: f32) -> f32 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let rows: f32 = self
            .rows
            .iter()
            .map(|row| self.row_height(canvas, row, theme, width))
            .sum();
        rows + TABLE_TRAILING_GAP
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        theme: &Theme,
    ) -> Result<(), LayoutError> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let left = state.geometry().content_left();
        let width = state.geometry().content_width();
        let (label_width, _) = Self::columns(theme, width);
        let text_offset = center_offset(theme.row_height, theme.body_size);

        for (index, row) in self.rows.iter().enumerate() {
            let layout = Self::layout_row(canvas, row, theme, width);
            let height = layout.height(theme);
            state.ensure_space(canvas, height)?;

            let y = state.cursor_y();
            let background = if index % 2 == 0 {
                theme.row_even_background
            } else {
                theme.row_odd_background
            };
            canvas.fill_rect(Rect::new(left, y, width, height), background)?;

            let label_style = TextStyle::regular(theme.body_size, theme.secondary_color);
            for (i, line) in layout.label.iter().enumerate() {
                let line_y = y + i as f32 * theme.row_height + text_offset;
                canvas.draw_text(left + theme.cell_padding, line_y, line, label_style)?;
            }
            let value_style = row.value_style(theme);
            for (i, line) in layout.value.iter().enumerate() {
                let line_y = y + i as f32 * theme.row_height + text_offset;
                canvas.draw_text(
                    left + label_width + theme.cell_padding,
                    line_y,
                    line,
                    value_style,
                )?;
            }
            state.advance(height);
        }
        state.advance(TABLE_TRAILING_GAP);
        Ok(())
    }
}
