use super::ContentBlock;
use crate::cursor::LayoutState;
use crate::text::wrap_text;
use crate::theme::Theme;
use crate::LayoutError;
use medreport_canvas::{Canvas, Font, TextStyle};
use medreport_types::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Warning,
    Info,
}

impl Tone {
    fn palette(self, theme: &Theme) -> (Color, Color) {
        match self {
            Tone::Warning => (theme.warning_background, theme.warning_color),
            Tone::Info => (theme.info_background, theme.info_color),
        }
    }
}

/// A padded box with a bold title and a wrapped message.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBox {
    pub title: String,
    pub message: String,
    pub tone: Tone,
}

impl StatusBox {
    pub fn new(title: impl Into<String>, message: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            tone,
        }
    }

    fn message_lines(&self, canvas: &dyn Canvas, theme: &Theme, width: f32) -> Vec<String> {
        let inner = width - theme.stripe_width - 2.0 * theme.box_padding;
        wrap_text(canvas, &self.message, Font::Regular, theme.body_size, inner)
    }

    fn box_height(&self, lines: usize, theme: &Theme) -> f32 {
        2.0 * theme.box_padding + (lines as f32 + 1.0) * theme.line_height
    }
}

impl ContentBlock for StatusBox {
    fn estimate_height(&self, canvas: &dyn Canvas, theme: &Theme, width: f32) -> f32 {
        let lines = self.message_lines(canvas, theme, width).len();
        self.box_height(lines, theme) + theme.block_gap
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        theme: &Theme,
    ) -> Result<(), LayoutError> {
        let width = state.geometry().content_width();
        let lines = self.message_lines(canvas, theme, width);
        let box_height = self.box_height(lines.len(), theme);
        state.ensure_space(canvas, box_height + theme.block_gap)?;

        let (background, strong) = self.tone.palette(theme);
        let left = state.geometry().content_left();
        let y = state.cursor_y();
        canvas.fill_rect(Rect::new(left, y, width, box_height), background)?;
        canvas.fill_rect(Rect::new(left, y, theme.stripe_width, box_height), strong)?;

        let text_x = left + theme.stripe_width + theme.box_padding;
        let mut line_y = y + theme.box_padding;
        canvas.draw_text(
            text_x,
            line_y,
            &self.title,
            TextStyle::bold(theme.body_size, strong),
        )?;
        let body = TextStyle::regular(theme.body_size, theme.text_color);
        for line in &lines {
            line_y += theme.line_height;
            canvas.draw_text(text_x, line_y, line, body)?;
        }

        state.advance(box_height + theme.block_gap);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{small_page, test_canvas};

    const MESSAGE: &str = "Some diagnostic steps have not been completed yet. \
        The results below are partial and must not be used for treatment decisions.";

    #[test]
    fn height_grows_with_message_length() {
        let canvas = test_canvas();
        let theme = Theme::default();
        let short = StatusBox::new("Incomplete", "Pending", Tone::Warning);
        let long = StatusBox::new("Incomplete", MESSAGE, Tone::Warning);
        let one_line = short.estimate_height(&canvas, &theme, 200.0);
        assert_eq!(
            one_line,
            2.0 * theme.box_padding + 2.0 * theme.line_height + theme.block_gap
        );
        assert!(long.estimate_height(&canvas, &theme, 200.0) > one_line);
    }

    #[test]
    fn draw_matches_estimate() {
        let (mut canvas, mut state) = small_page(600.0);
        let theme = Theme::default();
        let status = StatusBox::new("Report Incomplete", MESSAGE, Tone::Warning);
        let expected = status.estimate_height(&canvas, &theme, 260.0);
        status.draw(&mut canvas, &mut state, &theme).unwrap();
        assert_eq!(state.cursor_y(), 20.0 + expected);
        assert_eq!(canvas.texts(None)[0], "Report Incomplete");
    }

    #[test]
    fn tone_selects_palette() {
        let theme = Theme::default();
        for (tone, background) in [
            (Tone::Warning, theme.warning_background),
            (Tone::Info, theme.info_background),
        ] {
            let (mut canvas, mut state) = small_page(400.0);
            StatusBox::new("Note", "Text", tone)
                .draw(&mut canvas, &mut state, &theme)
                .unwrap();
            assert_eq!(canvas.filled_rects()[0].2, background);
        }
    }
}
