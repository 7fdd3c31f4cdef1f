use super::ContentBlock;
use crate::cursor::LayoutState;
use crate::theme::Theme;
use crate::LayoutError;
use medreport_canvas::{Canvas, Font, TextStyle};
use medreport_types::Rect;

/// A colored box presenting one prediction result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBanner {
    pub title: String,
    pub prediction: String,
    pub confidence: Option<f32>,
    /// Concerning results get the warning palette.
    pub adverse: bool,
}

impl ResultBanner {
    pub fn new(title: impl Into<String>, prediction: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prediction: prediction.into(),
            confidence: None,
            adverse: false,
        }
    }

    pub fn with_confidence(mut self, confidence: Option<f32>) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn adverse(mut self, adverse: bool) -> Self {
        self.adverse = adverse;
        self
    }

    pub fn confidence_label(&self) -> Option<String> {
        self.confidence.map(|c| format!("Confidence: {}", format_confidence(c)))
    }
}

/// Formats a confidence as a percentage. Values up to 1 are fractions.
pub fn format_confidence(confidence: f32) -> String {
    let percent = if confidence <= 1.0 {
        confidence * 100.0
    } else {
        confidence
    };
    format!("{percent:.1}%")
}

impl ContentBlock for ResultBanner {
    fn estimate_height(&self, _canvas: &dyn Canvas, theme: &Theme, _width: f32) -> f32 {
        theme.banner_height + theme.block_gap
    }

    fn draw(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        theme: &Theme,
    ) -> Result<(), LayoutError> {
        let width = state.geometry().content_width();
        let height = self.estimate_height(canvas, theme, width);
        state.ensure_space(canvas, height)?;

        let (background, strong) = if self.adverse {
            (theme.warning_background, theme.warning_color)
        } else {
            (theme.success_background, theme.success_color)
        };
        let left = state.geometry().content_left();
        let y = state.cursor_y();
        canvas.fill_rect(Rect::new(left, y, width, theme.banner_height), background)?;
        canvas.fill_rect(Rect::new(left, y, theme.stripe_width, theme.banner_height), strong)?;

        let text_x = left + theme.stripe_width + theme.box_padding;
        let title_y = y + theme.box_padding / 2.0 + 2.0;
        canvas.draw_text(
            text_x,
            title_y,
            &self.title,
            TextStyle::bold(theme.body_size, theme.secondary_color),
        )?;
        canvas.draw_text(
            text_x,
            title_y + theme.line_height + 2.0,
            &self.prediction,
            TextStyle::bold(theme.subheading_size, strong),
        )?;

        if let Some(label) = self.confidence_label() {
            let label_width = canvas.measure_text_width(&label, Font::Regular, theme.body_size);
            canvas.draw_text(
                left + width - theme.box_padding - label_width,
                title_y,
                &label,
                TextStyle::regular(theme.body_size, theme.muted_color),
            )?;
        }

        state.advance(height);
        Ok(())
    }
}
