use crate::error::CanvasError;
use crate::traits::{Canvas, TextStyle};
use medreport_types::{Color, PageGeometry, Rect, Size};

/// A single drawing operation captured by `RecordingCanvas`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        page: usize,
        rect: Rect,
        color: Color,
    },
    Text {
        page: usize,
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
}

impl DrawCommand {
    pub fn page(&self) -> usize {
        match self {
            DrawCommand::FillRect { page, .. } | DrawCommand::Text { page, .. } => *page,
        }
    }
}

/// An in-memory canvas that keeps every drawing command in order.
///
/// Used for dry runs and for asserting on layout decisions without producing
/// a file. An optional page limit turns `add_page` into a failure once
/// reached, which exercises the fatal canvas error path.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    size: Size,
    pages: usize,
    active: usize,
    page_limit: Option<usize>,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            size: geometry.size(),
            pages: 1,
            active: 0,
            page_limit: None,
            commands: Vec::new(),
        }
    }

    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text runs in drawing order, optionally restricted to one page.
    pub fn texts(&self, page: Option<usize>) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|c| page.is_none_or(|p| c.page() == p))
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All text on all pages, one run per line.
    pub fn all_text(&self) -> String {
        self.texts(None).join("\n")
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.commands.iter().any(|c| match c {
            DrawCommand::Text { text, .. } => text.contains(needle),
            _ => false,
        })
    }

    /// The first text command whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&DrawCommand> {
        self.commands
            .iter()
            .find(|c| matches!(c, DrawCommand::Text { text: t, .. } if t == text))
    }

    pub fn filled_rects(&self) -> Vec<(usize, Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { page, rect, color } => Some((*page, *rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), CanvasError> {
        self.commands.push(DrawCommand::FillRect {
            page: self.active,
            rect,
            color,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), CanvasError> {
        self.commands.push(DrawCommand::Text {
            page: self.active,
            x,
            y,
            text: text.to_string(),
            style,
        });
        Ok(())
    }

    fn add_page(&mut self) -> Result<usize, CanvasError> {
        if let Some(limit) = self.page_limit
            && self.pages >= limit
        {
            return Err(CanvasError::PageLimit(limit));
        }
        self.pages += 1;
        self.active = self.pages - 1;
        log::trace!("RecordingCanvas: added page {}", self.pages);
        Ok(self.active)
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn set_active_page(&mut self, index: usize) -> Result<(), CanvasError> {
        if index >= self.pages {
            return Err(CanvasError::PageOutOfRange {
                index,
                count: self.pages,
            });
        }
        self.active = index;
        Ok(())
    }

    fn active_page(&self) -> usize {
        self.active
    }

    fn page_dimensions(&self) -> Size {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Font;

    #[test]
    fn starts_with_one_active_page() {
        let canvas = RecordingCanvas::new(&PageGeometry::a4());
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(canvas.active_page(), 0);
    }

    #[test]
    fn commands_are_tagged_with_active_page() {
        let mut canvas = RecordingCanvas::new(&PageGeometry::a4());
        let style = TextStyle::regular(10.0, Color::BLACK);
        canvas.draw_text(0.0, 0.0, "first", style).unwrap();
        canvas.add_page().unwrap();
        canvas.draw_text(0.0, 0.0, "second", style).unwrap();
        canvas.set_active_page(0).unwrap();
        canvas
            .fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE)
            .unwrap();

        assert_eq!(canvas.texts(Some(0)), vec!["first"]);
        assert_eq!(canvas.texts(Some(1)), vec!["second"]);
        assert_eq!(canvas.filled_rects()[0].0, 0);
    }

    #[test]
    fn page_limit_and_range_errors() {
        let mut canvas = RecordingCanvas::new(&PageGeometry::a4()).with_page_limit(2);
        assert!(canvas.add_page().is_ok());
        assert!(matches!(canvas.add_page(), Err(CanvasError::PageLimit(2))));
        assert!(matches!(
            canvas.set_active_page(5),
            Err(CanvasError::PageOutOfRange { index: 5, count: 2 })
        ));
    }

    #[test]
    fn measures_with_helvetica_metrics() {
        let canvas = RecordingCanvas::new(&PageGeometry::a4());
        let regular = canvas.measure_text_width("Summary", Font::Regular, 12.0);
        let bold = canvas.measure_text_width("Summary", Font::Bold, 12.0);
        assert!(bold > regular);
    }
}
