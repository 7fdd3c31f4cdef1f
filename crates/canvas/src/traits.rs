use crate::error::CanvasError;
use crate::metrics;
use medreport_types::{Color, Rect, Size};

/// The built-in font faces available to every canvas backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    #[default]
    Regular,
    Bold,
}

impl Font {
    /// PostScript name of the standard Type1 face.
    pub fn postscript_name(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Name under which the face is registered in a page's resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn all() -> [Font; 2] {
        [Font::Regular, Font::Bold]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: Font, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }

    pub fn regular(size: f32, color: Color) -> Self {
        Self::new(Font::Regular, size, color)
    }

    pub fn bold(size: f32, color: Color) -> Self {
        Self::new(Font::Bold, size, color)
    }

    pub fn with_font(self, font: Font) -> Self {
        Self { font, ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

/// A paged drawing surface.
///
/// Coordinates are in points with the origin at the top-left corner of the
/// page; `y` grows downwards. For `draw_text`, `y` is the top of the line box
/// and backends place the baseline at `y + size * 0.8`.
///
/// A freshly created canvas already holds one page, which is active.
///
/// Canvases are `Send` so a report future holding one can be spawned onto a
/// multi-threaded runtime.
pub trait Canvas: Send {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), CanvasError>;

    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: TextStyle)
    -> Result<(), CanvasError>;

    /// Advance width of `text` in points.
    fn measure_text_width(&self, text: &str, font: Font, size: f32) -> f32 {
        metrics::text_width(text, font, size)
    }

    /// Appends a page, makes it active, and returns its zero-based index.
    fn add_page(&mut self) -> Result<usize, CanvasError>;

    fn page_count(&self) -> usize;

    fn set_active_page(&mut self, index: usize) -> Result<(), CanvasError>;

    fn active_page(&self) -> usize;

    fn page_dimensions(&self) -> Size;
}
