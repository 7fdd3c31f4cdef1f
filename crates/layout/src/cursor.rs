use crate::algorithms::pagination::check_fit;
use medreport_canvas::{Canvas, CanvasError};
use medreport_types::PageGeometry;

/// Vertical write position for one report generation.
///
/// Owned exclusively by a single generation and handed to every drawing call
/// by `&mut`. After any `ensure_space` call the cursor lies within
/// `[margin, page_height - margin]`.
#[derive(Debug, Clone)]
pub struct LayoutState {
    geometry: PageGeometry,
    cursor_y: f32,
    current_page_index: usize,
}

impl LayoutState {
    /// Starts at the top of the first page, which every canvas already holds.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            cursor_y: geometry.content_top(),
            current_page_index: 0,
            geometry,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    /// Vertical room left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f32 {
        check_fit(self.cursor_y, 0.0, self.geometry.content_bottom()).remaining_height
    }

    pub fn at_page_top(&self) -> bool {
        self.cursor_y <= self.geometry.content_top()
    }

    /// Starts a new page when `required_height` does not fit below the cursor.
    ///
    /// Returns `true` when a page break happened. Content taller than a whole
    /// page is not given a second blank page: if the cursor is already at the
    /// top, it is drawn where it is and overflows.
    pub fn ensure_space(
        &mut self,
        canvas: &mut dyn Canvas,
        required_height: f32,
    ) -> Result<bool, CanvasError> {
        let analysis = check_fit(self.cursor_y, required_height, self.geometry.content_bottom());
        if !analysis.should_break {
            return Ok(false);
        }
        if self.at_page_top() {
            log::warn!(
                "Content of height {:.2} exceeds the page content height of {:.2}; drawing it anyway.",
                required_height,
                self.geometry.content_height()
            );
            return Ok(false);
        }

        canvas.add_page()?;
        self.cursor_y = self.geometry.content_top();
        self.current_page_index += 1;
        log::debug!(
            "Page break: needed {:.2}, had {:.2}; now on page {}",
            required_height,
            analysis.remaining_height,
            self.current_page_index + 1
        );
        Ok(true)
    }

    /// Moves the cursor down. Never breaks the page; call `ensure_space` first.
    pub fn advance(&mut self, height: f32) {
        self.cursor_y += height;
    }
}
