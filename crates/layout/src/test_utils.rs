use medreport_canvas::RecordingCanvas;
use medreport_types::PageGeometry;

use crate::cursor::LayoutState;

/// A4 page with the default 40pt margin.
pub fn test_geometry() -> PageGeometry {
    PageGeometry::a4()
}

pub fn test_canvas() -> RecordingCanvas {
    RecordingCanvas::new(&test_geometry())
}

/// A canvas and cursor sharing a small page, handy for forcing page breaks.
pub fn small_page(height: f32) -> (RecordingCanvas, LayoutState) {
    let geometry = PageGeometry::new(300.0, height, 20.0).unwrap();
    (RecordingCanvas::new(&geometry), LayoutState::new(geometry))
}
