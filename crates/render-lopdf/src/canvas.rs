use crate::helpers::{flip_y, to_win_ansi};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use medreport_canvas::{Canvas, CanvasError, Font, TextStyle};
use medreport_types::{Color, PageGeometry, Rect, Size};
use std::io::Write;
use std::path::Path;

const PRODUCER: &str = "medreport";

fn pdf_error(err: lopdf::Error) -> CanvasError {
    CanvasError::Pdf(err.to_string())
}

/// Graphics state already emitted into a page's content stream, so repeated
/// runs in the same font or color do not re-emit operators.
#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<Font>,
    font_size: f32,
    fill_color: Option<Color>,
}

#[derive(Default)]
struct PageContent {
    operations: Vec<Operation>,
    state: PageRenderState,
}

impl PageContent {
    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.operations
                .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
            self.state.fill_color = Some(color);
        }
    }

    fn set_font(&mut self, font: Font, size: f32) {
        if self.state.font != Some(font) || self.state.font_size != size {
            self.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
            ));
            self.state.font = Some(font);
            self.state.font_size = size;
        }
    }
}

/// A `Canvas` that produces a PDF document.
pub struct LopdfCanvas {
    size: Size,
    pages: Vec<PageContent>,
    active: usize,
    title: Option<String>,
}

impl LopdfCanvas {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            size: geometry.size(),
            pages: vec![PageContent::default()],
            active: 0,
            title: None,
        }
    }

    /// Sets the document title written to the PDF info dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn page_mut(&mut self) -> &mut PageContent {
        // `active` is only ever set to a valid index.
        &mut self.pages[self.active]
    }

    /// Assembles the buffered pages into a `lopdf::Document`.
    pub fn into_document(self) -> Result<Document, CanvasError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for font in Font::all() {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(font.resource_name().as_bytes(), Object::Reference(font_id));
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

        let page_count = self.pages.len();
        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for page in self.pages {
            let content = Content { operations: page.operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().map_err(pdf_error)?,
            ));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.0.into(), 0.0.into(), self.size.width.into(), self.size.height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }
            .into(),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::String(to_win_ansi(title), StringFormat::Literal));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", info_id);

        log::debug!("Assembled PDF document with {} pages", page_count);
        Ok(doc)
    }

    pub fn write_to<W: Write>(self, writer: &mut W) -> Result<(), CanvasError> {
        let mut doc = self.into_document()?;
        doc.save_to(writer)?;
        Ok(())
    }

    pub fn to_bytes(self) -> Result<Vec<u8>, CanvasError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    pub fn save(self, path: &Path) -> Result<(), CanvasError> {
        let mut file = std::fs::File::create(path)?;
        self.write_to(&mut file)?;
        file.flush()?;
        Ok(())
    }
}

impl Canvas for LopdfCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), CanvasError> {
        let page_height = self.size.height;
        let page = self.page_mut();
        page.set_fill_color(color);
        let y = flip_y(rect.bottom(), page_height);
        page.operations.push(Operation::new(
            "re",
            vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
        ));
        page.operations.push(Operation::new("f", vec![]));
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), CanvasError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let page_height = self.size.height;
        let page = self.page_mut();
        page.operations.push(Operation::new("BT", vec![]));
        page.set_font(style.font, style.size);
        page.set_fill_color(style.color);
        let baseline_y = y + style.size * 0.8;
        let pdf_y = flip_y(baseline_y, page_height);
        page.operations
            .push(Operation::new("Td", vec![x.into(), pdf_y.into()]));
        page.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        page.operations.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn add_page(&mut self) -> Result<usize, CanvasError> {
        self.pages.push(PageContent::default());
        self.active = self.pages.len() - 1;
        Ok(self.active)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_active_page(&mut self, index: usize) -> Result<(), CanvasError> {
        if index >= self.pages.len() {
            return Err(CanvasError::PageOutOfRange {
                index,
                count: self.pages.len(),
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
