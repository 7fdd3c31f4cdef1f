use crate::classifier::{InlineSegment, MarkdownNode, classify_line};
use medreport_canvas::{Canvas, Font, TextStyle};
use medreport_layout::{
    Color, InlineBuilder, InlineLine, InlineToken, LayoutError, LayoutState, Theme, flow_inline,
    wrap_text,
};
use std::collections::BTreeMap;

const BULLET: &str = "\u{2022}";

/// Counters collected while rendering one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownStats {
    pub lines: usize,
    pub visual_lines: usize,
    pub nodes: BTreeMap<&'static str, usize>,
}

impl MarkdownStats {
    pub fn count(&self, kind: &str) -> usize {
        self.nodes.get(kind).copied().unwrap_or(0)
    }
}

/// Draws advisory text line by line at the layout cursor.
///
/// Each source line is classified on its own and every visual line it wraps
/// into gets its own `ensure_space` call, so arbitrarily long text paginates
/// without knowing its height up front.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    theme: Theme,
}

/// How a flowed line is placed and colored.
struct FlowStyle {
    first_x: f32,
    continuation_x: f32,
    bullet_x: Option<f32>,
    bold_color: Color,
}

impl MarkdownRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        text: &str,
    ) -> Result<MarkdownStats, LayoutError> {
        let mut stats = MarkdownStats::default();
        for line in text.lines() {
            let node = classify_line(line);
            stats.lines += 1;
            *stats.nodes.entry(node.kind()).or_default() += 1;
            stats.visual_lines += self.render_node(canvas, state, &node)?;
        }
        log::debug!(
            "Rendered {} markdown lines into {} visual lines",
            stats.lines,
            stats.visual_lines
        );
        Ok(stats)
    }

    /// Draws one node and returns how many visual lines it produced.
    fn render_node(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        node: &MarkdownNode,
    ) -> Result<usize, LayoutError> {
        let theme = &self.theme;
        let left = state.geometry().content_left();
        let indent = left + theme.list_indent;

        match node {
            MarkdownNode::Blank => {
                state.advance(theme.blank_gap);
                Ok(0)
            }
            MarkdownNode::MainHeading(text) => {
                if !state.at_page_top() {
                    state.advance(theme.heading_gap_before);
                }
                let style = TextStyle::bold(theme.heading_size, theme.accent_color);
                self.draw_wrapped(canvas, state, text, style, theme.heading_line_height)
            }
            MarkdownNode::SubHeading(text) => {
                let style = TextStyle::bold(theme.subheading_size, theme.secondary_color);
                self.draw_wrapped(canvas, state, text, style, theme.subheading_line_height)
            }
            MarkdownNode::NumberedBoldItem {
                number,
                bold_label,
                rest,
            } => {
                let mut builder = InlineBuilder::new();
                if rest.is_empty() {
                    builder.push_span(&format!("{number}. {bold_label}"), Font::Bold);
                } else {
                    builder
                        .push_span(&format!("{number}. {bold_label}:"), Font::Bold)
                        .push_words(&format!(" {rest}"), Font::Regular);
                }
                let flow = FlowStyle {
                    first_x: left,
                    continuation_x: indent,
                    bullet_x: None,
                    bold_color: theme.label_color,
                };
                self.draw_flowed(canvas, state, &builder.finish(), &flow)
            }
            MarkdownNode::BulletWithBoldLabel { label, content } => {
                let mut builder = InlineBuilder::new();
                builder
                    .push_span(&format!("{label}:"), Font::Bold)
                    .push_words(&format!(" {content}"), Font::Regular);
                let flow = FlowStyle {
                    first_x: indent,
                    continuation_x: indent,
                    bullet_x: Some(left + theme.list_indent / 3.0),
                    bold_color: theme.label_color,
                };
                self.draw_flowed(canvas, state, &builder.finish(), &flow)
            }
            MarkdownNode::PlainBullet(content) => {
                let tokens = InlineBuilder::new()
                    .push_words(content, Font::Regular)
                    .finish();
                let flow = FlowStyle {
                    first_x: indent,
                    continuation_x: indent,
                    bullet_x: Some(left + theme.list_indent / 3.0),
                    bold_color: theme.text_color,
                };
                self.draw_flowed(canvas, state, &tokens, &flow)
            }
            MarkdownNode::MixedInlineText(segments) => {
                let mut builder = InlineBuilder::new();
                for segment in segments {
                    match segment {
                        InlineSegment::Plain(text) => builder.push_words(text, Font::Regular),
                        InlineSegment::Bold(text) => builder.push_span(text, Font::Bold),
                    };
                }
                let flow = FlowStyle {
                    first_x: left,
                    continuation_x: left,
                    bullet_x: None,
                    bold_color: theme.text_color,
                };
                self.draw_flowed(canvas, state, &builder.finish(), &flow)
            }
        }
    }

    fn draw_wrapped(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        text: &str,
        style: TextStyle,
        line_height: f32,
    ) -> Result<usize, LayoutError> {
        let left = state.geometry().content_left();
        let width = state.geometry().content_width();
        let lines = wrap_text(canvas, text, style.font, style.size, width);
        for line in &lines {
            state.ensure_space(canvas, line_height)?;
            canvas.draw_text(left, state.cursor_y(), line, style)?;
            state.advance(line_height);
        }
        Ok(lines.len())
    }

    fn draw_flowed(
        &self,
        canvas: &mut dyn Canvas,
        state: &mut LayoutState,
        tokens: &[InlineToken],
        flow: &FlowStyle,
    ) -> Result<usize, LayoutError> {
        let theme = &self.theme;
        let right = state.geometry().content_right();
        let lines: Vec<InlineLine> = flow_inline(
            canvas,
            tokens,
            theme.body_size,
            flow.first_x,
            flow.continuation_x,
            right,
        );

        for (i, line) in lines.iter().enumerate() {
            state.ensure_space(canvas, theme.line_height)?;
            let y = state.cursor_y();
            if let (0, Some(x)) = (i, flow.bullet_x) {
                canvas.draw_text(
                    x,
                    y,
                    BULLET,
                    TextStyle::regular(theme.body_size, theme.text_color),
                )?;
            }
            for run in &line.runs {
                let color = match run.font {
                    Font::Bold => flow.bold_color,
                    Font::Regular => theme.text_color,
                };
                canvas.draw_text(
                    run.x,
                    y,
                    &run.text,
                    TextStyle::new(run.font, theme.body_size, color),
                )?;
            }
            state.advance(theme.line_height);
        }
        Ok(lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medreport_canvas::{DrawCommand, RecordingCanvas};
    use medreport_types::PageGeometry;

    fn page(height: f32) -> (RecordingCanvas, LayoutState) {
        let geometry = PageGeometry::new(300.0, height, 20.0).unwrap();
        (RecordingCanvas::new(&geometry), LayoutState::new(geometry))
    }

    #[test]
    fn heading_at_page_top_skips_leading_gap() {
        let (mut canvas, mut state) = page(400.0);
        let renderer = MarkdownRenderer::default();
        let theme = renderer.theme().clone();
        renderer.render(&mut canvas, &mut state, "### Summary").unwrap();

        assert!(matches!(
            canvas.find_text("Summary"),
            Some(DrawCommand::Text { y, style, .. })
                if *y == 20.0 && style.font == Font::Bold && style.color == theme.accent_color
        ));
        assert_eq!(state.cursor_y(), 20.0 + theme.heading_line_height);
    }

    #[test]
    fn blank_lines_only_advance() {
        let (mut canvas, mut state) = page(400.0);
        let renderer = MarkdownRenderer::default();
        let stats = renderer.render(&mut canvas, &mut state, "\n   \n").unwrap();
        assert!(canvas.commands().is_empty());
        assert_eq!(stats.count("blank"), 2);
        assert_eq!(state.cursor_y(), 20.0 + 2.0 * renderer.theme().blank_gap);
    }

    #[test]
    fn labeled_bullet_draws_glyph_and_colored_label() {
        let (mut canvas, mut state) = page(400.0);
        let renderer = MarkdownRenderer::default();
        let theme = renderer.theme().clone();
        renderer
            .render(&mut canvas, &mut state, "- **Risk:** High")
            .unwrap();

        assert_eq!(canvas.texts(None), vec![BULLET, "Risk:", "High"]);
        assert!(matches!(
            canvas.find_text("Risk:"),
            Some(DrawCommand::Text { x, style, .. })
                if *x == 20.0 + theme.list_indent && style.color == theme.label_color
        ));
    }

    #[test]
    fn numbered_item_continuation_is_indented() {
        let (mut canvas, mut state) = page(600.0);
        let renderer = MarkdownRenderer::default();
        let theme = renderer.theme().clone();
        let stats = renderer
            .render(
                &mut canvas,
                &mut state,
                "1. **Quit Smoking** Stopping now lowers the risk of progression, improves \
                 lung function within weeks and makes every other treatment more effective",
            )
            .unwrap();

        assert!(stats.visual_lines > 1);
        let xs: Vec<f32> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { x, y, .. } if *y > 20.0 => Some(*x),
                _ => None,
            })
            .collect();
        assert!(!xs.is_empty());
        assert!(xs.iter().all(|x| *x >= 20.0 + theme.list_indent));
    }

    #[test]
    fn long_text_breaks_pages_per_line() {
        let (mut canvas, mut state) = page(200.0);
        let renderer = MarkdownRenderer::default();
        let line_height = renderer.theme().line_height;
        let text = (1..=30)
            .map(|i| format!("- Precaution number {i} for the patient"))
            .collect::<Vec<_>>()
            .join("\n");
        let stats = renderer.render(&mut canvas, &mut state, &text).unwrap();

        assert_eq!(stats.count("plain_bullet"), 30);
        assert_eq!(stats.visual_lines, 30);
        assert!(canvas.page_count() > 1);
        for command in canvas.commands() {
            if let DrawCommand::Text { y, .. } = command {
                assert!(*y >= 20.0 && y + line_height <= 180.0);
            }
        }
    }

    #[test]
    fn fallback_style_text_uses_every_form() {
        let (mut canvas, mut state) = page(800.0);
        let stats = MarkdownRenderer::default()
            .render(
                &mut canvas,
                &mut state,
                "### General Precautions\n#### Daily\n1. **Rest** well\n- **Diet**: balanced\n- Walk\n\nSee your **doctor** soon",
            )
            .unwrap();
        for kind in [
            "main_heading",
            "sub_heading",
            "numbered_bold_item",
            "bullet_with_bold_label",
            "plain_bullet",
            "blank",
            "mixed_inline_text",
        ] {
            assert_eq!(stats.count(kind), 1, "{kind}");
        }
        assert_eq!(stats.lines, 7);
        assert!(canvas.contains_text("doctor"));
    }
}
