use medreport_canvas::{Canvas, Font};

/// One unit of inline content: a single word, or an atomic styled span.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineToken {
    pub text: String,
    pub font: Font,
    /// Whether the source had whitespace before this token. Ignored at the
    /// start of a line.
    pub space_before: bool,
}

/// Builds tokens from a sequence of styled pieces, tracking whether
/// whitespace separates consecutive pieces.
#[derive(Debug, Default)]
pub struct InlineBuilder {
    tokens: Vec<InlineToken>,
    pending_space: bool,
}

impl InlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `text` as individually breakable words.
    pub fn push_words(&mut self, text: &str, font: Font) -> &mut Self {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        let mut had_words = false;
        for word in text.split_whitespace() {
            let space_before = if had_words { true } else { self.pending_space };
            self.tokens.push(InlineToken {
                text: word.to_string(),
                font,
                space_before,
            });
            had_words = true;
        }
        if had_words {
            self.pending_space = text.ends_with(char::is_whitespace);
        }
        self
    }

    /// Adds `text` as one span that is only broken if it cannot fit on a line by itself.
    pub fn push_span(&mut self, text: &str, font: Font) -> &mut Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.pending_space |= !text.is_empty();
            return self;
        }
        self.tokens.push(InlineToken {
            text: trimmed.to_string(),
            font,
            space_before: self.pending_space || text.starts_with(char::is_whitespace),
        });
        self.pending_space = text.ends_with(char::is_whitespace);
        self
    }

    pub fn finish(&mut self) -> Vec<InlineToken> {
        self.pending_space = false;
        std::mem::take(&mut self.tokens)
    }
}

/// A run of same-font text placed at an absolute x position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRun {
    pub x: f32,
    pub text: String,
    pub font: Font,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineLine {
    pub runs: Vec<PositionedRun>,
}

impl InlineLine {
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Packs tokens into lines between `first_x` (first line) or `continuation_x`
/// (later lines) and `right`.
///
/// Adjacent tokens in the same font are merged into one run. A multi-word
/// span too wide for an entire line is split into its words first. Always
/// returns at least one (possibly empty) line.
pub fn flow_inline(
    canvas: &dyn Canvas,
    tokens: &[InlineToken],
    size: f32,
    first_x: f32,
    continuation_x: f32,
    right: f32,
) -> Vec<InlineLine> {
    let full_width = right - continuation_x;
    let expanded = tokens.iter().flat_map(|token| {
        let too_wide = canvas.measure_text_width(&token.text, token.font, size) > full_width;
        if too_wide && token.text.contains(char::is_whitespace) {
            token
                .text
                .split_whitespace()
                .enumerate()
                .map(|(i, word)| InlineToken {
                    text: word.to_string(),
                    font: token.font,
                    space_before: i > 0 || token.space_before,
                })
                .collect::<Vec<_>>()
        } else {
            vec![token.clone()]
        }
    });

    let mut lines = Vec::new();
    let mut current = InlineLine::default();
    let mut x = first_x;

    for token in expanded {
        let width = canvas.measure_text_width(&token.text, token.font, size);
        let mut gap = if !current.runs.is_empty() && token.space_before {
            canvas.measure_text_width(" ", token.font, size)
        } else {
            0.0
        };

        if !current.runs.is_empty() && x + gap + width > right {
            lines.push(std::mem::take(&mut current));
            x = continuation_x;
            gap = 0.0;
        }

        match current.runs.last_mut() {
            Some(last) if last.font == token.font => {
                if gap > 0.0 {
                    last.text.push(' ');
                }
                last.text.push_str(&token.text);
                last.width += gap + width;
            }
            _ => current.runs.push(PositionedRun {
                x: x + gap,
                text: token.text,
                font: token.font,
                width,
            }),
        }
        x += gap + width;
    }

    if !current.runs.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_canvas;

    #[test]
    fn builder_tracks_spacing_between_pieces() {
        let tokens = InlineBuilder::new()
            .push_words("Take ", Font::Regular)
            .push_span("two tablets", Font::Bold)
            .push_words(", daily", Font::Regular)
            .finish();
        let summary: Vec<_> = tokens
            .iter()
            .map(|t| (t.text.as_str(), t.font, t.space_before))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Take", Font::Regular, false),
                ("two tablets", Font::Bold, true),
                (",", Font::Regular, false),
                ("daily", Font::Regular, true),
            ]
        );
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        let canvas = test_canvas();
        let lines = flow_inline(&canvas, &[], 10.0, 0.0, 0.0, 100.0);
        assert_eq!(lines, vec![InlineLine::default()]);
    }

    #[test]
    fn merges_same_font_and_advances_x() {
        let canvas = test_canvas();
        let tokens = InlineBuilder::new()
            .push_span("Note:", Font::Bold)
            .push_words(" rest and more", Font::Regular)
            .finish();
        let lines = flow_inline(&canvas, &tokens, 10.0, 50.0, 50.0, 1000.0);
        assert_eq!(lines.len(), 1);
        let runs = &lines[0].runs;
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Note:");
        assert_eq!(runs[0].x, 50.0);
        assert_eq!(runs[1].text, "rest and more");
        let space = canvas.measure_text_width(" ", Font::Regular, 10.0);
        assert!((runs[1].x - (50.0 + runs[0].width + space)).abs() < 1e-3);
    }

    #[test]
    fn bold_span_is_not_split_across_lines() {
        let canvas = test_canvas();
        let tokens = InlineBuilder::new()
            .push_words("aaaa aaaa", Font::Regular)
            .push_span(" bold span", Font::Bold)
            .finish();
        let span_width = canvas.measure_text_width("bold span", Font::Bold, 10.0);
        let first_width = canvas.measure_text_width("aaaa aaaa", Font::Regular, 10.0);
        // Wide enough for the span alone, too narrow for everything together.
        let right = span_width.max(first_width) + 1.0;
        let lines = flow_inline(&canvas, &tokens, 10.0, 0.0, 0.0, right);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].runs[0].text, "bold span");
        assert_eq!(lines[1].runs[0].x, 0.0);
    }

    #[test]
    fn continuation_lines_use_indent() {
        let canvas = test_canvas();
        let tokens = InlineBuilder::new()
            .push_words("one two three four five six seven eight nine ten", Font::Regular)
            .finish();
        let lines = flow_inline(&canvas, &tokens, 10.0, 10.0, 25.0, 80.0);
        assert!(lines.len() > 1);
        assert_eq!(lines[0].runs[0].x, 10.0);
        for line in &lines[1..] {
            assert_eq!(line.runs[0].x, 25.0);
            let run = line.runs.last().unwrap();
            assert!(run.x + run.width <= 80.0 + 1e-3);
        }
    }

    #[test]
    fn oversized_span_falls_back_to_words() {
        let canvas = test_canvas();
        let tokens = InlineBuilder::new()
            .push_span("a very long bold label that cannot fit", Font::Bold)
            .finish();
        let lines = flow_inline(&canvas, &tokens, 10.0, 0.0, 0.0, 60.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.runs.iter().all(|r| r.font == Font::Bold)));
    }
}
