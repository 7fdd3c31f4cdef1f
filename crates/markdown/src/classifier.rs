use once_cell::sync::Lazy;
use regex::Regex;

static RE_NUMBERED_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.\s*\*\*(.+?)\*\*(.*)$").expect("Invalid regex"));
static RE_BULLET_BOLD_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- \*\*(.+?)\*\*(?::\s*|\s+|$)(.*)$").expect("Invalid regex"));
static RE_BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*.+?\*\*").expect("Invalid regex"));

const BOLD_MARKER: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSegment {
    Plain(String),
    Bold(String),
}

impl InlineSegment {
    pub fn text(&self) -> &str {
        match self {
            InlineSegment::Plain(text) | InlineSegment::Bold(text) => text,
        }
    }
}

/// The structural form of one line of advisory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownNode {
    MainHeading(String),
    SubHeading(String),
    NumberedBoldItem {
        number: u32,
        bold_label: String,
        rest: String,
    },
    BulletWithBoldLabel {
        label: String,
        content: String,
    },
    PlainBullet(String),
    MixedInlineText(Vec<InlineSegment>),
    Blank,
}

impl MarkdownNode {
    /// Short stable name, used for statistics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MarkdownNode::MainHeading(_) => "main_heading",
            MarkdownNode::SubHeading(_) => "sub_heading",
            MarkdownNode::NumberedBoldItem { .. } => "numbered_bold_item",
            MarkdownNode::BulletWithBoldLabel { .. } => "bullet_with_bold_label",
            MarkdownNode::PlainBullet(_) => "plain_bullet",
            MarkdownNode::MixedInlineText(_) => "mixed_inline_text",
            MarkdownNode::Blank => "blank",
        }
    }
}

/// Classifies a single line. Total: every input maps to exactly one node,
/// the first matching form winning.
pub fn classify_line(line: &str) -> MarkdownNode {
    let line = line.trim();
    if line.is_empty() {
        return MarkdownNode::Blank;
    }
    if let Some(text) = line.strip_prefix("### ") {
        return MarkdownNode::MainHeading(strip_markers(text));
    }
    if let Some(text) = line.strip_prefix("#### ") {
        return MarkdownNode::SubHeading(strip_markers(text));
    }
    if let Some(node) = numbered_bold_item(line) {
        return node;
    }
    if let Some(caps) = RE_BULLET_BOLD_LABEL.captures(line) {
        let label = caps[1].trim();
        let label = label.strip_suffix(':').unwrap_or(label).trim_end();
        return MarkdownNode::BulletWithBoldLabel {
            label: label.to_string(),
            content: strip_markers(&caps[2]),
        };
    }
    if let Some(content) = line.strip_prefix("- ") {
        return MarkdownNode::PlainBullet(strip_markers(content));
    }
    if RE_BOLD_SPAN.is_match(line) {
        return MarkdownNode::MixedInlineText(split_bold_spans(line));
    }
    MarkdownNode::MixedInlineText(vec![InlineSegment::Plain(line.to_string())])
}

/// Classifies every line of `text` in order.
pub fn classify_document(text: &str) -> Vec<MarkdownNode> {
    text.lines().map(classify_line).collect()
}

fn numbered_bold_item(line: &str) -> Option<MarkdownNode> {
    let caps = RE_NUMBERED_BOLD.captures(line)?;
    // Numbers that do not fit fall through to the later forms.
    let number = caps[1].parse().ok()?;
    let rest = strip_markers(&caps[3]);
    let rest = rest.strip_prefix(':').unwrap_or(&rest).trim();
    Some(MarkdownNode::NumberedBoldItem {
        number,
        bold_label: caps[2].trim().to_string(),
        rest: rest.to_string(),
    })
}

fn strip_markers(text: &str) -> String {
    text.replace(BOLD_MARKER, "").trim().to_string()
}

/// Splits on `**` pairs, alternating plain and bold. A trailing unmatched
/// marker stays in the text literally.
fn split_bold_spans(line: &str) -> Vec<InlineSegment> {
    let parts: Vec<&str> = line.split(BOLD_MARKER).collect();
    let last = parts.len() - 1;
    let mut segments: Vec<InlineSegment> = Vec::new();

    for (i, part) in parts.into_iter().enumerate() {
        if i % 2 == 1 && i < last {
            if !part.is_empty() {
                segments.push(InlineSegment::Bold(part.to_string()));
            }
            continue;
        }
        let text = if i % 2 == 1 {
            format!("{BOLD_MARKER}{part}")
        } else {
            part.to_string()
        };
        if text.is_empty() {
            continue;
        }
        match segments.last_mut() {
            Some(InlineSegment::Plain(prev)) => prev.push_str(&text),
            _ => segments.push(InlineSegment::Plain(text)),
        }
    }
    segments
}
