use medreport_canvas::{Canvas, Font};

/// Greedily wraps `text` so every line measures at most `max_width`.
///
/// Existing line breaks are honored first. Words are separated by single
/// spaces in the output. A word wider than `max_width` is placed alone on its
/// own line rather than hyphenated. The result always holds at least one
/// line, so an empty string produces `[""]`.
pub fn wrap_text(
    canvas: &dyn Canvas,
    text: &str,
    font: Font,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let mut current = String::new();

        for word in raw_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if canvas.measure_text_width(&candidate, font, size) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }

    lines
}
