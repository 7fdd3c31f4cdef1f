use medreport_types::Color;
use serde::Deserialize;

/// Font sizes, spacing and colors shared by every block and the markdown renderer.
///
/// All fields have defaults, so a configuration file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    // Body text
    pub body_size: f32,
    pub line_height: f32,
    pub small_size: f32,

    // Markdown headings
    pub heading_size: f32,
    pub heading_line_height: f32,
    pub heading_gap_before: f32,
    pub subheading_size: f32,
    pub subheading_line_height: f32,
    pub blank_gap: f32,
    pub list_indent: f32,

    // Blocks
    pub section_header_height: f32,
    pub section_header_size: f32,
    pub block_gap: f32,
    pub label_width: f32,
    pub row_height: f32,
    pub cell_padding: f32,
    pub label_column_ratio: f32,
    pub banner_height: f32,
    pub box_padding: f32,
    pub stripe_width: f32,

    // Colors
    pub text_color: Color,
    pub muted_color: Color,
    pub accent_color: Color,
    pub secondary_color: Color,
    pub label_color: Color,
    pub warning_color: Color,
    pub success_color: Color,
    pub info_color: Color,
    pub warning_background: Color,
    pub success_background: Color,
    pub info_background: Color,
    pub row_even_background: Color,
    pub row_odd_background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            body_size: 10.0,
            line_height: 14.0,
            small_size: 8.0,

            heading_size: 14.0,
            heading_line_height: 20.0,
            heading_gap_before: 8.0,
            subheading_size: 12.0,
            subheading_line_height: 17.0,
            blank_gap: 4.0,
            list_indent: 14.0,

            section_header_height: 24.0,
            section_header_size: 12.0,
            block_gap: 8.0,
            label_width: 120.0,
            row_height: 18.0,
            cell_padding: 6.0,
            label_column_ratio: 0.6,
            banner_height: 46.0,
            box_padding: 10.0,
            stripe_width: 4.0,

            text_color: Color::rgb(0x1f, 0x29, 0x37),
            muted_color: Color::rgb(0x6b, 0x72, 0x80),
            accent_color: Color::rgb(0x1e, 0x40, 0xaf),
            secondary_color: Color::rgb(0x37, 0x41, 0x51),
            label_color: Color::rgb(0x1e, 0x3a, 0x8a),
            warning_color: Color::rgb(0xdc, 0x26, 0x26),
            success_color: Color::rgb(0x16, 0xa3, 0x4a),
            info_color: Color::rgb(0x25, 0x63, 0xeb),
            warning_background: Color::rgb(0xfe, 0xe2, 0xe2),
            success_background: Color::rgb(0xdc, 0xfc, 0xe7),
            info_background: Color::rgb(0xef, 0xf6, 0xff),
            row_even_background: Color::rgb(0xf3, 0xf4, 0xf6),
            row_odd_background: Color::WHITE,
        }
    }
}
