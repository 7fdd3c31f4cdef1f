//! Advance widths of the standard Helvetica faces.
//!
//! Values are the AFM widths (1/1000 em) for the printable ASCII range
//! `0x20..=0x7E`, plus the bullet and typographic punctuation the backend
//! encodes. Any other character is measured with
//! `FALLBACK_WIDTH`, which matches the backend's `?` substitution closely
//! enough for layout.

use crate::traits::Font;

const FIRST_CHAR: u32 = 0x20;
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn table(font: Font) -> &'static [u16; 95] {
    match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    }
}

/// Width of a single character in 1/1000 em.
pub fn char_width(c: char, font: Font) -> u16 {
    let code = c as u32;
    if (FIRST_CHAR..FIRST_CHAR + 95).contains(&code) {
        return table(font)[(code - FIRST_CHAR) as usize];
    }
    match (c, font) {
        ('\u{2022}', _) => 350,
        ('\u{2013}', _) => 556,
        ('\u{2014}', _) => 1000,
        ('\u{2018}' | '\u{2019}', _) => 278,
        ('\u{201C}' | '\u{201D}', Font::Regular) => 333,
        ('\u{201C}' | '\u{201D}', Font::Bold) => 500,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at the given font size.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, font) as u32).sum();
    units as f32 * size / 1000.0
}
