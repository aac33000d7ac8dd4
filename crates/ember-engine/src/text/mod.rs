//! Thin text layout over an external glyph source.
//!
//! Glyph data (font tables, bitmaps) lives outside the engine; this module
//! only turns a string into pixel emissions through the [`GlyphSource`]
//! contract.

use crate::paint::Color;
use crate::raster::PixelBuf;

/// Provider of fixed-height glyph metrics and bitmaps.
pub trait GlyphSource {
    /// Glyph cell height in rows, constant for the whole source.
    fn glyph_height(&self) -> u32;

    /// Advance width of `c` in columns, excluding spacing.
    fn glyph_width(&self, c: char) -> u32;

    /// Horizontal spacing emitted after `c`.
    fn glyph_spacing(&self, c: char) -> u32;

    /// Bitmap rows for `c`, one byte per row, most significant bit leftmost.
    /// `None` for characters the source cannot draw.
    fn glyph_rows(&self, c: char) -> Option<&[u8]>;
}

/// Lays out `text` starting at `(x, y)` (top-left of the first glyph).
///
/// With `wrap` set, a glyph that would cross `max_width` moves to the next
/// line; glyphs the source cannot draw still advance the pen.
pub fn draw_text(
    out: &mut PixelBuf,
    text: &str,
    x: i32,
    y: i32,
    font: &impl GlyphSource,
    color: Color,
    wrap: bool,
    max_width: i32,
) {
    let line_height = font.glyph_height() as i32 + 1;
    let mut pen_x = x;
    let mut pen_y = y;

    for c in text.chars() {
        if c == '\n' {
            pen_x = x;
            pen_y += line_height;
            continue;
        }

        let advance = (font.glyph_width(c) + font.glyph_spacing(c)) as i32;

        if wrap && pen_x + font.glyph_width(c) as i32 > max_width && pen_x > x {
            pen_x = x;
            pen_y += line_height;
        }

        if let Some(rows) = font.glyph_rows(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..font.glyph_width(c) {
                    if bits & (0x80 >> col) != 0 {
                        out.push(pen_x + col as i32, pen_y + row as i32, color);
                    }
                }
            }
        }

        pen_x += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 fixture font: 'o' is a hollow box, 'i' a single column.
    struct BoxFont;

    impl GlyphSource for BoxFont {
        fn glyph_height(&self) -> u32 {
            3
        }

        fn glyph_width(&self, c: char) -> u32 {
            match c {
                'i' => 1,
                _ => 3,
            }
        }

        fn glyph_spacing(&self, _c: char) -> u32 {
            1
        }

        fn glyph_rows(&self, c: char) -> Option<&[u8]> {
            match c {
                'o' => Some(&[0b1110_0000, 0b1010_0000, 0b1110_0000]),
                'i' => Some(&[0b1000_0000, 0b1000_0000, 0b1000_0000]),
                _ => None,
            }
        }
    }

    #[test]
    fn glyph_bits_become_pixels() {
        let mut out = PixelBuf::new();
        draw_text(&mut out, "o", 0, 0, &BoxFont, Color::WHITE, false, 64);
        assert_eq!(out.len(), 8); // hollow 3x3 box
        assert!(out.covers(0, 0));
        assert!(out.covers(2, 2));
        assert!(!out.covers(1, 1));
    }

    #[test]
    fn pen_advances_by_width_plus_spacing() {
        let mut out = PixelBuf::new();
        draw_text(&mut out, "io", 0, 0, &BoxFont, Color::WHITE, false, 64);
        // 'i' occupies column 0; 'o' starts at column 2.
        assert!(out.covers(0, 0));
        assert!(out.covers(2, 0));
        assert!(out.covers(4, 0));
    }

    #[test]
    fn undrawable_characters_still_advance() {
        let mut out = PixelBuf::new();
        draw_text(&mut out, "?o", 0, 0, &BoxFont, Color::WHITE, false, 64);
        assert!(!out.covers(0, 0));
        assert!(out.covers(4, 0));
    }

    #[test]
    fn wrapping_moves_to_next_line() {
        let mut out = PixelBuf::new();
        draw_text(&mut out, "oo", 0, 0, &BoxFont, Color::WHITE, true, 6);
        // Second 'o' would span columns 4..=6; it wraps below instead.
        assert!(out.covers(0, 0));
        assert!(out.covers(0, 4));
        assert!(!out.covers(4, 0));
    }

    #[test]
    fn newline_resets_the_pen() {
        let mut out = PixelBuf::new();
        draw_text(&mut out, "i\ni", 2, 0, &BoxFont, Color::WHITE, false, 64);
        assert!(out.covers(2, 0));
        assert!(out.covers(2, 4));
    }
}
