use std::collections::HashMap;

use crate::paint::Color;
use crate::raster::{Pixel, PixelBuf};

/// Source-over compositing of straight-alpha colors.
pub fn blend_over(background: Color, foreground: Color) -> Color {
    let fa = foreground.a.clamp(0.0, 1.0);
    let ba = background.a.clamp(0.0, 1.0);

    let out_a = fa + ba * (1.0 - fa);
    if out_a <= 0.0 {
        return Color::with_alpha(0, 0, 0, 0.0);
    }

    let channel = |fg: u8, bg: u8| -> u8 {
        let v = (fg as f32 * fa + bg as f32 * ba * (1.0 - fa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    Color::with_alpha(
        channel(foreground.r, background.r),
        channel(foreground.g, background.g),
        channel(foreground.b, background.b),
        out_a,
    )
}

/// Collapses a pixel stream to one pixel per coordinate.
///
/// Each coordinate starts from `background` and folds its entries in stream
/// order with [`blend_over`], so later draw calls land on top. Output keeps
/// the first-occurrence order of coordinates.
pub fn composite(buf: &PixelBuf, background: Color) -> PixelBuf {
    let mut slots: HashMap<(i32, i32), usize> = HashMap::with_capacity(buf.len());
    let mut out: Vec<Pixel> = Vec::with_capacity(buf.len());

    for px in buf {
        match slots.get(&(px.x, px.y)) {
            Some(&i) => out[i].color = blend_over(out[i].color, px.color),
            None => {
                slots.insert((px.x, px.y), out.len());
                out.push(Pixel::new(px.x, px.y, blend_over(background, px.color)));
            }
        }
    }

    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_foreground_wins() {
        let out = blend_over(Color::RED, Color::BLUE);
        assert_eq!((out.r, out.g, out.b), (0, 0, 255));
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn half_alpha_mixes_channels() {
        let out = blend_over(Color::BLACK, Color::WHITE.alpha(0.5));
        assert_eq!((out.r, out.g, out.b), (128, 128, 128));
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn fully_transparent_pair_stays_empty() {
        let out = blend_over(Color::BLACK.alpha(0.0), Color::WHITE.alpha(0.0));
        assert_eq!(out.a, 0.0);
    }

    #[test]
    fn composite_folds_duplicates_in_stream_order() {
        let mut buf = PixelBuf::new();
        buf.push(1, 1, Color::RED);
        buf.push(1, 1, Color::GREEN.alpha(0.0)); // invisible, must not disturb
        buf.push(1, 1, Color::BLUE);

        let out = composite(&buf, Color::BLACK);
        assert_eq!(out.len(), 1);
        let px = out.pixels()[0];
        assert_eq!((px.color.r, px.color.g, px.color.b), (0, 0, 255));
    }

    #[test]
    fn composite_keeps_first_occurrence_order() {
        let mut buf = PixelBuf::new();
        buf.push(2, 0, Color::RED);
        buf.push(0, 0, Color::GREEN);
        buf.push(2, 0, Color::BLUE);

        let out = composite(&buf, Color::BLACK);
        let coords: Vec<(i32, i32)> = out.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(2, 0), (0, 0)]);
    }

    #[test]
    fn composite_blends_translucent_over_background() {
        let mut buf = PixelBuf::new();
        buf.push(0, 0, Color::WHITE.alpha(0.5));

        let out = composite(&buf, Color::BLACK);
        let px = out.pixels()[0];
        assert_eq!((px.color.r, px.color.g, px.color.b), (128, 128, 128));
    }
}
