// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    font::SummaryFont,
    layout::{MARGIN_PX, TextBlock},
};
use crate::errors::RenderError;
use ab_glyph::ScaleFont;
use tiny_skia::{Color, ColorU8, Paint, Pixmap, PremultipliedColorU8, Rect, Transform};

/// Width of the frame drawn around the canvas, in pixels.
pub const BORDER_PX: u32 = 2;

/// An opaque pixel buffer that a summary is painted on.
pub(crate) struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocates a `width` by `height` canvas filled with `background`.
    pub(crate) fn new(width: u32, height: u32, background: Color) -> Result<Self, RenderError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::CanvasSize { width, height })?;
        pixmap.fill(background);
        Ok(Self { pixmap })
    }

    /// Draws `block` in `color`, its top-left corner placed at the margin.
    ///
    /// Glyph coverage is blended straight into the pixels so that the canvas stays opaque.
    /// Anything falling outside the canvas is clipped.
    pub(crate) fn draw_text(&mut self, block: &TextBlock, font: &SummaryFont, color: Color) {
        let scaled = font.scaled();
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let text = color.to_color_u8();
        let pixels = self.pixmap.pixels_mut();

        for glyph in block.glyphs(font, MARGIN_PX, MARGIN_PX) {
            let Some(outlined) = scaled.outline_glyph(glyph) else {
                // Whitespace has no outline.
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + i64::from(gx);
                let y = bounds.min.y as i64 + i64::from(gy);
                if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
                    return;
                }
                let index = y as usize * width as usize + x as usize;
                pixels[index] = blend(pixels[index], text, coverage.clamp(0.0, 1.0));
            });
        }
    }

    /// Frames the canvas with a [`BORDER_PX`] wide line in `color`, inset from the edges.
    pub(crate) fn draw_border(&mut self, color: Color) {
        let width = self.pixmap.width() as f32;
        let height = self.pixmap.height() as f32;
        let border = BORDER_PX as f32;

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = false;

        let edges = [
            Rect::from_xywh(0.0, 0.0, width, border),
            Rect::from_xywh(0.0, height - border, width, border),
            Rect::from_xywh(0.0, 0.0, border, height),
            Rect::from_xywh(width - border, 0.0, border, height),
        ];
        // Canvases narrower than the border produce no valid rectangles and stay unframed.
        for rect in edges.into_iter().flatten() {
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    /// Encodes the canvas as a PNG image.
    pub(crate) fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap.encode_png().map_err(RenderError::Encode)
    }

    #[cfg(test)]
    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Mixes `fg` over the opaque pixel `bg` by `coverage`.
fn blend(bg: PremultipliedColorU8, fg: ColorU8, coverage: f32) -> PremultipliedColorU8 {
    let mix = |b: u8, f: u8| -> u8 {
        (f32::from(b) * (1.0 - coverage) + f32::from(f) * coverage).round() as u8
    };
    PremultipliedColorU8::from_rgba(
        mix(bg.red(), fg.red()),
        mix(bg.green(), fg.green()),
        mix(bg.blue(), fg.blue()),
        u8::MAX,
    )
    .unwrap_or(bg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let err = Canvas::new(0, 10, Color::WHITE).err().expect("allocation fails");
        assert!(
            matches!(err, RenderError::CanvasSize { width: 0, height: 10 }),
            "{err:?}"
        );
    }

    #[test]
    fn border_is_two_pixels_wide() {
        let mut canvas = Canvas::new(10, 8, Color::WHITE).unwrap();
        canvas.draw_border(Color::BLACK);
        let pixmap = canvas.pixmap();

        for (x, y) in [(0, 0), (1, 1), (9, 7), (8, 6), (5, 0), (5, 7), (0, 4), (9, 4)] {
            let pixel = pixmap.pixel(x, y).unwrap();
            assert_eq!((pixel.red(), pixel.green(), pixel.blue()), (0, 0, 0), "({x}, {y})");
        }
        for (x, y) in [(2, 2), (7, 5), (5, 4)] {
            let pixel = pixmap.pixel(x, y).unwrap();
            assert_eq!(
                (pixel.red(), pixel.green(), pixel.blue()),
                (255, 255, 255),
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn blending_interpolates_and_stays_opaque() {
        let bg = PremultipliedColorU8::from_rgba(200, 100, 0, 255).unwrap();
        let fg = Color::BLACK.to_color_u8();
        assert_eq!(blend(bg, fg, 0.0), bg);
        let half = blend(bg, fg, 0.5);
        assert_eq!((half.red(), half.green(), half.blue(), half.alpha()), (100, 50, 0, 255));
        let full = blend(bg, fg, 1.0);
        assert_eq!((full.red(), full.green(), full.blue()), (0, 0, 0));
    }
}
