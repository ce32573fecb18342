// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render a [`RunSummary`] as a PNG badge.
//!
//! The main type here is [`SummaryRenderer`]. [`render_png`] is the pure rendering step and
//! [`render`] is a shortcut that uses the default system font.

mod canvas;
mod font;
mod layout;

pub use canvas::BORDER_PX;
pub use font::*;
pub use layout::*;

use crate::{RunSummary, SummaryStatus, errors::RenderError};
use camino::Utf8Path;
use canvas::Canvas;
use tiny_skia::Color;
use tracing::debug;

/// Background of a badge for a run with failures or errors, as RGB.
pub const FAIL_COLOR: [u8; 3] = [0xFF, 0x00, 0x00];

/// Background of a badge for a run in which no tests ran, as RGB.
pub const EMPTY_COLOR: [u8; 3] = [0xFF, 0xFF, 0xE0];

/// Background of a badge for a run in which every test passed, as RGB.
pub const PASS_COLOR: [u8; 3] = [0x90, 0xEE, 0x90];

/// Color of the text and the border, as RGB.
pub const INK_COLOR: [u8; 3] = [0x00, 0x00, 0x00];

impl SummaryStatus {
    /// Returns the RGB background color a badge with this status is filled with.
    pub fn background(self) -> [u8; 3] {
        match self {
            Self::Failing => FAIL_COLOR,
            Self::Empty => EMPTY_COLOR,
            Self::Passing => PASS_COLOR,
        }
    }
}

fn opaque([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba8(r, g, b, u8::MAX)
}

/// Renders `summary` to PNG bytes using `font`.
///
/// This performs no I/O.
pub fn render_png(summary: &RunSummary, font: &SummaryFont) -> Result<Vec<u8>, RenderError> {
    paint(summary, font)?.encode_png()
}

/// Loads the default font and writes the badge for `summary` to `out_path`.
pub fn render(summary: &RunSummary, out_path: &Utf8Path) -> Result<(), RenderError> {
    SummaryRenderer::load_default()?.write_png(summary, out_path)
}

/// Renders summaries with a fixed font.
#[derive(Debug)]
pub struct SummaryRenderer {
    font: SummaryFont,
}

impl SummaryRenderer {
    /// Creates a renderer that draws with `font`.
    pub fn new(font: SummaryFont) -> Self {
        Self { font }
    }

    /// Creates a renderer that draws with the first available face of [`FONT_FAMILIES`].
    pub fn load_default() -> Result<Self, RenderError> {
        SummaryFont::load_default().map(Self::new)
    }

    /// Returns the font used by this renderer.
    pub fn font(&self) -> &SummaryFont {
        &self.font
    }

    /// Renders `summary` to PNG bytes.
    pub fn render_png(&self, summary: &RunSummary) -> Result<Vec<u8>, RenderError> {
        render_png(summary, &self.font)
    }

    /// Renders `summary` and writes the PNG to `out_path`, replacing any existing file.
    pub fn write_png(&self, summary: &RunSummary, out_path: &Utf8Path) -> Result<(), RenderError> {
        let png = self.render_png(summary)?;
        fs_err::write(out_path, &png).map_err(|err| RenderError::WriteFailed {
            path: out_path.to_owned(),
            err,
        })?;
        debug!("wrote {} bytes to `{out_path}`", png.len());
        Ok(())
    }
}

fn paint(summary: &RunSummary, font: &SummaryFont) -> Result<Canvas, RenderError> {
    let block = TextBlock::for_summary(summary);
    let extent = block.measure(font);
    let (width, height) = extent.canvas_size();
    let status = summary.status();
    debug!(
        "text measures {:.2}x{:.2}px, drawing {status} badge on a {width}x{height} canvas",
        extent.width, extent.height,
    );

    let mut canvas = Canvas::new(width, height, opaque(status.background()))?;
    canvas.draw_text(&block, font, opaque(INK_COLOR));
    canvas.draw_border(opaque(INK_COLOR));
    Ok(canvas)
}
