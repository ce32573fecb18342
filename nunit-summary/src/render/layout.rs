// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::font::SummaryFont;
use crate::RunSummary;
use ab_glyph::{FontVec, Glyph, GlyphId, PxScaleFont, ScaleFont, point};
use std::fmt;

/// The first line of every summary.
pub const TITLE: &str = "NUnit Test Results:";

/// Blank space between the text and each edge of the canvas, in pixels.
pub const MARGIN_PX: f32 = 2.0;

/// The fixed multi-line text drawn on a summary badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBlock {
    lines: Vec<String>,
}

impl TextBlock {
    /// Composes the text block for `summary`: a title, a blank line, then one fact per line.
    pub fn for_summary(summary: &RunSummary) -> Self {
        let RunSummary {
            tests_run,
            tests_failing,
            date,
            time,
        } = summary;

        Self {
            lines: vec![
                TITLE.to_owned(),
                String::new(),
                format!("Tests Run: {tests_run}"),
                format!("Tests Failing: {tests_failing}"),
                format!("Test Date: {date}"),
                format!("Test Time: {time}"),
            ],
        }
    }

    /// Returns the lines of the block.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Measures the pixel footprint of the whole block under `font`.
    ///
    /// The width is that of the widest line, the height covers every line including blank ones.
    pub fn measure(&self, font: &SummaryFont) -> TextExtent {
        let scaled = font.scaled();
        let width = self
            .lines
            .iter()
            .map(|line| layout_line(&scaled, line, 0.0, 0.0, |_| {}))
            .fold(0.0, f32::max);
        TextExtent {
            width,
            height: self.lines.len() as f32 * line_height(&scaled),
        }
    }

    /// Positions every glyph of the block with its top-left corner at `(x, y)`.
    pub(crate) fn glyphs(&self, font: &SummaryFont, x: f32, y: f32) -> Vec<Glyph> {
        let scaled = font.scaled();
        let line_height = line_height(&scaled);

        let mut glyphs = Vec::new();
        for (index, line) in self.lines.iter().enumerate() {
            let baseline = y + index as f32 * line_height + scaled.ascent();
            layout_line(&scaled, line, x, baseline, |glyph| glyphs.push(glyph));
        }
        glyphs
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// The measured size of a [`TextBlock`], in fractional pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextExtent {
    /// The width of the widest line.
    pub width: f32,

    /// The combined height of all lines.
    pub height: f32,
}

impl TextExtent {
    /// Returns the `(width, height)` of a canvas that holds this text with a [`MARGIN_PX`] margin
    /// on every side, rounded to whole pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            (self.width + 2.0 * MARGIN_PX).round() as u32,
            (self.height + 2.0 * MARGIN_PX).round() as u32,
        )
    }
}

fn line_height(scaled: &PxScaleFont<&FontVec>) -> f32 {
    scaled.height() + scaled.line_gap()
}

/// Lays out one line starting at `(x, baseline)`, passing each positioned glyph to `emit`.
///
/// Returns the advance width of the line.
fn layout_line(
    scaled: &PxScaleFont<&FontVec>,
    line: &str,
    x: f32,
    baseline: f32,
    mut emit: impl FnMut(Glyph),
) -> f32 {
    let mut caret = 0.0;
    let mut previous: Option<GlyphId> = None;
    for c in line.chars().filter(|c| !c.is_control()) {
        let id = scaled.glyph_id(c);
        if let Some(previous) = previous {
            caret += scaled.kern(previous, id);
        }
        emit(id.with_scale_and_position(scaled.scale(), point(x + caret, baseline)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }
    caret
}
