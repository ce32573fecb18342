// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while extracting and rendering run summaries.

use camino::Utf8PathBuf;
use std::{io, num::ParseIntError};
use thiserror::Error;

/// An error that occurs while extracting a [`RunSummary`](crate::RunSummary) from a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// The report could not be read or is not well-formed XML.
    #[error("failed to parse report")]
    ParseFailed(#[from] ReportParseError),

    /// The result element carries fewer attributes than any real report does.
    #[error(
        "result element `{element}` has {count} attributes, expected at least {minimum}"
    )]
    MalformedAttributes {
        /// The local name of the result element.
        element: String,

        /// The number of attributes found.
        count: usize,

        /// The minimum number of attributes required.
        minimum: usize,
    },

    /// A required attribute was absent from the result element.
    #[error("required attribute `{0}` not found on the result element")]
    MissingField(&'static str),

    /// A count attribute was present but is not a base-10 integer.
    #[error("attribute `{name}` has value `{value}`, which is not a valid count")]
    InvalidAttributeValue {
        /// The attribute name.
        name: &'static str,

        /// The raw attribute value.
        value: String,

        /// The underlying conversion error.
        #[source]
        err: ParseIntError,
    },
}

/// The reason a report document could not be parsed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportParseError {
    /// The report could not be opened or read.
    #[error("error reading report")]
    Io(#[from] io::Error),

    /// The XML reader rejected the document.
    #[error("malformed XML at byte offset {position}")]
    Xml {
        /// The byte offset at which the error was detected.
        position: u64,

        /// The underlying XML error.
        #[source]
        err: quick_xml::Error,
    },

    /// The document ended while an element was still open.
    #[error("element `{name}` is not closed before the end of the document")]
    UnclosedElement {
        /// The local name of the innermost unclosed element.
        name: String,
    },

    /// Text or character data appears outside the root element.
    #[error("content outside the root element at byte offset {position}")]
    ContentOutsideRoot {
        /// The byte offset just past the offending content.
        position: u64,
    },

    /// The document has more than one root element.
    #[error("second root element `{second}` after `{first}`")]
    MultipleRoots {
        /// The local name of the first root element.
        first: String,

        /// The local name of the second root element.
        second: String,
    },

    /// The document contains no elements at all.
    #[error("document does not contain any elements")]
    NoElement,
}

/// An error that occurs while rendering a [`RunSummary`](crate::RunSummary) to a PNG.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// None of the preferred font families is installed.
    #[error("no sans-serif font found (tried: {})", .families.join(", "))]
    FontUnavailable {
        /// The families that were searched for, in order.
        families: Vec<String>,
    },

    /// A font face was found but could not be loaded.
    #[error("failed to load font face `{family}`")]
    FontLoad {
        /// The family name of the face.
        family: String,

        /// The underlying error, if the face data was readable at all.
        #[source]
        err: Option<ab_glyph::InvalidFont>,
    },

    /// The measured text requires a canvas that cannot be allocated.
    #[error("cannot allocate a {width}x{height} canvas")]
    CanvasSize {
        /// The requested width in pixels.
        width: u32,

        /// The requested height in pixels.
        height: u32,
    },

    /// The canvas could not be encoded as PNG.
    #[error("failed to encode PNG")]
    Encode(#[source] png::EncodingError),

    /// The encoded image could not be written to disk.
    #[error("failed to write image to `{path}`")]
    WriteFailed {
        /// The output path.
        path: Utf8PathBuf,

        /// The underlying I/O error.
        #[source]
        err: io::Error,
    },
}
