// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locate the result element of a report document.
//!
//! NUnit writes the whole run outcome as attributes on the document's root element
//! (`<test-results total=".." errors=".." ...>`), so only that element's attributes are kept.
//! The rest of the document is streamed past, but still checked: attributes of nested elements
//! must be well-formed, text must only use known entities, and nothing but whitespace, comments
//! and processing instructions may appear outside the root.

use crate::errors::ReportParseError;
use camino::Utf8Path;
use quick_xml::{Reader, events::BytesStart, events::Event};
use std::io::{BufRead, BufReader};

/// A single attribute of the result element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportAttribute {
    /// The local name of the attribute, without any namespace prefix.
    pub name: String,

    /// The decoded and unescaped value.
    pub value: String,
}

/// The root element of a report, with its attributes in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultElement {
    /// The local name of the element.
    pub name: String,

    /// The attributes of the element.
    pub attributes: Vec<ReportAttribute>,
}

impl ResultElement {
    /// Reads the report at `path` and returns its root element.
    ///
    /// The file is closed before this returns, on both the success and error paths.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ReportParseError> {
        let file = fs_err::File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads a report from `reader` and returns its root element.
    ///
    /// The entire document is consumed, so that a document which is malformed after the result
    /// element is still rejected.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ReportParseError> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().check_end_names = true;

        let mut buf = Vec::new();
        // Names of the currently open elements, outermost first.
        let mut open: Vec<String> = Vec::new();
        let mut root = None;

        loop {
            let event = reader.read_event_into(&mut buf).map_err(|err| ReportParseError::Xml {
                position: reader.error_position(),
                err,
            })?;

            match event {
                Event::Start(start) => {
                    let element = Self::from_start(&start, &reader)?;
                    if open.is_empty() {
                        open.push(element.name.clone());
                        set_root(&mut root, element)?;
                    } else {
                        open.push(element.name);
                    }
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start, &reader)?;
                    if open.is_empty() {
                        set_root(&mut root, element)?;
                    }
                }
                Event::End(_) => {
                    open.pop();
                }
                Event::Text(text) => {
                    text.unescape().map_err(|err| xml_error(err, &reader))?;
                    if open.is_empty() && !text.iter().all(|&b| is_xml_whitespace(b)) {
                        return Err(ReportParseError::ContentOutsideRoot {
                            position: reader.buffer_position(),
                        });
                    }
                }
                Event::CData(_) if open.is_empty() => {
                    return Err(ReportParseError::ContentOutsideRoot {
                        position: reader.buffer_position(),
                    });
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(name) = open.pop() {
            return Err(ReportParseError::UnclosedElement { name });
        }
        root.ok_or(ReportParseError::NoElement)
    }

    /// Reads the name and attributes of an element, rejecting duplicate, unquoted or badly
    /// escaped attributes.
    fn from_start<R>(start: &BytesStart<'_>, reader: &Reader<R>) -> Result<Self, ReportParseError> {
        let name = local_name(start, reader)?;
        let decoder = reader.decoder();

        let attributes = start
            .attributes()
            .map(|attr| {
                let attr = attr.map_err(|err| xml_error(err.into(), reader))?;
                let name = decoder
                    .decode(attr.key.local_name().as_ref())
                    .map_err(|err| xml_error(err.into(), reader))?
                    .into_owned();
                let value = attr
                    .decode_and_unescape_value(decoder)
                    .map_err(|err| xml_error(err, reader))?
                    .into_owned();
                Ok(ReportAttribute { name, value })
            })
            .collect::<Result<Vec<_>, ReportParseError>>()?;

        Ok(Self { name, attributes })
    }
}

fn set_root(
    root: &mut Option<ResultElement>,
    element: ResultElement,
) -> Result<(), ReportParseError> {
    if let Some(first) = root {
        return Err(ReportParseError::MultipleRoots {
            first: first.name.clone(),
            second: element.name,
        });
    }
    *root = Some(element);
    Ok(())
}

fn is_xml_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

fn local_name<R>(start: &BytesStart<'_>, reader: &Reader<R>) -> Result<String, ReportParseError> {
    reader
        .decoder()
        .decode(start.local_name().as_ref())
        .map(|name| name.into_owned())
        .map_err(|err| xml_error(err.into(), reader))
}

fn xml_error<R>(err: quick_xml::Error, reader: &Reader<R>) -> ReportParseError {
    ReportParseError::Xml {
        position: reader.buffer_position(),
        err,
    }
}
