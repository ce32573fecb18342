// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Turn an NUnit XML test report into an at-a-glance PNG summary badge.
//!
//! Processing is linear: [`RunSummary::from_path`] reads the report and validates the handful of
//! attributes it needs, then [`render::SummaryRenderer`] lays the summary out as text and writes
//! a PNG whose background reflects the run's [`SummaryStatus`].
//!
//! ```no_run
//! use camino::Utf8Path;
//! use nunit_summary::{RunSummary, render};
//!
//! let summary = RunSummary::from_path(Utf8Path::new("TestResult.xml"))?;
//! render::render(&summary, Utf8Path::new("TestResult.png"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod errors;
pub mod render;
mod report;
mod summary;

pub use report::*;
pub use summary::*;
