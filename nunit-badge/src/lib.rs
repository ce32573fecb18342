// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render an NUnit XML test report as an at-a-glance PNG badge.
//!
//! ```text
//! nunit-badge TestResult.xml TestResult.png --verbose
//! ```
//!
//! The badge lists the number of tests run and failing along with the run's date and time, on a
//! red, light yellow or light green background. See
//! [`SummaryExitCode`](nunit_summary_metadata::SummaryExitCode) for the exit codes.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use output::{OutputContext, StderrStyles};
