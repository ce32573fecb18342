// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Stable, machine-readable information about `nunit-badge` invocations.
//!
//! CI scripts that drive `nunit-badge` can depend on this crate to interpret its exit status
//! without scraping console output.

mod exit_codes;

pub use exit_codes::*;
