// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `nunit-badge` failures.
///
/// A badge is written only when the process exits with [`OK`](Self::OK). The outcome of the test
/// run itself is conveyed by the badge, never by the exit code.
///
/// Command-line usage errors exit with code 2, including running with no arguments at all, which
/// prints usage to stderr. An explicit `--help` exits 0. Unknown/unexpected failures always result
/// in exit code 1.
pub enum SummaryExitCode {}

impl SummaryExitCode {
    /// The badge was written.
    pub const OK: i32 = 0;

    /// The source report does not exist.
    pub const SOURCE_NOT_FOUND: i32 = 96;

    /// The source report could not be read or is not well-formed XML.
    pub const REPORT_PARSE_FAILED: i32 = 104;

    /// The source report is well-formed but does not carry a usable run summary: too few
    /// attributes, a missing attribute, or a count that is not an integer.
    pub const REPORT_INVALID: i32 = 105;

    /// The badge could not be rendered, for example because no suitable font is installed.
    pub const RENDER_FAILED: i32 = 106;

    /// Writing the badge to its destination produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;

    /// Every documented exit code, in ascending order.
    pub const ALL: &'static [i32] = &[
        Self::OK,
        Self::SOURCE_NOT_FOUND,
        Self::REPORT_PARSE_FAILED,
        Self::REPORT_INVALID,
        Self::RENDER_FAILED,
        Self::WRITE_OUTPUT_ERROR,
    ];
}
