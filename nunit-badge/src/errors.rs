// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use nunit_summary::errors::{ExtractionError, RenderError};
use nunit_summary_metadata::SummaryExitCode;
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are placeholders: errors are meant to be printed with display_to_stderr,
// which colorizes them and prints the whole chain of causes.

/// An expected failure of a `nunit-badge` invocation.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("source report not found")]
    SourceNotFound { path: Utf8PathBuf },

    #[error("failed to extract run summary")]
    ExtractionFailed {
        path: Utf8PathBuf,
        #[source]
        err: ExtractionError,
    },

    #[error("failed to render badge")]
    RenderFailed {
        #[source]
        err: RenderError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::SourceNotFound { .. } => SummaryExitCode::SOURCE_NOT_FOUND,
            Self::ExtractionFailed { err, .. } => match err {
                ExtractionError::ParseFailed(_) => SummaryExitCode::REPORT_PARSE_FAILED,
                _ => SummaryExitCode::REPORT_INVALID,
            },
            Self::RenderFailed { err } => match err {
                RenderError::WriteFailed { .. } => SummaryExitCode::WRITE_OUTPUT_ERROR,
                _ => SummaryExitCode::RENDER_FAILED,
            },
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::SourceNotFound { path } => {
                tracing::error!("invalid source file path `{}`", path.style(styles.bold));
                None
            }
            Self::ExtractionFailed { path, err } => match err {
                ExtractionError::ParseFailed(err) => {
                    tracing::error!("failed to parse report `{}`", path.style(styles.bold));
                    Some(err as &dyn Error)
                }
                err => {
                    tracing::error!(
                        "report `{}` does not contain a run summary",
                        path.style(styles.bold)
                    );
                    Some(err as &dyn Error)
                }
            },
            Self::RenderFailed { err } => match err {
                RenderError::WriteFailed { path, err } => {
                    tracing::error!("failed to write badge to `{}`", path.style(styles.bold));
                    Some(err as &dyn Error)
                }
                err => {
                    tracing::error!("failed to render badge");
                    Some(err as &dyn Error)
                }
            },
        };

        while let Some(err) = next_error {
            tracing::error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nunit_summary::errors::ReportParseError;
    use std::io;
    use test_case::test_case;

    fn extraction(err: ExtractionError) -> ExpectedError {
        ExpectedError::ExtractionFailed {
            path: "TestResult.xml".into(),
            err,
        }
    }

    #[test_case(
        ExpectedError::SourceNotFound { path: "missing.xml".into() },
        SummaryExitCode::SOURCE_NOT_FOUND
        ; "source not found"
    )]
    #[test_case(
        extraction(ExtractionError::ParseFailed(ReportParseError::NoElement)),
        SummaryExitCode::REPORT_PARSE_FAILED
        ; "parse failed"
    )]
    #[test_case(
        extraction(ExtractionError::MissingField("date")),
        SummaryExitCode::REPORT_INVALID
        ; "missing field"
    )]
    #[test_case(
        extraction(ExtractionError::MalformedAttributes {
            element: "test-results".to_owned(),
            count: 10,
            minimum: 11,
        }),
        SummaryExitCode::REPORT_INVALID
        ; "too few attributes"
    )]
    #[test_case(
        ExpectedError::RenderFailed {
            err: RenderError::FontUnavailable { families: vec!["Arial".to_owned()] },
        },
        SummaryExitCode::RENDER_FAILED
        ; "no font"
    )]
    #[test_case(
        ExpectedError::RenderFailed {
            err: RenderError::WriteFailed {
                path: "out.png".into(),
                err: io::Error::from(io::ErrorKind::PermissionDenied),
            },
        },
        SummaryExitCode::WRITE_OUTPUT_ERROR
        ; "write failed"
    )]
    fn exit_codes(error: ExpectedError, expected: i32) {
        assert_eq!(error.process_exit_code(), expected);
    }

    #[test]
    fn causes_are_chained() {
        let error = extraction(ExtractionError::ParseFailed(ReportParseError::UnclosedElement {
            name: "test-suite".to_owned(),
        }));
        let mut chain = Vec::new();
        let mut next: Option<&dyn Error> = Some(&error);
        while let Some(err) = next {
            chain.push(err.to_string());
            next = err.source();
        }
        assert_eq!(
            chain,
            [
                "failed to extract run summary",
                "failed to parse report",
                "element `test-suite` is not closed before the end of the document",
            ]
        );

        // Printing without a subscriber installed must not panic.
        error.display_to_stderr(&StderrStyles::default());
    }
}
