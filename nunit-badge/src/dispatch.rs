// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts, clap_styles},
};
use camino::Utf8PathBuf;
use clap::Parser;
use nunit_summary::{RunSummary, render::SummaryRenderer};
use nunit_summary_metadata::SummaryExitCode;
use std::ffi::OsString;
use tracing::debug;

/// Render an NUnit XML test report as a PNG summary badge.
///
/// The badge lists the number of tests run and failing along with the date and time of the run.
/// Its background is red if any test failed or errored, light yellow if no tests ran, and light
/// green otherwise.
#[derive(Debug, Parser)]
#[command(
    version,
    styles = clap_styles::style(),
    max_term_width = 100,
    arg_required_else_help = true
)]
pub struct BadgeApp {
    /// NUnit XML report to read
    #[arg(value_name = "SOURCE")]
    source: Utf8PathBuf,

    /// Path to write the PNG badge to
    #[arg(value_name = "DEST")]
    dest: Utf8PathBuf,

    #[command(flatten)]
    output: OutputOpts,
}

impl BadgeApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self) -> Result<i32> {
        let Self {
            source,
            dest,
            output,
        } = self;

        if output.verbose {
            debug!("verbose mode enabled");
        }
        debug!("source file: {source}");
        debug!("destination file: {dest}");

        if !source.is_file() {
            return Err(ExpectedError::SourceNotFound { path: source });
        }

        let summary = RunSummary::from_path(&source)
            .map_err(|err| ExpectedError::ExtractionFailed { path: source, err })?;
        debug!(
            "document parsed ({} run, {} failing, status {}), starting image generation",
            summary.tests_run,
            summary.tests_failing,
            summary.status(),
        );

        let renderer =
            SummaryRenderer::load_default().map_err(|err| ExpectedError::RenderFailed { err })?;
        debug!("rendering with font `{}`", renderer.font().family());
        renderer
            .write_png(&summary, &dest)
            .map_err(|err| ExpectedError::RenderFailed { err })?;

        debug!("program exiting");
        Ok(SummaryExitCode::OK)
    }
}

/// Rewrites the legacy single-dash command-line forms into the ones [`BadgeApp`] understands.
///
/// A first argument of `help` becomes `--help`, and `-verbose` anywhere becomes `--verbose`. The
/// first item is the program name and is passed through unchanged.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 1 && arg == "help" {
                OsString::from("--help")
            } else if index > 0 && arg == "-verbose" {
                OsString::from("--verbose")
            } else {
                arg
            }
        })
        .collect()
}
