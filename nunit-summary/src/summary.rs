// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::ExtractionError,
    report::{ReportAttribute, ResultElement},
};
use camino::Utf8Path;
use std::{fmt, io::BufRead, str::FromStr};
use tracing::debug;

/// The minimum number of attributes a result element must carry to be considered a report.
///
/// NUnit's `test-results` element always carries `name`, `total`, `errors`, `failures`,
/// `not-run`, `inconclusive`, `ignored`, `skipped`, `invalid`, `date` and `time`.
pub const MIN_RESULT_ATTRIBUTES: usize = 11;

const TIME_ATTR: &str = "time";
const DATE_ATTR: &str = "date";
const ERRORS_ATTR: &str = "errors";
const TOTAL_ATTR: &str = "total";
const FAILURES_ATTR: &str = "failures";

/// The outcome of a single test run, as needed to render a summary badge.
///
/// A `RunSummary` is only ever constructed fully populated: extraction either produces every
/// field or fails.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RunSummary {
    /// The total number of tests executed.
    pub tests_run: u64,

    /// The number of failed tests, with errored tests counted as failures.
    pub tests_failing: u64,

    /// The run date, exactly as written in the report.
    pub date: String,

    /// The run time, exactly as written in the report.
    pub time: String,
}

impl RunSummary {
    /// Reads the report at `path` and extracts its summary.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ExtractionError> {
        let element = ResultElement::from_path(path)?;
        debug!("report `{path}` loaded");
        Self::from_element(&element)
    }

    /// Reads a report from `reader` and extracts its summary.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ExtractionError> {
        let element = ResultElement::from_reader(reader)?;
        Self::from_element(&element)
    }

    /// Validates the attributes of a result element and extracts the summary from them.
    pub fn from_element(element: &ResultElement) -> Result<Self, ExtractionError> {
        debug!("attributes of `{}`:", element.name);
        for ReportAttribute { name, value } in &element.attributes {
            debug!("  {name} : {value}");
        }

        if element.attributes.len() < MIN_RESULT_ATTRIBUTES {
            return Err(ExtractionError::MalformedAttributes {
                element: element.name.clone(),
                count: element.attributes.len(),
                minimum: MIN_RESULT_ATTRIBUTES,
            });
        }

        let mut scan = AttributeScan::default();
        for attr in &element.attributes {
            scan.record(attr)?;
        }
        scan.finish()
    }

    /// Returns the status this summary is displayed with.
    pub fn status(&self) -> SummaryStatus {
        if self.tests_failing != 0 {
            SummaryStatus::Failing
        } else if self.tests_run == 0 {
            SummaryStatus::Empty
        } else {
            SummaryStatus::Passing
        }
    }
}

impl FromStr for RunSummary {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

/// The overall status of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SummaryStatus {
    /// At least one test failed or errored.
    Failing,

    /// Nothing failed, but nothing ran either. An empty run is not a pass.
    Empty,

    /// Tests ran and all of them passed.
    Passing,
}

impl fmt::Display for SummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failing => write!(f, "failing"),
            Self::Empty => write!(f, "empty"),
            Self::Passing => write!(f, "passing"),
        }
    }
}

/// Fields found so far while scanning the attributes of a result element.
#[derive(Debug, Default)]
struct AttributeScan {
    time: Option<String>,
    date: Option<String>,
    errors: Option<u32>,
    total: Option<u32>,
    failures: Option<u32>,
}

impl AttributeScan {
    fn record(&mut self, attr: &ReportAttribute) -> Result<(), ExtractionError> {
        let value = attr.value.as_str();
        match attr.name.as_str() {
            TIME_ATTR => self.time = Some(value.to_owned()),
            DATE_ATTR => self.date = Some(value.to_owned()),
            ERRORS_ATTR => self.errors = Some(parse_count(ERRORS_ATTR, value)?),
            TOTAL_ATTR => self.total = Some(parse_count(TOTAL_ATTR, value)?),
            FAILURES_ATTR => self.failures = Some(parse_count(FAILURES_ATTR, value)?),
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> Result<RunSummary, ExtractionError> {
        let time = self.time.ok_or(ExtractionError::MissingField(TIME_ATTR))?;
        let date = self.date.ok_or(ExtractionError::MissingField(DATE_ATTR))?;
        let total = self.total.ok_or(ExtractionError::MissingField(TOTAL_ATTR))?;
        let failures = self
            .failures
            .ok_or(ExtractionError::MissingField(FAILURES_ATTR))?;
        let errors = self.errors.ok_or(ExtractionError::MissingField(ERRORS_ATTR))?;

        Ok(RunSummary {
            tests_run: u64::from(total),
            // Errors are reported as failures.
            tests_failing: u64::from(failures) + u64::from(errors),
            date,
            time,
        })
    }
}

/// Parses a count after trimming XML whitespace. A leading `+` is accepted, a `-` never is.
fn parse_count(name: &'static str, value: &str) -> Result<u32, ExtractionError> {
    value
        .trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
        .parse()
        .map_err(|err| ExtractionError::InvalidAttributeValue {
            name,
            value: value.to_owned(),
            err,
        })
}
