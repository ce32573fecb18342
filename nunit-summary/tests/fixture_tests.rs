// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that extract summaries from report files on disk and render them.

use camino::{Utf8Path, Utf8PathBuf};
use nunit_summary::{
    MIN_RESULT_ATTRIBUTES, ResultElement, RunSummary, SummaryStatus,
    errors::{ExtractionError, ReportParseError},
    render::{EMPTY_COLOR, FAIL_COLOR, PASS_COLOR, SummaryFont, SummaryRenderer, TextBlock},
};
use pretty_assertions::assert_eq;
use test_case::test_case;
use tiny_skia::Pixmap;

fn fixture(name: &str) -> Utf8PathBuf {
    Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Loads the bundled face, so that these tests pass on machines without fonts installed.
fn font() -> SummaryFont {
    let data = include_bytes!("fonts/DejaVuSans.ttf").to_vec();
    SummaryFont::from_data("DejaVu Sans", data, 0).expect("bundled font loads")
}

fn renderer() -> SummaryRenderer {
    SummaryRenderer::new(font())
}

/// Renders `summary` into a temporary directory and decodes the result.
fn render_to_disk(summary: &RunSummary) -> Pixmap {
    let dir = camino_tempfile::tempdir().unwrap();
    let out = dir.path().join("badge.png");
    renderer().write_png(summary, &out).unwrap();
    let bytes = fs_err::read(&out).unwrap();
    Pixmap::decode_png(&bytes).expect("output is a valid PNG")
}

/// Returns the RGB value in the middle of the blank second line, which is always background.
fn background(pixmap: &Pixmap) -> [u8; 3] {
    let line_height = (pixmap.height() - 4) / 6;
    let pixel = pixmap
        .pixel(pixmap.width() / 2, 2 + line_height + line_height / 2)
        .unwrap();
    [pixel.red(), pixel.green(), pixel.blue()]
}

#[test]
fn failing_report_renders_red() {
    let summary = RunSummary::from_path(&fixture("failing.xml")).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            tests_run: 10,
            tests_failing: 2,
            date: "2024-01-01".to_owned(),
            time: "00:05:32".to_owned(),
        }
    );
    assert_eq!(summary.status(), SummaryStatus::Failing);

    let lines = TextBlock::for_summary(&summary).lines().to_vec();
    for expected in [
        "Tests Run: 10",
        "Tests Failing: 2",
        "Test Date: 2024-01-01",
        "Test Time: 00:05:32",
    ] {
        assert!(lines.iter().any(|line| line == expected), "{expected:?} in {lines:?}");
    }

    let pixmap = render_to_disk(&summary);
    assert_eq!(background(&pixmap), FAIL_COLOR);
}

#[test]
fn empty_report_renders_yellow() {
    let summary = RunSummary::from_path(&fixture("empty.xml")).unwrap();
    assert_eq!((summary.tests_run, summary.tests_failing), (0, 0));
    assert_eq!(summary.status(), SummaryStatus::Empty);

    let lines = TextBlock::for_summary(&summary).lines().to_vec();
    assert!(lines.iter().any(|line| line == "Tests Run: 0"));
    assert!(lines.iter().any(|line| line == "Tests Failing: 0"));

    let pixmap = render_to_disk(&summary);
    assert_eq!(background(&pixmap), EMPTY_COLOR);
}

#[test]
fn passing_report_renders_green() {
    let summary = RunSummary::from_path(&fixture("passing.xml")).unwrap();
    assert_eq!(summary.status(), SummaryStatus::Passing);
    let pixmap = render_to_disk(&summary);
    assert_eq!(background(&pixmap), PASS_COLOR);
}

#[test]
fn extraction_is_repeatable() {
    let path = fixture("failing.xml");
    let first = RunSummary::from_path(&path).unwrap();
    for _ in 0..3 {
        assert_eq!(RunSummary::from_path(&path).unwrap(), first);
    }

    let text = fs_err::read_to_string(&path).unwrap();
    assert_eq!(text.parse::<RunSummary>().unwrap(), first);
}

#[test]
fn rendering_is_repeatable() {
    let summary = RunSummary::from_path(&fixture("passing.xml")).unwrap();
    let renderer = renderer();
    assert_eq!(
        renderer.render_png(&summary).unwrap(),
        renderer.render_png(&summary).unwrap()
    );
}

#[test_case("failing.xml")]
#[test_case("empty.xml")]
#[test_case("passing.xml")]
fn image_is_measured_text_plus_margin(name: &str) {
    let summary = RunSummary::from_path(&fixture(name)).unwrap();
    let font = font();
    let extent = TextBlock::for_summary(&summary).measure(&font);

    let pixmap = render_to_disk(&summary);
    assert_eq!(
        (pixmap.width(), pixmap.height()),
        (
            (extent.width + 4.0).round() as u32,
            (extent.height + 4.0).round() as u32,
        )
    );
}

#[test]
fn result_element_lists_every_root_attribute() {
    let element = ResultElement::from_path(&fixture("failing.xml")).unwrap();
    assert_eq!(element.name, "test-results");
    assert_eq!(element.attributes.len(), MIN_RESULT_ATTRIBUTES);
    let names: Vec<_> = element.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "name",
            "total",
            "errors",
            "failures",
            "not-run",
            "inconclusive",
            "ignored",
            "skipped",
            "invalid",
            "date",
            "time",
        ]
    );
}

#[test]
fn ten_attributes_are_rejected() {
    let err = RunSummary::from_path(&fixture("ten-attributes.xml")).unwrap_err();
    assert!(
        matches!(err, ExtractionError::MalformedAttributes { count: 10, minimum: 11, .. }),
        "{err:?}"
    );
}

#[test]
fn missing_date_is_reported() {
    let err = RunSummary::from_path(&fixture("missing-date.xml")).unwrap_err();
    assert!(matches!(err, ExtractionError::MissingField("date")), "{err:?}");
    assert_eq!(
        err.to_string(),
        "required attribute `date` not found on the result element"
    );
}

#[test]
fn unparseable_errors_attribute_is_reported() {
    let err = RunSummary::from_path(&fixture("bad-errors.xml")).unwrap_err();
    match &err {
        ExtractionError::InvalidAttributeValue { name, value, .. } => {
            assert_eq!(*name, "errors");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn truncated_report_fails_to_parse() {
    let err = RunSummary::from_path(&fixture("truncated.xml")).unwrap_err();
    assert!(
        matches!(
            err,
            ExtractionError::ParseFailed(ReportParseError::UnclosedElement { ref name }) if name == "results"
        ),
        "{err:?}"
    );
}

#[test]
fn nonexistent_report_fails_to_parse() {
    let err = RunSummary::from_path(&fixture("does-not-exist.xml")).unwrap_err();
    assert!(
        matches!(err, ExtractionError::ParseFailed(ReportParseError::Io(_))),
        "{err:?}"
    );
}

#[test]
fn trailing_garbage_fails_to_parse() {
    let mut text = fs_err::read_to_string(fixture("failing.xml")).unwrap();
    text.push_str("garbage\n");
    let err = text.parse::<RunSummary>().unwrap_err();
    assert!(
        matches!(
            err,
            ExtractionError::ParseFailed(ReportParseError::ContentOutsideRoot { .. })
        ),
        "{err:?}"
    );
}
