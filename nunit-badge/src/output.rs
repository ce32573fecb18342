// Copyright (c) The nunit-badge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{Args, ValueEnum};
use owo_colors::{OwoColorize, Style, style};
use std::fmt;
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    level_filters::LevelFilter,
};
use tracing_subscriber::{
    Layer,
    filter::Targets,
    fmt::{FmtContext, FormatEvent, FormatFields, format, writer::MakeWriterExt},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Overrides the log filter with a `tracing-subscriber` targets string, e.g. `nunit_summary=trace`.
pub(crate) const LOG_ENV: &str = "NUNIT_BADGE_LOG";

/// Events with this target are printed without an `error:`-style heading.
pub(crate) const NO_HEADING_TARGET: &str = "nunit_badge::no_heading";

pub(crate) mod clap_styles {
    use clap::builder::{
        Styles,
        styling::{AnsiColor, Effects, Style},
    };

    const HEADER: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
    const USAGE: Style = AnsiColor::Green.on_default().effects(Effects::BOLD);
    const LITERAL: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
    const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();
    const ERROR: Style = AnsiColor::Red.on_default().effects(Effects::BOLD);
    const VALID: Style = AnsiColor::Cyan.on_default().effects(Effects::BOLD);
    const INVALID: Style = AnsiColor::Yellow.on_default().effects(Effects::BOLD);

    /// Cargo-like help styles.
    pub(crate) const fn style() -> Styles {
        Styles::styled()
            .header(HEADER)
            .usage(USAGE)
            .literal(LITERAL)
            .placeholder(PLACEHOLDER)
            .error(ERROR)
            .valid(VALID)
            .invalid(INVALID)
    }
}

#[derive(Copy, Clone, Debug, Args)]
#[must_use]
pub(crate) struct OutputOpts {
    /// Print progress and the attributes of the report while working
    #[arg(long, short, env = "NUNIT_BADGE_VERBOSE")]
    pub(crate) verbose: bool,

    /// Produce color output: auto, always, never
    #[arg(
        long,
        value_enum,
        default_value_t,
        hide_possible_values = true,
        value_name = "WHEN",
        env = "CARGO_TERM_COLOR"
    )]
    pub(crate) color: Color,
}

impl OutputOpts {
    pub(crate) fn init(self) -> OutputContext {
        let OutputOpts { verbose, color } = self;

        color.init(verbose);

        OutputContext { color }
    }
}

/// How the current invocation prints to the terminal.
#[derive(Copy, Clone, Debug)]
#[must_use]
pub struct OutputContext {
    pub(crate) color: Color,
}

impl OutputContext {
    /// Returns general stderr styles for the current output context.
    pub fn stderr_styles(&self) -> StderrStyles {
        let mut styles = StderrStyles::default();

        if self.color.should_colorize(supports_color::Stream::Stderr) {
            styles.colorize();
        }

        styles
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Default)]
#[must_use]
pub(crate) enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

static INIT_LOGGER: std::sync::Once = std::sync::Once::new();

impl Color {
    /// Installs the global logger. Errors and warnings go to stderr, everything else to stdout.
    pub(crate) fn init(self, verbose: bool) {
        let log_styles = LogStyles::new(self);

        INIT_LOGGER.call_once(|| {
            let default_level = if verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            };

            let mut rejected = None;
            let targets = match std::env::var(LOG_ENV) {
                Ok(level_str) if !level_str.is_empty() => match level_str.parse::<Targets>() {
                    Ok(targets) => targets,
                    Err(err) => {
                        rejected = Some(format!("`{level_str}` ({err})"));
                        Targets::new().with_default(default_level)
                    }
                },
                Ok(_) | Err(std::env::VarError::NotPresent) => {
                    Targets::new().with_default(default_level)
                }
                Err(std::env::VarError::NotUnicode(_)) => {
                    rejected = Some("a value that is not UTF-8".to_owned());
                    Targets::new().with_default(default_level)
                }
            };

            let writer = std::io::stderr
                .with_max_level(Level::WARN)
                .or_else(std::io::stdout);
            let layer = tracing_subscriber::fmt::layer()
                .event_format(SimpleFormatter { styles: log_styles })
                .with_writer(writer)
                .with_filter(targets);

            tracing_subscriber::registry().with(layer).init();

            if let Some(rejected) = rejected {
                tracing::warn!("ignoring {LOG_ENV}: could not parse {rejected}");
            }
        });
    }

    pub(crate) fn should_colorize(self, stream: supports_color::Stream) -> bool {
        match self {
            Color::Auto => supports_color::on_cached(stream).is_some(),
            Color::Always => true,
            Color::Never => false,
        }
    }
}

struct SimpleFormatter {
    styles: LogStyles,
}

impl<S, N> FormatEvent<S, N> for SimpleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        if metadata.target() != NO_HEADING_TARGET {
            let (heading, style) = match *metadata.level() {
                Level::ERROR => ("error", self.styles.error),
                Level::WARN => ("warning", self.styles.warning),
                Level::INFO => ("info", self.styles.info),
                Level::DEBUG => ("debug", self.styles.debug),
                Level::TRACE => ("trace", self.styles.trace),
            };
            write!(writer, "{}: ", heading.style(style))?;
        }

        let mut visitor = MessageVisitor {
            writer: &mut writer,
            error: None,
        };

        event.record(&mut visitor);

        if let Some(error) = visitor.error {
            return Err(error);
        }

        writeln!(writer)
    }
}

static MESSAGE_FIELD: &str = "message";

struct MessageVisitor<'writer, 'a> {
    writer: &'a mut format::Writer<'writer>,
    error: Option<fmt::Error>,
}

impl Visit for MessageVisitor<'_, '_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            if let Err(error) = write!(self.writer, "{value:?}") {
                self.error = Some(error);
            }
        }
    }
}

#[derive(Debug, Default)]
struct LogStyles {
    error: Style,
    warning: Style,
    info: Style,
    debug: Style,
    trace: Style,
}

impl LogStyles {
    /// Colorizes each heading according to the stream its level is written to.
    fn new(color: Color) -> Self {
        let mut styles = Self::default();
        if color.should_colorize(supports_color::Stream::Stderr) {
            styles.error = style().red().bold();
            styles.warning = style().yellow().bold();
        }
        if color.should_colorize(supports_color::Stream::Stdout) {
            styles.info = style().bold();
            styles.debug = style().bold();
            styles.trace = style().dimmed();
        }
        styles
    }
}

/// Styles for error messages printed to stderr.
#[derive(Debug, Default)]
pub struct StderrStyles {
    pub(crate) bold: Style,
}

impl StderrStyles {
    fn colorize(&mut self) {
        self.bold = style().bold();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_disables_all_styles() {
        let styles = LogStyles::new(Color::Never);
        let plain = Style::new();
        for heading in [styles.error, styles.warning, styles.info, styles.debug, styles.trace] {
            assert_eq!(
                format!("{}", "heading".style(heading)),
                format!("{}", "heading".style(plain))
            );
        }
    }

    #[test]
    fn always_colorizes_headings() {
        let styles = LogStyles::new(Color::Always);
        let error = format!("{}", "error".style(styles.error));
        assert_ne!(error, "error");
        assert!(error.contains("error"));
    }
}
