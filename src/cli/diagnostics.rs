//! Summary presentation for recorded outcomes.
//!
//! Renders, for each registry entry in order: the classification label,
//! the message (failures and errors only), the best-effort origin
//! `{file, line}`, and — in verbose mode — the captured execution trace.
//! A trailing tally line closes the report. Colorized when supported,
//! with a plain-text fallback.

use std::fmt::Write as _;
use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::RunConfig;
use crate::registry::{Outcome, OutcomeKind, OutcomeRegistry};

/// Prints the end-of-run summary to stdout.
pub fn print_summary(registry: &OutcomeRegistry, config: &RunConfig) {
    let choice = if config.use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    if write_summary(&mut stdout, registry, config).is_err() {
        // Fallback to plain text if color printing fails.
        print!("{}", plain_summary(registry, config));
    }
}

/// Writes the summary to any `WriteColor` implementation.
pub fn write_summary(
    writer: &mut impl WriteColor,
    registry: &OutcomeRegistry,
    config: &RunConfig,
) -> io::Result<()> {
    // Terminate the marker line.
    writeln!(writer)?;

    for outcome in registry.outcomes() {
        writeln!(writer)?;
        writer.set_color(ColorSpec::new().set_fg(Some(label_color(outcome.kind))).set_bold(true))?;
        write!(writer, "{}:", outcome.kind.label())?;
        writer.reset()?;
        match &outcome.message {
            Some(message) => writeln!(writer, " {}", flatten(message))?,
            None => writeln!(writer)?,
        }
        writeln!(writer, "  {}: {}", outcome.origin.label(), outcome.origin.name())?;
        if let Some(location) = &outcome.location {
            writeln!(writer, "  file: {}", location.file)?;
            writeln!(writer, "  line: {}", location.line)?;
        }
        if config.show_backtrace {
            if let Some(trace) = &outcome.trace {
                writeln!(writer, "{}", trace)?;
            }
        }
    }

    if !registry.is_empty() {
        let tally = registry.tally();
        writeln!(writer)?;
        writeln!(
            writer,
            "{} failed, {} skipped, {} errored",
            tally.failed, tally.skipped, tally.errored
        )?;
    }
    Ok(())
}

fn plain_summary(registry: &OutcomeRegistry, config: &RunConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    for outcome in registry.outcomes() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", entry_header(outcome));
        let _ = writeln!(out, "  {}: {}", outcome.origin.label(), outcome.origin.name());
        if let Some(location) = &outcome.location {
            let _ = writeln!(out, "  file: {}", location.file);
            let _ = writeln!(out, "  line: {}", location.line);
        }
        if config.show_backtrace {
            if let Some(trace) = &outcome.trace {
                let _ = writeln!(out, "{}", trace);
            }
        }
    }
    if !registry.is_empty() {
        let tally = registry.tally();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} failed, {} skipped, {} errored",
            tally.failed, tally.skipped, tally.errored
        );
    }
    out
}

fn entry_header(outcome: &Outcome) -> String {
    match &outcome.message {
        Some(message) => format!("{}: {}", outcome.kind.label(), flatten(message)),
        None => format!("{}:", outcome.kind.label()),
    }
}

/// Multi-line messages collapse onto one summary line.
fn flatten(message: &str) -> String {
    message.replace('\n', " --- ")
}

fn label_color(kind: OutcomeKind) -> Color {
    match kind {
        OutcomeKind::Failed | OutcomeKind::Errored => Color::Red,
        OutcomeKind::Skipped => Color::Yellow,
    }
}
