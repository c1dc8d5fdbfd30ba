//! Progress sinks for the marker stream.
//!
//! One character is emitted synchronously as each test completes: `.` for
//! passed, `F` for failed, `S` for skipped, `E` for errored (and for a
//! unit that fails to load). `StdoutSink` colorizes markers for the CLI;
//! `OutputBuffer` collects them into a string for testing or programmatic
//! capture.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::session::ProgressSink;

/// StdoutSink: writes colored markers to stdout, flushing after each so
/// progress is visible while the run executes.
pub struct StdoutSink {
    stream: StandardStream,
}

impl StdoutSink {
    pub fn new(use_colors: bool) -> Self {
        let choice = if use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stream: StandardStream::stdout(choice),
        }
    }
}

impl ProgressSink for StdoutSink {
    fn marker(&mut self, marker: char) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(marker_color(marker)));
        let _ = write!(self.stream, "{}", marker);
        let _ = self.stream.reset();
        let _ = self.stream.flush();
    }
}

/// OutputBuffer: collects markers into a String.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    markers: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &str {
        &self.markers
    }
}

impl ProgressSink for OutputBuffer {
    fn marker(&mut self, marker: char) {
        self.markers.push(marker);
    }
}

fn marker_color(marker: char) -> Option<Color> {
    match marker {
        '.' => Some(Color::Green),
        'F' | 'E' => Some(Color::Red),
        'S' => Some(Color::Yellow),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_buffer_records_markers_in_order() {
        let mut buffer = OutputBuffer::new();
        buffer.marker('.');
        buffer.marker('F');
        buffer.marker('S');
        assert_eq!(buffer.markers(), ".FS");
    }
}
