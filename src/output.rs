// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal and quiet (CI) output modes over a swappable sink.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only prompts, warnings and the final result)
    Quiet,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl Output {
    /// Output writing to stdout.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_sink(mode, Box::new(io::stdout()))
    }

    /// Output writing to an arbitrary sink.
    pub fn with_sink(mode: OutputMode, sink: Box<dyn Write + Send>) -> Self {
        Self {
            mode,
            start_time: None,
            sink: Mutex::new(sink),
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            self.write_line(message);
        }
    }

    /// Print a question without a trailing newline. Always shown.
    pub fn prompt(&self, message: &str) {
        let mut sink = self.sink.lock();
        // A broken stdout leaves nothing useful to report to.
        let _ = write!(sink, "{message}");
        let _ = sink.flush();
    }

    /// Print a line regardless of mode. Used for streamed content.
    pub fn line(&self, message: &str) {
        self.write_line(message);
    }

    /// Print a warning line. Always shown.
    pub fn warning(&self, message: &str) {
        self.write_line(&format!("warning: {message}"));
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    self.write_line(&format!("{message} ({elapsed:.1}s)"));
                } else {
                    self.write_line(message);
                }
            }
            OutputMode::Quiet => self.write_line(message),
        }
    }

    fn write_line(&self, message: &str) {
        let mut sink = self.sink.lock();
        let _ = writeln!(sink, "{message}");
        let _ = sink.flush();
    }
}
