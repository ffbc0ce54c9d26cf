//! Diagnostic sinks: one message in, one line out.

use log::info;
use std::io::Write;
use std::sync::Mutex;

const MAX_MESSAGE_CHARS: usize = 512;

/// Collaborator that records free-form diagnostic messages.
///
/// Logging a message always succeeds; sinks swallow their own I/O failures.
pub trait DiagnosticSink {
    fn log(&self, message: &str);
}

/// Sink that forwards messages to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn log(&self, message: &str) {
        info!(
            "event=diagnostic module=sink message={}",
            sanitize_message(message, MAX_MESSAGE_CHARS)
        );
    }
}

/// Sink that writes each message as a single line to a writer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn log(&self, message: &str) {
        let line = sanitize_message(message, MAX_MESSAGE_CHARS);
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(out, "{line}").and_then(|()| out.flush());
    }
}

/// Collapses line breaks and caps length so one message stays one line.
fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
