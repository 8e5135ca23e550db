use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::report::{Chunk, DisplayMode, ReportOutcome};

/// Destination for rendered report output.
pub trait ReportSink {
    /// Deliver one chunk of a report.
    fn deliver(&self, chunk: &Chunk) -> Result<()>;

    /// Deliver a single informational message.
    fn notify(&self, message: &str) -> Result<()>;
}

/// Format a chunk for a plain-text terminal.
pub fn format_chunk(chunk: &Chunk) -> String {
    match chunk.mode {
        DisplayMode::Monospace => format!("```\n{}```\n", chunk.text()),
        DisplayMode::Markup => chunk.text(),
    }
}

/// Sink writing to any `Write`, one chunk after another.
pub struct WriterSink<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::Delivery("output lock poisoned".to_string()))?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn deliver(&self, chunk: &Chunk) -> Result<()> {
        self.write(&format_chunk(chunk))
    }

    fn notify(&self, message: &str) -> Result<()> {
        self.write(&format!("{message}\n"))
    }
}

pub type StdoutSink = WriterSink<std::io::Stdout>;

pub fn stdout_sink() -> StdoutSink {
    WriterSink::new(std::io::stdout())
}

/// Deliver chunks in order, sleeping `pace` between consecutive chunks.
pub async fn deliver_all(
    sink: &(dyn ReportSink + Sync),
    chunks: &[Chunk],
    pace: Duration,
) -> Result<()> {
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 && !pace.is_zero() {
            tokio::time::sleep(pace).await;
        }
        debug!(index = i, chars = chunk.len(), "delivering chunk");
        sink.deliver(chunk)?;
    }
    Ok(())
}

/// Deliver any report outcome: informational outcomes as one message,
/// chunked ones via [`deliver_all`].
pub async fn deliver_outcome(
    sink: &(dyn ReportSink + Sync),
    outcome: &ReportOutcome,
    pace: Duration,
) -> Result<()> {
    match outcome {
        ReportOutcome::Chunks(chunks) => deliver_all(sink, chunks, pace).await,
        other => match other.message() {
            Some(message) => sink.notify(&message),
            None => Ok(()),
        },
    }
}
