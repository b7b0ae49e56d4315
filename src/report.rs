//! Line protocol written to the monitoring consumer.
//!
//! Every line starts with [`TAG`] and is flushed immediately so a parent
//! process reading a pipe sees events as they happen.

use std::io::Write;

use crate::util::SentinelResult;

/// Prefix of every protocol line.
pub const TAG: &str = "[sentinel]";

/// Writes protocol lines to `W`.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, body: std::fmt::Arguments<'_>) -> SentinelResult<()> {
        writeln!(self.out, "{TAG} {body}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Emitted once before the first frame is read.
    pub fn starting(&mut self) -> SentinelResult<()> {
        self.line(format_args!("system starting"))
    }

    /// Throughput heartbeat, two decimals.
    pub fn heartbeat(&mut self, fps: f64) -> SentinelResult<()> {
        self.line(format_args!("run fps={fps:.2}"))
    }

    /// One line per trigger.
    pub fn died(&mut self) -> SentinelResult<()> {
        self.line(format_args!("died"))
    }

    /// Emitted once after the stream ends normally.
    pub fn stream_ended(&mut self) -> SentinelResult<()> {
        self.line(format_args!("stream ended"))
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
