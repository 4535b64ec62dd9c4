//! Destinations for composed lines.
//!
//! A [`Sink`] accepts finished lines. Every [`MakeWriter`] is a sink, so
//! anything `tracing-subscriber` can write to can be used here as well, such
//! as [`std::io::stderr`] or a [`TestWriter`].
//!
//! A [`SinkSpec`] attaches per-sink options to a sink: whether it receives
//! the colored or the plain rendition of the line, and which severities it
//! accepts.
//!
//! [`TestWriter`]: tracing_subscriber::fmt::TestWriter
use crate::error::SinkError;
use crate::line::Line;
use crate::severity::Severity;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// A destination for log lines.
pub trait Sink: Send + Sync + 'static {
    /// Writes one complete line, line ending included.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that stopped the write. The logger reports it
    /// and goes on with the next sink.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<W> Sink for W
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.make_writer();
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }
}

/// A [`MakeWriter`] that writes to stdout.
///
/// This is the sink of a logger built without any.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeStdout;

/// A [`MakeWriter`] that writes to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeStderr;

impl<'a> MakeWriter<'a> for MakeStdout {
    type Writer = io::Stdout;

    fn make_writer(&'a self) -> Self::Writer {
        io::stdout()
    }
}

impl<'a> MakeWriter<'a> for MakeStderr {
    type Writer = io::Stderr;

    fn make_writer(&'a self) -> Self::Writer {
        io::stderr()
    }
}

/// A sink together with its options.
///
/// # Examples
///
/// ```
/// use inklog::sink::{Capture, SinkSpec};
/// use inklog::Severity;
///
/// let errors_only = SinkSpec::new(Capture::new())
///     .color(false)
///     .allow([Severity::Emergency, Severity::Alert, Severity::Critical, Severity::Error]);
///
/// assert!(errors_only.accepts(Severity::Critical));
/// assert!(!errors_only.accepts(Severity::Warning));
/// ```
pub struct SinkSpec {
    sink: Box<dyn Sink>,
    color: bool,
    allow: Option<Vec<Severity>>,
    block: Option<Vec<Severity>>,
}

impl SinkSpec {
    /// Wraps `sink`. It receives colored lines of every severity until
    /// configured otherwise.
    pub fn new(sink: impl Sink) -> Self {
        SinkSpec {
            sink: Box::new(sink),
            color: true,
            allow: None,
            block: None,
        }
    }

    /// Colored output to stdout.
    pub fn stdout() -> Self {
        SinkSpec::new(MakeStdout)
    }

    /// Sets whether the sink receives terminal styles.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Only lines of these severities reach the sink.
    pub fn allow(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.allow = Some(severities.into_iter().collect());
        self
    }

    /// Lines of these severities never reach the sink.
    pub fn block(mut self, severities: impl IntoIterator<Item = Severity>) -> Self {
        self.block = Some(severities.into_iter().collect());
        self
    }

    /// Returns `true` if a line of `severity` passes both the allow list and
    /// the block list.
    ///
    /// An absent list places no restriction, while an empty allow list
    /// accepts nothing.
    pub fn accepts(&self, severity: Severity) -> bool {
        let allowed = self
            .allow
            .as_ref()
            .map_or(true, |allow| allow.contains(&severity));
        let blocked = self
            .block
            .as_ref()
            .map_or(false, |block| block.contains(&severity));
        allowed && !blocked
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }
}

impl fmt::Debug for SinkSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SinkSpec")
            .field("color", &self.color)
            .field("allow", &self.allow)
            .field("block", &self.block)
            .finish_non_exhaustive()
    }
}

/// Writes `line` to every sink accepting `severity`, in order.
///
/// A failing sink doesn't stop the others. The failures are returned.
pub(crate) fn route(sinks: &[SinkSpec], severity: Severity, line: &Line) -> Vec<SinkError> {
    let mut errors = Vec::new();

    for (index, spec) in sinks.iter().enumerate() {
        if !spec.accepts(severity) {
            tracing::trace!(sink = index, %severity, "filtered out by sink");
            continue;
        }

        if let Err(err) = spec.sink.write_line(line.rendition(spec.color)) {
            tracing::warn!(sink = index, error = %err, "sink failed to accept a line");
            errors.push(SinkError::new(index, err));
        }
    }

    errors
}

/// A sink keeping every line in memory.
///
/// Clones share the same storage, so one clone can be handed to a logger and
/// another one inspected afterwards.
///
/// ```
/// use inklog::sink::{Capture, SinkSpec};
/// use inklog::Logger;
///
/// let capture = Capture::new();
/// let logger = Logger::builder()
///     .sink(SinkSpec::new(capture.clone()).color(false))
///     .log_line(false)
///     .build();
///
/// logger.info(&[&"ready"])?;
/// assert!(capture.lines()[0].ends_with("[info] ready\n"));
/// # Ok::<(), inklog::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Capture {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Capture {
    pub fn new() -> Self {
        Capture::default()
    }

    /// Returns a copy of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Removes and returns the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The writer of a [`Capture`]. Everything written is stored as one line
/// when the writer is dropped.
#[derive(Debug)]
pub struct CaptureWriter {
    lines: Arc<Mutex<Vec<String>>>,
    buf: Vec<u8>,
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for CaptureWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            lines: Arc::clone(&self.lines),
            buf: Vec::new(),
        }
    }
}
