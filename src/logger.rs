//! The logger and its builder.
use crate::config::{Config, ConfigOverride, Indent, LineEnding};
use crate::error::Error;
use crate::line::{self, CallSite, Clock, SystemClock};
use crate::printer;
use crate::severity::Severity;
use crate::sink::{self, SinkSpec};
use crate::value::{Loggable, Value};
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Renders values into log lines and writes them to its sinks.
///
/// There is one method per [`Severity`], plus [`Logger::log`] which logs at
/// [`Severity::Debug`]. Each takes the values to log and returns once every
/// sink accepting the line was written to.
///
/// # Examples
///
/// ```
/// use inklog::sink::{Capture, SinkSpec};
/// use inklog::value::Record;
/// use inklog::Logger;
///
/// let capture = Capture::new();
/// let logger = Logger::builder()
///     .name("db")
///     .log_line(false)
///     .sink(SinkSpec::new(capture.clone()).color(false))
///     .build();
///
/// let record = Record::new();
/// record.insert("port", 5432);
/// logger.warn(&[&"listening on", &record])?;
///
/// let lines = capture.take();
/// assert!(lines[0].ends_with("[warn | db] listening on | {\t\"port\": 5432\t}\n"));
/// # Ok::<(), inklog::Error>(())
/// ```
pub struct Logger {
    config: Config,
    next: Mutex<ConfigOverride>,
    sinks: Vec<SinkSpec>,
    clock: Box<dyn Clock>,
}

impl Logger {
    /// Returns a logger with the default [`Config`], writing colored lines to
    /// stdout.
    pub fn new() -> Self {
        Logger::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// The persistent configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sinks(&self) -> &[SinkSpec] {
        &self.sinks
    }

    /// Replaces some settings for the next log call only.
    ///
    /// The override is consumed by the next call, even when that call is
    /// suppressed by the minimum severity or fails. Setting it twice before a
    /// call keeps only the latest one.
    ///
    /// ```
    /// use inklog::config::ConfigOverride;
    /// use inklog::sink::{Capture, SinkSpec};
    /// use inklog::{Logger, Severity};
    ///
    /// let capture = Capture::new();
    /// let logger = Logger::builder().sink(SinkSpec::new(capture.clone())).build();
    ///
    /// logger.override_config(ConfigOverride::new().min_level(Severity::Emergency));
    /// logger.info(&[&"dropped"])?;
    /// logger.info(&[&"written"])?;
    ///
    /// assert_eq!(capture.lines().len(), 1);
    /// # Ok::<(), inklog::Error>(())
    /// ```
    pub fn override_config(&self, overrides: ConfigOverride) {
        *self.next.lock().unwrap_or_else(PoisonError::into_inner) = overrides;
    }

    #[track_caller]
    pub fn emergency(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Emergency, args, CallSite::caller())
    }

    #[track_caller]
    pub fn alert(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Alert, args, CallSite::caller())
    }

    #[track_caller]
    pub fn critical(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Critical, args, CallSite::caller())
    }

    #[track_caller]
    pub fn error(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Error, args, CallSite::caller())
    }

    #[track_caller]
    pub fn warn(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Warning, args, CallSite::caller())
    }

    #[track_caller]
    pub fn note(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Notice, args, CallSite::caller())
    }

    #[track_caller]
    pub fn info(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Info, args, CallSite::caller())
    }

    #[track_caller]
    pub fn debug(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Debug, args, CallSite::caller())
    }

    /// Logs at [`Severity::Debug`].
    #[track_caller]
    pub fn log(&self, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(Severity::Debug, args, CallSite::caller())
    }

    /// Logs at the given severity.
    #[track_caller]
    pub fn log_at(&self, severity: Severity, args: &[&dyn Loggable]) -> Result<(), Error> {
        self.write(severity, args, CallSite::caller())
    }

    fn write(
        &self,
        severity: Severity,
        args: &[&dyn Loggable],
        call_site: CallSite,
    ) -> Result<(), Error> {
        let overrides = std::mem::take(&mut *self.next.lock().unwrap_or_else(PoisonError::into_inner));
        let config = if overrides.is_empty() {
            self.config.clone()
        } else {
            self.config.merged(&overrides)
        };

        if !severity.passes(config.min_level) {
            tracing::trace!(%severity, min_level = %config.min_level, "suppressed by minimum severity");
            return Ok(());
        }

        let values = args
            .iter()
            .map(|arg| arg.to_value())
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|err| {
                tracing::debug!(%severity, error = %err, "argument has no value representation");
                err
            })?;

        let payload = printer::format_args(&values, &config);
        let line = line::compose(
            severity,
            &config,
            &payload,
            self.clock.now(),
            Some(call_site),
        );

        let errors = sink::route(&self.sinks, severity, &line);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Sinks(errors))
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("sinks", &self.sinks)
            .finish_non_exhaustive()
    }
}

/// Builds a [`Logger`].
///
/// Sinks are written to in the order they are added. A logger built without
/// any sink writes colored lines to stdout.
#[derive(Default)]
pub struct LoggerBuilder {
    config: Config,
    sinks: Vec<SinkSpec>,
    clock: Option<Box<dyn Clock>>,
}

impl LoggerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn min_level(mut self, min_level: Severity) -> Self {
        self.config.min_level = min_level;
        self
    }

    pub fn log_line(mut self, log_line: bool) -> Self {
        self.config.log_line = log_line;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn decimal_digits(mut self, decimal_digits: usize) -> Self {
        self.config.decimal_digits = decimal_digits;
        self
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.config.multiline = multiline;
        self
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.config.indent = indent;
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.config.line_ending = line_ending;
        self
    }

    /// Adds a sink.
    pub fn sink(mut self, sink: SinkSpec) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Sets the source of timestamps. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> Logger {
        let sinks = if self.sinks.is_empty() {
            vec![SinkSpec::stdout()]
        } else {
            self.sinks
        };

        Logger {
            config: self.config,
            next: Mutex::new(ConfigOverride::default()),
            sinks,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        }
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("config", &self.config)
            .field("sinks", &self.sinks)
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Installs `logger` as the process-wide logger.
///
/// # Errors
///
/// Returns `logger` back if a logger was already installed.
pub fn init_global(logger: Logger) -> Result<(), Logger> {
    GLOBAL.set(logger)
}

/// Returns the process-wide logger, if one was installed with
/// [`init_global`].
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}
