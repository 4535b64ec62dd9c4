//! Composing the final log line.
//!
//! Every line has the shape
//!
//! ```txt
//! <timestamp> [<tag>( | <call site>)( | <name>)] <payload><line ending>
//! ```
//!
//! where the timestamp is dimmed and the tag carries the style of its
//! [`Severity`]. [`compose`] builds the colored form, and the plain form is
//! the same text with every terminal style removed.
use crate::config::Config;
use crate::printer::highlight::{self, RESET};
use crate::severity::Severity;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::panic::Location;

/// Style of the timestamp.
pub const DIM: &str = "\x1b[2m";

/// A source of timestamps.
///
/// Implemented for [`SystemClock`] and for every `Fn() -> DateTime<Utc>`, so
/// tests can pin the time:
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use inklog::line::Clock;
///
/// let clock = || Utc.with_ymd_and_hms(2022, 3, 24, 16, 8, 17).unwrap();
/// assert_eq!(clock.now().timestamp(), 1648138097);
/// ```
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Where a log call was made, printed as `<file name>:<line>:<column>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    location: &'static Location<'static>,
}

impl CallSite {
    /// Returns the location of the caller.
    ///
    /// Functions up the stack marked with `#[track_caller]` are skipped, so
    /// the logging methods resolve to the code that called them.
    #[track_caller]
    pub fn caller() -> Self {
        CallSite {
            location: Location::caller(),
        }
    }

    /// The last component of the source file path.
    pub fn file_name(&self) -> &'static str {
        let file = self.location.file();
        file.rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(file)
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    pub fn column(&self) -> u32 {
        self.location.column()
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name(), self.line(), self.column())
    }
}

/// A composed log line, in both renditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    colored: String,
    plain: String,
}

impl Line {
    /// The line including terminal styles.
    pub fn colored(&self) -> &str {
        &self.colored
    }

    /// The line with every terminal style removed.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Returns the rendition a sink asked for.
    pub fn rendition(&self, color: bool) -> &str {
        if color {
            &self.colored
        } else {
            &self.plain
        }
    }
}

/// Formats a timestamp as ISO-8601 in UTC with millisecond precision.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds the line for one log call.
///
/// The call site is only printed when `config.log_line` is set, and the
/// logger name only when it is not empty.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use inklog::config::Config;
/// use inklog::line::compose;
/// use inklog::Severity;
///
/// let config = Config { log_line: false, name: "db".to_owned(), ..Config::default() };
/// let at = Utc.with_ymd_and_hms(2022, 3, 24, 16, 8, 17).unwrap();
/// let line = compose(Severity::Warning, &config, "slow query", at, None);
///
/// assert_eq!(line.plain(), "2022-03-24T16:08:17.000Z [warn | db] slow query\n");
/// ```
pub fn compose(
    severity: Severity,
    config: &Config,
    payload: &str,
    timestamp: DateTime<Utc>,
    call_site: Option<CallSite>,
) -> Line {
    let mut colored = String::with_capacity(payload.len() + 64);

    colored.push_str(DIM);
    colored.push_str(&format_timestamp(timestamp));
    colored.push_str(RESET);

    colored.push_str(" [");
    colored.push_str(severity.style());
    colored.push_str(severity.tag());
    colored.push_str(RESET);

    if config.log_line {
        if let Some(call_site) = call_site {
            colored.push_str(" | ");
            colored.push_str(&call_site.to_string());
        }
    }

    if !config.name.is_empty() {
        colored.push_str(" | ");
        colored.push_str(&config.name);
    }

    colored.push_str("] ");
    colored.push_str(payload);
    colored.push_str(config.line_ending.as_str());

    let plain = highlight::strip(&colored).into_owned();
    Line { colored, plain }
}
