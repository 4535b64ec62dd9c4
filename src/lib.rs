//! Render arbitrary values into highlighted, human-readable log lines.
//!
//! # Overview
//!
//! A [`Logger`] takes any number of values per call, prints them into a
//! JSON-like text, and writes one line per call to each of its sinks:
//!
//! ```log
//! 2022-03-24T16:08:17.761Z [warn | main.rs:12:5 | db] retrying | { "attempt": 2 }
//! ```
//!
//! Values are converted into the closed [`Value`] model through the
//! [`Loggable`] trait. Records and sequences are shared handles, so values may
//! contain themselves. When a shared value is reached again deeper than where
//! it was first seen, it is printed as `[circular reference]` instead of being
//! expanded.
//!
//! Colored output is styled for terminals. Sinks that don't want styles
//! receive the same line with every style removed.
//!
//! # Getting started
//!
//! ```
//! use inklog::config::Indent;
//! use inklog::sink::{Capture, SinkSpec};
//! use inklog::value::Record;
//! use inklog::{Logger, Severity};
//!
//! let capture = Capture::new();
//! let logger = Logger::builder()
//!     .name("db")
//!     .indent(Indent::Spaces(2))
//!     .sink(SinkSpec::new(capture.clone()).color(false))
//!     .sink(SinkSpec::stdout().allow([Severity::Emergency, Severity::Alert]))
//!     .build();
//!
//! let request = Record::new();
//! request.insert("path", "/health");
//! request.insert("status", 200);
//! logger.info(&[&request])?;
//!
//! let line = &capture.lines()[0];
//! assert!(line.ends_with("{\n  \"path\": \"/health\",\n  \"status\": 200\n}\n"));
//! # Ok::<(), inklog::Error>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: serde support for the configuration types, and [`value::Serde`]
//!   to log any `Serialize` type.
//! * `json`: conversions from `serde_json::Value`.
//! * `full`: all of the above.
//!
//! # Diagnostics
//!
//! The crate reports its own failures through [`tracing`]: a failing sink
//! emits a `WARN` event, a call suppressed by the minimum severity a `TRACE`
//! event, and an argument that can't be converted a `DEBUG` event. No
//! subscriber is installed.

#[macro_use]
mod cfg;
mod macros;

pub mod config;
pub mod error;
pub mod line;
pub mod printer;
pub mod severity;
pub mod sink;
pub mod tracker;
pub mod value;

mod logger;

pub use config::{Config, ConfigOverride};
pub use error::{Error, SinkError, UnclassifiableError};
pub use logger::{global, init_global, Logger, LoggerBuilder};
pub use severity::Severity;
pub use value::{Loggable, Value};
