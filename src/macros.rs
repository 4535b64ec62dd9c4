//! Shorthands for the logging methods of [`Logger`].
//!
//! Each macro takes a logger followed by any number of values, and expands to
//! the matching method call with every value borrowed as a
//! [`Loggable`] trait object.
//!
//! ```
//! use inklog::sink::{Capture, SinkSpec};
//! use inklog::Logger;
//!
//! let capture = Capture::new();
//! let logger = Logger::builder().sink(SinkSpec::new(capture.clone())).build();
//!
//! inklog::info!(logger, "connected", 42)?;
//! inklog::debug!(logger)?;
//! assert_eq!(capture.lines().len(), 2);
//! # Ok::<(), inklog::Error>(())
//! ```
//!
//! [`Logger`]: crate::Logger
//! [`Loggable`]: crate::value::Loggable

#[doc(hidden)]
#[macro_export]
macro_rules! __log_call {
    ($method:ident, $logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.$method(&[$(&$arg as &dyn $crate::value::Loggable),*])
    };
}

/// Logs at [`Severity::Emergency`](crate::Severity::Emergency).
#[macro_export]
macro_rules! emergency {
    ($($tt:tt)*) => { $crate::__log_call!(emergency, $($tt)*) };
}

/// Logs at [`Severity::Alert`](crate::Severity::Alert).
#[macro_export]
macro_rules! alert {
    ($($tt:tt)*) => { $crate::__log_call!(alert, $($tt)*) };
}

/// Logs at [`Severity::Critical`](crate::Severity::Critical).
#[macro_export]
macro_rules! critical {
    ($($tt:tt)*) => { $crate::__log_call!(critical, $($tt)*) };
}

/// Logs at [`Severity::Error`](crate::Severity::Error).
#[macro_export]
macro_rules! error {
    ($($tt:tt)*) => { $crate::__log_call!(error, $($tt)*) };
}

/// Logs at [`Severity::Warning`](crate::Severity::Warning).
#[macro_export]
macro_rules! warn {
    ($($tt:tt)*) => { $crate::__log_call!(warn, $($tt)*) };
}

/// Logs at [`Severity::Notice`](crate::Severity::Notice).
#[macro_export]
macro_rules! note {
    ($($tt:tt)*) => { $crate::__log_call!(note, $($tt)*) };
}

/// Logs at [`Severity::Info`](crate::Severity::Info).
#[macro_export]
macro_rules! info {
    ($($tt:tt)*) => { $crate::__log_call!(info, $($tt)*) };
}

/// Logs at [`Severity::Debug`](crate::Severity::Debug).
#[macro_export]
macro_rules! debug {
    ($($tt:tt)*) => { $crate::__log_call!(debug, $($tt)*) };
}

/// Logs at [`Severity::Debug`](crate::Severity::Debug), like
/// [`Logger::log`](crate::Logger::log).
#[macro_export]
macro_rules! log {
    ($($tt:tt)*) => { $crate::__log_call!(log, $($tt)*) };
}
