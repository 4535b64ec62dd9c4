//! Errors reported by log calls.
use std::error;
use std::fmt;
use std::io;

/// Error returned when a value passed to a log call has no [`Value`]
/// representation.
///
/// [`Value`]: crate::value::Value
#[derive(Debug)]
pub struct UnclassifiableError {
    reason: String,
}

impl UnclassifiableError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        UnclassifiableError {
            reason: reason.into(),
        }
    }

    /// Returns why the value couldn't be classified.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for UnclassifiableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cannot log value: {}", self.reason)
    }
}

impl error::Error for UnclassifiableError {}

/// Error returned when a sink fails to accept a line.
///
/// The remaining sinks still receive the line.
#[derive(Debug)]
pub struct SinkError {
    index: usize,
    source: io::Error,
}

impl SinkError {
    pub(crate) fn new(index: usize, source: io::Error) -> Self {
        SinkError { index, source }
    }

    /// Returns the position of the failed sink, in registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Writing to sink #{} failed", self.index)
    }
}

impl error::Error for SinkError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Error returned by log calls.
#[derive(Debug)]
pub enum Error {
    /// One of the arguments couldn't be converted. Nothing was written.
    Unclassifiable(UnclassifiableError),
    /// Some sinks failed. Every other passing sink received the line.
    Sinks(Vec<SinkError>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unclassifiable(err) => err.fmt(f),
            Error::Sinks(errors) => {
                f.write_str("Failed to write to ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "sink #{}", err.index)?;
                }
                Ok(())
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Unclassifiable(err) => Some(err),
            Error::Sinks(errors) => errors.first().map(|err| err as &(dyn error::Error + 'static)),
        }
    }
}

impl From<UnclassifiableError> for Error {
    fn from(err: UnclassifiableError) -> Self {
        Error::Unclassifiable(err)
    }
}
