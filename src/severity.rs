//! Message severities.
//!
//! Severities follow the syslog levels of [RFC 5424], ordered from most
//! severe ([`Severity::Emergency`]) to least severe ([`Severity::Debug`]).
//! The derived ordering matches this: `Emergency < Alert < ... < Debug`, so a
//! message passes a minimum severity when it compares less than or equal to it.
//!
//! [RFC 5424]: https://datatracker.ietf.org/doc/html/rfc5424#section-6.2.1
use crate::cfg_serde;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// The severity of a log message.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// System is unstable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Error conditions.
    Error,
    /// Warning conditions.
    Warning,
    /// Normal, but significant conditions.
    Notice,
    /// Informational messages.
    Info,
    /// Debug messages.
    Debug,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Returns the rank of the severity, where `0` is the most severe.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns `true` if a message of this severity should be emitted by a
    /// logger configured with `min` as its minimum severity.
    ///
    /// # Examples
    ///
    /// ```
    /// use inklog::Severity;
    ///
    /// assert!(Severity::Error.passes(Severity::Warning));
    /// assert!(Severity::Warning.passes(Severity::Warning));
    /// assert!(!Severity::Debug.passes(Severity::Warning));
    /// ```
    pub const fn passes(self, min: Severity) -> bool {
        self.rank() <= min.rank()
    }

    /// Returns the short tag printed inside the brackets of a log line.
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Emergency => "emer",
            Severity::Alert => "alert",
            Severity::Critical => "crit",
            Severity::Error => "err",
            Severity::Warning => "warn",
            Severity::Notice => "note",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Returns the terminal style that precedes the tag in colored output.
    ///
    /// Informational messages are printed without a style.
    pub const fn style(self) -> &'static str {
        match self {
            Severity::Emergency => "\x1b[1;5;30;41m",
            Severity::Alert => "\x1b[1;30;41m",
            Severity::Critical => "\x1b[1;31m",
            Severity::Error => "\x1b[31m",
            Severity::Warning => "\x1b[33m",
            Severity::Notice => "\x1b[34m",
            Severity::Info => "",
            Severity::Debug => "\x1b[22m",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// Error returned when parsing a [`Severity`] from a string fails.
#[derive(Debug)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown severity `{}`", self.0)
    }
}

impl Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses either the short tag (`"crit"`) or the full name
    /// (`"critical"`), ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .iter()
            .copied()
            .find(|severity| {
                s.eq_ignore_ascii_case(severity.tag()) || s.eq_ignore_ascii_case(severity.name())
            })
            .ok_or_else(|| ParseSeverityError(s.to_owned()))
    }
}

cfg_serde! {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::{Serialize, Serializer};

    impl Serialize for Severity {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.tag())
        }
    }

    impl<'de> Deserialize<'de> for Severity {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Severity;

    #[test]
    fn ordering_is_most_severe_first() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() + 1 == pair[1].rank());
        }
    }

    #[test]
    fn emergency_minimum_only_passes_emergency() {
        for severity in Severity::ALL.iter().copied() {
            assert_eq!(
                severity.passes(Severity::Emergency),
                severity == Severity::Emergency
            );
        }
    }

    #[test]
    fn debug_minimum_passes_everything() {
        assert!(Severity::ALL.iter().all(|s| s.passes(Severity::Debug)));
    }

    #[test]
    fn parse_accepts_tags_and_names() {
        assert_eq!("emer".parse::<Severity>().ok(), Some(Severity::Emergency));
        assert_eq!("Emergency".parse::<Severity>().ok(), Some(Severity::Emergency));
        assert_eq!("WARN".parse::<Severity>().ok(), Some(Severity::Warning));
        assert_eq!("notice".parse::<Severity>().ok(), Some(Severity::Notice));
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn display_is_the_tag() {
        assert_eq!(Severity::Critical.to_string(), "crit");
        assert_eq!(format!("{:<6}|", Severity::Error),"err   |");
    }
}
