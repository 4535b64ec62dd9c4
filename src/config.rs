//! Logger configuration.
//!
//! A [`Logger`] holds a persistent [`Config`]. A [`ConfigOverride`] can be set
//! on the logger to replace some of those settings for exactly one call; the
//! two are merged with [`Config::merged`] at the start of the call.
//!
//! With the `serde` feature, both types can be loaded with any serde format.
//! Missing fields in a `Config` fall back to their defaults.
//!
//! [`Logger`]: crate::Logger
use crate::severity::Severity;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The indentation unit used when printing nested values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Indent {
    /// One tab per level.
    Tabs,
    /// The given number of spaces per level.
    Spaces(usize),
}

impl Indent {
    /// Appends `depth` indentation units to `writer`.
    pub(crate) fn write_to(self, depth: usize, writer: &mut String) {
        for _ in 0..depth {
            match self {
                Indent::Tabs => writer.push('\t'),
                Indent::Spaces(n) => writer.extend(std::iter::repeat(' ').take(n)),
            }
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Tabs
    }
}

/// The sequence terminating every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        LineEnding::Lf
    }
}

/// Persistent logger settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The least severe severity that is still written.
    pub min_level: Severity,
    /// Whether to print where the log call was made.
    pub log_line: bool,
    /// The name of the logger. Printed when not empty.
    pub name: String,
    /// The number of digits printed after the decimal point of non-integral
    /// numbers.
    pub decimal_digits: usize,
    /// Whether sequences and records span multiple lines. Calls with more
    /// than one argument are always printed on a single line.
    pub multiline: bool,
    pub indent: Indent,
    pub line_ending: LineEnding,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_level: Severity::Debug,
            log_line: true,
            name: String::new(),
            decimal_digits: 3,
            multiline: true,
            indent: Indent::Tabs,
            line_ending: LineEnding::Lf,
        }
    }
}

impl Config {
    /// Returns a copy of `self` with every field present in `overrides`
    /// replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use inklog::config::{Config, ConfigOverride};
    /// use inklog::Severity;
    ///
    /// let base = Config::default();
    /// let merged = base.merged(&ConfigOverride::new().min_level(Severity::Error));
    ///
    /// assert_eq!(merged.min_level, Severity::Error);
    /// assert_eq!(merged.decimal_digits, base.decimal_digits);
    /// ```
    pub fn merged(&self, overrides: &ConfigOverride) -> Config {
        Config {
            min_level: overrides.min_level.unwrap_or(self.min_level),
            log_line: overrides.log_line.unwrap_or(self.log_line),
            name: overrides.name.as_ref().unwrap_or(&self.name).clone(),
            decimal_digits: overrides.decimal_digits.unwrap_or(self.decimal_digits),
            multiline: overrides.multiline.unwrap_or(self.multiline),
            indent: overrides.indent.unwrap_or(self.indent),
            line_ending: overrides.line_ending.unwrap_or(self.line_ending),
        }
    }
}

/// A partial [`Config`] applied to a single log call.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfigOverride {
    pub min_level: Option<Severity>,
    pub log_line: Option<bool>,
    pub name: Option<String>,
    pub decimal_digits: Option<usize>,
    pub multiline: Option<bool>,
    pub indent: Option<Indent>,
    pub line_ending: Option<LineEnding>,
}

impl ConfigOverride {
    /// Returns an override that changes nothing.
    pub fn new() -> Self {
        ConfigOverride::default()
    }

    pub fn min_level(mut self, min_level: Severity) -> Self {
        self.min_level = Some(min_level);
        self
    }

    pub fn log_line(mut self, log_line: bool) -> Self {
        self.log_line = Some(log_line);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn decimal_digits(mut self, decimal_digits: usize) -> Self {
        self.decimal_digits = Some(decimal_digits);
        self
    }

    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = Some(multiline);
        self
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = Some(line_ending);
        self
    }

    /// Returns `true` if no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == ConfigOverride::default()
    }
}
