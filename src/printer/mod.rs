//! Printing values into text fragments.
//!
//! [`format_args`] prints the argument list of one log call, and [`Pretty`]
//! prints a single value. Sequences and records are printed in a JSON-like
//! layout, then passed through the [`highlight`] pass.
//!
//! # Examples
//!
//! ```
//! use inklog::config::Config;
//! use inklog::printer::Pretty;
//! use inklog::value::{Record, Value};
//!
//! let record = Record::new();
//! record.insert("id", 7);
//! record.insert("tags", vec!["a", "b"]);
//!
//! let text = Pretty::new(&Config::default()).print(&Value::Record(record));
//! assert_eq!(text, "{\n\t\"id\": 7,\n\t\"tags\": [\n\t\t\"a\",\n\t\t\"b\"\n\t]\n}");
//! ```
use crate::config::{Config, Indent};
use crate::tracker::ReferenceTracker;
use crate::value::{Callable, Record, Sequence, Value};
use std::fmt::{self, Write};

pub mod highlight;

/// Printed in place of a shared value that was already visited at a
/// shallower depth.
pub const CIRCULAR: &str = "[circular reference]";

/// Separates the arguments of a call with more than one argument.
pub const ARGUMENT_DELIMITER: &str = " | ";

/// Prints the arguments of one log call.
///
/// * No arguments print nothing.
/// * A single argument is printed following `config.multiline`.
/// * Several arguments are each printed on a single line, independently of
///   one another, and joined with [`ARGUMENT_DELIMITER`].
///
/// Sequences and records are highlighted.
pub fn format_args(values: &[Value], config: &Config) -> String {
    match values {
        [] => String::new(),
        [value] => format_arg(value, Pretty::new(config)),
        _ => values
            .iter()
            .map(|value| format_arg(value, Pretty::new(config).multiline(false)))
            .collect::<Vec<_>>()
            .join(ARGUMENT_DELIMITER),
    }
}

fn format_arg(value: &Value, pretty: Pretty) -> String {
    let text = pretty.print(value);
    if value.is_container() {
        highlight::highlight(&text)
    } else {
        text
    }
}

/// Prints a single value into plain text.
///
/// Each call to [`Pretty::print`] uses its own [`ReferenceTracker`], so
/// shared values are only compared against other parts of the same value.
#[derive(Debug, Clone, Copy)]
pub struct Pretty {
    indent: Indent,
    decimal_digits: usize,
    multiline: bool,
}

impl Pretty {
    /// Returns a printer using the layout settings of `config`.
    pub fn new(config: &Config) -> Self {
        Pretty {
            indent: config.indent,
            decimal_digits: config.decimal_digits,
            multiline: config.multiline,
        }
    }

    /// Sets whether sequences and records span multiple lines.
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Prints `value` as a top-level value.
    pub fn print(&self, value: &Value) -> String {
        let mut writer = String::with_capacity(64);
        let mut tracker = ReferenceTracker::new();
        // Writing into a `String` cannot fail.
        let _ = self.format_value(value, 0, &mut tracker, &mut writer);
        writer
    }

    fn format_value(
        &self,
        value: &Value,
        depth: usize,
        tracker: &mut ReferenceTracker,
        writer: &mut String,
    ) -> fmt::Result {
        match value {
            Value::Undefined => writer.write_str("undefined"),
            Value::Null => writer.write_str("null"),
            Value::Boolean(b) => write!(writer, "{}", b),
            Value::Integer(i) => write!(writer, "{}", i),
            Value::Float(x) => self.format_float(*x, writer),
            Value::BigInt(i) => write!(writer, "{}", i),
            Value::String(s) if depth == 0 => writer.write_str(s),
            Value::String(s) => write!(writer, "\"{}\"", s),
            Value::Symbol(description) => write!(writer, "Symbol({})", description),
            Value::Callable(callable) => self.format_callable(callable, depth, tracker, writer),
            Value::Sequence(sequence) => self.format_sequence(sequence, depth, tracker, writer),
            Value::Record(record) => self.format_record(record, depth, tracker, writer),
        }
    }

    fn format_float(&self, x: f64, writer: &mut String) -> fmt::Result {
        if x.is_nan() {
            writer.write_str("NaN")
        } else if x.is_infinite() {
            writer.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" })
        } else if x == 0.0 {
            writer.write_char('0')
        } else if x.fract() == 0.0 {
            write!(writer, "{:.0}", x)
        } else {
            write!(writer, "{:.*}", self.decimal_digits, x)
        }
    }

    fn format_callable(
        &self,
        callable: &Callable,
        depth: usize,
        tracker: &mut ReferenceTracker,
        writer: &mut String,
    ) -> fmt::Result {
        if tracker.should_mark_circular(callable.reference(), depth) {
            return writer.write_str(CIRCULAR);
        }

        let kind = if callable.is_class() { "Class" } else { "Function" };
        let name = match callable.name() {
            "" => "(anonymous)",
            name => name,
        };
        write!(writer, "[{} {}]", kind, name)
    }

    fn format_sequence(
        &self,
        sequence: &Sequence,
        depth: usize,
        tracker: &mut ReferenceTracker,
        writer: &mut String,
    ) -> fmt::Result {
        if tracker.should_mark_circular(sequence.reference(), depth) {
            return writer.write_str(CIRCULAR);
        }

        let items = sequence.items();
        if items.is_empty() {
            return writer.write_str("[ ]");
        }

        writer.write_char('[')?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                writer.write_char(',')?;
            }
            self.format_break(depth + 1, writer);
            self.format_value(item, depth + 1, tracker, writer)?;
        }
        self.format_break(depth, writer);
        writer.write_char(']')
    }

    fn format_record(
        &self,
        record: &Record,
        depth: usize,
        tracker: &mut ReferenceTracker,
        writer: &mut String,
    ) -> fmt::Result {
        if tracker.should_mark_circular(record.reference(), depth) {
            return writer.write_str(CIRCULAR);
        }

        if let Some(type_name) = record.type_name() {
            writer.write_str(type_name)?;
            self.indent.write_to(1, writer);
        }

        let fields = record.fields();
        if fields.is_empty() {
            return writer.write_str("{ }");
        }

        writer.write_char('{')?;
        for (i, (key, value)) in fields.iter().enumerate() {
            if i > 0 {
                writer.write_char(',')?;
            }
            self.format_break(depth + 1, writer);
            write!(writer, "\"{}\": ", key)?;
            self.format_value(value, depth + 1, tracker, writer)?;
        }
        self.format_break(depth, writer);
        writer.write_char('}')
    }

    /// Separates the items of a container: a new line indented to `depth`,
    /// or a single indentation unit when printing inline.
    fn format_break(&self, depth: usize, writer: &mut String) {
        if self.multiline {
            writer.push('\n');
            self.indent.write_to(depth, writer);
        } else {
            self.indent.write_to(1, writer);
        }
    }
}
