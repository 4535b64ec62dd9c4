//! The closed universe of loggable values.
//!
//! Everything a log call prints is first converted into a [`Value`] through
//! the [`Loggable`] trait. Containers and callables are shared handles: cloning
//! a [`Record`], [`Sequence`] or [`Callable`] yields another handle to the same
//! underlying value, and the handles compare by [`Reference`]. This is what
//! allows values to form cycles and reconverging graphs, which the printer
//! detects while traversing.
//!
//! # Examples
//!
//! Building a record that contains itself:
//! ```
//! use inklog::value::{Record, Value};
//!
//! let node = Record::new();
//! node.insert("id", 1);
//! node.insert("me", node.clone());
//!
//! assert_eq!(node.len(), 2);
//! assert!(matches!(node.get("me"), Some(Value::Record(inner)) if inner.reference() == node.reference()));
//! ```
//!
//! Handles are reference counted, so a value that contains itself is never
//! freed on its own. Call [`Record::clear`] or [`Sequence::clear`] to break a
//! cycle once it is no longer needed.
use crate::error::UnclassifiableError;
use crate::{cfg_json, cfg_serde};
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::convert::TryFrom;
use std::fmt;
use std::iter::FromIterator;
use std::rc::Rc;

cfg_serde! {
    mod ser;
    pub use ser::{to_value, Serde};
}

/// A value that can be printed by a logger.
#[derive(Clone)]
pub enum Value {
    /// The absence of a value, printed as `undefined`.
    Undefined,
    /// An explicit empty value, printed as `null`.
    Null,
    Boolean(bool),
    Integer(i64),
    /// Printed in fixed-point notation unless it holds an integral value.
    Float(f64),
    /// An integer too wide for [`Value::Integer`].
    BigInt(i128),
    /// Printed bare at the top level of a single-value call, and quoted when
    /// nested.
    String(String),
    /// An opaque token, printed as `Symbol(<description>)`.
    Symbol(String),
    Callable(Callable),
    Sequence(Sequence),
    Record(Record),
}

/// The identity of a shared value.
///
/// A `Reference` is a plain address and never keeps the value alive. It is
/// only meaningful while the value it was taken from is.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Reference(usize);

impl Reference {
    fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Reference(Rc::as_ptr(rc) as *const () as usize)
    }
}

/// A named function or class.
///
/// Names starting with an uppercase letter are treated as classes.
#[derive(Clone)]
pub struct Callable {
    name: Rc<str>,
}

impl Callable {
    pub fn new(name: &str) -> Self {
        Callable {
            name: Rc::from(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the name starts with an uppercase letter.
    pub fn is_class(&self) -> bool {
        self.name.chars().next().map_or(false, char::is_uppercase)
    }

    pub fn reference(&self) -> Reference {
        Reference::of(&self.name)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name())
            .finish()
    }
}

/// An ordered, indexable container.
#[derive(Clone, Default)]
pub struct Sequence {
    items: Rc<RefCell<Vec<Value>>>,
}

impl Sequence {
    pub fn new() -> Self {
        Sequence::default()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.items.borrow_mut().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Removes every element, breaking any cycle running through this
    /// sequence.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    /// Borrows the elements.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is currently being modified.
    pub fn items(&self) -> Ref<'_, [Value]> {
        Ref::map(self.items.borrow(), Vec::as_slice)
    }

    pub fn reference(&self) -> Reference {
        Reference::of(&self.items)
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Sequence {
            items: Rc::new(RefCell::new(iter.into_iter().map(Into::into).collect())),
        }
    }
}

impl fmt::Debug for Sequence {
    // Elements are left out, they may lead back to this sequence.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

struct RecordData {
    type_name: Option<String>,
    fields: RefCell<Vec<(String, Value)>>,
}

/// A container of named fields, kept in insertion order.
///
/// A record may report a type name, which is printed in front of its fields.
#[derive(Clone)]
pub struct Record {
    data: Rc<RecordData>,
}

impl Record {
    /// Creates an empty record without a type name.
    pub fn new() -> Self {
        Record::with_type_name(None)
    }

    /// Creates an empty record that reports `type_name`.
    pub fn typed(type_name: &str) -> Self {
        Record::with_type_name(Some(type_name.to_owned()))
    }

    fn with_type_name(type_name: Option<String>) -> Self {
        Record {
            data: Rc::new(RecordData {
                type_name,
                fields: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        self.data.type_name.as_deref()
    }

    /// Sets a field, returning the previous value if the key was present.
    ///
    /// Replacing a field keeps its original position.
    pub fn insert(&self, key: &str, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        let mut fields = self.data.fields.borrow_mut();
        match fields.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                fields.push((key.to_owned(), value));
                None
            }
        }
    }

    /// Returns a copy of the field's value. Shared values stay shared.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data
            .fields
            .borrow()
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.clone())
    }

    pub fn len(&self) -> usize {
        self.data.fields.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.fields.borrow().is_empty()
    }

    /// Removes every field, breaking any cycle running through this record.
    pub fn clear(&self) {
        self.data.fields.borrow_mut().clear();
    }

    /// Borrows the fields in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the record is currently being modified.
    pub fn fields(&self) -> Ref<'_, [(String, Value)]> {
        Ref::map(self.data.fields.borrow(), Vec::as_slice)
    }

    pub fn reference(&self) -> Reference {
        Reference::of(&self.data)
    }
}

impl Default for Record {
    fn default() -> Self {
        Record::new()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let record = Record::new();
        for (key, value) in iter {
            record.insert(&key.into(), value);
        }
        record
    }
}

impl fmt::Debug for Record {
    // Fields are left out, they may lead back to this record.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("type_name", &self.type_name())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Returns the identity of the value if it is shared.
    pub fn reference(&self) -> Option<Reference> {
        match self {
            Value::Callable(callable) => Some(callable.reference()),
            Value::Sequence(sequence) => Some(sequence.reference()),
            Value::Record(record) => Some(record.reference()),
            _ => None,
        }
    }

    /// Returns `true` for sequences and records.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Record(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::BigInt(i) => f.debug_tuple("BigInt").field(i).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Symbol(s) => f.debug_tuple("Symbol").field(s).finish(),
            Value::Callable(c) => c.fmt(f),
            Value::Sequence(s) => s.fmt(f),
            Value::Record(r) => r.fmt(f),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! from_lossless_int {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(i: $ty) -> Self {
                Value::Integer(i64::from(i))
            }
        }
    )*};
}

from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        match i64::try_from(i) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::BigInt(i),
        }
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::from(i128::from(i))
    }
}

impl From<isize> for Value {
    fn from(i: isize) -> Self {
        Value::from(i as i128)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as u64)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Callable(callable)
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Value::Sequence(sequence)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// A type that can be converted into a [`Value`] when passed to a logger.
///
/// This is the conversion boundary between native Rust values and the
/// printer. Conversion may fail, in which case the log call reports an
/// [`UnclassifiableError`] and writes nothing.
pub trait Loggable {
    /// Converts `self` into a [`Value`].
    ///
    /// # Errors
    ///
    /// Returns an error if `self` has no representation as a [`Value`].
    fn to_value(&self) -> Result<Value, UnclassifiableError>;
}

impl<T: Loggable + ?Sized> Loggable for &T {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        (**self).to_value()
    }
}

impl Loggable for Value {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        Ok(self.clone())
    }
}

macro_rules! loggable_via_from {
    ($($ty:ty),*) => {$(
        impl Loggable for $ty {
            fn to_value(&self) -> Result<Value, UnclassifiableError> {
                Ok(Value::from(self.clone()))
            }
        }
    )*};
}

loggable_via_from!(
    (), bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize, f32, f64, char, String,
    Callable, Sequence, Record
);

impl Loggable for u128 {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        i128::try_from(*self)
            .map(Value::from)
            .map_err(|_| UnclassifiableError::new(format!("integer {} is out of range", self)))
    }
}

impl Loggable for str {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(self))
    }
}

impl<T: Loggable> Loggable for Option<T> {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        match self {
            Some(value) => value.to_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Loggable> Loggable for [T] {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        let sequence = Sequence::new();
        for item in self {
            sequence.push(item.to_value()?);
        }
        Ok(Value::Sequence(sequence))
    }
}

impl<T: Loggable> Loggable for Vec<T> {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        self.as_slice().to_value()
    }
}

fn record_from_entries<'a, K, V, I>(entries: I) -> Result<Value, UnclassifiableError>
where
    K: AsRef<str> + 'a,
    V: Loggable + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let record = Record::new();
    for (key, value) in entries {
        record.insert(key.as_ref(), value.to_value()?);
    }
    Ok(Value::Record(record))
}

impl<K: AsRef<str>, V: Loggable> Loggable for BTreeMap<K, V> {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        record_from_entries(self.iter())
    }
}

impl<K: AsRef<str>, V: Loggable, S> Loggable for HashMap<K, V, S> {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        record_from_entries(self.iter())
    }
}

cfg_json! {
    impl From<serde_json::Value> for Value {
        fn from(json: serde_json::Value) -> Self {
            use serde_json::Value as Json;

            match json {
                Json::Null => Value::Null,
                Json::Bool(b) => Value::Boolean(b),
                Json::Number(n) => match (n.as_i64(), n.as_u64()) {
                    (Some(i), _) => Value::Integer(i),
                    (None, Some(u)) => Value::from(u),
                    _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                Json::String(s) => Value::String(s),
                Json::Array(items) => Value::from(items),
                Json::Object(map) => Value::Record(map.into_iter().collect()),
            }
        }
    }

    impl Loggable for serde_json::Value {
        fn to_value(&self) -> Result<Value, UnclassifiableError> {
            Ok(Value::from(self.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let record = Record::new();
        let other = record.clone();
        assert_eq!(record.reference(), other.reference());
        assert_ne!(record.reference(), Record::new().reference());

        let f = Callable::new("f");
        assert_eq!(Value::from(f.clone()).reference(), Some(f.reference()));
        assert_eq!(Value::Integer(1).reference(), None);
    }

    #[test]
    fn insert_replaces_in_place() {
        let record = Record::new();
        record.insert("a", 1);
        record.insert("b", 2);
        assert!(record.insert("a", 3).is_some());

        let keys: Vec<String> = record.fields().iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(matches!(record.get("a"), Some(Value::Integer(3))));
    }

    #[test]
    fn class_naming_convention() {
        assert!(Callable::new("Service").is_class());
        assert!(!Callable::new("service").is_class());
        assert!(!Callable::new("").is_class());
    }

    #[test]
    fn wide_integers_become_big() {
        assert!(matches!(Value::from(7u64), Value::Integer(7)));
        assert!(matches!(Value::from(u64::MAX), Value::BigInt(_)));
        assert!(u128::MAX.to_value().is_err());
        assert!(matches!(5u128.to_value(), Ok(Value::Integer(5))));
    }

    #[test]
    fn debug_does_not_follow_cycles() {
        let record = Record::new();
        record.insert("me", record.clone());
        let debug = format!("{:?}", Value::Record(record.clone()));
        assert!(debug.contains("len: 1"));
        record.clear();
    }

    #[test]
    fn maps_keep_their_keys() -> Result<(), UnclassifiableError> {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        match map.to_value()? {
            Value::Record(record) => {
                let keys: Vec<String> = record.fields().iter().map(|(k, _)| k.clone()).collect();
                assert_eq!(keys, ["a", "b"]);
            }
            other => panic!("expected a record, found {:?}", other),
        }
        Ok(())
    }
}
