//! Conversion of any [`Serialize`] type into a [`Value`].
use super::{Loggable, Record, Sequence, Value};
use crate::error::UnclassifiableError;
use serde::ser::{self, Impossible, Serialize};
use std::fmt;

impl ser::Error for UnclassifiableError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        UnclassifiableError::new(msg.to_string())
    }
}

/// Converts a [`Serialize`] type into a [`Value`].
///
/// Structs become records reporting the struct's name, sequences and tuples
/// become sequences, and maps become untyped records.
///
/// # Errors
///
/// Fails if a map key isn't a string, a character, a boolean or an integer,
/// or if the type's `Serialize` implementation reports an error.
///
/// # Examples
///
/// ```
/// use inklog::value::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// match to_value(&Point { x: 1, y: 2 })? {
///     Value::Record(record) => {
///         assert_eq!(record.type_name(), Some("Point"));
///         assert_eq!(record.len(), 2);
///     }
///     _ => unreachable!(),
/// }
/// # Ok::<(), inklog::UnclassifiableError>(())
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, UnclassifiableError> {
    value.serialize(ValueSerializer)
}

/// Wraps a [`Serialize`] type so it can be passed to a logger.
///
/// # Examples
///
/// ```
/// use inklog::sink::{Capture, SinkSpec};
/// use inklog::value::Serde;
/// use inklog::Logger;
/// use std::collections::BTreeMap;
///
/// let mut ports = BTreeMap::new();
/// ports.insert("http", 80);
/// ports.insert("https", 443);
///
/// let capture = Capture::new();
/// let logger = Logger::builder()
///     .log_line(false)
///     .sink(SinkSpec::new(capture.clone()).color(false))
///     .build();
/// logger.info(&[&"ports", &Serde(&ports)])?;
///
/// assert!(capture.take()[0].ends_with("ports | {\t\"http\": 80,\t\"https\": 443\t}\n"));
/// # Ok::<(), inklog::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Serde<T>(pub T);

impl<T: Serialize> Loggable for Serde<T> {
    fn to_value(&self) -> Result<Value, UnclassifiableError> {
        to_value(&self.0)
    }
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = UnclassifiableError;

    type SerializeSeq = SerializeSeq;
    type SerializeTuple = SerializeSeq;
    type SerializeTupleStruct = SerializeSeq;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStruct;

    fn serialize_bool(self, v: bool) -> Result<Value, UnclassifiableError> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, UnclassifiableError> {
        v.to_value()
    }

    fn serialize_f32(self, v: f32) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, UnclassifiableError> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, UnclassifiableError> {
        Ok(Value::Sequence(v.iter().copied().collect()))
    }

    fn serialize_none(self) -> Result<Value, UnclassifiableError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Value, UnclassifiableError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, UnclassifiableError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value, UnclassifiableError> {
        Ok(Value::Record(Record::typed(name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, UnclassifiableError> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, UnclassifiableError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, UnclassifiableError> {
        let record = Record::new();
        record.insert(variant, value.serialize(ValueSerializer)?);
        Ok(Value::Record(record))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeSeq, UnclassifiableError> {
        Ok(SerializeSeq {
            items: Sequence::new(),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeSeq, UnclassifiableError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeSeq, UnclassifiableError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeTupleVariant, UnclassifiableError> {
        Ok(SerializeTupleVariant {
            variant,
            items: Sequence::new(),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap, UnclassifiableError> {
        Ok(SerializeMap {
            record: Record::new(),
            key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<SerializeStruct, UnclassifiableError> {
        Ok(SerializeStruct {
            record: Record::typed(name),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStruct, UnclassifiableError> {
        Ok(SerializeStruct {
            record: Record::typed(variant),
        })
    }
}

struct SerializeSeq {
    items: Sequence,
}

impl ser::SerializeSeq for SerializeSeq {
    type Ok = Value;
    type Error = UnclassifiableError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), UnclassifiableError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, UnclassifiableError> {
        Ok(Value::Sequence(self.items))
    }
}

impl ser::SerializeTuple for SerializeSeq {
    type Ok = Value;
    type Error = UnclassifiableError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), UnclassifiableError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, UnclassifiableError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeSeq {
    type Ok = Value;
    type Error = UnclassifiableError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), UnclassifiableError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, UnclassifiableError> {
        ser::SerializeSeq::end(self)
    }
}

struct SerializeTupleVariant {
    variant: &'static str,
    items: Sequence,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = UnclassifiableError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), UnclassifiableError> {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, UnclassifiableError> {
        let record = Record::new();
        record.insert(self.variant, self.items);
        Ok(Value::Record(record))
    }
}

struct SerializeMap {
    record: Record,
    key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = UnclassifiableError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), UnclassifiableError> {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), UnclassifiableError> {
        let key = self
            .key
            .take()
            .ok_or_else(|| UnclassifiableError::new("map value serialized before its key"))?;
        self.record.insert(&key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, UnclassifiableError> {
        Ok(Value::Record(self.record))
    }
}

struct SerializeStruct {
    record: Record,
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Value;
    type Error = UnclassifiableError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), UnclassifiableError> {
        self.record.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, UnclassifiableError> {
        Ok(Value::Record(self.record))
    }
}

impl ser::SerializeStructVariant for SerializeStruct {
    type Ok = Value;
    type Error = UnclassifiableError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), UnclassifiableError> {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<Value, UnclassifiableError> {
        ser::SerializeStruct::end(self)
    }
}

/// Serializes map keys, which must be string-like.
struct KeySerializer;

fn key_must_be_a_string() -> UnclassifiableError {
    UnclassifiableError::new("map key must be a string, character, boolean or integer")
}

macro_rules! key_to_string {
    ($($method:ident: $ty:ty),*) => {$(
        fn $method(self, v: $ty) -> Result<String, UnclassifiableError> {
            Ok(v.to_string())
        }
    )*};
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = UnclassifiableError;

    type SerializeSeq = Impossible<String, UnclassifiableError>;
    type SerializeTuple = Impossible<String, UnclassifiableError>;
    type SerializeTupleStruct = Impossible<String, UnclassifiableError>;
    type SerializeTupleVariant = Impossible<String, UnclassifiableError>;
    type SerializeMap = Impossible<String, UnclassifiableError>;
    type SerializeStruct = Impossible<String, UnclassifiableError>;
    type SerializeStructVariant = Impossible<String, UnclassifiableError>;

    key_to_string!(
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_char: char,
        serialize_str: &str
    );

    fn serialize_f32(self, _v: f32) -> Result<String, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_f64(self, _v: f64) -> Result<String, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_none(self) -> Result<String, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String, UnclassifiableError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, UnclassifiableError> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, UnclassifiableError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, UnclassifiableError> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, UnclassifiableError> {
        Err(key_must_be_a_string())
    }
}
