//! Conversion protocol between application types and [`Value`].
//!
//! A type becomes storable by implementing [`Encode`] (type → tree) and
//! [`Decode`] (tree → type). Dispatch is static: the core never needs to know
//! which application types exist. Primitive, optional, sequence and
//! string-keyed map types are implemented here.
//!
//! # Example
//!
//! ```
//! use satchel_json::{Decode, Encode, Error, Result, Value};
//!
//! struct Armor {
//!     defense: i32,
//!     weight: i32,
//! }
//!
//! impl Encode for Armor {
//!     fn encode(&self) -> Value {
//!         let mut v = Value::Null;
//!         v.set("defense", &self.defense);
//!         v.set("weight", &self.weight);
//!         v
//!     }
//! }
//!
//! impl Decode for Armor {
//!     fn decode(v: &Value) -> Result<Self> {
//!         if !v.is_object() {
//!             return Err(Error::decode("armor must be an object"));
//!         }
//!         Ok(Armor {
//!             defense: v.value("defense", 0)?,
//!             weight: v.value("weight", 0)?,
//!         })
//!     }
//! }
//!
//! let armor: Armor = satchel_json::parse(r#"{"defense": 7}"#).unwrap().get().unwrap();
//! assert_eq!((armor.defense, armor.weight), (7, 0));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::value::{Map, Value};

/// Types that can write themselves into a [`Value`].
pub trait Encode {
    fn encode(&self) -> Value;
}

/// Types that can be rebuilt from a [`Value`].
pub trait Decode: Sized {
    fn decode(value: &Value) -> Result<Self>;
}

/// Encode any [`Encode`] type.
pub fn to_value<T: Encode + ?Sized>(value: &T) -> Value {
    value.encode()
}

/// Decode any [`Decode`] type.
pub fn from_value<T: Decode>(value: &Value) -> Result<T> {
    T::decode(value)
}

pub(crate) fn mismatch(expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self) -> Value {
        (**self).encode()
    }
}

impl Encode for Value {
    fn encode(&self) -> Value {
        self.clone()
    }
}

impl Decode for Value {
    fn decode(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl Encode for bool {
    fn encode(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Decode for bool {
    fn decode(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl Encode for str {
    fn encode(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Encode for String {
    fn encode(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Decode for String {
    fn decode(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", value))
    }
}

/// Integer read with the float rule applied: floats truncate toward zero,
/// saturating at the `i64` bounds.
fn decode_i64(value: &Value, expected: &'static str) -> Result<i64> {
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Float(f) => Ok(*f as i64),
        other => Err(mismatch(expected, other)),
    }
}

impl Encode for i64 {
    fn encode(&self) -> Value {
        Value::Integer(*self)
    }
}

impl Decode for i64 {
    fn decode(value: &Value) -> Result<Self> {
        decode_i64(value, "integer")
    }
}

macro_rules! narrow_integer {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }

            impl Decode for $t {
                fn decode(value: &Value) -> Result<Self> {
                    let n = decode_i64(value, "integer")?;
                    <$t>::try_from(n).map_err(|_| Error::OutOfRange {
                        target: stringify!($t),
                        value: n,
                    })
                }
            }
        )*
    };
}

narrow_integer!(i8, i16, i32, u8, u16, u32);

// Values above i64::MAX cannot be stored as integers; they fall back to floats.
macro_rules! wide_unsigned {
    ($($t:ty),*) => {
        $(
            impl Encode for $t {
                fn encode(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(n) => Value::Integer(n),
                        Err(_) => Value::Float(*self as f64),
                    }
                }
            }

            impl Decode for $t {
                fn decode(value: &Value) -> Result<Self> {
                    let n = decode_i64(value, "integer")?;
                    <$t>::try_from(n).map_err(|_| Error::OutOfRange {
                        target: stringify!($t),
                        value: n,
                    })
                }
            }
        )*
    };
}

wide_unsigned!(u64, usize);

impl Encode for f64 {
    fn encode(&self) -> Value {
        Value::Float(*self)
    }
}

impl Decode for f64 {
    fn decode(value: &Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| mismatch("float", value))
    }
}

impl Encode for f32 {
    fn encode(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Decode for f32 {
    fn decode(value: &Value) -> Result<Self> {
        f64::decode(value).map(|f| f as f32)
    }
}

/// `None` ↔ `Null`.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self) -> Value {
        match self {
            Some(inner) => inner.encode(),
            None => Value::Null,
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self) -> Value {
        Value::Array(self.iter().map(Encode::encode).collect())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self) -> Value {
        self.as_slice().encode()
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::decode).collect(),
            other => Err(mismatch("array", other)),
        }
    }
}

fn encode_entries<'a, K, T, I>(entries: I) -> Value
where
    K: AsRef<str> + 'a,
    T: Encode + 'a,
    I: IntoIterator<Item = (&'a K, &'a T)>,
{
    let map: Map = entries
        .into_iter()
        .map(|(key, value)| (key.as_ref().to_string(), value.encode()))
        .collect();
    Value::Object(map)
}

fn decode_entries<T, C>(value: &Value) -> Result<C>
where
    T: Decode,
    C: FromIterator<(String, T)>,
{
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, item)| T::decode(item).map(|decoded| (key.clone(), decoded)))
            .collect(),
        other => Err(mismatch("object", other)),
    }
}

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode(&self) -> Value {
        encode_entries(self)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(value: &Value) -> Result<Self> {
        decode_entries::<T, _>(value)
    }
}

impl<T: Encode, S: BuildHasher> Encode for HashMap<String, T, S> {
    fn encode(&self) -> Value {
        encode_entries(self)
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
    fn decode(value: &Value) -> Result<Self> {
        decode_entries::<T, _>(value)
    }
}

impl<T: Encode, S: BuildHasher> Encode for IndexMap<String, T, S> {
    fn encode(&self) -> Value {
        encode_entries(self)
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for IndexMap<String, T, S> {
    fn decode(value: &Value) -> Result<Self> {
        decode_entries::<T, _>(value)
    }
}
