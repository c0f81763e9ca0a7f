//! The in-memory document tree.
//!
//! [`Value`] is a closed sum type: every consumer matches on it exhaustively.
//! Objects use an insertion-ordered [`Map`] so that a parsed document dumps its
//! members back in source order, which keeps saved files diffable.
//!
//! # Access patterns
//!
//! - **Pure lookups** (`find`, `at`, `at_mut`, `at_index`) never change the tree.
//! - **Insert-or-get** (`entry`, `value["key"] = ...` through `IndexMut`) turns a
//!   non-object into an empty object and inserts `Null` for a missing key.
//!   Shared `Index` never inserts; it panics on a missing key like `HashMap`.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Object storage: string keys in insertion order.
pub type Map = IndexMap<String, Value>;

/// One JSON-like document or subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order. Equality ignores order.
    Object(Map),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// True for both `Integer` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Short lowercase name of the active variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Element count for arrays and objects, 0 for everything else.
    pub fn size(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// True iff this is an object holding `key`.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Value::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The stored integer. Floats are not converted here; use [`Value::get`] for that.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The stored number as `f64`, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Replace this value with `Null` and return what it held.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Look up `key` without side effects. `None` for non-objects and missing keys.
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_object_mut().and_then(|map| map.get_mut(key))
    }

    /// Read-only keyed access that reports why it failed.
    pub fn at(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Object(map) => map
                .get(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_string())),
            _ => Err(Error::NotAnObject),
        }
    }

    /// Mutable keyed access with the same failure rules as [`Value::at`].
    /// Never inserts.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut Value> {
        match self {
            Value::Object(map) => map
                .get_mut(key)
                .ok_or_else(|| Error::KeyNotFound(key.to_string())),
            _ => Err(Error::NotAnObject),
        }
    }

    /// Read-only positional access into an array.
    pub fn at_index(&self, index: usize) -> Result<&Value> {
        match self {
            Value::Array(items) => items.get(index).ok_or(Error::IndexOutOfBounds {
                index,
                len: items.len(),
            }),
            _ => Err(Error::NotAnArray),
        }
    }

    /// Insert-or-get. A non-object is first replaced by an empty object, and a
    /// missing key is inserted as `Null`.
    pub fn entry(&mut self, key: &str) -> &mut Value {
        self.coerce_object()
            .entry(key.to_string())
            .or_insert(Value::Null)
    }

    /// Store `value` under `key`, returning the previous entry. A non-object is
    /// first replaced by an empty object. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.coerce_object().insert(key.into(), value.into())
    }

    /// Append to an array. A non-array is first replaced by an empty array.
    pub fn push(&mut self, value: impl Into<Value>) {
        if !self.is_array() {
            *self = Value::Array(Vec::new());
        }
        if let Value::Array(items) = self {
            items.push(value.into());
        }
    }

    fn coerce_object(&mut self) -> &mut Map {
        if !self.is_object() {
            *self = Value::Object(Map::new());
        }
        match self {
            Value::Object(map) => map,
            _ => unreachable!("value was just replaced by an object"),
        }
    }
}

/// Panics like `HashMap`'s `Index` when the key cannot be read; use
/// [`Value::at`] or [`Value::find`] for the fallible forms.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self.at(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Auto-vivifying: same semantics as [`Value::entry`].
impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.entry(key)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self.at_index(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self {
            Value::Array(items) => {
                let len = items.len();
                match items.get_mut(index) {
                    Some(value) => value,
                    None => panic!("{}", Error::IndexOutOfBounds { index, len }),
                }
            }
            _ => panic!("{}", Error::NotAnArray),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Builds an object. Duplicate keys keep their first value.
impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.entry(key.into()).or_insert(value);
        }
        Value::Object(map)
    }
}
