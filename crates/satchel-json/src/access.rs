//! Typed reads and writes on top of the value tree.
//!
//! `get` and `value` are the two entry points application code uses to pull
//! typed data out of a document; `set` and `assign` go the other way. All of
//! them route through [`Encode`] / [`Decode`], so primitives and application
//! types are handled the same way.

use crate::convert::{Decode, Encode};
use crate::error::Result;
use crate::value::Value;

impl Value {
    /// Read this value as `T`.
    ///
    /// Requesting an integer from a float truncates toward zero; requesting a
    /// float from an integer widens. Any other variant mismatch is an
    /// [`Error::TypeMismatch`](crate::Error::TypeMismatch).
    pub fn get<T: Decode>(&self) -> Result<T> {
        T::decode(self)
    }

    /// Read `key` as `T`, or return `default` when this is not an object or the
    /// key is absent. Never inserts; a present entry of the wrong type is still
    /// an error.
    pub fn value<T: Decode>(&self, key: &str, default: T) -> Result<T> {
        match self.find(key) {
            Some(entry) => entry.get(),
            None => Ok(default),
        }
    }

    /// Read a required field.
    pub fn field<T: Decode>(&self, key: &str) -> Result<T> {
        self.at(key)?.get()
    }

    /// Encode `value` into `key`, converting this value to an object if needed.
    pub fn set<T: Encode + ?Sized>(&mut self, key: &str, value: &T) {
        *self.entry(key) = value.encode();
    }

    /// Replace this whole value with the encoding of `value`.
    pub fn assign<T: Encode + ?Sized>(&mut self, value: &T) {
        *self = value.encode();
    }
}

