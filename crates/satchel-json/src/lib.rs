//! # satchel-json
//!
//! A small, self-contained document model for a JSON-like format: parse text into
//! a [`Value`] tree, work with it, and dump it back to text. Application types
//! take part through the [`Encode`] / [`Decode`] traits, so item, recipe and
//! inventory types can be saved and loaded without this crate knowing about them.
//!
//! ## Quick start
//!
//! ```rust
//! use satchel_json::{dump, parse, Value};
//!
//! let mut sword = parse(r#"{"id":"iron_sword","damage":12,"weight":3.5}"#).unwrap();
//! assert!(sword.get::<i64>().is_err());
//! assert_eq!(sword.field::<i64>("damage").unwrap(), 12);
//! assert_eq!(sword.value("durability", -1i64).unwrap(), -1);
//!
//! sword["rarity"] = Value::from("rare");
//! assert_eq!(
//!     dump(&sword, -1),
//!     r#"{"id": "iron_sword","damage": 12,"weight": 3.5,"rarity": "rare"}"#
//! );
//! ```
//!
//! ## Format
//!
//! Close to JSON, with these deviations: no exponent notation in numbers,
//! `\uXXXX` escapes decode to `?`, duplicate object keys keep the first value,
//! and object members are written in insertion order.
//!
//! ## Modules
//!
//! - [`value`]: the `Value` tree, predicates and keyed/indexed access
//! - [`parser`]: text → `Value` (`parse`, `parse_with`, `ParseOptions`)
//! - [`serializer`]: `Value` → text (`dump`, compact or indented)
//! - [`access`]: typed reads and writes (`get`, `value`, `field`, `set`)
//! - [`convert`]: the `Encode` / `Decode` conversion traits
//! - [`error`]: error type for every fallible operation

pub mod access;
pub mod convert;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod value;

mod serde_support;

pub use convert::{from_value, to_value, Decode, Encode};
pub use error::{Error, Result};
pub use parser::{parse, parse_with, ParseOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use serializer::{dump, dump_to};
pub use value::{Map, Value};
