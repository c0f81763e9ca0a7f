//! Conversion protocol tests.
//!
//! The fixtures below are application types of the kind an inventory system
//! would persist. They implement `Encode` / `Decode` outside the crate, which is
//! exactly how real consumers plug in.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use satchel_json::{from_value, parse, to_value, Decode, Encode, Error, Result, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rarity {
    Common,
    Rare,
    Legendary,
}

impl Encode for Rarity {
    fn encode(&self) -> Value {
        Value::from(match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        })
    }
}

impl Decode for Rarity {
    fn decode(value: &Value) -> Result<Self> {
        match value.get::<String>()?.as_str() {
            "Common" => Ok(Rarity::Common),
            "Rare" => Ok(Rarity::Rare),
            "Legendary" => Ok(Rarity::Legendary),
            other => Err(Error::decode(format!("unknown rarity '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Payload {
    Weapon { damage: i32, durability: i32, weight: i32 },
    Armor { defense: i32, weight: i32 },
    Misc { weight: i32 },
}

impl Encode for Payload {
    fn encode(&self) -> Value {
        let mut v = Value::Null;
        match self {
            Payload::Weapon {
                damage,
                durability,
                weight,
            } => {
                v.set("damage", damage);
                v.set("durability", durability);
                v.set("weight", weight);
            }
            Payload::Armor { defense, weight } => {
                v.set("defense", defense);
                v.set("weight", weight);
            }
            Payload::Misc { weight } => v.set("weight", weight),
        }
        v
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: String,
    name: String,
    rarity: Rarity,
    stack_size: i32,
    data: Payload,
}

impl Encode for Item {
    fn encode(&self) -> Value {
        let kind = match self.data {
            Payload::Weapon { .. } => "Weapon",
            Payload::Armor { .. } => "Armor",
            Payload::Misc { .. } => "Misc",
        };
        let mut v = Value::Null;
        v.set("id", &self.id);
        v.set("name", &self.name);
        v.set("type", kind);
        v.set("rarity", &self.rarity);
        v.set("stackSize", &self.stack_size);
        v.set("data", &self.data);
        v
    }
}

impl Decode for Item {
    fn decode(v: &Value) -> Result<Self> {
        let d = v.at("data")?;
        let data = match v.field::<String>("type")?.as_str() {
            "Weapon" => Payload::Weapon {
                damage: d.value("damage", 0)?,
                durability: d.value("durability", -1)?,
                weight: d.value("weight", 0)?,
            },
            "Armor" => Payload::Armor {
                defense: d.value("defense", 0)?,
                weight: d.value("weight", 0)?,
            },
            _ => Payload::Misc {
                weight: d.value("weight", 0)?,
            },
        };
        Ok(Item {
            id: v.field("id")?,
            name: v.field("name")?,
            rarity: v.field("rarity")?,
            stack_size: v.value("stackSize", 1)?,
            data,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Recipe {
    result_id: String,
    result_count: i32,
    ingredients: HashMap<String, i32>,
}

impl Encode for Recipe {
    fn encode(&self) -> Value {
        let mut v = Value::Null;
        v.set("resultId", &self.result_id);
        v.set("resultCount", &self.result_count);
        v.set("ingredients", &self.ingredients);
        v
    }
}

impl Decode for Recipe {
    fn decode(v: &Value) -> Result<Self> {
        let ingredients = v.at("ingredients")?;
        if !ingredients.is_object() {
            return Err(Error::decode("ingredients must be an object"));
        }
        Ok(Recipe {
            result_id: v.field("resultId")?,
            result_count: v.value("resultCount", 1)?,
            ingredients: ingredients.get()?,
        })
    }
}

fn sword() -> Item {
    Item {
        id: "iron_sword".to_string(),
        name: "Iron Sword".to_string(),
        rarity: Rarity::Rare,
        stack_size: 1,
        data: Payload::Weapon {
            damage: 12,
            durability: 80,
            weight: 6,
        },
    }
}

// ============================================================================
// Application Types
// ============================================================================

#[test]
fn item_encodes_in_field_order() {
    assert_eq!(
        to_value(&sword()).dump(-1),
        r#"{"id": "iron_sword","name": "Iron Sword","type": "Weapon","rarity": "Rare","stackSize": 1,"data": {"damage": 12,"durability": 80,"weight": 6}}"#
    );
}

#[test]
fn item_roundtrips_through_text() {
    let text = to_value(&sword()).dump(4);
    let back: Item = parse(&text).unwrap().get().unwrap();
    assert_eq!(back, sword());
}

#[test]
fn item_decode_applies_defaults() {
    let v = parse(
        r#"{"id":"cloak","name":"Cloak","type":"Armor","rarity":"Common","data":{"defense":2}}"#,
    )
    .unwrap();
    let item: Item = from_value(&v).unwrap();
    assert_eq!(item.stack_size, 1);
    assert_eq!(
        item.data,
        Payload::Armor {
            defense: 2,
            weight: 0
        }
    );
}

#[test]
fn item_decode_missing_required_field() {
    let v = parse(r#"{"id":"x","type":"Misc","rarity":"Common","data":{}}"#).unwrap();
    assert_eq!(
        v.get::<Item>().unwrap_err(),
        Error::KeyNotFound("name".to_string())
    );
}

#[test]
fn item_decode_surfaces_application_error() {
    let v = parse(
        r#"{"id":"x","name":"X","type":"Misc","rarity":"Mythic","data":{"weight":1}}"#,
    )
    .unwrap();
    let err = v.get::<Item>().unwrap_err();
    assert_eq!(err, Error::Decode("unknown rarity 'Mythic'".to_string()));
    assert_eq!(err.to_string(), "decode error: unknown rarity 'Mythic'");
}

#[test]
fn catalog_skips_malformed_entries() {
    let catalog = parse(
        r#"[
            {"id":"a","name":"A","type":"Misc","rarity":"Common","data":{"weight":1}},
            {"id":"b","type":"Misc","rarity":"Common","data":{"weight":1}},
            {"id":"c","name":"C","type":"Misc","rarity":"Legendary","data":{"weight":2}}
        ]"#,
    )
    .unwrap();
    let loaded: Vec<Item> = catalog
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry.get::<Item>().ok())
        .collect();
    let ids: Vec<&str> = loaded.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
}

#[test]
fn whole_catalog_decode_fails_on_first_bad_entry() {
    let catalog = parse(r#"[{"id":"a"}]"#).unwrap();
    assert!(catalog.get::<Vec<Item>>().is_err());
}

#[test]
fn recipe_roundtrip_with_map_field() {
    let recipe = Recipe {
        result_id: "health_potion".to_string(),
        result_count: 2,
        ingredients: HashMap::from([("herb".to_string(), 3), ("water".to_string(), 1)]),
    };
    let text = to_value(&recipe).dump(-1);
    let back: Recipe = parse(&text).unwrap().get().unwrap();
    assert_eq!(back, recipe);
}

#[test]
fn recipe_rejects_non_object_ingredients() {
    let v = parse(r#"{"resultId":"x","ingredients":[1]}"#).unwrap();
    assert_eq!(
        v.get::<Recipe>().unwrap_err(),
        Error::Decode("ingredients must be an object".to_string())
    );
}

// ============================================================================
// Built-in Implementations
// ============================================================================

#[test]
fn vec_of_application_type_encodes_as_array() {
    let bag = vec![sword(), sword()];
    let v = to_value(&bag);
    assert!(v.is_array());
    assert_eq!(v.size(), 2);
    assert_eq!(v[1]["id"], Value::from("iron_sword"));
}

#[test]
fn slice_encodes_as_array() {
    let levels: &[u8] = &[1, 2, 3];
    assert_eq!(to_value(levels).dump(-1), "[1,2,3]");
}

#[test]
fn option_maps_to_null() {
    assert_eq!(to_value(&None::<i32>), Value::Null);
    assert_eq!(to_value(&Some(4i32)), Value::Integer(4));
    assert_eq!(from_value::<Option<i32>>(&Value::Null).unwrap(), None);
    assert_eq!(from_value::<Option<i32>>(&Value::Integer(4)).unwrap(), Some(4));
}

#[test]
fn btreemap_encodes_sorted_keys() {
    let mut counts = BTreeMap::new();
    counts.insert("zinc".to_string(), 1u32);
    counts.insert("amber".to_string(), 2u32);
    assert_eq!(to_value(&counts).dump(-1), r#"{"amber": 2,"zinc": 1}"#);
}

#[test]
fn indexmap_keeps_document_order() {
    let v = parse(r#"{"z": 1, "a": 2}"#).unwrap();
    let decoded: IndexMap<String, i64> = v.get().unwrap();
    assert_eq!(decoded.keys().collect::<Vec<_>>(), ["z", "a"]);
    assert_eq!(to_value(&decoded), v);
}

#[test]
fn map_decode_rejects_wrong_member_type() {
    let v = parse(r#"{"a": "one"}"#).unwrap();
    assert_eq!(
        v.get::<HashMap<String, i64>>().unwrap_err(),
        Error::TypeMismatch {
            expected: "integer",
            found: "string"
        }
    );
}

#[test]
fn vec_decode_rejects_non_array() {
    assert_eq!(
        parse("{}").unwrap().get::<Vec<i64>>().unwrap_err(),
        Error::TypeMismatch {
            expected: "array",
            found: "object"
        }
    );
}

#[test]
fn large_unsigned_falls_back_to_float() {
    assert_eq!(to_value(&u64::MAX), Value::Float(u64::MAX as f64));
    assert_eq!(to_value(&42usize), Value::Integer(42));
}

#[test]
fn nested_generic_types() {
    let v = parse(r#"[[1, 2], [], [3]]"#).unwrap();
    let grid: Vec<Vec<i64>> = v.get().unwrap();
    assert_eq!(grid, vec![vec![1, 2], vec![], vec![3]]);
    assert_eq!(to_value(&grid), v);
}
