//! Record tree access
//!
//! The drawing export is a nest of brace-delimited records with quoted
//! keys. It is tokenized into an ordered tree once; the helpers here find
//! the sections of interest and consume named fields from their records,
//! reporting a malformed record instead of guessing at its content.

use lasercut_core::Point;
use serde::de::{DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{ParseError, Result, Section};
use crate::profile::VertexId;

/// A member key that occurs more than once in the same block
#[derive(Debug, Clone, PartialEq, Eq)]
struct RepeatedKey {
    block: String,
    key: String,
}

/// A tokenized profile document
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    repeated: Vec<RepeatedKey>,
}

impl Document {
    pub fn parse(text: &str) -> Result<Self> {
        let mut repeated = Vec::new();
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let root = TreeSeed {
            block: None,
            repeated: &mut repeated,
        }
        .deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(Self { root, repeated })
    }

    /// Record identifiers written more than once inside a `section` block.
    ///
    /// The tree keeps only the last record for each repeated identifier.
    pub fn repeated_records(&self, section: Section) -> Vec<VertexId> {
        let mut ids = Vec::new();
        for repeated in self.repeated.iter().filter(|r| r.block == section.key()) {
            if let Some(id) = parse_identifier(&repeated.key) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// First member named after `section`, searched depth-first.
    ///
    /// Returns `None` when the section is absent or is not a record block.
    pub fn section(&self, section: Section) -> Option<&Map<String, Value>> {
        find_member(&self.root, section.key()).and_then(Value::as_object)
    }

    /// Records of `section` in document order.
    ///
    /// The record loop ends at the first key that is zero or not an
    /// integer; records after it are not read.
    pub fn records(&self, section: Section) -> Vec<Record<'_>> {
        let Some(block) = self.section(section) else {
            debug!("No {} section in document", section);
            return Vec::new();
        };

        let mut records = Vec::with_capacity(block.len());
        for (key, value) in block {
            match parse_identifier(key) {
                Some(id) => records.push(Record::new(section, id, value)),
                None => {
                    warn!("{} section ends at key {:?}", section, key);
                    break;
                }
            }
        }
        records
    }
}

/// Builds the ordered value tree, noting keys repeated within a block
struct TreeSeed<'r, 'k> {
    /// Name of the member holding the value being read
    block: Option<&'k str>,
    repeated: &'r mut Vec<RepeatedKey>,
}

impl<'de> DeserializeSeed<'de> for TreeSeed<'_, '_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TreeSeed<'_, '_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a profile document value")
    }

    fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
        Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let repeated = self.repeated;
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(TreeSeed {
            block: None,
            repeated: &mut *repeated,
        })? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let repeated = self.repeated;
        let mut members = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(TreeSeed {
                block: Some(&key),
                repeated: &mut *repeated,
            })?;
            if members.insert(key.clone(), value).is_some() {
                if let Some(block) = self.block {
                    repeated.push(RepeatedKey {
                        block: block.to_owned(),
                        key,
                    });
                }
            }
        }
        Ok(Value::Object(members))
    }
}

/// Depth-first search for a block-valued member named `key`
fn find_member<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .filter(|member| member.is_object())
            .or_else(|| map.values().find_map(|child| find_member(child, key))),
        Value::Array(items) => items.iter().find_map(|child| find_member(child, key)),
        _ => None,
    }
}

/// Non-zero integer record identifier, or `None` to end the section
pub fn parse_identifier(key: &str) -> Option<VertexId> {
    match key.trim().parse::<VertexId>() {
        Ok(0) | Err(_) => None,
        Ok(id) => Some(id),
    }
}

/// One keyed record inside a section
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    section: Section,
    id: VertexId,
    value: &'a Value,
}

impl<'a> Record<'a> {
    pub fn new(section: Section, id: VertexId, value: &'a Value) -> Self {
        Self { section, id, value }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    fn malformed(&self, reason: impl Into<String>) -> ParseError {
        ParseError::malformed(self.section, self.id, reason)
    }

    fn fields(&self) -> Result<&'a Map<String, Value>> {
        self.value
            .as_object()
            .ok_or_else(|| self.malformed("record is not a field block"))
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.value.get(name).is_some()
    }

    pub fn field(&self, name: &str) -> Result<&'a Value> {
        self.fields()?
            .get(name)
            .ok_or_else(|| self.malformed(format!("missing field '{}'", name)))
    }

    pub fn str_field(&self, name: &str) -> Result<&'a str> {
        self.field(name)?
            .as_str()
            .ok_or_else(|| self.malformed(format!("field '{}' is not text", name)))
    }

    pub fn integer_field(&self, name: &str) -> Result<i64> {
        let value = self.field(name)?;
        as_integer(value)
            .ok_or_else(|| self.malformed(format!("field '{}' is not an integer", name)))
    }

    pub fn number_field(&self, name: &str) -> Result<f64> {
        self.number_in(self.fields()?, name)
    }

    /// Exactly two integer references held in a list field
    pub fn id_pair_field(&self, name: &str) -> Result<[VertexId; 2]> {
        let items = self
            .field(name)?
            .as_array()
            .ok_or_else(|| self.malformed(format!("field '{}' is not a list", name)))?;

        if items.len() != 2 {
            return Err(self.malformed(format!(
                "field '{}' holds {} references, expected 2",
                name,
                items.len()
            )));
        }

        let mut ids = [0; 2];
        for (slot, item) in ids.iter_mut().zip(items) {
            *slot = as_integer(item).ok_or_else(|| {
                self.malformed(format!("field '{}' holds a non-integer reference", name))
            })?;
        }
        Ok(ids)
    }

    /// Coordinate pair held in a nested `{ "X": .., "Y": .. }` field
    pub fn point_field(&self, name: &str) -> Result<Point> {
        let block = self
            .field(name)?
            .as_object()
            .ok_or_else(|| self.malformed(format!("field '{}' is not a field block", name)))?;
        self.point_in(block)
    }

    /// Coordinate pair held directly on the record
    pub fn point(&self) -> Result<Point> {
        self.point_in(self.fields()?)
    }

    fn point_in(&self, block: &Map<String, Value>) -> Result<Point> {
        Ok(Point::new(
            self.number_in(block, "X")?,
            self.number_in(block, "Y")?,
        ))
    }

    fn number_in(&self, block: &Map<String, Value>, name: &str) -> Result<f64> {
        block
            .get(name)
            .ok_or_else(|| self.malformed(format!("missing field '{}'", name)))?
            .as_f64()
            .ok_or_else(|| self.malformed(format!("field '{}' is not a number", name)))
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}
