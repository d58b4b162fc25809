//! Serde view of rendered values in the JSON light shape.
//!
//! - complex values are maps, led by `odata.type` when annotated with a name
//! - collections are sequences; their type name goes into a sibling
//!   `<name>@odata.type` entry of the enclosing map
//! - binary is base64 in human-readable formats and raw bytes otherwise

use base64::Engine;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::graph::PrimitiveValue;
use crate::value::{ODataValue, TypeNameAnnotated};

pub const ODATA_TYPE: &str = "odata.type";

/// Type name a writer should emit for `value`, following its annotation.
/// Values without an annotation emit no type name.
pub fn annotated_type_name(value: &ODataValue) -> Option<&str> {
    let annotation = match value {
        ODataValue::Complex(complex) => complex.annotation(),
        ODataValue::Collection(collection) => collection.annotation(),
        _ => None,
    }?;
    annotation.type_name.as_deref()
}

fn collection_type_key(name: &str) -> String {
    format!("{name}@{ODATA_TYPE}")
}

/// A value together with the property name it is written under
pub struct RootPayload<'a> {
    pub name: &'a str,
    pub value: &'a ODataValue,
}

impl Serialize for RootPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let collection_type = match self.value {
            ODataValue::Collection(_) => annotated_type_name(self.value),
            _ => None,
        };
        let len = 1 + usize::from(collection_type.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(type_name) = collection_type {
            map.serialize_entry(&collection_type_key(self.name), type_name)?;
        }
        map.serialize_entry(self.name, &ValuePayload(self.value))?;
        map.end()
    }
}

/// Serde view of a single rendered value
pub struct ValuePayload<'a>(pub &'a ODataValue);

impl Serialize for ValuePayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            ODataValue::Null => serializer.serialize_unit(),
            ODataValue::Primitive(primitive) => PrimitivePayload(primitive).serialize(serializer),
            ODataValue::Complex(complex) => {
                let type_name = annotated_type_name(self.0);
                let collection_types: Vec<Option<&str>> = complex
                    .properties
                    .iter()
                    .map(|p| match &p.value {
                        ODataValue::Collection(_) => annotated_type_name(&p.value),
                        _ => None,
                    })
                    .collect();
                let len = usize::from(type_name.is_some())
                    + complex.properties.len()
                    + collection_types.iter().filter(|t| t.is_some()).count();

                let mut map = serializer.serialize_map(Some(len))?;
                if let Some(type_name) = type_name {
                    map.serialize_entry(ODATA_TYPE, type_name)?;
                }
                for (property, collection_type) in complex.properties.iter().zip(collection_types) {
                    if let Some(type_name) = collection_type {
                        map.serialize_entry(&collection_type_key(&property.name), type_name)?;
                    }
                    map.serialize_entry(&property.name, &ValuePayload(&property.value))?;
                }
                map.end()
            }
            ODataValue::Collection(collection) => {
                let mut seq = serializer.serialize_seq(Some(collection.items.len()))?;
                for item in &collection.items {
                    seq.serialize_element(&ValuePayload(item))?;
                }
                seq.end()
            }
        }
    }
}

struct PrimitivePayload<'a>(&'a PrimitiveValue);

impl Serialize for PrimitivePayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            PrimitiveValue::Boolean(b) => serializer.serialize_bool(*b),
            PrimitiveValue::Int(i) => serializer.serialize_i64(*i),
            PrimitiveValue::Float(f) => serializer.serialize_f64(*f),
            PrimitiveValue::String(s) => serializer.serialize_str(s),
            PrimitiveValue::Binary(bytes) => {
                if serializer.is_human_readable() {
                    serializer
                        .serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
                } else {
                    serializer.serialize_bytes(bytes)
                }
            }
            PrimitiveValue::Guid(guid) => serializer.serialize_str(&guid.hyphenated().to_string()),
            PrimitiveValue::DateTimeOffset(dt) => serializer.serialize_str(&dt.to_rfc3339()),
        }
    }
}
