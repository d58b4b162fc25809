//! In-memory object graphs handed to the serializers.
//!
//! A graph is either absent ([`GraphValue::Null`]), a primitive, a plain
//! object whose declared properties are looked up by name, a
//! metadata-described object carrying its own EDM type, or a list.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::edm::EdmTypeReference;
use crate::error::{Result, SerializerError};

/// Primitive payloads, before coercion to a declared EDM primitive kind
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    Guid(Uuid),
    DateTimeOffset(DateTime<FixedOffset>),
}

impl PrimitiveValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PrimitiveValue::Boolean(_) => "Boolean",
            PrimitiveValue::Int(_) => "Int",
            PrimitiveValue::Float(_) => "Float",
            PrimitiveValue::String(_) => "String",
            PrimitiveValue::Binary(_) => "Binary",
            PrimitiveValue::Guid(_) => "Guid",
            PrimitiveValue::DateTimeOffset(_) => "DateTimeOffset",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrimitiveValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrimitiveValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// Capability shared by the two structured object shapes
pub trait StructuredObject {
    /// Value of a declared property, if the object carries it
    fn try_get_property(&self, name: &str) -> Option<&GraphValue>;

    /// True when the object stands for an explicit null payload
    fn is_null(&self) -> bool {
        false
    }

    /// EDM type the object describes itself with, if any
    fn actual_edm_type(&self) -> Option<&EdmTypeReference> {
        None
    }
}

/// An object whose declared properties are enumerated by name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlainObject {
    properties: HashMap<String, GraphValue>,
}

impl PlainObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<GraphValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<GraphValue>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl StructuredObject for PlainObject {
    fn try_get_property(&self, name: &str) -> Option<&GraphValue> {
        self.properties.get(name)
    }
}

/// An object that carries an explicit EDM type, its own property map and an
/// explicit-null marker
#[derive(Clone, Debug, PartialEq)]
pub struct EdmComplexObject {
    edm_type: EdmTypeReference,
    properties: HashMap<String, GraphValue>,
    is_null: bool,
}

impl EdmComplexObject {
    pub fn new(edm_type: EdmTypeReference) -> Self {
        Self {
            edm_type,
            properties: HashMap::new(),
            is_null: false,
        }
    }

    /// An object of the given type that represents a null payload
    pub fn null(edm_type: EdmTypeReference) -> Self {
        Self {
            edm_type,
            properties: HashMap::new(),
            is_null: true,
        }
    }

    /// Wrap a plain object, taking over its properties
    pub fn typed(value: PlainObject, edm_type: EdmTypeReference) -> Self {
        Self {
            edm_type,
            properties: value.properties,
            is_null: false,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<GraphValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn edm_type(&self) -> &EdmTypeReference {
        &self.edm_type
    }
}

impl StructuredObject for EdmComplexObject {
    fn try_get_property(&self, name: &str) -> Option<&GraphValue> {
        self.properties.get(name)
    }

    fn is_null(&self) -> bool {
        self.is_null
    }

    fn actual_edm_type(&self) -> Option<&EdmTypeReference> {
        Some(&self.edm_type)
    }
}

/// Input graph for a serialization call
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GraphValue {
    #[default]
    Null,
    Primitive(PrimitiveValue),
    Object(PlainObject),
    EdmObject(EdmComplexObject),
    List(Vec<GraphValue>),
}

impl GraphValue {
    /// Build a graph from any serde-serializable value. Structs become plain
    /// objects keyed by their serialized field names.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value)
            .map_err(|e| SerializerError::argument_invalid("graph", e.to_string()))?;
        Self::try_from(json)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, GraphValue::Null)
    }

    pub fn as_structured(&self) -> Option<&dyn StructuredObject> {
        match self {
            GraphValue::Object(object) => Some(object),
            GraphValue::EdmObject(object) => Some(object),
            _ => None,
        }
    }

    /// Runtime EDM type of metadata-described objects
    pub fn actual_edm_type(&self) -> Option<&EdmTypeReference> {
        match self {
            GraphValue::EdmObject(object) => Some(object.edm_type()),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphValue::Null => "Null",
            GraphValue::Primitive(p) => p.kind_name(),
            GraphValue::Object(_) => "Object",
            GraphValue::EdmObject(_) => "EdmObject",
            GraphValue::List(_) => "List",
        }
    }
}

impl TryFrom<JsonValue> for GraphValue {
    type Error = SerializerError;

    fn try_from(json: JsonValue) -> Result<Self> {
        Ok(match json {
            JsonValue::Null => GraphValue::Null,
            JsonValue::Bool(b) => b.into(),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.into()
                } else if n.is_u64() {
                    return Err(SerializerError::argument_invalid(
                        "graph",
                        format!("The value {n} is out of range for 'Edm.Int64'."),
                    ));
                } else {
                    n.as_f64().map(GraphValue::from).unwrap_or_default()
                }
            }
            JsonValue::String(s) => s.into(),
            JsonValue::Array(items) => GraphValue::List(
                items
                    .into_iter()
                    .map(GraphValue::try_from)
                    .collect::<Result<_>>()?,
            ),
            JsonValue::Object(map) => GraphValue::Object(PlainObject {
                properties: map
                    .into_iter()
                    .map(|(k, v)| GraphValue::try_from(v).map(|value| (k, value)))
                    .collect::<Result<_>>()?,
            }),
        })
    }
}

macro_rules! graph_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for GraphValue {
                fn from(value: $t) -> Self {
                    GraphValue::Primitive(PrimitiveValue::Int(value as i64))
                }
            }
        )*
    };
}

graph_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for GraphValue {
    fn from(value: bool) -> Self {
        GraphValue::Primitive(PrimitiveValue::Boolean(value))
    }
}

impl From<f32> for GraphValue {
    fn from(value: f32) -> Self {
        GraphValue::Primitive(PrimitiveValue::Float(value as f64))
    }
}

impl From<f64> for GraphValue {
    fn from(value: f64) -> Self {
        GraphValue::Primitive(PrimitiveValue::Float(value))
    }
}

impl From<&str> for GraphValue {
    fn from(value: &str) -> Self {
        GraphValue::Primitive(PrimitiveValue::String(value.to_string()))
    }
}

impl From<String> for GraphValue {
    fn from(value: String) -> Self {
        GraphValue::Primitive(PrimitiveValue::String(value))
    }
}

impl From<Uuid> for GraphValue {
    fn from(value: Uuid) -> Self {
        GraphValue::Primitive(PrimitiveValue::Guid(value))
    }
}

impl From<DateTime<FixedOffset>> for GraphValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        GraphValue::Primitive(PrimitiveValue::DateTimeOffset(value))
    }
}

impl From<PrimitiveValue> for GraphValue {
    fn from(value: PrimitiveValue) -> Self {
        GraphValue::Primitive(value)
    }
}

impl From<PlainObject> for GraphValue {
    fn from(value: PlainObject) -> Self {
        GraphValue::Object(value)
    }
}

impl From<EdmComplexObject> for GraphValue {
    fn from(value: EdmComplexObject) -> Self {
        GraphValue::EdmObject(value)
    }
}

impl<T: Into<GraphValue>> From<Option<T>> for GraphValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl<T: Into<GraphValue>> From<Vec<T>> for GraphValue {
    fn from(items: Vec<T>) -> Self {
        GraphValue::List(items.into_iter().map(Into::into).collect())
    }
}
