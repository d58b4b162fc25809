//! Rendered values produced by the serializers and consumed by writers.

use crate::graph::PrimitiveValue;

/// Instance annotation recording which type name, if any, a writer should emit.
///
/// `type_name: None` means "deliberately emit no type name", which differs
/// from carrying no annotation at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializationTypeNameAnnotation {
    pub type_name: Option<String>,
}

/// Values that carry a type name and an optional type-name annotation
pub trait TypeNameAnnotated {
    fn type_name(&self) -> Option<&str>;

    fn annotation(&self) -> Option<&SerializationTypeNameAnnotation>;

    fn set_annotation(&mut self, annotation: SerializationTypeNameAnnotation);
}

/// A named property of a complex value
#[derive(Clone, Debug, PartialEq)]
pub struct ODataProperty {
    pub name: String,
    pub value: ODataValue,
}

impl ODataProperty {
    pub fn new(name: impl Into<String>, value: ODataValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Structured value: properties in declaration order plus a type name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplexValue {
    pub type_name: Option<String>,
    pub properties: Vec<ODataProperty>,
    annotation: Option<SerializationTypeNameAnnotation>,
}

impl ComplexValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: ODataValue) -> Self {
        self.properties.push(ODataProperty::new(name, value));
        self
    }

    pub fn property(&self, name: &str) -> Option<&ODataValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

impl TypeNameAnnotated for ComplexValue {
    fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    fn annotation(&self) -> Option<&SerializationTypeNameAnnotation> {
        self.annotation.as_ref()
    }

    fn set_annotation(&mut self, annotation: SerializationTypeNameAnnotation) {
        self.annotation = Some(annotation);
    }
}

/// Ordered sequence of rendered items sharing one declared element type
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectionValue {
    pub type_name: Option<String>,
    pub items: Vec<ODataValue>,
    annotation: Option<SerializationTypeNameAnnotation>,
}

impl CollectionValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    pub fn with_items(mut self, items: Vec<ODataValue>) -> Self {
        self.items = items;
        self
    }
}

impl TypeNameAnnotated for CollectionValue {
    fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    fn annotation(&self) -> Option<&SerializationTypeNameAnnotation> {
        self.annotation.as_ref()
    }

    fn set_annotation(&mut self, annotation: SerializationTypeNameAnnotation) {
        self.annotation = Some(annotation);
    }
}

/// Any value a serializer can hand to a writer
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ODataValue {
    #[default]
    Null,
    Primitive(PrimitiveValue),
    Complex(ComplexValue),
    Collection(CollectionValue),
}

impl ODataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ODataValue::Null)
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            ODataValue::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&ComplexValue> {
        match self {
            ODataValue::Complex(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionValue> {
        match self {
            ODataValue::Collection(c) => Some(c),
            _ => None,
        }
    }
}

impl From<PrimitiveValue> for ODataValue {
    fn from(value: PrimitiveValue) -> Self {
        ODataValue::Primitive(value)
    }
}

impl From<ComplexValue> for ODataValue {
    fn from(value: ComplexValue) -> Self {
        ODataValue::Complex(value)
    }
}

impl From<Option<ComplexValue>> for ODataValue {
    fn from(value: Option<ComplexValue>) -> Self {
        value.map(ODataValue::Complex).unwrap_or_default()
    }
}

impl From<CollectionValue> for ODataValue {
    fn from(value: CollectionValue) -> Self {
        ODataValue::Collection(value)
    }
}
