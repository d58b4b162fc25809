//! Minimal EDM (entity data model) type system.
//!
//! Only the pieces the value serializers consult are modelled: primitive
//! kinds, complex types with ordered structural properties, and collection
//! types. Type references pair a type definition with a nullability flag.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Primitive kinds understood by the primitive serializer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdmPrimitiveKind {
    Binary,
    Boolean,
    Byte,
    DateTimeOffset,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
}

impl EdmPrimitiveKind {
    pub const ALL: [EdmPrimitiveKind; 12] = [
        EdmPrimitiveKind::Binary,
        EdmPrimitiveKind::Boolean,
        EdmPrimitiveKind::Byte,
        EdmPrimitiveKind::DateTimeOffset,
        EdmPrimitiveKind::Double,
        EdmPrimitiveKind::Guid,
        EdmPrimitiveKind::Int16,
        EdmPrimitiveKind::Int32,
        EdmPrimitiveKind::Int64,
        EdmPrimitiveKind::SByte,
        EdmPrimitiveKind::Single,
        EdmPrimitiveKind::String,
    ];

    /// Qualified name in the `Edm` namespace, e.g. `Edm.Int32`
    pub fn full_name(&self) -> &'static str {
        match self {
            EdmPrimitiveKind::Binary => "Edm.Binary",
            EdmPrimitiveKind::Boolean => "Edm.Boolean",
            EdmPrimitiveKind::Byte => "Edm.Byte",
            EdmPrimitiveKind::DateTimeOffset => "Edm.DateTimeOffset",
            EdmPrimitiveKind::Double => "Edm.Double",
            EdmPrimitiveKind::Guid => "Edm.Guid",
            EdmPrimitiveKind::Int16 => "Edm.Int16",
            EdmPrimitiveKind::Int32 => "Edm.Int32",
            EdmPrimitiveKind::Int64 => "Edm.Int64",
            EdmPrimitiveKind::SByte => "Edm.SByte",
            EdmPrimitiveKind::Single => "Edm.Single",
            EdmPrimitiveKind::String => "Edm.String",
        }
    }

    pub fn from_full_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.full_name() == name)
    }
}

impl fmt::Display for EdmPrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// A named, typed member of a complex type
#[derive(Clone, Debug, PartialEq)]
pub struct EdmStructuralProperty {
    pub name: String,
    pub type_ref: EdmTypeReference,
}

/// A structured type with an ordered list of structural properties
#[derive(Clone, Debug, PartialEq)]
pub struct EdmComplexType {
    namespace: String,
    name: String,
    properties: Vec<EdmStructuralProperty>,
}

impl EdmComplexType {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Append a structural property; declaration order is preserved
    pub fn add_structural_property(
        mut self,
        name: impl Into<String>,
        type_ref: EdmTypeReference,
    ) -> Self {
        self.properties.push(EdmStructuralProperty {
            name: name.into(),
            type_ref,
        });
        self
    }

    /// Shorthand for a nullable primitive property
    pub fn add_primitive_property(self, name: impl Into<String>, kind: EdmPrimitiveKind) -> Self {
        self.add_structural_property(name, EdmTypeReference::primitive(kind, true))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn structural_properties(&self) -> &[EdmStructuralProperty] {
        &self.properties
    }

    pub fn find_property(&self, name: &str) -> Option<&EdmStructuralProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A collection type. The element type is optional because a metadata source
/// may fail to resolve it; serializers reject such collections up front.
#[derive(Clone, Debug, PartialEq)]
pub struct EdmCollectionType {
    element_type: Option<EdmTypeReference>,
}

impl EdmCollectionType {
    pub fn new(element_type: EdmTypeReference) -> Self {
        Self {
            element_type: Some(element_type),
        }
    }

    /// A collection whose element type could not be resolved
    pub fn unresolved() -> Self {
        Self { element_type: None }
    }

    pub fn element_type(&self) -> Option<&EdmTypeReference> {
        self.element_type.as_ref()
    }
}

/// Type definition referenced by an [`EdmTypeReference`]
#[derive(Clone, Debug, PartialEq)]
pub enum EdmType {
    Primitive(EdmPrimitiveKind),
    Complex(Arc<EdmComplexType>),
    Collection(Arc<EdmCollectionType>),
}

/// A type definition together with its nullability
#[derive(Clone, Debug, PartialEq)]
pub struct EdmTypeReference {
    definition: EdmType,
    nullable: bool,
}

impl EdmTypeReference {
    pub fn new(definition: EdmType, nullable: bool) -> Self {
        Self {
            definition,
            nullable,
        }
    }

    pub fn primitive(kind: EdmPrimitiveKind, nullable: bool) -> Self {
        Self::new(EdmType::Primitive(kind), nullable)
    }

    pub fn complex(complex_type: Arc<EdmComplexType>, nullable: bool) -> Self {
        Self::new(EdmType::Complex(complex_type), nullable)
    }

    pub fn collection(element_type: EdmTypeReference, nullable: bool) -> Self {
        Self::new(
            EdmType::Collection(Arc::new(EdmCollectionType::new(element_type))),
            nullable,
        )
    }

    pub fn definition(&self) -> &EdmType {
        &self.definition
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn as_primitive(&self) -> Option<EdmPrimitiveKind> {
        match &self.definition {
            EdmType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Arc<EdmComplexType>> {
        match &self.definition {
            EdmType::Complex(complex) => Some(complex),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Arc<EdmCollectionType>> {
        match &self.definition {
            EdmType::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Fully qualified name: `Edm.Int32`, `NS.Name` or `Collection(<element>)`.
    /// An unresolved collection element is rendered as `Collection()`.
    pub fn full_name(&self) -> String {
        match &self.definition {
            EdmType::Primitive(kind) => kind.full_name().to_string(),
            EdmType::Complex(complex) => complex.full_name(),
            EdmType::Collection(collection) => format!(
                "Collection({})",
                collection
                    .element_type()
                    .map(|e| e.full_name())
                    .unwrap_or_default()
            ),
        }
    }
}

impl fmt::Display for EdmTypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Declared complex types, looked up by their qualified names
#[derive(Clone, Debug, Default)]
pub struct EdmModel {
    complex_types: HashMap<String, Arc<EdmComplexType>>,
}

impl EdmModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_complex_type(&mut self, complex_type: EdmComplexType) -> Arc<EdmComplexType> {
        let complex_type = Arc::new(complex_type);
        self.complex_types
            .insert(complex_type.full_name(), complex_type.clone());
        complex_type
    }

    pub fn find_declared_type(&self, full_name: &str) -> Option<Arc<EdmComplexType>> {
        self.complex_types.get(full_name).cloned()
    }

    /// Resolve a qualified name to a nullable type reference, including
    /// `Edm.*` primitives and nested `Collection(...)` names.
    pub fn find_type(&self, full_name: &str) -> Option<EdmTypeReference> {
        if let Some(inner) = full_name
            .strip_prefix("Collection(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return self
                .find_type(inner)
                .map(|element| EdmTypeReference::collection(element, true));
        }
        if let Some(kind) = EdmPrimitiveKind::from_full_name(full_name) {
            return Some(EdmTypeReference::primitive(kind, true));
        }
        self.find_declared_type(full_name)
            .map(|complex| EdmTypeReference::complex(complex, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> EdmComplexType {
        EdmComplexType::new("Default", "Address")
            .add_primitive_property("Street", EdmPrimitiveKind::String)
            .add_primitive_property("City", EdmPrimitiveKind::String)
    }

    #[test]
    fn test_full_names() {
        let int32 = EdmTypeReference::primitive(EdmPrimitiveKind::Int32, false);
        assert_eq!(int32.full_name(), "Edm.Int32");

        let complex = EdmTypeReference::complex(Arc::new(address()), true);
        assert_eq!(complex.full_name(), "Default.Address");

        let nested = EdmTypeReference::collection(
            EdmTypeReference::collection(int32, false),
            false,
        );
        assert_eq!(nested.full_name(), "Collection(Collection(Edm.Int32))");
    }

    #[test]
    fn test_primitive_names_round_trip() {
        for kind in EdmPrimitiveKind::ALL {
            assert_eq!(EdmPrimitiveKind::from_full_name(kind.full_name()), Some(kind));
        }
        assert_eq!(EdmPrimitiveKind::from_full_name("Edm.Decimal"), None);
    }

    #[test]
    fn test_model_resolves_declared_and_collection_types() {
        let mut model = EdmModel::new();
        model.add_complex_type(address());

        assert!(model.find_declared_type("Default.Address").is_some());
        assert!(model.find_declared_type("Default.Missing").is_none());

        let collection = model.find_type("Collection(Default.Address)").unwrap();
        let element = collection.as_collection().unwrap().element_type().unwrap();
        assert_eq!(element.full_name(), "Default.Address");
        assert_eq!(
            element.as_complex().unwrap().structural_properties()[1].name,
            "City"
        );

        assert!(model.find_type("Collection(Default.Missing)").is_none());
    }

    #[test]
    fn test_unresolved_collection_has_no_element_type() {
        let collection = EdmTypeReference::new(
            EdmType::Collection(Arc::new(EdmCollectionType::unresolved())),
            true,
        );
        assert!(collection.as_collection().unwrap().element_type().is_none());
        assert_eq!(collection.full_name(), "Collection()");
    }
}
