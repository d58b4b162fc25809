//! OData value serialization over a minimal EDM type model
//!
//! This crate provides:
//! - An owned EDM type model (primitive, complex and collection types)
//! - Object graphs built by hand or from any `serde::Serialize` value
//! - Complex, collection and primitive serializers behind one trait
//! - Type-name annotation driven by the caller's metadata level
//! - A caching serializer provider with per-type overrides
//! - JSON light and CBOR writers

pub mod collection;
pub mod complex;
pub mod context;
pub mod edm;
pub mod error;
pub mod formatter;
pub mod graph;
pub mod metadata;
pub mod primitive;
pub mod registry;
pub mod traits;
pub mod value;
pub mod writer;

pub use collection::CollectionSerializer;
pub use complex::ComplexTypeSerializer;
pub use context::{SerializerContext, SerializerSettings};
pub use edm::{
    EdmCollectionType, EdmComplexType, EdmModel, EdmPrimitiveKind, EdmStructuralProperty, EdmType,
    EdmTypeReference,
};
pub use error::{Result, SerializerError, WriteError};
pub use formatter::ODataFormatter;
pub use graph::{EdmComplexObject, GraphValue, PlainObject, PrimitiveValue, StructuredObject};
pub use metadata::{
    add_type_name_annotation_as_needed, should_add_type_name_annotation,
    should_suppress_type_name_serialization, MetadataLevel,
};
pub use primitive::PrimitiveSerializer;
pub use registry::DefaultSerializerProvider;
pub use traits::{EdmTypeSerializer, SerializerProvider};
pub use value::{
    CollectionValue, ComplexValue, ODataProperty, ODataValue, SerializationTypeNameAnnotation,
    TypeNameAnnotated,
};
pub use writer::{BufferedWriter, CborWriter, JsonLightWriter, ODataWriter};
