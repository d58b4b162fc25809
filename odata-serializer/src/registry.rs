//! Default serializer provider.
//!
//! Serializers are created on first request and cached by type. Explicit
//! registrations take precedence over the built-in primitive, complex and
//! collection serializers.
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use odata_common::{Component, Logger, LoggingContext};

use crate::collection::CollectionSerializer;
use crate::complex::ComplexTypeSerializer;
use crate::edm::{EdmType, EdmTypeReference};
use crate::error::Result;
use crate::primitive::PrimitiveSerializer;
use crate::traits::{EdmTypeSerializer, SerializerProvider};

/// Provider that builds serializers for any primitive, complex or collection
/// type on demand
pub struct DefaultSerializerProvider {
    self_ref: Weak<DefaultSerializerProvider>,
    /// Built-in serializers, keyed by full name and nullability
    cache: DashMap<String, Arc<dyn EdmTypeSerializer>>,
    /// Caller registrations, keyed by full name
    overrides: DashMap<String, Arc<dyn EdmTypeSerializer>>,
    logger: Logger,
}

impl DefaultSerializerProvider {
    pub fn new(logger: Logger) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            self_ref: self_ref.clone(),
            cache: DashMap::new(),
            overrides: DashMap::new(),
            logger: logger.with_component(Component::Provider),
        })
    }

    /// Use `serializer` for every reference to `full_name`, whatever its nullability
    pub fn register(&self, full_name: impl Into<String>, serializer: Arc<dyn EdmTypeSerializer>) {
        let full_name = full_name.into();
        self.log_info(format!("registered serializer override for {full_name}"));
        self.overrides.insert(full_name, serializer);
    }

    pub fn unregister(&self, full_name: &str) -> Option<Arc<dyn EdmTypeSerializer>> {
        self.overrides.remove(full_name).map(|(_, serializer)| serializer)
    }

    /// Number of built-in serializers created so far
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn cache_key(edm_type: &EdmTypeReference) -> String {
        if edm_type.is_nullable() {
            format!("{}?", edm_type.full_name())
        } else {
            edm_type.full_name()
        }
    }

    fn create_serializer(&self, edm_type: &EdmTypeReference) -> Result<Arc<dyn EdmTypeSerializer>> {
        let provider: Weak<dyn SerializerProvider> = self.self_ref.clone();

        let serializer: Arc<dyn EdmTypeSerializer> = match edm_type.definition() {
            EdmType::Primitive(_) => Arc::new(
                PrimitiveSerializer::new(edm_type.clone())?.with_logger(self.logger.clone()),
            ),
            EdmType::Complex(_) => Arc::new(
                ComplexTypeSerializer::cached(edm_type.clone(), provider)?
                    .with_logger(self.logger.clone()),
            ),
            EdmType::Collection(_) => Arc::new(
                CollectionSerializer::cached(edm_type.clone(), provider)?
                    .with_logger(self.logger.clone()),
            ),
        };
        Ok(serializer)
    }
}

impl SerializerProvider for DefaultSerializerProvider {
    fn serializer_for(&self, edm_type: &EdmTypeReference) -> Option<Arc<dyn EdmTypeSerializer>> {
        let full_name = edm_type.full_name();
        if let Some(serializer) = self.overrides.get(&full_name).map(|e| e.value().clone()) {
            return Some(serializer);
        }

        let key = Self::cache_key(edm_type);
        if let Some(serializer) = self.cache.get(&key).map(|e| e.value().clone()) {
            // a different type declared under the same name replaces the entry
            if serializer.edm_type() == edm_type {
                return Some(serializer);
            }
            self.log_info(format!("type definition for {key} changed, rebuilding serializer"));
        }

        match self.create_serializer(edm_type) {
            Ok(serializer) => {
                self.log_debug(format!("created serializer for {key}"));
                self.cache.insert(key, serializer.clone());
                Some(serializer)
            }
            Err(err) => {
                self.log_warn(format!("no serializer for {full_name}: {err}"));
                None
            }
        }
    }
}

impl LoggingContext for DefaultSerializerProvider {
    fn logger(&self) -> &Logger {
        &self.logger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SerializerContext;
    use crate::edm::{EdmCollectionType, EdmComplexType, EdmPrimitiveKind};
    use crate::error::SerializerError;
    use crate::graph::{GraphValue, PlainObject, PrimitiveValue};
    use crate::value::ODataValue;

    fn provider() -> Arc<DefaultSerializerProvider> {
        odata_common::init_test_logging();
        DefaultSerializerProvider::new(Logger::new_root(Component::Formatter))
    }

    #[test]
    fn test_creates_and_caches_built_in_serializers() {
        let provider = provider();
        let int32 = EdmTypeReference::primitive(EdmPrimitiveKind::Int32, false);

        let first = provider.serializer_for(&int32).unwrap();
        let second = provider.serializer_for(&int32).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.edm_type(), &int32);

        // nullability is part of the cache key
        let nullable = EdmTypeReference::primitive(EdmPrimitiveKind::Int32, true);
        let third = provider.serializer_for(&nullable).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(provider.cached_len(), 2);
    }

    #[test]
    fn test_dispatches_on_type_kind() {
        let provider = provider();
        let address = Arc::new(
            EdmComplexType::new("Default", "Address")
                .add_primitive_property("City", EdmPrimitiveKind::String),
        );
        let complex = EdmTypeReference::complex(address, true);
        let collection = EdmTypeReference::collection(complex.clone(), false);

        let serializer = provider.serializer_for(&complex).unwrap();
        assert!(format!("{serializer:?}").contains("ComplexTypeSerializer"));
        let serializer = provider.serializer_for(&collection).unwrap();
        assert!(format!("{serializer:?}").contains("Collection(Default.Address)"));
    }

    #[test]
    fn test_unresolved_collections_are_unsupported() {
        let provider = provider();
        let broken = EdmTypeReference::new(
            EdmType::Collection(Arc::new(EdmCollectionType::unresolved())),
            true,
        );
        assert!(provider.serializer_for(&broken).is_none());
        assert!(provider.require_serializer(&broken).is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let provider = provider();
        let string = EdmTypeReference::primitive(EdmPrimitiveKind::String, true);
        let custom: Arc<dyn EdmTypeSerializer> =
            Arc::new(PrimitiveSerializer::new(string.clone()).unwrap());

        provider.register("Edm.String", custom.clone());
        let found = provider.serializer_for(&string).unwrap();
        assert!(Arc::ptr_eq(&found, &custom));

        assert!(provider.unregister("Edm.String").is_some());
        let found = provider.serializer_for(&string).unwrap();
        assert!(!Arc::ptr_eq(&found, &custom));
    }

    #[test]
    fn test_same_named_types_get_their_own_serializer() {
        let provider = provider();
        let city = EdmTypeReference::complex(
            Arc::new(
                EdmComplexType::new("NS", "Addr")
                    .add_primitive_property("City", EdmPrimitiveKind::String),
            ),
            true,
        );
        let zip = EdmTypeReference::complex(
            Arc::new(
                EdmComplexType::new("NS", "Addr")
                    .add_primitive_property("Zip", EdmPrimitiveKind::String),
            ),
            true,
        );

        let first = provider.serializer_for(&city).unwrap();
        let second = provider.serializer_for(&zip).unwrap();
        assert_eq!(first.edm_type(), &city);
        assert_eq!(second.edm_type(), &zip);

        let graph: GraphValue = PlainObject::new().with("Zip", "98052").into();
        let value = second
            .create_odata_value(&graph, &SerializerContext::new())
            .unwrap();
        let names: Vec<&str> = value
            .as_complex()
            .unwrap()
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zip"]);
        assert_eq!(
            value.as_complex().unwrap().property("Zip"),
            Some(&ODataValue::Primitive(PrimitiveValue::String("98052".into())))
        );

        // an equal definition reuses the cached serializer
        let zip_again = provider.serializer_for(&zip).unwrap();
        assert!(Arc::ptr_eq(&second, &zip_again));
    }

    #[test]
    fn test_cached_serializers_do_not_keep_the_provider_alive() {
        let provider = provider();
        let address = EdmTypeReference::complex(
            Arc::new(
                EdmComplexType::new("Default", "Address")
                    .add_primitive_property("City", EdmPrimitiveKind::String),
            ),
            false,
        );
        let collection = EdmTypeReference::collection(address.clone(), false);

        let complex = provider.serializer_for(&address).unwrap();
        provider.serializer_for(&collection).unwrap();
        assert_eq!(Arc::strong_count(&provider), 1);

        let weak = Arc::downgrade(&provider);
        drop(provider);
        assert!(weak.upgrade().is_none());

        // a serializer that outlives its provider cannot reach nested types
        let graph: GraphValue = PlainObject::new().with("City", "Redmond").into();
        let err = complex
            .create_odata_value(&graph, &SerializerContext::new())
            .unwrap_err();
        assert!(matches!(err, SerializerError::ProviderUnavailable));
    }
}
