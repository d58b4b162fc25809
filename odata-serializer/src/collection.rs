use std::fmt;
use std::sync::{Arc, Weak};

use odata_common::{Component, Logger};

use crate::context::SerializerContext;
use crate::edm::EdmTypeReference;
use crate::error::{Result, SerializerError};
use crate::graph::GraphValue;
use crate::metadata::add_type_name_annotation_as_needed;
use crate::traits::{EdmTypeSerializer, ProviderHandle, SerializerProvider};
use crate::value::{CollectionValue, ODataValue};

/// Renders lists as [`CollectionValue`]s, serializing each element with the
/// serializer registered for its type
pub struct CollectionSerializer {
    edm_type: EdmTypeReference,
    element_type: EdmTypeReference,
    provider: ProviderHandle,
    logger: Logger,
}

impl fmt::Debug for CollectionSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionSerializer")
            .field("collection_type", &self.edm_type.full_name())
            .finish()
    }
}

impl CollectionSerializer {
    /// Fails with `ArgumentInvalid("edm_type")` unless `edm_type` is a
    /// collection with a resolved element type.
    pub fn new(edm_type: EdmTypeReference, provider: Arc<dyn SerializerProvider>) -> Result<Self> {
        Self::with_provider(edm_type, ProviderHandle::Owned(provider))
    }

    pub(crate) fn cached(
        edm_type: EdmTypeReference,
        provider: Weak<dyn SerializerProvider>,
    ) -> Result<Self> {
        Self::with_provider(edm_type, ProviderHandle::Cached(provider))
    }

    fn with_provider(edm_type: EdmTypeReference, provider: ProviderHandle) -> Result<Self> {
        let collection = edm_type.as_collection().ok_or_else(|| {
            SerializerError::argument_invalid(
                "edm_type",
                format!("'{}' is not a collection type.", edm_type.full_name()),
            )
        })?;
        let element_type = collection.element_type().cloned().ok_or_else(|| {
            SerializerError::argument_invalid(
                "edm_type",
                "The element type of an EDM collection type cannot be null.",
            )
        })?;
        let logger = Logger::new_root(Component::Serializer).with_edm_type(edm_type.full_name());
        Ok(Self {
            edm_type,
            element_type,
            provider,
            logger,
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger
            .with_component(Component::Serializer)
            .with_edm_type(self.edm_type.full_name());
        self
    }

    pub fn collection_type(&self) -> &EdmTypeReference {
        &self.edm_type
    }

    pub fn element_type(&self) -> &EdmTypeReference {
        &self.element_type
    }

    /// Render `graph` as a collection value. A null graph yields an empty
    /// collection that still carries its type name.
    pub fn create_collection_value(
        &self,
        graph: &GraphValue,
        context: &SerializerContext,
    ) -> Result<CollectionValue> {
        let mut value = CollectionValue::new(format!("Collection({})", self.element_type.full_name()));

        match graph {
            GraphValue::Null => {}
            GraphValue::List(items) => {
                // looked up on first use so empty lists never consult the provider
                let mut element_serializer: Option<Arc<dyn EdmTypeSerializer>> = None;
                value.items.reserve(items.len());

                for item in items {
                    let serializer = match item.actual_edm_type() {
                        Some(actual) => self.provider.require_serializer(actual)?,
                        None => match &element_serializer {
                            Some(serializer) => serializer.clone(),
                            None => {
                                let serializer =
                                    self.provider.require_serializer(&self.element_type)?;
                                element_serializer = Some(serializer.clone());
                                serializer
                            }
                        },
                    };
                    value.items.push(serializer.create_odata_value(item, context)?);
                }
            }
            _ => {
                return Err(SerializerError::argument_invalid(
                    "graph",
                    "The argument must be enumerable.",
                ))
            }
        }

        add_type_name_annotation_as_needed(&mut value, context.metadata_level);
        self.logger
            .debug_args(format_args!("rendered {} items", value.items.len()));
        Ok(value)
    }
}

impl EdmTypeSerializer for CollectionSerializer {
    fn edm_type(&self) -> &EdmTypeReference {
        &self.edm_type
    }

    fn create_odata_value(
        &self,
        graph: &GraphValue,
        context: &SerializerContext,
    ) -> Result<ODataValue> {
        Ok(self.create_collection_value(graph, context)?.into())
    }
}
