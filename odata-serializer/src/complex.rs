use std::fmt;
use std::sync::{Arc, Weak};

use odata_common::{Component, Logger};

use crate::context::SerializerContext;
use crate::edm::{EdmComplexType, EdmTypeReference};
use crate::error::{Result, SerializerError};
use crate::graph::GraphValue;
use crate::metadata::add_type_name_annotation_as_needed;
use crate::traits::{EdmTypeSerializer, ProviderHandle, SerializerProvider};
use crate::value::{ComplexValue, ODataProperty, ODataValue};

static NULL_GRAPH: GraphValue = GraphValue::Null;

/// Renders structured objects as [`ComplexValue`]s by walking the declared
/// properties of one complex type
pub struct ComplexTypeSerializer {
    edm_type: EdmTypeReference,
    complex_type: Arc<EdmComplexType>,
    provider: ProviderHandle,
    logger: Logger,
}

impl fmt::Debug for ComplexTypeSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplexTypeSerializer")
            .field("complex_type", &self.complex_type.full_name())
            .field("nullable", &self.edm_type.is_nullable())
            .finish()
    }
}

impl ComplexTypeSerializer {
    pub fn new(edm_type: EdmTypeReference, provider: Arc<dyn SerializerProvider>) -> Result<Self> {
        Self::with_provider(edm_type, ProviderHandle::Owned(provider))
    }

    /// Serializer cached by `provider` itself
    pub(crate) fn cached(
        edm_type: EdmTypeReference,
        provider: Weak<dyn SerializerProvider>,
    ) -> Result<Self> {
        Self::with_provider(edm_type, ProviderHandle::Cached(provider))
    }

    fn with_provider(edm_type: EdmTypeReference, provider: ProviderHandle) -> Result<Self> {
        let complex_type = edm_type.as_complex().cloned().ok_or_else(|| {
            SerializerError::argument_invalid(
                "edm_type",
                format!("'{}' is not a complex type.", edm_type.full_name()),
            )
        })?;
        let logger =
            Logger::new_root(Component::Serializer).with_edm_type(complex_type.full_name());
        Ok(Self {
            edm_type,
            complex_type,
            provider,
            logger,
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger
            .with_component(Component::Serializer)
            .with_edm_type(self.complex_type.full_name());
        self
    }

    /// The complex type reference this serializer was built for
    pub fn complex_type(&self) -> &EdmTypeReference {
        &self.edm_type
    }

    /// Render `graph` as a complex value.
    ///
    /// Returns `Ok(None)` for a null graph and for metadata-described objects
    /// that represent an explicit null.
    pub fn create_complex_value(
        &self,
        graph: &GraphValue,
        context: &SerializerContext,
    ) -> Result<Option<ComplexValue>> {
        if graph.is_null() {
            return Ok(None);
        }

        let object = graph.as_structured().ok_or_else(|| {
            SerializerError::argument_invalid(
                "graph",
                format!(
                    "A value of kind '{}' cannot be written as complex type '{}'.",
                    graph.kind_name(),
                    self.complex_type.full_name()
                ),
            )
        })?;
        if object.is_null() {
            return Ok(None);
        }

        let mut value = ComplexValue::new(self.complex_type.full_name());
        for property in self.complex_type.structural_properties() {
            let serializer = self.provider.require_serializer(&property.type_ref)?;
            let property_graph = object
                .try_get_property(&property.name)
                .unwrap_or(&NULL_GRAPH);

            if property_graph.is_null()
                && !property.type_ref.is_nullable()
                && property.type_ref.as_collection().is_none()
            {
                return Err(SerializerError::argument_null(property.name.clone()));
            }

            let rendered = serializer
                .create_odata_value(property_graph, context)
                .map_err(|err| with_property_name(err, &property.name))?;
            value
                .properties
                .push(ODataProperty::new(property.name.clone(), rendered));
        }

        add_type_name_annotation_as_needed(&mut value, context.metadata_level);
        self.logger.debug_args(format_args!(
            "rendered {} properties at {}",
            value.properties.len(),
            context.metadata_level
        ));
        Ok(Some(value))
    }
}

// Argument errors raised against a nested `graph` are reported against the property
fn with_property_name(err: SerializerError, property: &str) -> SerializerError {
    match err {
        SerializerError::ArgumentNull { param } if param == "graph" => {
            SerializerError::argument_null(property)
        }
        SerializerError::ArgumentInvalid { param, message } if param == "graph" => {
            SerializerError::argument_invalid(property, message)
        }
        other => other,
    }
}

impl EdmTypeSerializer for ComplexTypeSerializer {
    fn edm_type(&self) -> &EdmTypeReference {
        &self.edm_type
    }

    fn create_odata_value(
        &self,
        graph: &GraphValue,
        context: &SerializerContext,
    ) -> Result<ODataValue> {
        Ok(self.create_complex_value(graph, context)?.into())
    }
}
