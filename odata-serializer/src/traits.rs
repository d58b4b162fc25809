use std::fmt::Debug;
use std::sync::{Arc, Weak};

use crate::context::SerializerContext;
use crate::edm::EdmTypeReference;
use crate::error::{Result, SerializerError};
use crate::graph::GraphValue;
use crate::value::ODataValue;
use crate::writer::ODataWriter;

// ---------------------------------------------------------------------------
// Serializers
// ---------------------------------------------------------------------------

/// A serializer bound to one EDM type
pub trait EdmTypeSerializer: Debug + Send + Sync {
    /// The EDM type this serializer renders
    fn edm_type(&self) -> &EdmTypeReference;

    /// Render `graph` as a value of this serializer's type
    fn create_odata_value(
        &self,
        graph: &GraphValue,
        context: &SerializerContext,
    ) -> Result<ODataValue>;

    /// Render `graph` and write it through `writer` under the context's root
    /// element name. Writer failures propagate unchanged.
    fn write_object(
        &self,
        graph: &GraphValue,
        writer: &mut dyn ODataWriter,
        context: &SerializerContext,
    ) -> Result<()> {
        let root_name = context.require_root_element_name()?;
        let value = self.create_odata_value(graph, context)?;
        writer.write_property(root_name, &value)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Lookup from EDM types to serializers
pub trait SerializerProvider: Send + Sync {
    /// `None` means the type is unsupported
    fn serializer_for(&self, edm_type: &EdmTypeReference) -> Option<Arc<dyn EdmTypeSerializer>>;

    /// Like [`SerializerProvider::serializer_for`], turning a miss into
    /// [`SerializerError::UnsupportedType`] named after the type.
    fn require_serializer(&self, edm_type: &EdmTypeReference) -> Result<Arc<dyn EdmTypeSerializer>> {
        self.serializer_for(edm_type)
            .ok_or_else(|| SerializerError::unsupported_type(edm_type.full_name()))
    }
}

/// How a structured serializer reaches the provider for its nested types.
///
/// Serializers cached by a provider hold it weakly so the cache never keeps
/// its owner alive.
#[derive(Clone)]
pub(crate) enum ProviderHandle {
    Owned(Arc<dyn SerializerProvider>),
    Cached(Weak<dyn SerializerProvider>),
}

impl ProviderHandle {
    pub(crate) fn require_serializer(
        &self,
        edm_type: &EdmTypeReference,
    ) -> Result<Arc<dyn EdmTypeSerializer>> {
        match self {
            ProviderHandle::Owned(provider) => provider.require_serializer(edm_type),
            ProviderHandle::Cached(provider) => provider
                .upgrade()
                .ok_or(SerializerError::ProviderUnavailable)?
                .require_serializer(edm_type),
        }
    }
}
