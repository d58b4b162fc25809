use std::sync::Arc;

use odata_common::{Component, Logger};

use crate::context::{SerializerContext, SerializerSettings};
use crate::edm::EdmTypeReference;
use crate::error::{Result, WriteError};
use crate::graph::GraphValue;
use crate::registry::DefaultSerializerProvider;
use crate::traits::SerializerProvider;
use crate::writer::{CborWriter, JsonLightWriter, ODataWriter};

/// Entry point bundling a serializer provider with formatter settings
#[derive(Clone)]
pub struct ODataFormatter {
    provider: Arc<dyn SerializerProvider>,
    settings: SerializerSettings,
    logger: Logger,
}

impl ODataFormatter {
    pub fn new(provider: Arc<dyn SerializerProvider>, settings: SerializerSettings) -> Self {
        Self {
            provider,
            settings,
            logger: Logger::new_root(Component::Formatter),
        }
    }

    /// Formatter backed by a fresh [`DefaultSerializerProvider`]
    pub fn with_default_provider(settings: SerializerSettings) -> Self {
        let logger = Logger::new_root(Component::Formatter);
        let provider = DefaultSerializerProvider::new(logger.clone());
        Self {
            provider,
            settings,
            logger,
        }
    }

    pub fn provider(&self) -> &Arc<dyn SerializerProvider> {
        &self.provider
    }

    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    /// A fresh per-write context seeded from the settings
    pub fn context(&self) -> SerializerContext {
        self.settings.context()
    }

    /// Serialize `graph` as `edm_type` and write it through `writer`
    pub fn write_value(
        &self,
        edm_type: &EdmTypeReference,
        graph: &GraphValue,
        writer: &mut dyn ODataWriter,
        context: &SerializerContext,
    ) -> Result<()> {
        let serializer = self.provider.require_serializer(edm_type)?;

        let logger = match &context.request_path {
            Some(path) => self.logger.with_request_path(path.as_str()),
            None => self.logger.clone(),
        };
        logger.debug_args(format_args!(
            "writing {} with metadata level {}",
            edm_type.full_name(),
            context.metadata_level
        ));

        serializer.write_object(graph, writer, context)
    }

    pub fn to_json_string(&self, edm_type: &EdmTypeReference, graph: &GraphValue) -> Result<String> {
        let mut writer = JsonLightWriter::new(Vec::new())
            .pretty(self.settings.pretty)
            .with_logger(self.logger.clone());
        self.write_value(edm_type, graph, &mut writer, &self.context())?;
        let text = String::from_utf8(writer.into_inner())
            .map_err(|e| WriteError::State(e.to_string()))?;
        Ok(text)
    }

    pub fn to_cbor_bytes(&self, edm_type: &EdmTypeReference, graph: &GraphValue) -> Result<Vec<u8>> {
        let mut writer = CborWriter::new(Vec::new()).with_logger(self.logger.clone());
        self.write_value(edm_type, graph, &mut writer, &self.context())?;
        Ok(writer.into_inner())
    }
}
