use std::path::Path;

use odata_common::{Component, Logger};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SerializerError};
use crate::metadata::MetadataLevel;

/// Per-write options handed to every serializer call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SerializerContext {
    pub metadata_level: MetadataLevel,
    pub root_element_name: Option<String>,
    /// Request path used to tag log output
    pub request_path: Option<String>,
}

impl SerializerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata_level(mut self, level: MetadataLevel) -> Self {
        self.metadata_level = level;
        self
    }

    pub fn with_root_element_name(mut self, name: impl Into<String>) -> Self {
        self.root_element_name = Some(name.into());
        self
    }

    pub fn with_request_path(mut self, path: impl Into<String>) -> Self {
        self.request_path = Some(path.into());
        self
    }

    /// Root name required by `write_object`
    pub fn require_root_element_name(&self) -> Result<&str> {
        self.root_element_name.as_deref().ok_or_else(|| {
            SerializerError::argument_invalid(
                "write_context",
                "The 'root_element_name' property is required on 'SerializerContext'.",
            )
        })
    }
}

/// Formatter-wide defaults, loadable from JSON
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerSettings {
    pub metadata_level: MetadataLevel,
    pub root_element_name: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            metadata_level: MetadataLevel::MinimalMetadata,
            root_element_name: Some("value".to_string()),
            pretty: false,
        }
    }
}

impl SerializerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SerializerError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let logger = Logger::new_root(Component::Settings);
        let settings = std::fs::read_to_string(path)
            .map_err(|e| SerializerError::Config(format!("failed to read {}: {e}", path.display())))
            .and_then(|text| Self::from_json_str(&text));

        match &settings {
            Ok(settings) => logger.info_args(format_args!(
                "loaded {} (metadata level {})",
                path.display(),
                settings.metadata_level
            )),
            Err(err) => logger.warn(format!("rejected {}: {err}", path.display())),
        }
        settings
    }

    /// Context for one write, seeded from these settings
    pub fn context(&self) -> SerializerContext {
        SerializerContext {
            metadata_level: self.metadata_level,
            root_element_name: self.root_element_name.clone(),
            request_path: None,
        }
    }
}
