//! Metadata verbosity levels and the type-name annotation policy shared by
//! the complex and collection serializers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SerializerError;
use crate::value::{SerializationTypeNameAnnotation, TypeNameAnnotated};

/// Caller-selected verbosity controlling whether type names are written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataLevel {
    #[default]
    Default,
    #[serde(rename = "minimalmetadata")]
    MinimalMetadata,
    #[serde(rename = "fullmetadata")]
    FullMetadata,
    #[serde(rename = "nometadata")]
    NoMetadata,
}

impl MetadataLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataLevel::Default => "default",
            MetadataLevel::MinimalMetadata => "minimalmetadata",
            MetadataLevel::FullMetadata => "fullmetadata",
            MetadataLevel::NoMetadata => "nometadata",
        }
    }
}

impl fmt::Display for MetadataLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the JSON light media type parameter, with or without the
/// `odata=` prefix, e.g. `odata=fullmetadata`.
impl FromStr for MetadataLevel {
    type Err = SerializerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = match trimmed.split_once('=') {
            Some((key, value)) if key.trim().eq_ignore_ascii_case("odata") => value.trim(),
            Some(_) => {
                return Err(SerializerError::argument_invalid(
                    "metadata_level",
                    format!("Unknown media type parameter '{trimmed}'."),
                ))
            }
            None => trimmed,
        };

        match value.to_ascii_lowercase().as_str() {
            "default" | "" => Ok(MetadataLevel::Default),
            "minimalmetadata" => Ok(MetadataLevel::MinimalMetadata),
            "fullmetadata" => Ok(MetadataLevel::FullMetadata),
            "nometadata" => Ok(MetadataLevel::NoMetadata),
            other => Err(SerializerError::argument_invalid(
                "metadata_level",
                format!("'{other}' is not a supported metadata level."),
            )),
        }
    }
}

/// Full metadata wants the type explicit; no metadata wants the absence of a
/// type name recorded so consumers do not infer one.
pub fn should_add_type_name_annotation(level: MetadataLevel) -> bool {
    match level {
        MetadataLevel::Default | MetadataLevel::MinimalMetadata => false,
        MetadataLevel::FullMetadata | MetadataLevel::NoMetadata => true,
    }
}

pub fn should_suppress_type_name_serialization(level: MetadataLevel) -> bool {
    matches!(level, MetadataLevel::NoMetadata)
}

/// Attach a [`SerializationTypeNameAnnotation`] when the metadata level asks
/// for one. Under [`MetadataLevel::NoMetadata`] the annotation carries no
/// type name.
pub fn add_type_name_annotation_as_needed<V: TypeNameAnnotated + ?Sized>(
    value: &mut V,
    level: MetadataLevel,
) {
    if !should_add_type_name_annotation(level) {
        return;
    }

    let type_name = if should_suppress_type_name_serialization(level) {
        None
    } else {
        value.type_name().map(str::to_string)
    };

    value.set_annotation(SerializationTypeNameAnnotation { type_name });
}
