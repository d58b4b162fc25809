use thiserror::Error;

/// Failures raised while emitting a value through an [`crate::writer::ODataWriter`]
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    #[error("Writer state error: {0}")]
    State(String),
}

/// Error types for the odata-serializer crate
#[derive(Error, Debug)]
pub enum SerializerError {
    #[error("Value cannot be null. Parameter name: {param}")]
    ArgumentNull { param: String },

    #[error("{message} Parameter name: {param}")]
    ArgumentInvalid { param: String, message: String },

    #[error("'{type_name}' cannot be serialized using the OData formatter.")]
    UnsupportedType { type_name: String },

    #[error("Cannot convert a value of kind '{actual}' to '{expected}'.")]
    TypeMismatch { expected: String, actual: String },

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("The serializer provider has been dropped.")]
    ProviderUnavailable,
}

impl SerializerError {
    pub fn argument_null(param: impl Into<String>) -> Self {
        SerializerError::ArgumentNull {
            param: param.into(),
        }
    }

    pub fn argument_invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        SerializerError::ArgumentInvalid {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        SerializerError::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        SerializerError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Name of the offending parameter for argument errors
    pub fn param(&self) -> Option<&str> {
        match self {
            SerializerError::ArgumentNull { param }
            | SerializerError::ArgumentInvalid { param, .. } => Some(param),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SerializerError {
    fn from(err: std::io::Error) -> Self {
        SerializerError::Write(WriteError::Io(err))
    }
}

/// Result type for odata-serializer operations
pub type Result<T> = std::result::Result<T, SerializerError>;
