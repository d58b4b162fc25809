// Logging utilities for the OData serializer workspace
//
// This module provides:
// - Component-based structured logging
// - Logger inheritance from a root component
// - Request path and EDM type tracing

use log::{debug, info, warn};
use std::fmt::{self, Arguments, Display, Formatter};

/// Predefined components for logging categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Formatter,
    Provider,
    Serializer,
    Writer,
    Settings,
    Custom(&'static str),
}

impl Component {
    /// Get the string representation of the component
    pub fn as_str(&self) -> &str {
        match self {
            Component::Formatter => "Formatter",
            Component::Provider => "Provider",
            Component::Serializer => "Serializer",
            Component::Writer => "Writer",
            Component::Settings => "Settings",
            Component::Custom(name) => name,
        }
    }
}

// Display helpers so the *_args variants never build a prefix String
struct ComponentPrefixDisplay {
    parent: Option<Component>,
    component: Component,
}

impl Display for ComponentPrefixDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) if parent != self.component => {
                write!(f, "{}.{}", parent.as_str(), self.component.as_str())
            }
            _ => write!(f, "{}", self.component.as_str()),
        }
    }
}

struct MaybeTagDisplay<'a>(&'static str, Option<&'a str>);

impl Display for MaybeTagDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.1 {
            Some(value) => write!(f, "|{}={value}", self.0),
            None => Ok(()),
        }
    }
}

/// A component-scoped logger over the `log` facade
#[derive(Clone, Debug)]
pub struct Logger {
    /// Component this logger is for
    component: Component,
    /// Parent component for hierarchical logging (if any)
    parent_component: Option<Component>,
    /// Request path the current write belongs to
    request_path: Option<String>,
    /// Full name of the EDM type being serialized
    edm_type: Option<String>,
}

impl Logger {
    /// Create a new root logger for a specific component
    pub fn new_root(component: Component) -> Self {
        Self {
            component,
            parent_component: None,
            request_path: None,
            edm_type: None,
        }
    }

    /// Create a child logger for a different component, keeping the tracing context
    pub fn with_component(&self, component: Component) -> Self {
        Self {
            component,
            parent_component: Some(self.component),
            request_path: self.request_path.clone(),
            edm_type: self.edm_type.clone(),
        }
    }

    /// Create a logger tagged with a request path
    pub fn with_request_path(&self, path: impl Into<String>) -> Self {
        Self {
            request_path: Some(path.into()),
            ..self.clone()
        }
    }

    /// Create a logger tagged with the EDM type being processed
    pub fn with_edm_type(&self, type_name: impl Into<String>) -> Self {
        Self {
            edm_type: Some(type_name.into()),
            ..self.clone()
        }
    }

    pub fn component(&self) -> Component {
        self.component
    }

    /// Get a reference to the request path if available
    pub fn request_path(&self) -> Option<&str> {
        self.request_path.as_deref()
    }

    /// Get a reference to the EDM type name if available
    pub fn edm_type(&self) -> Option<&str> {
        self.edm_type.as_deref()
    }

    /// Full prefix: component, then request path and EDM type when present
    pub fn prefix(&self) -> String {
        format!(
            "{}{}{}",
            ComponentPrefixDisplay {
                parent: self.parent_component,
                component: self.component,
            },
            MaybeTagDisplay("request", self.request_path()),
            MaybeTagDisplay("type", self.edm_type()),
        )
    }

    /// Log a debug message
    pub fn debug(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Debug) {
            debug!("[{}] {}", self.prefix(), message.into());
        }
    }

    /// Log a debug message using fmt::Arguments
    pub fn debug_args(&self, args: Arguments) {
        if log::log_enabled!(log::Level::Debug) {
            debug!(
                "[{}{}{}] {}",
                ComponentPrefixDisplay {
                    parent: self.parent_component,
                    component: self.component,
                },
                MaybeTagDisplay("request", self.request_path()),
                MaybeTagDisplay("type", self.edm_type()),
                args
            );
        }
    }

    /// Log an info message using fmt::Arguments
    pub fn info_args(&self, args: Arguments) {
        if log::log_enabled!(log::Level::Info) {
            info!(
                "[{}{}{}] {}",
                ComponentPrefixDisplay {
                    parent: self.parent_component,
                    component: self.component,
                },
                MaybeTagDisplay("request", self.request_path()),
                MaybeTagDisplay("type", self.edm_type()),
                args
            );
        }
    }

    /// Log a warning message
    pub fn warn(&self, message: impl Into<String>) {
        if log::log_enabled!(log::Level::Warn) {
            warn!("[{}] {}", self.prefix(), message.into());
        }
    }
}

/// Logging context for types that own a [`Logger`]
pub trait LoggingContext {
    /// Get the logger
    fn logger(&self) -> &Logger;

    /// Identifier appended to the logger prefix, e.g. a type name
    fn log_scope(&self) -> Option<&str> {
        None
    }

    fn log_prefix(&self) -> String {
        match self.log_scope() {
            Some(scope) => format!("{}:{}", self.logger().prefix(), scope),
            None => self.logger().prefix(),
        }
    }

    /// Log at debug level
    fn log_debug(&self, message: String) {
        if log::log_enabled!(log::Level::Debug) {
            debug!("[{}] {}", self.log_prefix(), message);
        }
    }

    /// Log at info level
    fn log_info(&self, message: String) {
        if log::log_enabled!(log::Level::Info) {
            info!("[{}] {}", self.log_prefix(), message);
        }
    }

    /// Log at warning level
    fn log_warn(&self, message: String) {
        if log::log_enabled!(log::Level::Warn) {
            warn!("[{}] {}", self.log_prefix(), message);
        }
    }
}
