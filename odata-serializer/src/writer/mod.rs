//! Writers that emit a named root value.
//!
//! [`JsonLightWriter`] and [`CborWriter`] share one payload shape, produced
//! by the serde implementations in [`payload`]. [`BufferedWriter`] keeps the
//! values in memory.

mod cbor;
mod json;
pub mod payload;

pub use cbor::CborWriter;
pub use json::JsonLightWriter;

use crate::error::WriteError;
use crate::value::ODataValue;

/// Sink for a named root value
pub trait ODataWriter {
    fn write_property(&mut self, name: &str, value: &ODataValue) -> Result<(), WriteError>;
}

/// Collects written values in memory, in write order
#[derive(Debug, Default)]
pub struct BufferedWriter {
    entries: Vec<(String, ODataValue)>,
}

impl BufferedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(String, ODataValue)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ODataValue> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| value)
    }

    pub fn take(&mut self) -> Vec<(String, ODataValue)> {
        std::mem::take(&mut self.entries)
    }
}

impl ODataWriter for BufferedWriter {
    fn write_property(&mut self, name: &str, value: &ODataValue) -> Result<(), WriteError> {
        self.entries.push((name.to_string(), value.clone()));
        Ok(())
    }
}
