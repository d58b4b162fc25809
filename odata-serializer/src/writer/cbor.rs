use std::io::Write;

use odata_common::{Component, Logger};

use super::payload::RootPayload;
use super::ODataWriter;
use crate::error::WriteError;
use crate::value::ODataValue;

/// Writes root values as CBOR maps, one map per call
pub struct CborWriter<W: Write> {
    inner: W,
    logger: Logger,
}

impl<W: Write> CborWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            logger: Logger::new_root(Component::Writer),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger.with_component(Component::Writer);
        self
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ODataWriter for CborWriter<W> {
    fn write_property(&mut self, name: &str, value: &ODataValue) -> Result<(), WriteError> {
        serde_cbor::to_writer(&mut self.inner, &RootPayload { name, value })?;
        self.inner.flush()?;
        self.logger
            .debug_args(format_args!("wrote CBOR root '{name}'"));
        Ok(())
    }
}
