use std::io::Write;

use odata_common::{Component, Logger};

use super::payload::RootPayload;
use super::ODataWriter;
use crate::error::WriteError;
use crate::value::ODataValue;

/// Writes one root value as a JSON light object to an `io::Write` sink
pub struct JsonLightWriter<W: Write> {
    inner: W,
    pretty: bool,
    written: bool,
    logger: Logger,
}

impl<W: Write> JsonLightWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pretty: false,
            written: false,
            logger: Logger::new_root(Component::Writer),
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger.with_component(Component::Writer);
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ODataWriter for JsonLightWriter<W> {
    fn write_property(&mut self, name: &str, value: &ODataValue) -> Result<(), WriteError> {
        if self.written {
            return Err(WriteError::State(
                "a JSON light payload holds a single root value".to_string(),
            ));
        }

        let payload = RootPayload { name, value };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&payload)?
        } else {
            serde_json::to_vec(&payload)?
        };

        // once bytes may have reached the sink the payload is closed
        self.written = true;
        self.inner.write_all(&bytes)?;
        self.inner.flush()?;

        self.logger
            .debug_args(format_args!("wrote JSON light root '{name}'"));
        Ok(())
    }
}
