use base64::Engine;
use chrono::DateTime;
use odata_common::{Component, Logger};
use uuid::Uuid;

use crate::context::SerializerContext;
use crate::edm::{EdmPrimitiveKind, EdmTypeReference};
use crate::error::{Result, SerializerError};
use crate::graph::{GraphValue, PrimitiveValue};
use crate::traits::EdmTypeSerializer;
use crate::value::ODataValue;

/// Renders primitive graphs, coercing them to the declared primitive kind
#[derive(Debug, Clone)]
pub struct PrimitiveSerializer {
    edm_type: EdmTypeReference,
    kind: EdmPrimitiveKind,
    logger: Logger,
}

impl PrimitiveSerializer {
    pub fn new(edm_type: EdmTypeReference) -> Result<Self> {
        let kind = edm_type.as_primitive().ok_or_else(|| {
            SerializerError::argument_invalid(
                "edm_type",
                format!("'{}' is not a primitive type.", edm_type.full_name()),
            )
        })?;
        Ok(Self {
            edm_type,
            kind,
            logger: Logger::new_root(Component::Serializer),
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger
            .with_component(Component::Serializer)
            .with_edm_type(self.kind.full_name());
        self
    }

    pub fn kind(&self) -> EdmPrimitiveKind {
        self.kind
    }

    /// Coerce a primitive payload to this serializer's kind
    pub fn create_primitive_value(&self, graph: &GraphValue) -> Result<Option<PrimitiveValue>> {
        match graph {
            GraphValue::Null if self.edm_type.is_nullable() => Ok(None),
            GraphValue::Null => Err(SerializerError::argument_null("graph")),
            GraphValue::Primitive(value) => coerce(self.kind, value).map(Some),
            GraphValue::List(items) if self.kind == EdmPrimitiveKind::Binary => {
                bytes_from_list(items).map(|bytes| Some(PrimitiveValue::Binary(bytes)))
            }
            other => Err(self.mismatch(other.kind_name())),
        }
    }

    fn mismatch(&self, actual: &str) -> SerializerError {
        SerializerError::type_mismatch(self.kind.full_name(), actual)
    }
}

impl EdmTypeSerializer for PrimitiveSerializer {
    fn edm_type(&self) -> &EdmTypeReference {
        &self.edm_type
    }

    fn create_odata_value(
        &self,
        graph: &GraphValue,
        _context: &SerializerContext,
    ) -> Result<ODataValue> {
        let value = self.create_primitive_value(graph)?;
        if value.is_none() {
            self.logger.debug("null primitive rendered");
        }
        Ok(value.map(ODataValue::Primitive).unwrap_or_default())
    }
}

fn int_in_range(kind: EdmPrimitiveKind, value: i64) -> Result<PrimitiveValue> {
    let (min, max) = match kind {
        EdmPrimitiveKind::Byte => (u8::MIN as i64, u8::MAX as i64),
        EdmPrimitiveKind::SByte => (i8::MIN as i64, i8::MAX as i64),
        EdmPrimitiveKind::Int16 => (i16::MIN as i64, i16::MAX as i64),
        EdmPrimitiveKind::Int32 => (i32::MIN as i64, i32::MAX as i64),
        _ => (i64::MIN, i64::MAX),
    };
    if (min..=max).contains(&value) {
        Ok(PrimitiveValue::Int(value))
    } else {
        Err(SerializerError::argument_invalid(
            "graph",
            format!("The value {value} is out of range for '{}'.", kind.full_name()),
        ))
    }
}

fn coerce(kind: EdmPrimitiveKind, value: &PrimitiveValue) -> Result<PrimitiveValue> {
    use EdmPrimitiveKind as K;
    use PrimitiveValue as P;

    match (kind, value) {
        (K::Boolean, P::Boolean(_))
        | (K::String, P::String(_))
        | (K::Binary, P::Binary(_))
        | (K::Guid, P::Guid(_))
        | (K::DateTimeOffset, P::DateTimeOffset(_))
        | (K::Double, P::Float(_)) => Ok(value.clone()),
        (K::Byte | K::SByte | K::Int16 | K::Int32 | K::Int64, P::Int(i)) => int_in_range(kind, *i),
        (K::Double, P::Int(i)) => Ok(P::Float(*i as f64)),
        (K::Single, P::Float(f)) => Ok(P::Float(*f as f32 as f64)),
        (K::Single, P::Int(i)) => Ok(P::Float(*i as f32 as f64)),
        (K::Guid, P::String(s)) => Uuid::parse_str(s).map(P::Guid).map_err(|e| {
            SerializerError::argument_invalid("graph", format!("'{s}' is not a valid Guid: {e}"))
        }),
        (K::DateTimeOffset, P::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(P::DateTimeOffset)
            .map_err(|e| {
                SerializerError::argument_invalid(
                    "graph",
                    format!("'{s}' is not a valid DateTimeOffset: {e}"),
                )
            }),
        (K::Binary, P::String(s)) => base64::engine::general_purpose::STANDARD
            .decode(s)
            .map(P::Binary)
            .map_err(|e| {
                SerializerError::argument_invalid("graph", format!("invalid base64 payload: {e}"))
            }),
        (kind, other) => Err(SerializerError::type_mismatch(
            kind.full_name(),
            other.kind_name(),
        )),
    }
}

// serde renders Vec<u8> as a list of small integers
fn bytes_from_list(items: &[GraphValue]) -> Result<Vec<u8>> {
    items
        .iter()
        .map(|item| match item {
            GraphValue::Primitive(PrimitiveValue::Int(i)) => u8::try_from(*i).map_err(|_| {
                SerializerError::argument_invalid(
                    "graph",
                    format!("The value {i} is out of range for 'Edm.Byte'."),
                )
            }),
            other => Err(SerializerError::type_mismatch(
                EdmPrimitiveKind::Binary.full_name(),
                other.kind_name(),
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serializer(kind: EdmPrimitiveKind, nullable: bool) -> PrimitiveSerializer {
        PrimitiveSerializer::new(EdmTypeReference::primitive(kind, nullable)).unwrap()
    }

    fn render(kind: EdmPrimitiveKind, graph: impl Into<GraphValue>) -> Result<ODataValue> {
        serializer(kind, true).create_odata_value(&graph.into(), &SerializerContext::new())
    }

    #[test]
    fn test_integers_are_range_checked() {
        assert_eq!(
            render(EdmPrimitiveKind::Int32, 42).unwrap(),
            ODataValue::Primitive(PrimitiveValue::Int(42))
        );
        let err = render(EdmPrimitiveKind::Byte, 256).unwrap_err();
        assert_eq!(err.param(), Some("graph"));
        assert!(render(EdmPrimitiveKind::SByte, -128).is_ok());
    }

    #[test]
    fn test_strings_parse_into_guid_and_datetime() {
        let guid = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(
            render(EdmPrimitiveKind::Guid, guid).unwrap(),
            ODataValue::Primitive(PrimitiveValue::Guid(Uuid::parse_str(guid).unwrap()))
        );

        let value = render(EdmPrimitiveKind::DateTimeOffset, "2013-01-25T09:50:00+01:00").unwrap();
        match value {
            ODataValue::Primitive(PrimitiveValue::DateTimeOffset(dt)) => {
                assert_eq!(dt.offset().local_minus_utc(), 3600)
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(render(EdmPrimitiveKind::Guid, "not-a-guid").is_err());
    }

    #[test]
    fn test_binary_accepts_byte_lists_and_base64() {
        let expected = ODataValue::Primitive(PrimitiveValue::Binary(vec![1, 2, 3]));
        assert_eq!(render(EdmPrimitiveKind::Binary, vec![1, 2, 3]).unwrap(), expected);
        assert_eq!(render(EdmPrimitiveKind::Binary, "AQID").unwrap(), expected);
        assert!(render(EdmPrimitiveKind::Binary, vec![300]).is_err());
    }

    #[test]
    fn test_wrong_shapes_are_type_mismatches() {
        let err = render(EdmPrimitiveKind::Boolean, "yes").unwrap_err();
        assert!(matches!(
            err,
            SerializerError::TypeMismatch { ref expected, ref actual }
                if expected == "Edm.Boolean" && actual == "String"
        ));
        assert!(matches!(
            render(EdmPrimitiveKind::Int32, vec![1]).unwrap_err(),
            SerializerError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_null_respects_nullability() {
        assert_eq!(render(EdmPrimitiveKind::String, GraphValue::Null).unwrap(), ODataValue::Null);

        let err = serializer(EdmPrimitiveKind::Int32, false)
            .create_odata_value(&GraphValue::Null, &SerializerContext::new())
            .unwrap_err();
        assert!(matches!(err, SerializerError::ArgumentNull { .. }));
    }

    #[test]
    fn test_rejects_non_primitive_types() {
        let collection = EdmTypeReference::collection(
            EdmTypeReference::primitive(EdmPrimitiveKind::Int32, false),
            false,
        );
        let err = PrimitiveSerializer::new(collection).unwrap_err();
        assert_eq!(err.param(), Some("edm_type"));
    }
}
