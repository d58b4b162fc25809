#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use odata_common::{Component, Logger};
use odata_serializer::{
    ComplexValue, DefaultSerializerProvider, EdmComplexType, EdmModel, EdmPrimitiveKind,
    EdmTypeReference, EdmTypeSerializer, GraphValue, ODataValue, Result, SerializerContext,
    SerializerProvider,
};
use serde::Serialize;

/// Address-like payload used across the serializer tests
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,
}

pub fn sample_address() -> Address {
    Address {
        street: "One Microsoft Way".to_string(),
        city: "Redmond".to_string(),
        state: "Washington".to_string(),
        country: "United States".to_string(),
        zip_code: "98052".to_string(),
    }
}

/// Model with `Default.Address` declared
pub fn customer_order_model() -> EdmModel {
    let mut model = EdmModel::new();
    model.add_complex_type(
        EdmComplexType::new("Default", "Address")
            .add_primitive_property("Street", EdmPrimitiveKind::String)
            .add_primitive_property("City", EdmPrimitiveKind::String)
            .add_primitive_property("State", EdmPrimitiveKind::String)
            .add_primitive_property("Country", EdmPrimitiveKind::String)
            .add_primitive_property("ZipCode", EdmPrimitiveKind::String),
    );
    model
}

pub fn address_type(nullable: bool) -> EdmTypeReference {
    let address = customer_order_model()
        .find_declared_type("Default.Address")
        .expect("Default.Address is declared");
    EdmTypeReference::complex(address, nullable)
}

pub fn int32_collection_type() -> EdmTypeReference {
    EdmTypeReference::collection(
        EdmTypeReference::primitive(EdmPrimitiveKind::Int32, false),
        false,
    )
}

pub fn default_provider() -> Arc<DefaultSerializerProvider> {
    odata_common::init_test_logging();
    DefaultSerializerProvider::new(Logger::new_root(Component::Custom("Test")))
}

/// Delegates to a [`DefaultSerializerProvider`] but reports the listed types
/// as unsupported
pub struct RestrictedProvider {
    inner: Arc<DefaultSerializerProvider>,
    unsupported: HashSet<String>,
}

impl RestrictedProvider {
    pub fn new(unsupported: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            inner: default_provider(),
            unsupported: unsupported.iter().map(|s| s.to_string()).collect(),
        })
    }
}

impl SerializerProvider for RestrictedProvider {
    fn serializer_for(&self, edm_type: &EdmTypeReference) -> Option<Arc<dyn EdmTypeSerializer>> {
        if self.unsupported.contains(&edm_type.full_name()) {
            return None;
        }
        self.inner.serializer_for(edm_type)
    }
}

/// Provider that knows no types at all
pub struct EmptyProvider;

impl SerializerProvider for EmptyProvider {
    fn serializer_for(&self, _edm_type: &EdmTypeReference) -> Option<Arc<dyn EdmTypeSerializer>> {
        None
    }
}

/// Serializer that records every graph it is asked to render and answers with
/// a fixed value
#[derive(Debug)]
pub struct RecordingSerializer {
    edm_type: EdmTypeReference,
    response: ODataValue,
    pub calls: Mutex<Vec<GraphValue>>,
}

impl RecordingSerializer {
    pub fn new(edm_type: EdmTypeReference, response: ODataValue) -> Arc<Self> {
        Arc::new(Self {
            edm_type,
            response,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn complex(edm_type: EdmTypeReference) -> Arc<Self> {
        let response = ODataValue::Complex(ComplexValue::new(edm_type.full_name()));
        Self::new(edm_type, response)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl EdmTypeSerializer for RecordingSerializer {
    fn edm_type(&self) -> &EdmTypeReference {
        &self.edm_type
    }

    fn create_odata_value(
        &self,
        graph: &GraphValue,
        _context: &SerializerContext,
    ) -> Result<ODataValue> {
        self.calls.lock().unwrap().push(graph.clone());
        Ok(self.response.clone())
    }
}

/// Provider answering every lookup with one serializer
pub struct SingleSerializerProvider(pub Arc<dyn EdmTypeSerializer>);

impl SerializerProvider for SingleSerializerProvider {
    fn serializer_for(&self, _edm_type: &EdmTypeReference) -> Option<Arc<dyn EdmTypeSerializer>> {
        Some(self.0.clone())
    }
}
