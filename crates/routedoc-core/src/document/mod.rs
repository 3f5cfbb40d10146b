//! The Swagger 2.0 document and its assembly from a registry and routes.

mod assemble;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{self, SchemaId, ValidationReport};

pub use assemble::assemble;

pub const SWAGGER_VERSION: &str = "2.0";

/// A Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    #[serde(default = "default_swagger_version")]
    pub swagger: String,

    #[serde(default)]
    pub info: Info,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    /// Path template to verb to operation.
    #[serde(default)]
    pub paths: IndexMap<String, IndexMap<String, Value>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Value>,

    #[serde(rename = "securityDefinitions", skip_serializing_if = "Option::is_none")]
    pub security_definitions: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Value>,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Value>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

fn default_swagger_version() -> String {
    SWAGGER_VERSION.to_string()
}

impl Default for SwaggerDocument {
    fn default() -> Self {
        Self {
            swagger: default_swagger_version(),
            info: Info::default(),
            host: None,
            base_path: None,
            schemes: None,
            consumes: None,
            produces: None,
            paths: IndexMap::new(),
            definitions: IndexMap::new(),
            parameters: IndexMap::new(),
            responses: IndexMap::new(),
            security: None,
            security_definitions: None,
            tags: Vec::new(),
            external_docs: None,
            extensions: IndexMap::new(),
        }
    }
}

impl SwaggerDocument {
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Check the document against the official Swagger 2.0 schema.
    pub fn validate(&self) -> Result<ValidationReport, SchemaError> {
        let value = self
            .to_value()
            .map_err(|e| SchemaError::Invalid {
                schema: SchemaId::Swagger,
                message: e.to_string(),
            })?;
        schema::validate(SchemaId::Swagger, &value)
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<Value>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_document_shape() {
        let value = SwaggerDocument::default().to_value().unwrap();
        assert_eq!(
            value,
            json!({"swagger": "2.0", "info": {"title": "", "version": ""}, "paths": {}})
        );
    }

    #[test]
    fn test_extensions_round_trip() {
        let doc: SwaggerDocument = serde_json::from_value(json!({
            "swagger": "2.0",
            "info": {"title": "t", "version": "1", "x-logo": "logo.png"},
            "paths": {},
            "x-generator": "routedoc"
        }))
        .unwrap();
        assert_eq!(doc.extensions["x-generator"], "routedoc");
        assert_eq!(doc.info.extensions["x-logo"], "logo.png");
        assert_eq!(doc.to_value().unwrap()["x-generator"], "routedoc");
    }

    #[test]
    fn test_validate_against_swagger_schema() {
        let mut doc = SwaggerDocument::default();
        doc.info.title = "Pets".into();
        doc.info.version = "1.0.0".into();
        assert!(doc.validate().unwrap().valid);

        doc.host = Some("not a host/".into());
        let report = doc.validate().unwrap();
        assert!(!report.valid);
        assert!(report.message.is_some());
    }
}
