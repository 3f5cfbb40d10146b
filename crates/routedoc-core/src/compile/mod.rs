//! The Operation Compiler: one route's metadata plus the registry in, one
//! Swagger 2.0 operation out.

mod model;
pub mod operation;
pub mod parameters;
pub mod path_template;
pub mod responses;
pub mod security;
pub mod status;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::router::HttpMethod;

pub use operation::compile_operation;

/// Where a route is mounted: its framework-style path and its verb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteContext {
    pub path: String,
    pub verb: HttpMethod,
}

impl RouteContext {
    pub fn new(verb: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            verb,
        }
    }
}

/// A compiled, fully resolved Swagger operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    pub description: String,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Value>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    pub parameters: Vec<Value>,

    pub responses: IndexMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<String>>,

    /// Only ever `Some(true)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Value>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,

    /// Brace-style path; the key under `paths`, never serialized.
    #[serde(skip)]
    pub path: String,

    #[serde(skip)]
    pub verb: Option<HttpMethod>,
}

/// Compact JSON used in error messages.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unserializable>".to_string())
}
