use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::ParameterLocation;

/// Per-route description attached through `Router::describe`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteMetadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<Value>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Security>,

    /// Inline responses keyed by status code.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Value>,

    /// Inline parameters, added after the common ones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Value>,

    #[serde(skip_serializing_if = "CommonRefs::is_empty")]
    pub common: CommonRefs,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl RouteMetadata {
    /// True when at least one response is declared inline or by common reference.
    pub fn has_responses(&self) -> bool {
        !self.responses.is_empty() || !self.common.responses.is_empty()
    }

    /// Whether an inline parameter with this name is present, in any location.
    pub fn has_inline_parameter(&self, name: &str) -> bool {
        self.parameters
            .iter()
            .any(|p| p.get("name").and_then(Value::as_str) == Some(name))
    }
}

/// By-name references into the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonRefs {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<String>,

    #[serde(skip_serializing_if = "CommonParameters::is_empty")]
    pub parameters: CommonParameters,
}

impl CommonRefs {
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty() && self.parameters.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonParameters {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<String>,
    #[serde(rename = "formData", skip_serializing_if = "Vec::is_empty")]
    pub form_data: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl CommonParameters {
    pub fn get(&self, location: ParameterLocation) -> &[String] {
        match location {
            ParameterLocation::Header => &self.header,
            ParameterLocation::Body => &self.body,
            ParameterLocation::Query => &self.query,
            ParameterLocation::FormData => &self.form_data,
            ParameterLocation::Path => &self.path,
        }
    }

    pub fn get_mut(&mut self, location: ParameterLocation) -> &mut Vec<String> {
        match location {
            ParameterLocation::Header => &mut self.header,
            ParameterLocation::Body => &mut self.body,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::FormData => &mut self.form_data,
            ParameterLocation::Path => &mut self.path,
        }
    }

    pub fn is_empty(&self) -> bool {
        ParameterLocation::ALL
            .iter()
            .all(|location| self.get(*location).is_empty())
    }
}

/// The security shapes a route may declare.
///
/// `Flag(true)` selects the registry's default security and `Flag(false)`
/// omits security entirely. A scheme name stands for a requirement with no
/// scopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Security {
    Flag(bool),
    Scheme(String),
    Alternatives(Vec<Value>),
    Requirement(Map<String, Value>),
}
