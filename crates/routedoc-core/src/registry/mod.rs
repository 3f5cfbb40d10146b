//! The shared store of reusable tags, parameters, responses and models.
//!
//! A `Registry` is populated before compilation through the Item Registrar
//! (see [`registrar`]) and only read while operations are compiled.

pub mod registrar;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Location a parameter is sent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Header,
    Body,
    Query,
    FormData,
    Path,
}

impl ParameterLocation {
    /// Processing order used when merging common parameters.
    pub const ALL: [ParameterLocation; 5] = [
        ParameterLocation::Header,
        ParameterLocation::Body,
        ParameterLocation::Query,
        ParameterLocation::FormData,
        ParameterLocation::Path,
    ];

    /// The value of a parameter's `in` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::Query => "query",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Path => "path",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterLocation::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown parameter location: {s}"))
    }
}

/// Registered parameters, one map per location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterCollections {
    pub header: IndexMap<String, Value>,
    pub body: IndexMap<String, Value>,
    pub query: IndexMap<String, Value>,
    pub form_data: IndexMap<String, Value>,
    pub path: IndexMap<String, Value>,
}

impl ParameterCollections {
    pub fn get(&self, location: ParameterLocation) -> &IndexMap<String, Value> {
        match location {
            ParameterLocation::Header => &self.header,
            ParameterLocation::Body => &self.body,
            ParameterLocation::Query => &self.query,
            ParameterLocation::FormData => &self.form_data,
            ParameterLocation::Path => &self.path,
        }
    }

    pub fn get_mut(&mut self, location: ParameterLocation) -> &mut IndexMap<String, Value> {
        match location {
            ParameterLocation::Header => &mut self.header,
            ParameterLocation::Body => &mut self.body,
            ParameterLocation::Query => &mut self.query,
            ParameterLocation::FormData => &mut self.form_data,
            ParameterLocation::Path => &mut self.path,
        }
    }
}

/// Named collections of reusable building blocks plus the default security.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    pub tags: IndexMap<String, Value>,
    pub parameters: ParameterCollections,
    pub responses: IndexMap<String, Value>,
    /// Stored without their `name` field; the key is the name.
    pub response_headers: IndexMap<String, Value>,
    /// Stored without their `name` field; the key is the name.
    pub models: IndexMap<String, Value>,
    /// Used verbatim by routes declaring `security: true`.
    pub default_security: Option<Value>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every registered item and the default security.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_default_security(&mut self, security: Option<Value>) {
        self.default_security = security;
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && ParameterLocation::ALL
                .iter()
                .all(|l| self.parameters.get(*l).is_empty())
            && self.responses.is_empty()
            && self.response_headers.is_empty()
            && self.models.is_empty()
    }
}
