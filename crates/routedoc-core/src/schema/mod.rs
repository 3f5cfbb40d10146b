//! Embedded JSON-Schema documents and the ids they are addressed by.
//!
//! Registered items, route metadata and compiled documents are all checked
//! against these fixed, versioned schemas. Object shape is data-driven: the
//! schemas reject unknown properties (anything but `x-` extensions), so typos
//! in metadata surface at registration time instead of as a silently wrong
//! document.

mod validator;

use std::fmt;
use std::str::FromStr;

use heck::ToKebabCase;

use crate::error::SchemaError;

pub use validator::{ValidationReport, ensure_valid, validate};

/// Prefix shared by every schema id except the official Swagger 2.0 one.
pub const SCHEMA_PREFIX: &str = "https://routedoc.dev/schemas/";

/// Id of the official Swagger 2.0 meta-schema.
pub const SWAGGER_SCHEMA_ID: &str = "http://swagger.io/v2/schema.json#";

/// One schema document per concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    Tag,
    Header,
    BodyParameter,
    HeaderParameterSubSchema,
    QueryParameterSubSchema,
    PathParameterSubSchema,
    FormDataParameterSubSchema,
    Schema,
    Response,
    MetaData,
    Swagger,
}

impl SchemaId {
    pub const ALL: [SchemaId; 11] = [
        SchemaId::Tag,
        SchemaId::Header,
        SchemaId::BodyParameter,
        SchemaId::HeaderParameterSubSchema,
        SchemaId::QueryParameterSubSchema,
        SchemaId::PathParameterSubSchema,
        SchemaId::FormDataParameterSubSchema,
        SchemaId::Schema,
        SchemaId::Response,
        SchemaId::MetaData,
        SchemaId::Swagger,
    ];

    /// The Swagger definition name the schema was derived from.
    pub fn definition_name(&self) -> &'static str {
        match self {
            SchemaId::Tag => "tag",
            SchemaId::Header => "header",
            SchemaId::BodyParameter => "bodyParameter",
            SchemaId::HeaderParameterSubSchema => "headerParameterSubSchema",
            SchemaId::QueryParameterSubSchema => "queryParameterSubSchema",
            SchemaId::PathParameterSubSchema => "pathParameterSubSchema",
            SchemaId::FormDataParameterSubSchema => "formDataParameterSubSchema",
            SchemaId::Schema => "schema",
            SchemaId::Response => "response",
            SchemaId::MetaData => "metaData",
            SchemaId::Swagger => "swagger-2.0",
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            SchemaId::Swagger => "swagger-2.0.json".to_string(),
            _ => format!("{}.json", self.definition_name().to_kebab_case()),
        }
    }

    pub fn uri(&self) -> String {
        match self {
            SchemaId::Swagger => SWAGGER_SCHEMA_ID.to_string(),
            _ => format!("{SCHEMA_PREFIX}{}", self.file_name()),
        }
    }

    pub(crate) fn source(&self) -> &'static str {
        match self {
            SchemaId::Tag => include_str!("../../schemas/tag.json"),
            SchemaId::Header => include_str!("../../schemas/header.json"),
            SchemaId::BodyParameter => include_str!("../../schemas/body-parameter.json"),
            SchemaId::HeaderParameterSubSchema => {
                include_str!("../../schemas/header-parameter-sub-schema.json")
            }
            SchemaId::QueryParameterSubSchema => {
                include_str!("../../schemas/query-parameter-sub-schema.json")
            }
            SchemaId::PathParameterSubSchema => {
                include_str!("../../schemas/path-parameter-sub-schema.json")
            }
            SchemaId::FormDataParameterSubSchema => {
                include_str!("../../schemas/form-data-parameter-sub-schema.json")
            }
            SchemaId::Schema => include_str!("../../schemas/schema.json"),
            SchemaId::Response => include_str!("../../schemas/response.json"),
            SchemaId::MetaData => include_str!("../../schemas/meta-data.json"),
            SchemaId::Swagger => include_str!("../../schemas/swagger-2.0.json"),
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

impl FromStr for SchemaId {
    type Err = SchemaError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        SchemaId::ALL
            .into_iter()
            .find(|id| id.uri() == uri)
            .ok_or_else(|| SchemaError::UnknownSchema(uri.to_string()))
    }
}
