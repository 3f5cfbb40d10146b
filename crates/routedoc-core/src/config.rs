use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level document options, loaded from `routedoc.yaml`.
///
/// Values already present in `document` always win over these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentOptions {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<Value>,
    pub license: Option<Value>,
    pub host: Option<String>,
    /// Defaults to `/`.
    pub base_path: Option<String>,
    pub schemes: Option<Vec<String>>,
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub security: Option<Value>,
    pub security_definitions: Option<Value>,
    pub external_docs: Option<Value>,
    /// Used by routes that declare `security: true`.
    pub default_security: Option<Value>,
    /// An existing Swagger document to extend instead of starting empty.
    pub document: Option<Value>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "routedoc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DocumentOptions>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let options: DocumentOptions = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(options))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# routedoc configuration
title: My API
version: 1.0.0
# description: What this API does
# termsOfService: https://example.com/terms
# contact:
#   name: API team
#   email: api@example.com
# license:
#   name: MIT

basePath: /
# host: localhost:3000
schemes: [http]
consumes: [application/json]
produces: [application/json]

# securityDefinitions:
#   basicAuth:
#     type: basic
# Used verbatim by routes with `security: true`.
# defaultSecurity:
#   - basicAuth: []
"#
}
