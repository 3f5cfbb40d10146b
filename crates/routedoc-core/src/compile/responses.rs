use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::model::resolve_model_reference;
use super::status::default_description;
use super::to_json;
use crate::error::CompileError;
use crate::metadata::RouteMetadata;
use crate::registry::Registry;

/// Common responses first, then inline ones, so an inline response replaces
/// a common response with the same code.
pub fn merge_responses(
    registry: &Registry,
    metadata: &RouteMetadata,
) -> Result<IndexMap<String, Value>, CompileError> {
    let mut responses = IndexMap::new();

    for name in &metadata.common.responses {
        let response =
            registry
                .responses
                .get(name)
                .ok_or_else(|| CompileError::MissingCommonResponse {
                    name: name.clone(),
                    metadata: to_json(metadata),
                })?;
        add_response(registry, &mut responses, name, response.clone())?;
    }

    for (code, response) in &metadata.responses {
        add_response(registry, &mut responses, code, response.clone())?;
    }

    Ok(responses)
}

fn add_response(
    registry: &Registry,
    responses: &mut IndexMap<String, Value>,
    key: &str,
    response: Value,
) -> Result<(), CompileError> {
    let Value::Object(mut response) = response else {
        return Err(CompileError::ResponseNotAnObject {
            response: response.to_string(),
        });
    };

    let code = match response.shift_remove("code") {
        Some(Value::String(code)) => code,
        Some(Value::Number(code)) => code.to_string(),
        _ => key.to_string(),
    };
    response.shift_remove("name");

    if !response.contains_key("description") {
        response.insert(
            "description".to_string(),
            Value::String(default_description(&code)),
        );
    }

    resolve_model_reference(registry, "response", &mut response)?;
    resolve_common_headers(registry, &mut response)?;

    responses.insert(code, Value::Object(response));
    Ok(())
}

/// Merge registered headers named in `commonHeaders` into `headers`, keeping
/// any header the response already declares.
fn resolve_common_headers(
    registry: &Registry,
    response: &mut Map<String, Value>,
) -> Result<(), CompileError> {
    let Some(common) = response.shift_remove("commonHeaders") else {
        return Ok(());
    };
    let names: Vec<String> = match common {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(name) => name,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };
    if names.is_empty() {
        return Ok(());
    }

    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        let header = registry.response_headers.get(&name).ok_or_else(|| {
            CompileError::MissingResponseHeader {
                name: name.clone(),
                response: to_json(&*response),
            }
        })?;
        resolved.push((name, header.clone()));
    }

    let headers = response
        .entry("headers")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(headers) = headers {
        for (name, header) in resolved {
            headers.entry(name).or_insert(header);
        }
    }
    Ok(())
}
