use std::collections::HashSet;

use log::warn;
use serde_json::{Value, json};

use super::model::resolve_model_reference;
use super::path_template;
use super::to_json;
use crate::error::CompileError;
use crate::metadata::RouteMetadata;
use crate::registry::{ParameterLocation, Registry};

/// Make sure every placeholder in `path` ends up as a parameter.
///
/// Placeholders already declared inline are left alone. A registered path
/// parameter is referenced through `common.parameters.path`; anything else
/// gets a minimal `{name, in: "path"}` inline parameter.
pub fn infer_path_parameters(registry: &Registry, path: &str, metadata: &mut RouteMetadata) {
    for name in path_template::placeholders(path) {
        if metadata.has_inline_parameter(&name) {
            continue;
        }
        let registered = registry.parameters.path.contains_key(&name);
        let in_common = metadata.common.parameters.path.contains(&name);
        if registered {
            if !in_common {
                metadata.common.parameters.path.push(name);
            }
            continue;
        }
        if in_common {
            warn!(
                "path parameter {name} is listed in common.parameters.path but was never registered; constructing a basic parameter"
            );
        }
        metadata
            .parameters
            .push(json!({ "name": name, "in": ParameterLocation::Path.as_str() }));
    }
}

/// Common parameters by location, then inline parameters.
///
/// A common parameter whose name and location were already added is skipped.
/// Inline parameters are always added.
pub fn merge_parameters(
    registry: &Registry,
    metadata: &RouteMetadata,
) -> Result<Vec<Value>, CompileError> {
    let mut parameters = Vec::new();
    let mut added: HashSet<(String, String)> = HashSet::new();

    for location in ParameterLocation::ALL {
        for name in metadata.common.parameters.get(location) {
            let parameter = registry
                .parameters
                .get(location)
                .get(name)
                .ok_or_else(|| CompileError::MissingCommonParameter {
                    location: location.to_string(),
                    name: name.clone(),
                    metadata: to_json(metadata),
                })?;
            add_parameter(registry, &mut parameters, &mut added, parameter.clone(), true)?;
        }
    }

    for parameter in &metadata.parameters {
        add_parameter(registry, &mut parameters, &mut added, parameter.clone(), false)?;
    }

    Ok(parameters)
}

fn add_parameter(
    registry: &Registry,
    parameters: &mut Vec<Value>,
    added: &mut HashSet<(String, String)>,
    parameter: Value,
    is_common: bool,
) -> Result<(), CompileError> {
    let location = required_str(&parameter, "in")?;
    let name = required_str(&parameter, "name")?;
    let key = (location.clone(), name);
    if is_common && added.contains(&key) {
        return Ok(());
    }
    added.insert(key);

    let Value::Object(mut parameter) = parameter else {
        return Ok(());
    };
    let is_body = location == ParameterLocation::Body.as_str();

    if is_body {
        resolve_model_reference(registry, "body parameter", &mut parameter)?;
    } else if parameter.contains_key("model") || parameter.contains_key("arrayOfModel") {
        return Err(CompileError::ModelOnNonBodyParameter {
            parameter: to_json(&parameter),
        });
    }

    if !is_body && !parameter.contains_key("type") {
        parameter.insert("type".to_string(), Value::String("string".to_string()));
    }
    if !parameter.contains_key("required") {
        let required = location == ParameterLocation::Path.as_str();
        parameter.insert("required".to_string(), Value::Bool(required));
    }
    if is_body && !parameter.contains_key("schema") {
        return Err(CompileError::BodyWithoutSchema {
            parameter: to_json(&parameter),
        });
    }
    if parameter.get("type").and_then(Value::as_str) == Some("array")
        && !parameter.contains_key("items")
    {
        return Err(CompileError::ArrayWithoutItems {
            parameter: to_json(&parameter),
        });
    }

    parameters.push(Value::Object(parameter));
    Ok(())
}

fn required_str(parameter: &Value, property: &'static str) -> Result<String, CompileError> {
    parameter
        .get(property)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CompileError::MissingParameterProperty {
            property,
            parameter: parameter.to_string(),
        })
}
