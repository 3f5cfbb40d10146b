use log::warn;
use serde_json::{Map, Value, json};

use super::to_json;
use crate::error::CompileError;
use crate::registry::Registry;

pub(crate) const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Replace `model` / `arrayOfModel` shorthand on a response or body parameter
/// with the `schema` it stands for.
pub(crate) fn resolve_model_reference(
    registry: &Registry,
    target: &'static str,
    item: &mut Map<String, Value>,
) -> Result<(), CompileError> {
    let has_model = item.contains_key("model");
    let has_array = item.contains_key("arrayOfModel");
    if !has_model && !has_array {
        return Ok(());
    }
    if has_model && has_array {
        return Err(CompileError::ModelAndArrayOfModel {
            target,
            item: to_json(&*item),
        });
    }
    if item.contains_key("schema") {
        return Err(CompileError::SchemaWithModel {
            target,
            item: to_json(&*item),
        });
    }

    let (name, is_array) = match item.shift_remove("model") {
        Some(model) => (model_name(model), false),
        None => (item.shift_remove("arrayOfModel").map(model_name).unwrap_or_default(), true),
    };
    if !registry.models.contains_key(&name) {
        warn!("{target} references model {name}, which is not registered");
    }

    let reference = json!({ "$ref": format!("{DEFINITIONS_PREFIX}{name}") });
    let schema = if is_array {
        json!({ "type": "array", "items": reference })
    } else {
        reference
    };
    item.insert("schema".to_string(), schema);
    Ok(())
}

fn model_name(value: Value) -> String {
    match value {
        Value::String(name) => name,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_model_becomes_ref() {
        let registry = Registry::new();
        let mut item = object(json!({"description": "ok", "model": "Pet"}));
        resolve_model_reference(&registry, "response", &mut item).unwrap();
        assert_eq!(
            Value::Object(item),
            json!({"description": "ok", "schema": {"$ref": "#/definitions/Pet"}})
        );
    }

    #[test]
    fn test_array_of_model_becomes_array_schema() {
        let registry = Registry::new();
        let mut item = object(json!({"arrayOfModel": "Pet"}));
        resolve_model_reference(&registry, "response", &mut item).unwrap();
        assert_eq!(
            item["schema"],
            json!({"type": "array", "items": {"$ref": "#/definitions/Pet"}})
        );
        assert!(!item.contains_key("arrayOfModel"));
    }

    #[test]
    fn test_exclusive_options() {
        let registry = Registry::new();
        let mut both = object(json!({"model": "A", "arrayOfModel": "A"}));
        assert!(matches!(
            resolve_model_reference(&registry, "response", &mut both),
            Err(CompileError::ModelAndArrayOfModel { .. })
        ));

        let mut with_schema = object(json!({"model": "A", "schema": {"type": "string"}}));
        assert!(matches!(
            resolve_model_reference(&registry, "body parameter", &mut with_schema),
            Err(CompileError::SchemaWithModel { .. })
        ));
    }

    #[test]
    fn test_plain_schema_is_untouched() {
        let registry = Registry::new();
        let mut item = object(json!({"schema": {"type": "string"}}));
        resolve_model_reference(&registry, "response", &mut item).unwrap();
        assert_eq!(item["schema"], json!({"type": "string"}));
    }
}
