use std::collections::HashMap;
use std::sync::LazyLock;

use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;

use super::SchemaId;
use crate::error::SchemaError;

const ADDITIONAL_PROPERTIES: &str = "Additional properties are not allowed";

/// Outcome of validating one instance against one schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

struct CompiledSchemas {
    validators: HashMap<SchemaId, Validator>,
}

// Compiled once on first use; the schema documents are compile-time constants.
static SCHEMAS: LazyLock<Result<CompiledSchemas, (String, String)>> =
    LazyLock::new(compile_all);

fn compile_all() -> Result<CompiledSchemas, (String, String)> {
    let mut validators = HashMap::new();
    for id in SchemaId::ALL {
        let document: Value =
            serde_json::from_str(id.source()).map_err(|e| (id.uri(), e.to_string()))?;
        let validator = jsonschema::draft4::new(&document).map_err(|e| (id.uri(), e.to_string()))?;
        validators.insert(id, validator);
    }
    Ok(CompiledSchemas { validators })
}

fn validator_for(id: SchemaId) -> Result<&'static Validator, SchemaError> {
    match &*SCHEMAS {
        Ok(compiled) => compiled
            .validators
            .get(&id)
            .ok_or_else(|| SchemaError::UnknownSchema(id.uri())),
        Err((schema, message)) => Err(SchemaError::Compile {
            schema: schema.clone(),
            message: message.clone(),
        }),
    }
}

/// Validate `instance` against the schema `id`, collecting every error.
pub fn validate(id: SchemaId, instance: &Value) -> Result<ValidationReport, SchemaError> {
    let validator = validator_for(id)?;
    let errors: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect();
    if errors.is_empty() {
        return Ok(ValidationReport {
            valid: true,
            errors,
            message: None,
        });
    }
    let message = error_message(&errors);
    Ok(ValidationReport {
        valid: false,
        errors,
        message: Some(message),
    })
}

/// Like [`validate`], but an invalid instance is an error carrying the formatted message.
pub fn ensure_valid(id: SchemaId, instance: &Value) -> Result<(), SchemaError> {
    let report = validate(id, instance)?;
    if report.valid {
        return Ok(());
    }
    Err(SchemaError::Invalid {
        schema: id,
        message: report.message.unwrap_or_default(),
    })
}

/// Join validator errors; additional-property failures get the offending
/// property names appended, since the generic text is easy to misread.
fn error_message(errors: &[String]) -> String {
    let mut message = errors.join(", ");
    if !errors.iter().any(|e| e.contains(ADDITIONAL_PROPERTIES)) {
        return message;
    }
    for property in errors.iter().flat_map(|e| unexpected_properties(e)) {
        message.push_str(". Property : ");
        message.push_str(&property);
    }
    message
}

/// Extract `'a', 'b'` from `Additional properties are not allowed ('a', 'b' were unexpected)`.
fn unexpected_properties(error: &str) -> Vec<String> {
    let Some(start) = error.find(ADDITIONAL_PROPERTIES) else {
        return Vec::new();
    };
    let rest = &error[start + ADDITIONAL_PROPERTIES.len()..];
    let Some(open) = rest.find('(') else {
        return Vec::new();
    };
    let inner = &rest[open + 1..];
    let end = inner
        .find(" was unexpected")
        .or_else(|| inner.find(" were unexpected"))
        .unwrap_or(inner.len());
    inner[..end]
        .split(", ")
        .map(|p| p.trim().trim_matches('\'').trim_matches('"').to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_every_schema_compiles() {
        for id in SchemaId::ALL {
            assert!(validator_for(id).is_ok(), "{} did not compile", id);
        }
    }

    #[test]
    fn test_valid_tag() {
        let report = validate(
            SchemaId::Tag,
            &json!({"name": "pets", "description": "Pet operations", "x-order": 1}),
        )
        .unwrap();
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.message.is_none());
    }

    #[test]
    fn test_additional_property_is_named() {
        let err = ensure_valid(
            SchemaId::Tag,
            &json!({"name": "pets", "spacePotato": true}),
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("spacePotato"), "{message}");
    }

    #[test]
    fn test_unexpected_properties_parsing() {
        assert_eq!(
            unexpected_properties(
                "Additional properties are not allowed ('a', 'b' were unexpected)"
            ),
            vec!["a", "b"]
        );
        assert_eq!(
            unexpected_properties("Additional properties are not allowed ('x' was unexpected)"),
            vec!["x"]
        );
        assert!(unexpected_properties("\"a\" is not of type \"integer\"").is_empty());
    }

    #[test]
    fn test_error_message_annotation() {
        let errors = vec![
            "Additional properties are not allowed ('spacePotato' was unexpected)".to_string(),
        ];
        insta::assert_snapshot!(
            error_message(&errors),
            @"Additional properties are not allowed ('spacePotato' was unexpected). Property : spacePotato"
        );
    }

    #[test]
    fn test_plain_errors_are_joined() {
        let errors = vec!["first".to_string(), "second".to_string()];
        assert_eq!(error_message(&errors), "first, second");
    }
}
