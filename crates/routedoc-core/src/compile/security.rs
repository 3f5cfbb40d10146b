use serde_json::{Map, Value};

use super::to_json;
use crate::error::CompileError;
use crate::metadata::{RouteMetadata, Security};
use crate::registry::Registry;

/// Normalize a route's security declaration into Swagger requirement form.
///
/// `None` means the operation carries no `security` at all. `true` yields the
/// registry's default security unchanged.
pub fn resolve(
    registry: &Registry,
    metadata: &RouteMetadata,
) -> Result<Option<Value>, CompileError> {
    let Some(security) = &metadata.security else {
        return Ok(None);
    };
    match security {
        Security::Flag(false) => Ok(None),
        Security::Flag(true) => match &registry.default_security {
            Some(default) => Ok(Some(default.clone())),
            None => Err(CompileError::DefaultSecurityUnset {
                metadata: to_json(metadata),
            }),
        },
        Security::Scheme(scheme) if scheme.is_empty() => Ok(None),
        Security::Scheme(scheme) => {
            let mut requirement = Map::new();
            requirement.insert(scheme.clone(), Value::Array(Vec::new()));
            Ok(Some(Value::Array(vec![Value::Object(requirement)])))
        }
        Security::Alternatives(alternatives) => {
            if let Some(bad) = alternatives.iter().find(|a| !a.is_object()) {
                return Err(CompileError::UnsupportedSecurity {
                    security: bad.to_string(),
                });
            }
            Ok(Some(Value::Array(alternatives.clone())))
        }
        Security::Requirement(requirement) => Ok(Some(Value::Array(vec![Value::Object(
            requirement.clone(),
        )]))),
    }
}
