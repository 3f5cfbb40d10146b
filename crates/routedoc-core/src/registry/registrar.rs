use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ParameterLocation, Registry};
use crate::error::RegistryError;
use crate::schema::{self, SchemaId};

/// What to do when an item fails schema validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Fail the registration.
    #[default]
    Throw,
    /// Log the validation message and register anyway.
    Warn,
    /// Skip validation.
    Ignore,
}

/// Per-call registration options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddOptions {
    pub validation: ValidationMode,
    /// Overrides whether the stored copy keeps its `name` field.
    pub delete_name_from_common: Option<bool>,
}

impl AddOptions {
    pub fn with_validation(validation: ValidationMode) -> Self {
        Self {
            validation,
            ..Self::default()
        }
    }
}

/// The kinds of reusable items a [`Registry`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Tag,
    HeaderParameter,
    BodyParameter,
    QueryParameter,
    FormDataParameter,
    PathParameter,
    Response,
    ResponseHeader,
    Model,
}

impl ItemKind {
    pub fn schema_id(&self) -> SchemaId {
        match self {
            ItemKind::Tag => SchemaId::Tag,
            ItemKind::HeaderParameter => SchemaId::HeaderParameterSubSchema,
            ItemKind::BodyParameter => SchemaId::BodyParameter,
            ItemKind::QueryParameter => SchemaId::QueryParameterSubSchema,
            ItemKind::FormDataParameter => SchemaId::FormDataParameterSubSchema,
            ItemKind::PathParameter => SchemaId::PathParameterSubSchema,
            ItemKind::Response => SchemaId::Response,
            ItemKind::ResponseHeader => SchemaId::Header,
            ItemKind::Model => SchemaId::Schema,
        }
    }

    /// The `in` value injected before validation, for parameter kinds.
    pub fn location(&self) -> Option<ParameterLocation> {
        match self {
            ItemKind::HeaderParameter => Some(ParameterLocation::Header),
            ItemKind::BodyParameter => Some(ParameterLocation::Body),
            ItemKind::QueryParameter => Some(ParameterLocation::Query),
            ItemKind::FormDataParameter => Some(ParameterLocation::FormData),
            ItemKind::PathParameter => Some(ParameterLocation::Path),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::Tag => "Tag",
            ItemKind::HeaderParameter => "header parameter",
            ItemKind::BodyParameter => "body parameter",
            ItemKind::QueryParameter => "query parameter",
            ItemKind::FormDataParameter => "formData parameter",
            ItemKind::PathParameter => "path parameter",
            ItemKind::Response => "response",
            ItemKind::ResponseHeader => "header response",
            ItemKind::Model => "Model",
        }
    }

    /// Kinds whose target schema forbids a `name` property.
    pub fn deletes_name(&self) -> bool {
        matches!(self, ItemKind::ResponseHeader | ItemKind::Model)
    }

    fn conflict_name(&self) -> &'static str {
        match self {
            ItemKind::Tag => "tag",
            ItemKind::Model => "model",
            other => other.display_name(),
        }
    }
}

impl Registry {
    /// Validate `item` and store it in the collection selected by `kind`.
    ///
    /// The item is serialized first, so the caller's value is never modified.
    pub fn add<T: Serialize + ?Sized>(
        &mut self,
        kind: ItemKind,
        item: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        if kind == ItemKind::Model {
            return self.add_model(item, options);
        }
        let mut object = to_object(kind, item)?;
        if let Some(location) = kind.location() {
            object.insert("in".to_string(), Value::String(location.as_str().to_string()));
        }
        self.insert_item(kind, object, options)?;
        Ok(())
    }

    pub fn add_tag<T: Serialize + ?Sized>(
        &mut self,
        tag: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::Tag, tag, options)
    }

    pub fn add_header_parameter<T: Serialize + ?Sized>(
        &mut self,
        parameter: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::HeaderParameter, parameter, options)
    }

    pub fn add_body_parameter<T: Serialize + ?Sized>(
        &mut self,
        parameter: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::BodyParameter, parameter, options)
    }

    pub fn add_query_parameter<T: Serialize + ?Sized>(
        &mut self,
        parameter: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::QueryParameter, parameter, options)
    }

    pub fn add_form_data_parameter<T: Serialize + ?Sized>(
        &mut self,
        parameter: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::FormDataParameter, parameter, options)
    }

    pub fn add_path_parameter<T: Serialize + ?Sized>(
        &mut self,
        parameter: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::PathParameter, parameter, options)
    }

    pub fn add_response<T: Serialize + ?Sized>(
        &mut self,
        response: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::Response, response, options)
    }

    pub fn add_response_header<T: Serialize + ?Sized>(
        &mut self,
        header: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        self.add(ItemKind::ResponseHeader, header, options)
    }

    /// Register a model and hoist its nested `definitions` into sibling models.
    ///
    /// `$schema`, `id` and `$id` are stripped. Nested definitions are registered
    /// depth-first under their key, with the same options. A definition that
    /// names one of its own ancestors is rejected.
    pub fn add_model<T: Serialize + ?Sized>(
        &mut self,
        model: &T,
        options: AddOptions,
    ) -> Result<(), RegistryError> {
        let root = to_object(ItemKind::Model, model)?;
        let mut stack: Vec<(Map<String, Value>, Vec<String>)> = vec![(root, Vec::new())];

        while let Some((mut object, ancestors)) = stack.pop() {
            object.shift_remove("$schema");
            object.shift_remove("id");
            object.shift_remove("$id");
            let definitions = object.shift_remove("definitions");

            let name = self.insert_item(ItemKind::Model, object, options)?;

            let Some(Value::Object(definitions)) = definitions else {
                continue;
            };
            let mut chain = ancestors;
            chain.push(name);
            let mut children = Vec::with_capacity(definitions.len());
            for (key, definition) in definitions {
                if chain.contains(&key) {
                    return Err(RegistryError::CyclicModel {
                        name: key,
                        chain: chain.join(" -> "),
                    });
                }
                debug!("hoisting nested definition {key} out of model {}", chain.join("."));
                let mut child = value_to_object(ItemKind::Model, definition)?;
                child.insert("name".to_string(), Value::String(key));
                children.push((child, chain.clone()));
            }
            // Reversed so the first definition is processed next.
            stack.extend(children.into_iter().rev());
        }
        Ok(())
    }

    fn target_mut(&mut self, kind: ItemKind) -> &mut IndexMap<String, Value> {
        if let Some(location) = kind.location() {
            return self.parameters.get_mut(location);
        }
        match kind {
            ItemKind::Response => &mut self.responses,
            ItemKind::ResponseHeader => &mut self.response_headers,
            ItemKind::Model => &mut self.models,
            _ => &mut self.tags,
        }
    }

    /// Validate, name-check, de-duplicate and store one prepared object.
    fn insert_item(
        &mut self,
        kind: ItemKind,
        object: Map<String, Value>,
        options: AddOptions,
    ) -> Result<String, RegistryError> {
        let value = Value::Object(object);
        apply_validation(kind, &value, options.validation)?;
        let name = ensure_has_name(kind, &value)?;

        let target = self.target_mut(kind);
        if let Some(existing) = target.get(&name) {
            let mut normalized = existing.clone();
            if let Value::Object(map) = &mut normalized {
                map.insert("name".to_string(), Value::String(name.clone()));
            }
            if normalized != value {
                return Err(RegistryError::Conflict {
                    kind: kind.conflict_name(),
                    name,
                    existing: normalized.to_string(),
                    attempted: value.to_string(),
                });
            }
        }

        let mut stored = value;
        let delete_name = options
            .delete_name_from_common
            .unwrap_or_else(|| kind.deletes_name());
        if delete_name {
            if let Value::Object(map) = &mut stored {
                map.shift_remove("name");
            }
        }
        target.insert(name.clone(), stored);
        debug!("registered {} {name}", kind.display_name());
        Ok(name)
    }
}

fn to_object<T: Serialize + ?Sized>(
    kind: ItemKind,
    item: &T,
) -> Result<Map<String, Value>, RegistryError> {
    let value = serde_json::to_value(item)
        .map_err(|_| RegistryError::NotAnObject(kind.display_name()))?;
    value_to_object(kind, value)
}

fn value_to_object(kind: ItemKind, value: Value) -> Result<Map<String, Value>, RegistryError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(RegistryError::Missing(kind.display_name())),
        _ => Err(RegistryError::NotAnObject(kind.display_name())),
    }
}

fn apply_validation(
    kind: ItemKind,
    value: &Value,
    mode: ValidationMode,
) -> Result<(), RegistryError> {
    match mode {
        ValidationMode::Ignore => Ok(()),
        ValidationMode::Throw => Ok(schema::ensure_valid(kind.schema_id(), value)?),
        ValidationMode::Warn => {
            let report = schema::validate(kind.schema_id(), value)?;
            if !report.valid {
                warn!(
                    "{} failed validation: {}",
                    kind.display_name(),
                    report.message.unwrap_or_default()
                );
            }
            Ok(())
        }
    }
}

fn ensure_has_name(kind: ItemKind, value: &Value) -> Result<String, RegistryError> {
    match value.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(RegistryError::NameRequired {
            kind: kind.display_name(),
            item: value.to_string(),
        }),
        Some(_) => Err(RegistryError::NameNotString {
            kind: kind.display_name(),
            item: value.to_string(),
        }),
    }
}
