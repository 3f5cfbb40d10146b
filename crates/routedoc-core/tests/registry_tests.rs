use routedoc_core::error::RegistryError;
use routedoc_core::registry::ParameterLocation;
use routedoc_core::{AddOptions, ItemKind, Registry, ValidationMode};
use serde::Serialize;
use serde_json::{Value, json};

fn valid_item(kind: ItemKind) -> Value {
    match kind {
        ItemKind::Tag => json!({
            "name": "testTag",
            "description": "A test tag",
            "externalDocs": {"description": "Docs", "url": "https://example.com"},
            "x-potato": "space"
        }),
        ItemKind::BodyParameter => json!({
            "name": "testTag",
            "description": "A test tag",
            "required": true,
            "schema": {},
            "x-potato": "space"
        }),
        ItemKind::HeaderParameter
        | ItemKind::QueryParameter
        | ItemKind::FormDataParameter
        | ItemKind::PathParameter => json!({
            "name": "testTag",
            "description": "A test tag",
            "type": "string",
            "required": true,
            "x-potato": "space"
        }),
        ItemKind::Response => json!({
            "name": "testTag",
            "description": "A test tag",
            "schema": {},
            "x-potato": "space"
        }),
        ItemKind::ResponseHeader => json!({
            "name": "testTag",
            "description": "A test tag",
            "type": "string",
            "x-potato": "space"
        }),
        ItemKind::Model => json!({
            "name": "testTag",
            "description": "A test tag",
            "type": "object",
            "properties": {},
            "x-potato": "space"
        }),
    }
}

const ALL_KINDS: [ItemKind; 9] = [
    ItemKind::Tag,
    ItemKind::HeaderParameter,
    ItemKind::BodyParameter,
    ItemKind::QueryParameter,
    ItemKind::FormDataParameter,
    ItemKind::PathParameter,
    ItemKind::Response,
    ItemKind::ResponseHeader,
    ItemKind::Model,
];

fn stored<'a>(registry: &'a Registry, kind: ItemKind, name: &str) -> Option<&'a Value> {
    match kind {
        ItemKind::Tag => registry.tags.get(name),
        ItemKind::Response => registry.responses.get(name),
        ItemKind::ResponseHeader => registry.response_headers.get(name),
        ItemKind::Model => registry.models.get(name),
        other => other
            .location()
            .and_then(|location| registry.parameters.get(location).get(name)),
    }
}

#[test]
fn every_kind_accepts_valid_data() {
    for kind in ALL_KINDS {
        let mut registry = Registry::new();
        registry
            .add(kind, &valid_item(kind), AddOptions::default())
            .unwrap_or_else(|e| panic!("{kind:?} rejected valid data: {e}"));
        let item = stored(&registry, kind, "testTag").expect("item should be stored");
        assert_eq!(item["x-potato"], "space");
        assert_eq!(item.get("name").is_none(), kind.deletes_name(), "{kind:?}");
    }
}

#[test]
fn every_kind_rejects_unknown_properties() {
    for kind in ALL_KINDS {
        let mut registry = Registry::new();
        let mut item = valid_item(kind);
        item["spacePotato"] = json!(true);
        let err = registry
            .add(kind, &item, AddOptions::default())
            .expect_err("unknown property should be rejected");
        assert!(err.to_string().contains("spacePotato"), "{kind:?}: {err}");
        assert!(stored(&registry, kind, "testTag").is_none());
    }
}

#[test]
fn every_kind_requires_an_object() {
    for kind in ALL_KINDS {
        let mut registry = Registry::new();
        let err = registry
            .add(kind, &Value::Null, AddOptions::default())
            .expect_err("null should be rejected");
        assert!(matches!(err, RegistryError::Missing(_)), "{kind:?}");
        assert!(err.to_string().ends_with("is required."));
    }
}

#[test]
fn ignore_mode_still_requires_a_name() {
    for kind in ALL_KINDS {
        let mut registry = Registry::new();
        let mut item = valid_item(kind);
        item.as_object_mut().unwrap().remove("name");
        let err = registry
            .add(kind, &item, AddOptions::with_validation(ValidationMode::Ignore))
            .expect_err("nameless item should be rejected");
        assert!(matches!(err, RegistryError::NameRequired { .. }), "{kind:?}: {err}");
    }
}

#[test]
fn idempotent_tag_registration() {
    let mut registry = Registry::new();
    let tag = json!({"name": "x", "description": "a"});
    registry.add_tag(&tag, AddOptions::default()).unwrap();
    registry.add_tag(&tag, AddOptions::default()).unwrap();

    let err = registry
        .add_tag(&json!({"name": "x", "description": "b"}), AddOptions::default())
        .expect_err("conflicting redefinition should fail");
    assert!(matches!(err, RegistryError::Conflict { .. }));
    assert_eq!(registry.tags["x"]["description"], "a");
}

#[test]
fn idempotent_model_registration_with_definitions() {
    let mut registry = Registry::new();
    let model = json!({
        "name": "Order",
        "type": "object",
        "properties": {"line": {"$ref": "#/definitions/Line"}},
        "definitions": {"Line": {"type": "object"}}
    });
    registry.add_model(&model, AddOptions::default()).unwrap();
    registry.add_model(&model, AddOptions::default()).unwrap();
    assert_eq!(registry.models.len(), 2);
}

#[test]
fn model_name_is_required() {
    let mut registry = Registry::new();
    assert!(registry.add_model(&json!({}), AddOptions::default()).is_err());
    registry
        .add_model(
            &json!({"name": "M", "type": "object", "properties": {}}),
            AddOptions::default(),
        )
        .unwrap();
    assert!(registry.models.contains_key("M"));
}

#[test]
fn nested_definitions_become_three_models() {
    let mut registry = Registry::new();
    let model = json!({
        "$schema": "http://json-schema.org/draft-04/schema#",
        "$id": "https://example.com/pet.json",
        "name": "Pet",
        "type": "object",
        "definitions": {
            "Category": {"type": "object", "properties": {"name": {"type": "string"}}},
            "Label": {"type": "string"}
        }
    });
    registry.add_model(&model, AddOptions::default()).unwrap();
    assert_eq!(
        registry.models.keys().collect::<Vec<_>>(),
        vec!["Pet", "Category", "Label"]
    );
    assert_eq!(registry.models["Pet"], json!({"type": "object"}));
}

#[test]
fn typed_items_serialize_before_registration() {
    #[derive(Serialize)]
    struct QueryParam<'a> {
        name: &'a str,
        #[serde(rename = "type")]
        kind: &'a str,
        description: &'a str,
    }

    let mut registry = Registry::new();
    let param = QueryParam {
        name: "page",
        kind: "integer",
        description: "Page number",
    };
    registry
        .add_query_parameter(&param, AddOptions::default())
        .unwrap();
    assert_eq!(
        registry.parameters.get(ParameterLocation::Query)["page"],
        json!({"name": "page", "type": "integer", "description": "Page number", "in": "query"})
    );
}

#[test]
fn warn_mode_registers_and_ignore_mode_skips_validation() {
    let mut registry = Registry::new();
    let odd = json!({"name": "odd", "type": "string", "spacePotato": 1});
    registry
        .add_response_header(&odd, AddOptions::with_validation(ValidationMode::Warn))
        .unwrap();
    registry
        .add_path_parameter(&odd, AddOptions::with_validation(ValidationMode::Ignore))
        .unwrap();
    assert_eq!(registry.response_headers["odd"]["spacePotato"], 1);
    assert_eq!(registry.parameters.path["odd"]["in"], "path");
}
