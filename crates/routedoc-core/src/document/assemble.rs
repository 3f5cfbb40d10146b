use std::collections::HashSet;

use log::{debug, warn};
use serde_json::Value;

use super::SwaggerDocument;
use crate::compile::{RouteContext, compile_operation};
use crate::config::DocumentOptions;
use crate::error::Error;
use crate::registry::Registry;
use crate::router::DescribedRoute;

const DEFAULT_BASE_PATH: &str = "/";

/// Build the Swagger document for `routes`.
///
/// Starts from `options.document` when set, fills in whatever the base
/// document leaves empty from `options`, then adds registered models and
/// tags and one compiled operation per route. Any compile error aborts the
/// whole document.
pub fn assemble(
    registry: &Registry,
    options: &DocumentOptions,
    routes: &[DescribedRoute],
) -> Result<SwaggerDocument, Error> {
    // Phase 1: Start from the base document
    let mut document = match &options.document {
        Some(base) => serde_json::from_value(base.clone())?,
        None => SwaggerDocument::default(),
    };

    // Phase 2: Apply options without overwriting the base document
    apply_options(options, &mut document);

    // Phase 3: Registered models and tags
    for (name, model) in &registry.models {
        document.definitions.insert(name.clone(), model.clone());
    }
    let existing_tags: HashSet<String> = document
        .tags
        .iter()
        .filter_map(|tag| tag.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    for (name, tag) in &registry.tags {
        if existing_tags.contains(name) {
            debug!("tag {name} already present in the base document");
            continue;
        }
        document.tags.push(tag.clone());
    }

    // Phase 4: Compile every described route
    for route in routes {
        let context = RouteContext::new(route.verb, route.path.clone());
        let operation = compile_operation(registry, &context, &route.metadata)?;
        let value = serde_json::to_value(&operation)?;
        let path_item = document.paths.entry(operation.path.clone()).or_default();
        if path_item.contains_key(route.verb.as_str()) {
            warn!(
                "{} {} is described more than once; the later description wins",
                route.verb, operation.path
            );
        }
        path_item.insert(route.verb.as_str().to_string(), value);
    }

    Ok(document)
}

fn apply_options(options: &DocumentOptions, document: &mut SwaggerDocument) {
    let info = &mut document.info;
    fill_string(&mut info.title, &options.title);
    fill_string(&mut info.version, &options.version);
    fill(&mut info.description, &options.description);
    fill(&mut info.terms_of_service, &options.terms_of_service);
    fill(&mut info.contact, &options.contact);
    fill(&mut info.license, &options.license);

    fill(&mut document.host, &options.host);
    fill(&mut document.base_path, &options.base_path);
    if document.base_path.is_none() {
        document.base_path = Some(DEFAULT_BASE_PATH.to_string());
    }
    fill(&mut document.schemes, &options.schemes);
    fill(&mut document.consumes, &options.consumes);
    fill(&mut document.produces, &options.produces);
    fill(&mut document.security, &options.security);
    fill(&mut document.security_definitions, &options.security_definitions);
    fill(&mut document.external_docs, &options.external_docs);
}

fn fill<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if target.is_none() {
        target.clone_from(source);
    }
}

fn fill_string(target: &mut String, source: &Option<String>) {
    if target.is_empty() {
        if let Some(value) = source {
            target.clone_from(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::metadata::RouteMetadata;
    use crate::router::HttpMethod;

    fn route(verb: HttpMethod, path: &str, metadata: Value) -> DescribedRoute {
        DescribedRoute {
            path: path.to_string(),
            verb,
            metadata: serde_json::from_value::<RouteMetadata>(metadata).unwrap(),
        }
    }

    #[test]
    fn test_options_fill_default_document() {
        let options = DocumentOptions {
            title: Some("Pets".into()),
            version: Some("1.0.0".into()),
            host: Some("localhost:3000".into()),
            ..DocumentOptions::default()
        };
        let document = assemble(&Registry::new(), &options, &[]).unwrap();
        assert_eq!(
            document.to_value().unwrap(),
            json!({
                "swagger": "2.0",
                "info": {"title": "Pets", "version": "1.0.0"},
                "host": "localhost:3000",
                "basePath": "/",
                "paths": {}
            })
        );
    }

    #[test]
    fn test_base_document_values_win() {
        let options = DocumentOptions {
            title: Some("From options".into()),
            version: Some("9".into()),
            base_path: Some("/v9".into()),
            document: Some(json!({
                "swagger": "2.0",
                "info": {"title": "From base", "version": ""},
                "basePath": "/v1",
                "paths": {"/legacy": {"get": {"responses": {"200": {"description": "ok"}}}}},
                "tags": [{"name": "pets", "description": "base"}]
            })),
            ..DocumentOptions::default()
        };
        let mut registry = Registry::new();
        registry
            .tags
            .insert("pets".into(), json!({"name": "pets", "description": "registry"}));
        registry.tags.insert("users".into(), json!({"name": "users"}));

        let document = assemble(&registry, &options, &[]).unwrap();
        assert_eq!(document.info.title, "From base");
        assert_eq!(document.info.version, "9");
        assert_eq!(document.base_path.as_deref(), Some("/v1"));
        assert!(document.paths.contains_key("/legacy"));
        assert_eq!(
            document.tags,
            vec![json!({"name": "pets", "description": "base"}), json!({"name": "users"})]
        );
    }

    #[test]
    fn test_empty_collections_are_not_emitted() {
        let document = assemble(&Registry::new(), &DocumentOptions::default(), &[]).unwrap();
        let value = document.to_value().unwrap();
        assert!(value.get("definitions").is_none());
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn test_operations_are_keyed_by_path_and_verb() {
        let mut registry = Registry::new();
        registry
            .models
            .insert("Pet".into(), json!({"type": "object"}));
        let routes = vec![
            route(HttpMethod::Get, "/pets/:id", json!({"responses": {"200": {"model": "Pet"}}})),
            route(HttpMethod::Delete, "/pets/:id", json!({"responses": {"204": {}}})),
        ];
        let document = assemble(&registry, &DocumentOptions::default(), &routes).unwrap();

        let item = &document.paths["/pets/{id}"];
        assert_eq!(item.keys().collect::<Vec<_>>(), vec!["get", "delete"]);
        assert_eq!(
            item["get"]["responses"]["200"]["schema"]["$ref"],
            "#/definitions/Pet"
        );
        assert!(item["get"].get("path").is_none());
        assert!(item["get"].get("verb").is_none());
        assert_eq!(document.definitions["Pet"], json!({"type": "object"}));
    }

    #[test]
    fn test_later_duplicate_route_wins() {
        let routes = vec![
            route(HttpMethod::Get, "/a", json!({"summary": "first", "responses": {"200": {}}})),
            route(HttpMethod::Get, "/a", json!({"summary": "second", "responses": {"200": {}}})),
        ];
        let document = assemble(&Registry::new(), &DocumentOptions::default(), &routes).unwrap();
        assert_eq!(document.paths["/a"]["get"]["summary"], "second");
    }

    #[test]
    fn test_compile_error_aborts_assembly() {
        let routes = vec![route(
            HttpMethod::Get,
            "/a",
            json!({"common": {"responses": ["missing"]}}),
        )];
        let err = assemble(&Registry::new(), &DocumentOptions::default(), &routes).unwrap_err();
        assert!(matches!(err, Error::Compile(_)));
    }
}
