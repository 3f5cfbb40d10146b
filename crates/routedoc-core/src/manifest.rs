//! Declarative route manifests: common items plus a route tree, in YAML or JSON.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::registry::Registry;
use crate::registry::registrar::{AddOptions, ItemKind, ValidationMode};
use crate::router::{HttpMethod, Router};
use crate::session::SwaggerSession;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteManifest {
    pub common: ManifestCommon,
    pub routes: Vec<ManifestRoute>,
    pub routers: Vec<ManifestRouter>,
}

/// Reusable items, registered in field order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestCommon {
    /// Validation mode applied to every item below.
    pub validation: ValidationMode,
    pub tags: Vec<Value>,
    pub parameters: ManifestParameters,
    pub responses: Vec<Value>,
    pub response_headers: Vec<Value>,
    pub models: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestParameters {
    pub header: Vec<Value>,
    pub body: Vec<Value>,
    pub query: Vec<Value>,
    pub form_data: Vec<Value>,
    pub path: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRoute {
    pub method: HttpMethod,
    pub path: String,
    /// Routes without metadata are registered but left out of the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestRouter {
    pub prefix: String,
    pub routes: Vec<ManifestRoute>,
    pub routers: Vec<ManifestRouter>,
}

impl RouteManifest {
    pub fn from_yaml(content: &str) -> Result<Self, Error> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(content)?)
    }

    /// Register the common items into `session` and build the route tree.
    pub fn apply(&self, session: &mut SwaggerSession) -> Result<Router, Error> {
        self.common.register(session.registry_mut())?;
        build_router(&self.routes, &self.routers)
    }
}

impl ManifestCommon {
    pub fn register(&self, registry: &mut Registry) -> Result<(), Error> {
        let groups: [(ItemKind, &[Value]); 9] = [
            (ItemKind::Tag, self.tags.as_slice()),
            (ItemKind::HeaderParameter, self.parameters.header.as_slice()),
            (ItemKind::BodyParameter, self.parameters.body.as_slice()),
            (ItemKind::QueryParameter, self.parameters.query.as_slice()),
            (ItemKind::FormDataParameter, self.parameters.form_data.as_slice()),
            (ItemKind::PathParameter, self.parameters.path.as_slice()),
            (ItemKind::ResponseHeader, self.response_headers.as_slice()),
            (ItemKind::Response, self.responses.as_slice()),
            (ItemKind::Model, self.models.as_slice()),
        ];
        let options = AddOptions::with_validation(self.validation);
        for (kind, items) in groups {
            for item in items {
                registry.add(kind, item, options)?;
            }
            if !items.is_empty() {
                debug!("registered {} {} item(s)", items.len(), kind.display_name());
            }
        }
        Ok(())
    }
}

fn build_router(routes: &[ManifestRoute], routers: &[ManifestRouter]) -> Result<Router, Error> {
    let mut router = Router::new();
    for route in routes {
        router.route(route.method, route.path.clone());
        if let Some(metadata) = &route.metadata {
            router.describe(metadata.clone()).map_err(|e| {
                Error::Manifest(format!("{} {}: {e}", route.method, route.path))
            })?;
        }
    }
    for child in routers {
        let sub = build_router(&child.routes, &child.routers)?;
        router.mount(child.prefix.clone(), sub);
    }
    Ok(router)
}
