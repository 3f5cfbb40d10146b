//! A minimal route tree: the source of `{path, verb, metadata}` records the
//! document assembler consumes.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compile::to_json;
use crate::error::RouteError;
use crate::metadata::RouteMetadata;
use crate::schema::{self, SchemaId};

/// HTTP methods that can appear as Swagger path-item keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| format!("unsupported HTTP method: {s}"))
    }
}

/// A described route with its full, prefixed path.
#[derive(Debug, Clone, PartialEq)]
pub struct DescribedRoute {
    pub path: String,
    pub verb: HttpMethod,
    pub metadata: RouteMetadata,
}

/// Anything that can list its described routes.
pub trait RouteSource {
    fn described_routes(&self) -> Vec<DescribedRoute>;
}

#[derive(Debug, Clone)]
struct RouteLayer {
    path: String,
    method: HttpMethod,
    metadata: Option<RouteMetadata>,
}

#[derive(Debug, Clone)]
enum Layer {
    Route(RouteLayer),
    Mount { prefix: String, router: Router },
}

/// An ordered stack of routes and mounted sub-routers.
#[derive(Debug, Clone, Default)]
pub struct Router {
    layers: Vec<Layer>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Call [`Router::describe`] right after to document it.
    pub fn route(&mut self, method: HttpMethod, path: impl Into<String>) -> &mut Self {
        self.layers.push(Layer::Route(RouteLayer {
            path: path.into(),
            method,
            metadata: None,
        }));
        self
    }

    /// Mount `router` under `prefix`.
    pub fn mount(&mut self, prefix: impl Into<String>, router: Router) -> &mut Self {
        self.layers.push(Layer::Mount {
            prefix: prefix.into(),
            router,
        });
        self
    }

    /// Attach metadata to the most recently added route.
    ///
    /// The metadata is validated against the `meta-data` schema and must
    /// declare at least one response. Describing a route twice logs a warning
    /// and keeps the first description.
    pub fn describe(&mut self, metadata: Value) -> Result<&mut Self, RouteError> {
        let route = match self.layers.last_mut() {
            None => {
                return Err(RouteError::NoRoute {
                    metadata: to_json(&metadata),
                });
            }
            Some(Layer::Mount { prefix, .. }) => {
                return Err(RouteError::LastLayerNotRoute {
                    prefix: prefix.clone(),
                    metadata: to_json(&metadata),
                });
            }
            Some(Layer::Route(route)) => route,
        };
        if route.metadata.is_some() {
            warn!("route {} {} already described", route.method, route.path);
            return Ok(self);
        }

        schema::ensure_valid(SchemaId::MetaData, &metadata)?;
        let parsed: RouteMetadata = serde_json::from_value(metadata)?;
        if !parsed.has_responses() {
            return Err(RouteError::NoResponses);
        }
        route.metadata = Some(parsed);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn collect(&self, prefix: &str, out: &mut Vec<DescribedRoute>) {
        for layer in &self.layers {
            if let Layer::Route(route) = layer {
                if let Some(metadata) = &route.metadata {
                    out.push(DescribedRoute {
                        path: join_paths(prefix, &route.path),
                        verb: route.method,
                        metadata: metadata.clone(),
                    });
                }
            }
        }
        for layer in &self.layers {
            if let Layer::Mount {
                prefix: mount_prefix,
                router,
            } = layer
            {
                router.collect(&format!("{prefix}{mount_prefix}"), out);
            }
        }
    }
}

impl RouteSource for Router {
    /// Own routes in registration order, then each mounted router in turn.
    fn described_routes(&self) -> Vec<DescribedRoute> {
        let mut out = Vec::new();
        self.collect("", &mut out);
        out
    }
}

/// Join a mount prefix and a route path, collapsing repeated slashes and
/// dropping a trailing slash unless the result is the root.
pub fn join_paths(prefix: &str, path: &str) -> String {
    let joined = format!("{prefix}/{path}").replace('\\', "/");
    let mut result = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && result.ends_with('/') {
            continue;
        }
        result.push(c);
    }
    if result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    result
}
