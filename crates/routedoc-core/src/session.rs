use log::info;
use serde_json::Value;

use crate::config::DocumentOptions;
use crate::document::{self, SwaggerDocument};
use crate::error::{Error, SchemaError, SessionError};
use crate::registry::Registry;
use crate::router::{RouteSource, Router};
use crate::schema::{SchemaId, ValidationReport};

/// Ties a registry, a router and document options together.
///
/// Lifecycle: `reset → initialise → register → describe → compile → json/validate`.
#[derive(Debug, Default)]
pub struct SwaggerSession {
    registry: Registry,
    router: Option<Router>,
    options: DocumentOptions,
    document: Option<SwaggerDocument>,
}

impl SwaggerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the router, options, compiled document and every registered item.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn initialise(&mut self, router: Router, options: DocumentOptions) -> Result<(), Error> {
        if self.router.is_some() {
            return Err(SessionError::AlreadyInitialised.into());
        }
        if options.default_security.is_some() {
            self.registry
                .set_default_security(options.default_security.clone());
        }
        self.router = Some(router);
        self.options = options;
        Ok(())
    }

    pub fn is_initialised(&self) -> bool {
        self.router.is_some()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn router_mut(&mut self) -> Result<&mut Router, SessionError> {
        self.router.as_mut().ok_or(SessionError::NotInitialised)
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Compile the document from the current registry and router.
    pub fn compile(&mut self) -> Result<&SwaggerDocument, Error> {
        let router = self.router.as_ref().ok_or(SessionError::NotInitialised)?;
        let routes = router.described_routes();
        let document = document::assemble(&self.registry, &self.options, &routes)?;
        info!(
            "compiled {} route(s) into {} path(s)",
            routes.len(),
            document.paths.len()
        );
        Ok(self.document.insert(document))
    }

    pub fn document(&self) -> Result<&SwaggerDocument, SessionError> {
        if self.router.is_none() {
            return Err(SessionError::NotInitialised);
        }
        self.document.as_ref().ok_or(SessionError::NotCompiled)
    }

    pub fn json(&self) -> Result<Value, Error> {
        Ok(self.document()?.to_value()?)
    }

    pub fn json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self.document()?)?)
    }

    /// Validate the compiled document against the Swagger 2.0 schema.
    pub fn validate(&self) -> Result<ValidationReport, Error> {
        Ok(self.document()?.validate()?)
    }

    pub fn ensure_valid(&self) -> Result<(), Error> {
        let report = self.validate()?;
        if report.valid {
            return Ok(());
        }
        Err(SchemaError::Invalid {
            schema: SchemaId::Swagger,
            message: report.message.unwrap_or_default(),
        }
        .into())
    }
}
