use log::debug;

use super::parameters::{infer_path_parameters, merge_parameters};
use super::responses::merge_responses;
use super::{Operation, RouteContext, path_template, security};
use crate::error::CompileError;
use crate::metadata::RouteMetadata;
use crate::registry::Registry;

/// Compile one route's metadata into a Swagger operation.
///
/// The phases run in a fixed order: path inference adds parameters and
/// common references that the parameter merge then resolves. `metadata` is
/// cloned first and never changed.
pub fn compile_operation(
    registry: &Registry,
    route: &RouteContext,
    metadata: &RouteMetadata,
) -> Result<Operation, CompileError> {
    let mut metadata = metadata.clone();

    // Phase 1: Shape the skeleton
    let mut operation = Operation {
        tags: metadata.tags.clone(),
        summary: metadata.summary.clone(),
        description: metadata.description.clone().unwrap_or_default(),
        external_docs: None,
        operation_id: None,
        consumes: None,
        produces: None,
        parameters: Vec::new(),
        responses: Default::default(),
        schemes: None,
        deprecated: None,
        security: None,
        extensions: Default::default(),
        path: String::new(),
        verb: Some(route.verb),
    };

    // Phase 2: Copy passthrough fields
    operation.external_docs = metadata.external_docs.clone();
    operation.operation_id = metadata.operation_id.clone();
    operation.consumes = metadata.consumes.clone();
    operation.produces = metadata.produces.clone();
    operation.schemes = metadata.schemes.clone();
    operation.deprecated = metadata.deprecated.filter(|d| *d);
    operation.extensions = metadata.extensions.clone();

    // Phase 3: Infer path parameters from the framework template
    infer_path_parameters(registry, &route.path, &mut metadata);

    // Phase 4: Normalize the path
    operation.path = path_template::to_openapi(&route.path);

    // Phase 5: Resolve security
    operation.security = security::resolve(registry, &metadata)?;

    // Phase 6: Merge common and inline responses
    operation.responses = merge_responses(registry, &metadata)?;

    // Phase 7: Merge common, inline and inferred parameters
    operation.parameters = merge_parameters(registry, &metadata)?;

    debug!("compiled {} {}", route.verb, operation.path);
    Ok(operation)
}
