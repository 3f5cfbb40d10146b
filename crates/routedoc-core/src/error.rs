use thiserror::Error;

use crate::schema::SchemaId;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema registered with id {0}")]
    UnknownSchema(String),

    #[error("schema {schema} failed to compile: {message}")]
    Compile { schema: String, message: String },

    #[error("{message}")]
    Invalid { schema: SchemaId, message: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{0} is required.")]
    Missing(&'static str),

    #[error("{0} must be an object")]
    NotAnObject(&'static str),

    #[error("Name is required when adding a {kind}. Item: {item}")]
    NameRequired { kind: &'static str, item: String },

    #[error("Name must be a string when adding a {kind}. Item: {item}")]
    NameNotString { kind: &'static str, item: String },

    #[error(
        "There already is a {kind} with the name {name} and the objects themselves were not equal. Existing {existing} Object to add :{attempted}"
    )]
    Conflict {
        kind: &'static str,
        name: String,
        existing: String,
        attempted: String,
    },

    #[error("model {name} defines itself through nested definitions (chain: {chain})")]
    CyclicModel { name: String, chain: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("common response {name} was not found in the registry. Metadata: {metadata}")]
    MissingCommonResponse { name: String, metadata: String },

    #[error("common {location} parameter {name} was not found in the registry. Metadata: {metadata}")]
    MissingCommonParameter {
        location: String,
        name: String,
        metadata: String,
    },

    #[error("common response header {name} was not found in the registry. Response: {response}")]
    MissingResponseHeader { name: String, response: String },

    #[error("you cannot set both model and arrayOfModel on the same {target}: {item}")]
    ModelAndArrayOfModel { target: &'static str, item: String },

    #[error("you cannot set schema together with model or arrayOfModel on a {target}: {item}")]
    SchemaWithModel { target: &'static str, item: String },

    #[error("model and arrayOfModel are only valid on body parameters: {parameter}")]
    ModelOnNonBodyParameter { parameter: String },

    #[error("parameter is missing required property {property}: {parameter}")]
    MissingParameterProperty {
        property: &'static str,
        parameter: String,
    },

    #[error("body parameter must have a schema, model or arrayOfModel: {parameter}")]
    BodyWithoutSchema { parameter: String },

    #[error("parameter of type array must declare items: {parameter}")]
    ArrayWithoutItems { parameter: String },

    #[error("response must be an object: {response}")]
    ResponseNotAnObject { response: String },

    #[error(
        "security was set to true but no default security was configured. Metadata: {metadata}"
    )]
    DefaultSecurityUnset { metadata: String },

    #[error("unsupported security value {security}, expected a boolean, string, object or array")]
    UnsupportedSecurity { security: String },
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(
        "unable to describe the last route since the router has no routes yet. Metadata: {metadata}"
    )]
    NoRoute { metadata: String },

    #[error(
        "unable to describe the last route since the last item in the stack was a mounted router ({prefix}). Metadata: {metadata}"
    )]
    LastLayerNotRoute { prefix: String, metadata: String },

    #[error(
        "Each metadata description for a route must have at least one response, either specified in metaData.responses or metaData.common.responses."
    )]
    NoResponses,

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("metadata could not be read after validation: {0}")]
    Metadata(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Initialise must be called before you can compile the swagger spec")]
    NotInitialised,

    #[error("Already initialised, call reset first if you want to reinitialise")]
    AlreadyInitialised,

    #[error("Compile must be called before the swagger document can be read")]
    NotCompiled,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid route manifest: {0}")]
    Manifest(String),
}
