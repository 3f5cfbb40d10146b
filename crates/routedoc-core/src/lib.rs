pub mod compile;
pub mod config;
pub mod document;
pub mod error;
pub mod manifest;
pub mod metadata;
pub mod registry;
pub mod router;
pub mod schema;
pub mod session;

pub use compile::{Operation, RouteContext, compile_operation};
pub use config::DocumentOptions;
pub use document::SwaggerDocument;
pub use error::Error;
pub use manifest::RouteManifest;
pub use metadata::RouteMetadata;
pub use registry::Registry;
pub use registry::registrar::{AddOptions, ItemKind, ValidationMode};
pub use router::{DescribedRoute, HttpMethod, RouteSource, Router};
pub use session::SwaggerSession;
