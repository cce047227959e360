//! Restaurant-review backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
/// Request-scoped trace middleware.
pub use middleware::trace::Trace;
