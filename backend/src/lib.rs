//! Equipment booking backend library.
//!
//! Hexagonal layout: `domain` holds the entities, availability checker, and
//! lifecycle rules behind ports; `inbound` adapts HTTP onto the driving
//! ports; `outbound` implements the driven ports over PostgreSQL; `server`
//! wires the two sides together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware attaching a `trace-id` to every response.
pub use middleware::trace::Trace;
