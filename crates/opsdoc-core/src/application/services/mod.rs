//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer, the renderers and the ports to
//! accomplish high-level use cases like "generate the documentation tree".

pub mod documentation_service;

pub use documentation_service::DocumentationService;
