//! StrokeCare web service.
//!
//! Hexagonal layout: [`domain`] holds entities, validation, services, and
//! ports; [`inbound::http`] adapts HTML forms to domain calls; [`outbound`]
//! implements the ports with SQLite and the on-disk classifier.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
