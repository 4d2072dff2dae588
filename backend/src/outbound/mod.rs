//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: SQLite repositories using Diesel
//! - **model_store**: the stroke classifier loaded from disk
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business logic.

pub mod model_store;
pub mod persistence;
