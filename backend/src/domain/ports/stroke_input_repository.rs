//! Port for per-user snapshots of submitted patient features.
//!
//! No HTTP handler records inputs yet: the service has no session to tie a
//! prediction to a user. The port and its Diesel adapter back the
//! `stroke_inputs` table so that history can be added without a schema
//! change.

use async_trait::async_trait;

use crate::domain::{PatientFeatures, StrokeInput, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by stroke input repository adapters.
    pub enum StrokeInputPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "stroke input repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "stroke input repository query failed: {message}",
        /// The referenced user does not exist.
        UnknownUser { user_id: i32 } => "user {user_id} does not exist",
    }
}

#[async_trait]
pub trait StrokeInputRepository: Send + Sync {
    /// Store a snapshot for `user_id` and return its row id.
    async fn record(
        &self,
        user_id: UserId,
        features: &PatientFeatures,
    ) -> Result<StrokeInput, StrokeInputPersistenceError>;

    /// Snapshots for `user_id`, oldest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<StrokeInput>, StrokeInputPersistenceError>;
}
