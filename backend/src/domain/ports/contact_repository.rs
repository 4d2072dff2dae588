//! Port for appending contact form submissions.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ContactMessage, SubmissionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

/// Append-only store of contact messages.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store `message` under `id` in its own transaction.
    async fn append(
        &self,
        id: SubmissionId,
        message: &ContactMessage,
    ) -> Result<(), ContactPersistenceError>;
}

/// In-memory repository that keeps every appended message.
#[derive(Debug, Default)]
pub struct FixtureContactRepository {
    messages: Mutex<Vec<(SubmissionId, ContactMessage)>>,
}

impl FixtureContactRepository {
    /// Messages appended so far, in order.
    pub fn messages(&self) -> Vec<(SubmissionId, ContactMessage)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContactRepository for FixtureContactRepository {
    async fn append(
        &self,
        id: SubmissionId,
        message: &ContactMessage,
    ) -> Result<(), ContactPersistenceError> {
        self.messages
            .lock()
            .map_err(|_| ContactPersistenceError::query("fixture contact store poisoned"))?
            .push((id, message.clone()));
        Ok(())
    }
}
