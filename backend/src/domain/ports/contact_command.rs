//! Driving port for storing contact form submissions.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ContactMessage, Error, SubmissionId};

#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Append `message` and return the id assigned to this submission.
    async fn submit(&self, message: &ContactMessage) -> Result<SubmissionId, Error>;
}

/// Command double that records submitted messages in memory.
#[derive(Debug, Default)]
pub struct FixtureContactCommand {
    submitted: Mutex<Vec<ContactMessage>>,
}

impl FixtureContactCommand {
    pub fn submitted(&self) -> Vec<ContactMessage> {
        self.submitted
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ContactCommand for FixtureContactCommand {
    async fn submit(&self, message: &ContactMessage) -> Result<SubmissionId, Error> {
        self.submitted
            .lock()
            .map_err(|_| Error::internal("fixture contact command poisoned"))?
            .push(message.clone());
        Ok(SubmissionId::random())
    }
}
