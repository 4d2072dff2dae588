//! Contact domain service: assigns submission ids and appends messages.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ContactCommand, ContactPersistenceError, ContactRepository};
use crate::domain::{ContactMessage, Error, SubmissionId};

#[derive(Clone)]
pub struct ContactService<R> {
    messages: Arc<R>,
}

impl<R> ContactService<R> {
    pub fn new(messages: Arc<R>) -> Self {
        Self { messages }
    }
}

#[async_trait]
impl<R> ContactCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn submit(&self, message: &ContactMessage) -> Result<SubmissionId, Error> {
        let id = SubmissionId::random();
        self.messages
            .append(id, message)
            .await
            .map_err(|err| match err {
                ContactPersistenceError::Connection { message } => {
                    Error::service_unavailable(format!("contact repository unavailable: {message}"))
                }
                ContactPersistenceError::Query { message } => {
                    Error::internal(format!("contact repository error: {message}"))
                }
            })?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::FixtureContactRepository;

    #[tokio::test]
    async fn repeat_submissions_get_distinct_ids() {
        let repo = Arc::new(FixtureContactRepository::default());
        let service = ContactService::new(Arc::clone(&repo));
        let message =
            ContactMessage::try_from_parts("Ann", "ann@example.com", "hello").expect("valid");

        let first = service.submit(&message).await.expect("first");
        let second = service.submit(&message).await.expect("second");

        assert_ne!(first, second);
        let stored = repo.messages();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].0, first);
        assert_eq!(stored[1].1.name(), "Ann");
    }
}
