//! Contact form submissions.
//!
//! Submissions are append-only: every message gets its own [`SubmissionId`]
//! and the same person may write any number of times.

use std::fmt;

use uuid::Uuid;

/// Error returned when a contact form field is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    EmptyEmail,
    EmptyMessage,
}

impl ContactValidationError {
    /// Form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail => "email",
            Self::EmptyMessage => "message",
        }
    }
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must not be empty", self.field())
    }
}

impl std::error::Error for ContactValidationError {}

/// Server-generated identifier of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated contact message.
///
/// ## Invariants
/// - `name` and `email` are trimmed and non-empty.
/// - `message` is non-blank; its text is stored as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    name: String,
    email: String,
    message: String,
}

impl ContactMessage {
    pub fn try_from_parts(
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<Self, ContactValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(ContactValidationError::EmptyEmail);
        }
        if message.trim().is_empty() {
            return Err(ContactValidationError::EmptyMessage);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
