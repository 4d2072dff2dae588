//! Account credentials submitted through the login and signup forms.
//!
//! Handlers validate raw form strings here before talking to a port or
//! service, so blank inputs never reach the database.

use std::fmt;

use zeroize::Zeroizing;

use super::user::USERNAME_MAX_CHARS;

/// Error returned when credential form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username exceeds the column width.
    UsernameTooLong { max: usize },
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username/password pair.
///
/// ## Invariants
/// - `username` is trimmed, non-empty, and at most
///   [`USERNAME_MAX_CHARS`] characters.
/// - `password` is non-empty and kept exactly as submitted; it is zeroed on
///   drop.
///
/// # Examples
/// ```
/// use strokecare::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" alice ", "s3cret ").expect("valid");
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "s3cret ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }
        if normalized.chars().count() > USERNAME_MAX_CHARS {
            return Err(CredentialsValidationError::UsernameTooLong {
                max: USERNAME_MAX_CHARS,
            });
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
