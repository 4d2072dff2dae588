//! Domain entities, validation, services, and ports.
//!
//! Everything here is transport agnostic. Inbound adapters parse form
//! strings into these types; outbound adapters implement [`ports`].

pub mod account_service;
pub mod auth;
pub mod contact;
pub mod contact_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod stroke;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, INVALID_LOGIN_MESSAGE};
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::contact::{ContactMessage, ContactValidationError, SubmissionId};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode};
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::stroke::{
    ModelVersion, PatientAttributes, PatientFeatures, PatientValidationError, RawPatient,
    RiskAssessment, RiskLabel, StrokeInput,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, StoredUser, USERNAME_MAX_CHARS, UserId};

/// Convenient result alias for handlers and services.
pub type ApiResult<T> = Result<T, Error>;
