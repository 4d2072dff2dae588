//! Driving ports for the account use-cases.
//!
//! Inbound adapters call these to register and authenticate users without
//! importing the persistence layer, so handler tests can substitute the
//! fixtures below.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error>;
}

/// Domain use-case port for account registration.
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account for `credentials` and return its id.
    ///
    /// An existing username yields [`crate::domain::ErrorCode::Conflict`].
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error>;
}

/// Authenticator that accepts only `admin` / `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            Ok(UserId::new(1))
        } else {
            Err(Error::unauthorized("Invalid username or password"))
        }
    }
}

/// Registration stub that rejects `admin` as taken and accepts anything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSignupService;

#[async_trait]
impl SignupService for FixtureSignupService {
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        if credentials.username() == "admin" {
            Err(Error::conflict("username `admin` is already taken"))
        } else {
            Ok(UserId::new(2))
        }
    }
}
