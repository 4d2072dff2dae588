//! Account domain service backing the login and signup ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{LoginService, SignupService, UserPersistenceError, UserRepository};
use crate::domain::{Credentials, Error, NewUser, PasswordHash, UserId};

/// Message shown for every failed login, whichever part was wrong.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid username or password";

/// Registers and authenticates users against a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict(format!("username `{username}` is already taken"))
        }
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };
        let matches = user.password_hash.verify(credentials.password()).map_err(|err| {
            warn!(user_id = %user.id, error = %err, "stored password hash unreadable");
            Error::internal(err.to_string())
        })?;
        if matches {
            Ok(user.id)
        } else {
            Err(Error::unauthorized(INVALID_LOGIN_MESSAGE))
        }
    }
}

#[async_trait]
impl<R> SignupService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, credentials: &Credentials) -> Result<UserId, Error> {
        let password_hash = PasswordHash::generate(credentials.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let user = NewUser {
            username: credentials.username().to_owned(),
            password_hash,
        };
        self.users.create(&user).await.map_err(map_user_error)
    }
}
