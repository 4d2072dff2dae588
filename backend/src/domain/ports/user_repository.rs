//! Port abstraction for user persistence adapters and their errors.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewUser, StoredUser, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername { username: String } => "username `{username}` is already taken",
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user in its own transaction and return the assigned id.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the unique
    /// constraint rejects the row; nothing is written in that case.
    async fn create(&self, user: &NewUser) -> Result<UserId, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError>;
}

/// In-memory repository for service and handler tests.
#[derive(Debug, Default)]
pub struct FixtureUserRepository {
    users: Mutex<HashMap<String, StoredUser>>,
}

impl FixtureUserRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredUser>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("fixture user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn create(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut users = self.lock()?;
        if users.contains_key(&user.username) {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_str(),
            ));
        }
        let next = i32::try_from(users.len())
            .map_err(|_| UserPersistenceError::query("fixture user store full"))?
            + 1;
        let id = UserId::new(next);
        users.insert(
            user.username.clone(),
            StoredUser {
                id,
                username: user.username.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(id)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(self.lock()?.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordHash;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_owned(),
            password_hash: PasswordHash::from_stored("$argon2id$stub"),
        }
    }

    #[tokio::test]
    async fn fixture_assigns_sequential_ids_and_rejects_duplicates() {
        let repo = FixtureUserRepository::default();
        assert_eq!(repo.create(&new_user("ann")).await, Ok(UserId::new(1)));
        assert_eq!(repo.create(&new_user("bob")).await, Ok(UserId::new(2)));
        assert_eq!(
            repo.create(&new_user("ann")).await,
            Err(UserPersistenceError::duplicate_username("ann"))
        );
        let found = repo
            .find_by_username("bob")
            .await
            .expect("lookup")
            .expect("bob stored");
        assert_eq!(found.id, UserId::new(2));
    }
}
