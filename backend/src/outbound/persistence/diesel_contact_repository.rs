//! SQLite-backed append-only contact message store.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{ContactPersistenceError, ContactRepository};
use crate::domain::{ContactMessage, SubmissionId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::NewContactRow;
use super::pool::DbPool;
use super::schema::contact;

#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn append(
        &self,
        id: SubmissionId,
        message: &ContactMessage,
    ) -> Result<(), ContactPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, ContactPersistenceError::connection))?;
        let row = NewContactRow {
            submission: id.to_string(),
            email: message.email(),
            message: message.message(),
            name: message.name(),
        };

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(contact::table)
                    .values(&row)
                    .execute(conn)
                    .await
                    .map(|_| ())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| {
            map_basic_diesel_error(
                err,
                ContactPersistenceError::query,
                ContactPersistenceError::connection,
            )
        })
    }
}
