//! SQLite-backed store of per-user patient feature snapshots.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{StrokeInputPersistenceError, StrokeInputRepository};
use crate::domain::{PatientFeatures, StrokeInput, UserId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewStrokeInputRow, StrokeInputRow};
use super::pool::{DbPool, PoolError};
use super::schema::stroke_inputs;

#[derive(Clone)]
pub struct DieselStrokeInputRepository {
    pool: DbPool,
}

impl DieselStrokeInputRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StrokeInputPersistenceError {
    map_basic_pool_error(error, StrokeInputPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> StrokeInputPersistenceError {
    map_basic_diesel_error(
        error,
        StrokeInputPersistenceError::query,
        StrokeInputPersistenceError::connection,
    )
}

fn row_to_input(row: StrokeInputRow) -> StrokeInput {
    StrokeInput {
        id: row.id,
        user_id: UserId::new(row.user_id),
        features: PatientFeatures {
            age: row.age,
            hypertension: row.hypertension,
            heart_disease: row.heart_disease,
            avg_glucose_level: row.avg_glucose_level,
            bmi: row.bmi,
            smoking_status: row.smoking_status,
            marital_status: row.marital_status,
            work_type: row.work_type,
        },
        recorded_at: row.recorded_at.and_utc(),
    }
}

#[async_trait]
impl StrokeInputRepository for DieselStrokeInputRepository {
    async fn record(
        &self,
        user_id: UserId,
        features: &PatientFeatures,
    ) -> Result<StrokeInput, StrokeInputPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewStrokeInputRow {
            user_id: user_id.as_i32(),
            age: features.age,
            hypertension: features.hypertension,
            heart_disease: features.heart_disease,
            avg_glucose_level: features.avg_glucose_level,
            bmi: features.bmi,
            smoking_status: features.smoking_status.as_str(),
            marital_status: features.marital_status.as_str(),
            work_type: features.work_type.as_str(),
            recorded_at: Utc::now().naive_utc(),
        };

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(stroke_inputs::table)
                    .values(&row)
                    .returning(StrokeInputRow::as_returning())
                    .get_result(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map(row_to_input)
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                StrokeInputPersistenceError::unknown_user(user_id.as_i32())
            } else {
                map_diesel_error(err)
            }
        })
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<StrokeInput>, StrokeInputPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        stroke_inputs::table
            .filter(stroke_inputs::user_id.eq(user_id.as_i32()))
            .order(stroke_inputs::id.asc())
            .select(StrokeInputRow::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(row_to_input).collect())
            .map_err(map_diesel_error)
    }
}
