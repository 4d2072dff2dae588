//! Shared wiring for integration tests: a scratch SQLite database and a
//! model trained on synthetic records, both in a temporary directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::web;
use stroke_model::StrokeModel;
use stroke_model::fixtures::synthetic_records;
use strokecare::domain::{AccountService, ContactService};
use strokecare::inbound::http::health::HealthState;
use strokecare::inbound::http::state::HttpState;
use strokecare::outbound::model_store::FileModelStore;
use strokecare::outbound::persistence::{
    DbPool, DieselContactRepository, DieselUserRepository, PoolConfig, run_migrations,
};
use tempfile::TempDir;

pub struct Harness {
    _dir: TempDir,
    pub database_url: String,
    pub model_path: PathBuf,
    pub pool: DbPool,
}

pub fn train_model(path: &Path) {
    StrokeModel::fit(&synthetic_records(400, 11))
        .expect("fit synthetic model")
        .save_to_file(path)
        .expect("save model");
}

impl Harness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let database_url = dir.path().join("users.db").to_string_lossy().into_owned();
        let model_path = dir.path().join("stroke_model.msgpack");
        train_model(&model_path);

        run_migrations(&database_url).await.expect("migrations");
        let pool = DbPool::new(PoolConfig::new(database_url.as_str()).with_max_size(2))
            .await
            .expect("pool");

        Self {
            _dir: dir,
            database_url,
            model_path,
            pool,
        }
    }

    pub fn http_state(&self) -> web::Data<HttpState> {
        let accounts = Arc::new(AccountService::new(Arc::new(DieselUserRepository::new(
            self.pool.clone(),
        ))));
        let contact = Arc::new(ContactService::new(Arc::new(DieselContactRepository::new(
            self.pool.clone(),
        ))));
        let store = FileModelStore::open(&self.model_path, true).expect("model store");
        web::Data::new(HttpState::new(
            accounts.clone(),
            accounts,
            contact,
            Arc::new(store),
        ))
    }

    pub fn health_state() -> web::Data<HealthState> {
        let health = HealthState::new();
        health.mark_ready();
        web::Data::new(health)
    }
}
