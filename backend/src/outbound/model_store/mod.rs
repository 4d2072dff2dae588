//! File-backed, hot-reloadable store for the stroke classifier.
//!
//! The artifact is read once at startup. With hot reload enabled, each
//! assessment first compares the file's modification time with the one
//! recorded at the last load attempt; a newer file is re-read off the async
//! workers and swapped in atomically. A reload that fails to read or decode
//! keeps the previous model serving and is not retried until the file
//! changes again.
//!
//! Every loaded model is tagged with a [`ModelVersion`]: the leading hex
//! digits of the SHA-256 of the artifact bytes.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::SystemTime;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use stroke_model::{ModelError, StrokeModel};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{PredictionError, StrokePredictor};
use crate::domain::{ModelVersion, PatientFeatures, RiskAssessment};

const VERSION_HEX_CHARS: usize = 12;

/// Failure to load a model artifact.
#[derive(Debug, Error)]
pub enum ModelStoreError {
    #[error("failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode model artifact {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

#[derive(Debug)]
struct LoadedModel {
    model: StrokeModel,
    version: ModelVersion,
    modified: Option<SystemTime>,
}

impl LoadedModel {
    fn read(path: &Path) -> Result<Self, ModelStoreError> {
        let read_err = |source| ModelStoreError::Read {
            path: path.to_path_buf(),
            source,
        };
        let modified = std::fs::metadata(path)
            .map_err(read_err)?
            .modified()
            .ok();
        let bytes = std::fs::read(path).map_err(read_err)?;
        let model =
            StrokeModel::from_msgpack_slice(&bytes).map_err(|source| ModelStoreError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            model,
            version: fingerprint(&bytes),
            modified,
        })
    }
}

fn fingerprint(bytes: &[u8]) -> ModelVersion {
    let digest = hex::encode(Sha256::digest(bytes));
    ModelVersion::new(&digest[..VERSION_HEX_CHARS])
}

/// Result of one [`FileModelStore::reload_if_stale`] check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The artifact has not changed since the last attempt.
    Unchanged,
    /// A newer artifact was loaded and is now serving.
    Swapped,
    /// A newer artifact failed to load; the previous model keeps serving.
    Failed,
}

/// [`StrokePredictor`] backed by a MessagePack artifact on disk.
#[derive(Debug)]
pub struct FileModelStore {
    path: PathBuf,
    hot_reload: bool,
    current: RwLock<Arc<LoadedModel>>,
    /// Modification time of the last artifact a load was attempted for,
    /// successful or not.
    last_attempt: Mutex<Option<SystemTime>>,
}

impl FileModelStore {
    /// Load the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, or not a valid model.
    pub fn open(path: impl Into<PathBuf>, hot_reload: bool) -> Result<Self, ModelStoreError> {
        let path = path.into();
        let loaded = LoadedModel::read(&path)?;
        info!(
            path = %path.display(),
            version = %loaded.version,
            columns = loaded.model.schema().len(),
            "loaded stroke model"
        );
        Ok(Self {
            path,
            hot_reload,
            last_attempt: Mutex::new(loaded.modified),
            current: RwLock::new(Arc::new(loaded)),
        })
    }

    fn snapshot(&self) -> Result<Arc<LoadedModel>, PredictionError> {
        self.current
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| PredictionError::unavailable("model store lock poisoned"))
    }

    /// Claim the reload of an artifact modified at `on_disk`.
    ///
    /// Returns `false` when that modification time was already attempted, so
    /// a broken artifact is read once rather than on every request.
    fn claim_attempt(&self, on_disk: Option<SystemTime>) -> bool {
        let Ok(mut last) = self.last_attempt.lock() else {
            return false;
        };
        if on_disk <= *last {
            return false;
        }
        *last = on_disk;
        true
    }

    /// Re-read the artifact if its modification time has advanced since the
    /// last attempt. Reading and decoding run on the blocking pool.
    pub async fn reload_if_stale(&self) -> ReloadOutcome {
        let on_disk = std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok();
        if !self.claim_attempt(on_disk) {
            return ReloadOutcome::Unchanged;
        }

        let path = self.path.clone();
        let loaded = match tokio::task::spawn_blocking(move || LoadedModel::read(&path)).await {
            Ok(Ok(loaded)) => loaded,
            Ok(Err(err)) => {
                warn!(error = %err, "model reload failed; keeping previous model");
                return ReloadOutcome::Failed;
            }
            Err(err) => {
                warn!(error = %err, "model reload task did not complete");
                return ReloadOutcome::Failed;
            }
        };

        let version = loaded.version.clone();
        match self.current.write() {
            Ok(mut guard) => {
                let previous = std::mem::replace(&mut *guard, Arc::new(loaded));
                info!(previous = %previous.version, %version, "reloaded stroke model");
                ReloadOutcome::Swapped
            }
            Err(_) => ReloadOutcome::Failed,
        }
    }
}

#[async_trait]
impl StrokePredictor for FileModelStore {
    async fn assess(&self, features: &PatientFeatures) -> Result<RiskAssessment, PredictionError> {
        if self.hot_reload {
            self.reload_if_stale().await;
        }
        let loaded = self.snapshot()?;
        let probability = loaded
            .model
            .predict_proba(&features.feature_table())
            .map_err(|err| PredictionError::inference(err.to_string()))?;
        Ok(RiskAssessment::new(probability, loaded.version.clone()))
    }

    fn model_version(&self) -> Option<ModelVersion> {
        self.snapshot().ok().map(|loaded| loaded.version.clone())
    }
}

#[cfg(test)]
mod tests;
