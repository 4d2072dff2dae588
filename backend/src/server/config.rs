//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use strokecare::outbound::model_store::FileModelStore;
use strokecare::outbound::persistence::DbPool;

/// Everything the server needs once startup I/O has succeeded.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) model_store: Arc<FileModelStore>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, model_store: Arc<FileModelStore>) -> Self {
        Self {
            bind_addr,
            db_pool,
            model_store,
        }
    }
}
