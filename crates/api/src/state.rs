use std::sync::Arc;

use petstore_db::DbPool;

use crate::config::ServerConfig;

/// Handler state: the pool and the startup configuration. Clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    /// Read by the auth extractor and login for JWT settings.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
