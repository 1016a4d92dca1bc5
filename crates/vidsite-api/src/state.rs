//! Application state.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use vidsite_store::{MemoryProgressStore, PostgresCatalog, ProgressStore, RedisProgressStore, VideoCatalog};

use crate::auth::{IdentityProvider, SessionService};
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub progress: Arc<dyn ProgressStore>,
    pub catalog: Arc<dyn VideoCatalog>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Create new application state, connecting the backends.
    ///
    /// The progress store backend follows the deployment mode: a production
    /// deployment may run several instances behind one load balancer, so the
    /// encoder callback and the progress poll for the same job can land on
    /// different processes and the store must be shared. A development
    /// instance keeps jobs in process memory.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("../../migrations").run(&pool).await?;

        let progress: Arc<dyn ProgressStore> = if config.is_production() {
            info!("Using redis progress store");
            Arc::new(RedisProgressStore::new(&config.redis_url)?)
        } else {
            info!("Using in-memory progress store");
            Arc::new(MemoryProgressStore::new())
        };

        let identity = Arc::new(SessionService::new(config.session_service_url.clone()));

        tokio::fs::create_dir_all(&config.video_root).await?;

        Ok(Self {
            config,
            progress,
            catalog: Arc::new(PostgresCatalog::new(pool)),
            identity,
        })
    }
}
