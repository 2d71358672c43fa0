use std::sync::Arc;

use gallery_store::{FsContentStore, JsonRecordStore, RecordStore};
use gallery_upload::UploadService;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Gallery HTTP server.
pub struct GalleryServer {
    config: ServerConfig,
}

impl GalleryServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the stores and wire up the upload service.
    ///
    /// The content directory must be creatable. A record document that
    /// cannot be created or read is logged and tolerated: listings come back
    /// empty and uploads fail with a server error until it is fixed.
    pub fn state(&self) -> ServerResult<AppState> {
        let content = FsContentStore::open(self.config.upload_root())?;
        let records = JsonRecordStore::new(self.config.records_file());
        if let Err(e) = records.ensure_initialized() {
            error!(path = %records.path().display(), error = %e, "could not initialize record document");
        }
        let uploads = UploadService::new(Arc::new(content), Arc::new(records));
        Ok(AppState::new(Arc::new(uploads), &self.config))
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.state()?))
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("gallery server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
