use std::path::PathBuf;
use std::sync::Arc;

use gallery_upload::UploadService;

use crate::config::ServerConfig;

/// Shared state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub uploads: Arc<UploadService>,
    pub index_path: PathBuf,
    pub static_dir: PathBuf,
    pub max_upload_size: usize,
    pub enable_cors: bool,
}

impl AppState {
    pub fn new(uploads: Arc<UploadService>, config: &ServerConfig) -> Self {
        Self {
            uploads,
            index_path: config.index_path(),
            static_dir: config.static_dir(),
            max_upload_size: config.max_upload_size,
            enable_cors: config.enable_cors,
        }
    }
}
