use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Largest accepted request body: 16 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Server settings. Every field may be omitted from a TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Base directory for uploads and the record document.
    pub data_dir: PathBuf,
    /// Overrides `<data_dir>/uploads`.
    pub upload_dir: Option<PathBuf>,
    /// Overrides `<data_dir>/works_data.json`.
    pub records_path: Option<PathBuf>,
    /// Holds `index.html` and the `static/` directory.
    pub site_root: PathBuf,
    pub max_upload_size: usize,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
            data_dir: PathBuf::from("."),
            upload_dir: None,
            records_path: None,
            site_root: PathBuf::from("."),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn upload_root(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("uploads"))
    }

    pub fn records_file(&self) -> PathBuf {
        self.records_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("works_data.json"))
    }

    pub fn index_path(&self) -> PathBuf {
        self.site_root.join("index.html")
    }

    pub fn static_dir(&self) -> PathBuf {
        self.site_root.join("static")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_upload_size, 16 * 1024 * 1024);
        assert!(c.enable_cors);
        assert_eq!(c.upload_root(), PathBuf::from("./uploads"));
        assert_eq!(c.records_file(), PathBuf::from("./works_data.json"));
    }

    #[test]
    fn derived_paths_follow_data_dir() {
        let c = ServerConfig {
            data_dir: "/srv/gallery".into(),
            site_root: "/srv/site".into(),
            ..ServerConfig::default()
        };
        assert_eq!(c.upload_root(), PathBuf::from("/srv/gallery/uploads"));
        assert_eq!(c.records_file(), PathBuf::from("/srv/gallery/works_data.json"));
        assert_eq!(c.index_path(), PathBuf::from("/srv/site/index.html"));
        assert_eq!(c.static_dir(), PathBuf::from("/srv/site/static"));
    }

    #[test]
    fn explicit_paths_win() {
        let c = ServerConfig {
            upload_dir: Some("/mnt/images".into()),
            records_path: Some("/var/lib/works.json".into()),
            ..ServerConfig::default()
        };
        assert_eq!(c.upload_root(), PathBuf::from("/mnt/images"));
        assert_eq!(c.records_file(), PathBuf::from("/var/lib/works.json"));
    }

    #[test]
    fn partial_toml() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:8080"
            data_dir = "/data"
            enable_cors = false
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
        assert_eq!(c.data_dir, PathBuf::from("/data"));
        assert!(!c.enable_cors);
        assert_eq!(c.max_upload_size, DEFAULT_MAX_UPLOAD_SIZE);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 5").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.toml");
        std::fs::write(&path, "max_upload_size = 1024\n").unwrap();
        assert_eq!(ServerConfig::load(&path).unwrap().max_upload_size, 1024);
        assert!(ServerConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
