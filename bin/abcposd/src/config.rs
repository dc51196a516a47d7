//! Server-side configuration file handling.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the embedded stores.
    pub data_dir: String,
}

impl ServerConfig {
    /// Resolve a config name or path. Names map to
    /// `/etc/abcpos/<name>.toml`; anything containing `/` or `.` is
    /// used as a path directly.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from("/etc/abcpos").join(format!("{}.toml", name_or_path))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        let config: ServerConfig = toml::from_str(&content)?;
        if config.storage.data_dir.trim().is_empty() {
            anyhow::bail!("storage.data_dir must not be empty");
        }
        Ok(config)
    }
}
