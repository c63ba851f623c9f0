use std::path::PathBuf;

use lastonline_store::StoreError;
use thiserror::Error;

/// Errors reading or writing the plugin's files.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid player cache {path}: {source}")]
    Cache {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl PluginError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PluginError::Io { path, source }
    }
}
