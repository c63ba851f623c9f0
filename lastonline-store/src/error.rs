use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("users file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed player entry: {entry:?}")]
    MalformedEntry { entry: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
