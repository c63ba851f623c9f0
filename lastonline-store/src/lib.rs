mod error;
mod models;
mod tracker;

pub use error::{Result, StoreError};
pub use models::{Capacity, PlayerName, PlayerRecord};
pub use tracker::{Activity, Tracker};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the player list inside the plugin data folder.
pub const USERS_FILE: &str = "users.yml";

/// On-disk layout of `users.yml`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersDocument {
  #[serde(rename = "List", default)]
  list: Option<Vec<String>>,
}

/// Flat file storage for tracked players.
#[derive(Debug, Clone)]
pub struct UserStore {
  path: PathBuf,
}

impl UserStore {
  /// Open the store at `path`, creating an empty player list if the file does not exist.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self {
      path: path.as_ref().to_path_buf(),
    };

    if !store.path.exists() {
      if let Some(parent) = store.path.parent() {
        fs::create_dir_all(parent)?;
      }
      store.write_document(&UsersDocument {
        list: Some(Vec::new()),
      })?;
      info!(path = %store.path.display(), "created empty users file");
    }

    Ok(store)
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Read every record from disk.
  /// Entries that can't be parsed are logged and skipped.
  pub fn load(&self) -> Result<Vec<PlayerRecord>> {
    let text = fs::read_to_string(&self.path)?;
    let document: UsersDocument = if text.trim().is_empty() {
      UsersDocument::default()
    } else {
      serde_yaml::from_str(&text)?
    };

    let entries = document.list.unwrap_or_default();
    let mut records = Vec::with_capacity(entries.len());
    for entry in &entries {
      match PlayerRecord::from_entry(entry) {
        Ok(record) => records.push(record),
        Err(err) => warn!(%err, "skipping users file entry"),
      }
    }

    debug!(loaded = records.len(), skipped = entries.len() - records.len(), "loaded player records");
    Ok(records)
  }

  /// Overwrite the file with `records`. Returns how many were written.
  pub fn save<'a>(&self, records: impl IntoIterator<Item = &'a PlayerRecord>) -> Result<usize> {
    let list: Vec<String> = records.into_iter().map(PlayerRecord::to_entry).collect();
    let count = list.len();
    self.write_document(&UsersDocument { list: Some(list) })?;

    debug!(count, "saved player records");
    Ok(count)
  }

  fn write_document(&self, document: &UsersDocument) -> Result<()> {
    let text = serde_yaml::to_string(document)?;
    fs::write(&self.path, text)?;
    Ok(())
  }
}
