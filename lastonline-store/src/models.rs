use arrayvec::ArrayString;
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Minecraft player name - max 16 characters, stored inline (no heap allocation).
pub type PlayerName = ArrayString<16>;

/// The last time a single player was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRecord {
  /// Stable player identifier
  pub id: Uuid,
  /// Unix timestamp in milliseconds of the latest processed join or quit
  pub last_seen: i64,
}

impl PlayerRecord {
  pub fn new(id: Uuid, last_seen: i64) -> Self {
    Self { id, last_seen }
  }

  /// Encode as a `users.yml` list entry: `<uuid>:<millis>`.
  pub fn to_entry(&self) -> String {
    format!("{}:{}", self.id, self.last_seen)
  }

  /// Parse a `users.yml` list entry.
  pub fn from_entry(entry: &str) -> Result<Self> {
    let malformed = || StoreError::MalformedEntry {
      entry: entry.to_string(),
    };

    let (id, last_seen) = entry.split_once(':').ok_or_else(malformed)?;
    let id = Uuid::parse_str(id.trim()).map_err(|_| malformed())?;
    let last_seen = last_seen.trim().parse::<i64>().map_err(|_| malformed())?;

    Ok(Self { id, last_seen })
  }
}

/// Maximum number of players the tracker will hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
  Unlimited,
  Limited(usize),
}

impl Capacity {
  /// Value of `MaxUsers` that disables the limit.
  pub const UNLIMITED: i64 = -1;

  /// Build from the configured `MaxUsers` value.
  /// `-1` is unlimited, every other value below one accepts no new players.
  pub fn from_max_users(max_users: i64) -> Self {
    match max_users {
      Self::UNLIMITED => Capacity::Unlimited,
      n if n <= 0 => Capacity::Limited(0),
      n => Capacity::Limited(usize::try_from(n).unwrap_or(usize::MAX)),
    }
  }
}

impl Default for Capacity {
  fn default() -> Self {
    Capacity::Limited(100)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_entry_format() {
    let id = Uuid::parse_str("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap();
    let record = PlayerRecord::new(id, 1_700_000_000_123);
    assert_eq!(
      record.to_entry(),
      "069a79f4-44e9-4726-a5be-fca90e38aaf5:1700000000123"
    );
    assert_eq!(PlayerRecord::from_entry(&record.to_entry()).unwrap(), record);
  }

  #[test]
  fn test_malformed_entries() {
    for entry in [
      "",
      "no-colon-here",
      "not-a-uuid:123",
      "069a79f4-44e9-4726-a5be-fca90e38aaf5:",
      "069a79f4-44e9-4726-a5be-fca90e38aaf5:12abc",
    ] {
      assert!(
        matches!(
          PlayerRecord::from_entry(entry),
          Err(StoreError::MalformedEntry { .. })
        ),
        "{entry:?} should be rejected"
      );
    }
  }

  #[test]
  fn test_capacity_from_max_users() {
    assert_eq!(Capacity::from_max_users(-1), Capacity::Unlimited);
    assert_eq!(Capacity::from_max_users(0), Capacity::Limited(0));
    assert_eq!(Capacity::from_max_users(-7), Capacity::Limited(0));
    assert_eq!(Capacity::from_max_users(25), Capacity::Limited(25));
  }
}
