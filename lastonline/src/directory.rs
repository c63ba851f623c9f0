//! Host side knowledge about players: names and online status.
//!
//! The tracker only stores ids. Names and presence belong to the game server,
//! which exposes them through [`PlayerDirectory`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lastonline_store::PlayerName;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::PluginError;
use crate::validation::{ValidationError, parse_player_name};

/// File name of the name cache inside the data folder.
pub const USERCACHE_FILE: &str = "usercache.yml";

/// A player as reported by the host in join and quit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub id: Uuid,
    pub name: PlayerName,
}

impl Player {
    pub fn new(id: Uuid, name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: parse_player_name(name)?,
        })
    }

    /// A player on an offline mode server, whose id is derived from the name.
    pub fn offline(name: &str) -> Result<Self, ValidationError> {
        Self::new(offline_id(name), name)
    }
}

/// The id an offline mode server assigns to `name`: a v3 UUID over
/// `OfflinePlayer:<name>`. The same name always maps to the same id.
pub fn offline_id(name: &str) -> Uuid {
    Uuid::new_v3(&Uuid::nil(), format!("OfflinePlayer:{name}").as_bytes())
}

/// Name and presence lookups provided by the host server.
pub trait PlayerDirectory {
    /// Current name of the player with `id`, if the server knows it.
    fn name_of(&self, id: Uuid) -> Option<PlayerName>;

    /// Id of the player called `name`, ignoring case.
    fn find_by_name(&self, name: &str) -> Option<Uuid>;

    fn is_online(&self, id: Uuid) -> bool;
}

/// Whether a player is currently connected, as shown by `%STATUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Online,
    Offline,
}

impl Status {
    pub fn of(directory: &dyn PlayerDirectory, id: Uuid) -> Self {
        if directory.is_online(id) {
            Status::Online
        } else {
            Status::Offline
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Online => "online",
            Status::Offline => "offline",
        }
    }
}

/// The argument of a single player lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerQuery {
    Name(PlayerName),
    Id(Uuid),
}

impl PlayerQuery {
    /// Accepts a canonical UUID string or a Minecraft username.
    pub fn parse(arg: &str) -> Result<Self, ValidationError> {
        if let Ok(id) = Uuid::parse_str(arg) {
            return Ok(PlayerQuery::Id(id));
        }
        parse_player_name(arg).map(PlayerQuery::Name)
    }

    pub fn resolve(&self, directory: &dyn PlayerDirectory) -> Option<Uuid> {
        match self {
            PlayerQuery::Name(name) => directory.find_by_name(name),
            PlayerQuery::Id(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone)]
struct KnownPlayer {
    name: PlayerName,
    online: bool,
    /// Order of the last join or quit, higher is more recent
    seen: u64,
}

/// One line of `usercache.yml`.
#[derive(Debug, Serialize, Deserialize)]
struct CachedName {
    name: String,
    uuid: Uuid,
}

/// Directory fed by join and quit events, persisted as a name cache so
/// players keep their names across restarts.
#[derive(Debug, Default)]
pub struct KnownPlayers {
    players: HashMap<Uuid, KnownPlayer>,
    clock: u64,
    dirty: bool,
}

impl KnownPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the name cache at `path`. A missing or empty file gives an empty
    /// directory. Every loaded player starts offline.
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let mut directory = Self::new();
        if !path.exists() {
            return Ok(directory);
        }

        let text = fs::read_to_string(path).map_err(PluginError::io(path))?;
        if text.trim().is_empty() {
            return Ok(directory);
        }
        let entries: Vec<CachedName> = serde_yaml::from_str(&text).map_err(|source| PluginError::Cache {
            path: path.to_path_buf(),
            source,
        })?;

        // File order is oldest first
        for entry in &entries {
            match Player::new(entry.uuid, &entry.name) {
                Ok(player) => directory.remember(&player, false),
                Err(err) => warn!(%err, uuid = %entry.uuid, "skipping player cache entry"),
            }
        }
        directory.dirty = false;

        debug!(loaded = directory.players.len(), "loaded player cache");
        Ok(directory)
    }

    /// Write every known player to `path`, least recently seen first.
    /// Returns how many were written.
    pub fn save(&mut self, path: &Path) -> Result<usize, PluginError> {
        let mut players: Vec<_> = self.players.iter().collect();
        players.sort_by_key(|(_, player)| player.seen);

        let entries: Vec<CachedName> = players
            .into_iter()
            .map(|(id, player)| CachedName {
                name: player.name.to_string(),
                uuid: *id,
            })
            .collect();
        let text = serde_yaml::to_string(&entries).map_err(|source| PluginError::Cache {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text).map_err(PluginError::io(path))?;

        self.dirty = false;
        Ok(entries.len())
    }

    /// Whether players were added or changed since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Remember `player` as online, updating their name if it changed.
    pub fn joined(&mut self, player: &Player) {
        self.remember(player, true);
    }

    pub fn left(&mut self, player: &Player) {
        self.remember(player, false);
    }

    pub fn online_count(&self) -> usize {
        self.players.values().filter(|player| player.online).count()
    }

    fn remember(&mut self, player: &Player, online: bool) {
        self.clock += 1;
        self.players.insert(
            player.id,
            KnownPlayer {
                name: player.name,
                online,
                seen: self.clock,
            },
        );
        self.dirty = true;
    }
}

impl PlayerDirectory for KnownPlayers {
    fn name_of(&self, id: Uuid) -> Option<PlayerName> {
        self.players.get(&id).map(|player| player.name)
    }

    /// When several ids carry the name, the most recently seen one wins.
    fn find_by_name(&self, name: &str) -> Option<Uuid> {
        self.players
            .iter()
            .filter(|(_, player)| player.name.eq_ignore_ascii_case(name))
            .max_by_key(|(_, player)| player.seen)
            .map(|(id, _)| *id)
    }

    fn is_online(&self, id: Uuid) -> bool {
        self.players.get(&id).is_some_and(|player| player.online)
    }
}
