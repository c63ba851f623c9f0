pub mod command;
pub mod config;
pub mod directory;
pub mod duration;
mod error;
pub mod helpers;
pub mod menu;
pub mod messages;
pub mod report;
pub mod template;
pub mod validation;

pub use error::PluginError;

use std::fs;
use std::path::{Path, PathBuf};

use lastonline_store::{Activity, Tracker, USERS_FILE, UserStore};
use tracing::{debug, info, warn};

use crate::command::{CommandContext, CommandOutput, Sender};
use crate::config::{CONFIG_FILE, Config};
use crate::directory::{Player, PlayerDirectory};
use crate::messages::{MESSAGES_FILE, Messages};
use crate::report::ReportBuilder;

/// The plugin instance the host server drives.
///
/// The host calls [`LastOnline::start`] when enabling the plugin, forwards
/// join and quit events, calls [`LastOnline::on_tick`] from its scheduler and
/// [`LastOnline::stop`] when disabling it.
pub struct LastOnline {
    data_dir: PathBuf,
    config: Config,
    messages: Messages,
    reports: ReportBuilder,
    store: UserStore,
    tracker: Tracker,
}

impl LastOnline {
    /// Load configuration, messages and the player list from `data_dir`,
    /// creating any missing files with their defaults.
    pub fn start(data_dir: impl AsRef<Path>) -> Result<Self, PluginError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(PluginError::io(&data_dir))?;

        let config = Config::load_or_create(data_dir.join(CONFIG_FILE))?;
        let messages = Messages::load_or_create(data_dir.join(MESSAGES_FILE))?;
        let store = UserStore::open(data_dir.join(USERS_FILE))?;
        let tracker = Tracker::with_records(config.capacity(), store.load()?);
        let reports = ReportBuilder::new(&messages, config.max_time_units);

        info!(
            tracked = tracker.len(),
            capacity = ?tracker.capacity(),
            data_dir = %data_dir.display(),
            "LastOnline v{} has been enabled",
            env!("CARGO_PKG_VERSION")
        );

        Ok(Self {
            data_dir,
            config,
            messages,
            reports,
            store,
            tracker,
        })
    }

    /// A player joined. Only recorded when `CountOnlinePlayers` is on.
    pub fn on_join(&mut self, player: &Player, now: i64) -> Option<Activity> {
        if !self.config.count_online_players {
            return None;
        }
        Some(self.record(player, now))
    }

    /// A player left. Always recorded.
    pub fn on_quit(&mut self, player: &Player, now: i64) -> Activity {
        self.record(player, now)
    }

    /// Periodic host callback. Writes the player list if it changed.
    /// Returns whether a write succeeded.
    pub fn on_tick(&mut self) -> bool {
        if !self.tracker.is_dirty() {
            return false;
        }
        self.flush()
    }

    /// Handle `/lastonline` from `sender`.
    pub fn on_command(
        &self,
        sender: &Sender,
        args: &[&str],
        directory: &dyn PlayerDirectory,
        now: i64,
    ) -> CommandOutput {
        let ctx = CommandContext {
            tracker: &self.tracker,
            config: &self.config,
            messages: &self.messages,
            reports: &self.reports,
            directory,
            now,
        };
        command::execute(&ctx, sender, args)
    }

    /// Final write of the player list before the plugin is unloaded.
    pub fn stop(mut self) {
        self.flush();
        info!("LastOnline has been disabled");
    }

    /// Write every record to `users.yml`.
    ///
    /// Failures are logged and otherwise ignored: the in-memory tracker keeps
    /// working and the next tick tries again.
    pub fn flush(&mut self) -> bool {
        match self.store.save(self.tracker.records()) {
            Ok(count) => {
                self.tracker.mark_clean();
                debug!(count, "flushed player list");
                true
            }
            Err(err) => {
                warn!(%err, path = %self.store.path().display(), "failed to save player list");
                false
            }
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn record(&mut self, player: &Player, now: i64) -> Activity {
        let activity = self.tracker.record_activity(player.id, now);
        if let Activity::Evicted(evicted) = activity {
            info!(player = %player.name, evicted = %evicted.id, "player list full, forgot least recently seen player");
        }
        activity
    }
}
