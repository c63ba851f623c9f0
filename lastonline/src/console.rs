//! Line based stand-in for a game server.
//!
//! Each stdin line is either a simulated server event or a command:
//!
//! ```text
//! join <name> [uuid]         player connects
//! quit <name>                player disconnects
//! grant <name> <permission>  give a player a permission
//! /lastonline [player]       run a command as the console
//! sudo <name> /lo [player]   run a command as a player
//! page <n>                   show another page of the last menu
//! save                       write users.yml and usercache.yml now
//! stop                       shut down
//! ```
//!
//! Players joining without a uuid get the id an offline mode server would
//! give them. Names are kept in `usercache.yml` next to the player list.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use lastonline::LastOnline;
use lastonline::command::{self, CommandOutput, Sender};
use lastonline::directory::{KnownPlayers, Player, PlayerDirectory, USERCACHE_FILE};
use lastonline::helpers::strip_colors;
use lastonline::menu::Menu;
use tracing::{debug, warn};
use uuid::Uuid;

pub(crate) enum Step {
    Output(String),
    Silent,
    Stop,
}

const HELP: &str = "join <name> [uuid] | quit <name> | grant <name> <permission> | \
                    /lastonline [player] | sudo <name> /lastonline [player] | page <n> | save | stop";

pub(crate) struct Console {
    directory: KnownPlayers,
    cache_path: PathBuf,
    permissions: HashMap<Uuid, Vec<String>>,
    last_menu: Option<Menu>,
}

impl Console {
    /// Open the console for the plugin in `data_dir`, loading its name cache.
    pub(crate) fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let cache_path = data_dir.join(USERCACHE_FILE);
        let directory = KnownPlayers::load(&cache_path)
            .with_context(|| format!("failed to load {}", cache_path.display()))?;

        Ok(Self {
            directory,
            cache_path,
            permissions: HashMap::new(),
            last_menu: None,
        })
    }

    /// Write the name cache if it changed. Returns false if writing failed.
    pub(crate) fn flush(&mut self) -> bool {
        if !self.directory.is_dirty() {
            return true;
        }
        match self.directory.save(&self.cache_path) {
            Ok(count) => {
                debug!(count, "flushed player cache");
                true
            }
            Err(err) => {
                warn!(%err, "failed to save player cache");
                false
            }
        }
    }

    pub(crate) fn handle(
        &mut self,
        plugin: &mut LastOnline,
        line: &str,
        now: i64,
    ) -> anyhow::Result<Step> {
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => Ok(Step::Silent),
            [label, args @ ..] if label.starts_with('/') => {
                self.run_command(plugin, Sender::Console, label, args, now)
            }
            ["join", name, rest @ ..] => {
                let player = self.player(name, rest.first().copied())?;
                self.directory.joined(&player);
                plugin.on_join(&player, now);
                Ok(Step::Output(format!("{} joined the game", player.name)))
            }
            ["quit", name] => {
                let player = self.known_player(name)?;
                self.directory.left(&player);
                plugin.on_quit(&player, now);
                Ok(Step::Output(format!("{} left the game", player.name)))
            }
            ["grant", name, permission] => {
                let player = self.known_player(name)?;
                self.permissions
                    .entry(player.id)
                    .or_default()
                    .push(permission.to_string());
                Ok(Step::Output(format!("Granted {permission} to {}", player.name)))
            }
            ["sudo", name, label, args @ ..] => {
                let player = self.known_player(name)?;
                let sender = Sender::Player {
                    player,
                    permissions: self.permissions.get(&player.id).cloned().unwrap_or_default(),
                };
                self.run_command(plugin, sender, label, args, now)
            }
            ["page", number] => {
                let number: usize = number.parse().context("page number must be a positive integer")?;
                let menu = self.last_menu.as_ref().context("no menu has been opened")?;
                Ok(Step::Output(menu.page(number.saturating_sub(1)).to_string()))
            }
            ["save"] => {
                let players = plugin.flush();
                let names = self.flush();
                if players && names {
                    Ok(Step::Output("Saved player list".to_string()))
                } else {
                    bail!("saving the player list failed, see the log")
                }
            }
            ["stop"] => Ok(Step::Stop),
            ["help"] => Ok(Step::Output(format!(
                "{HELP}\n/{} ({}) - {}",
                command::COMMAND_NAME,
                command::ALIASES.join(", "),
                command::DESCRIPTION
            ))),
            _ => bail!("unknown input {line:?}, type \"help\" for help"),
        }
    }

    fn run_command(
        &mut self,
        plugin: &LastOnline,
        sender: Sender,
        label: &str,
        args: &[&str],
        now: i64,
    ) -> anyhow::Result<Step> {
        if !command::matches(label) {
            return Ok(Step::Output(
                "Unknown command. Type \"/help\" for help.".to_string(),
            ));
        }

        tracing::info!("Executing command '{}' by '{}'", label, sender.name());
        match plugin.on_command(&sender, args, &self.directory, now) {
            CommandOutput::Message(message) => Ok(Step::Output(strip_colors(&message))),
            CommandOutput::Menu(menu) => {
                let page = menu.page(0).to_string();
                self.last_menu = Some(menu);
                Ok(Step::Output(page))
            }
        }
    }

    /// The player joining as `name`. Without an explicit `id` a known name keeps
    /// its id and a new one gets its offline mode id.
    fn player(&self, name: &str, id: Option<&str>) -> anyhow::Result<Player> {
        let player = match id {
            Some(id) => {
                let id = Uuid::parse_str(id).with_context(|| format!("invalid uuid {id:?}"))?;
                Player::new(id, name)
            }
            None => match self.directory.find_by_name(name) {
                Some(id) => Player::new(id, name),
                None => Player::offline(name),
            },
        };
        player.with_context(|| format!("invalid player name {name:?}"))
    }

    fn known_player(&self, name: &str) -> anyhow::Result<Player> {
        let id = self
            .directory
            .find_by_name(name)
            .with_context(|| format!("{name} has never joined"))?;
        let name = self.directory.name_of(id).context("player without a name")?;
        Ok(Player { id, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn output(step: anyhow::Result<Step>) -> String {
        match step.unwrap() {
            Step::Output(text) => text,
            Step::Silent => String::new(),
            Step::Stop => "<stop>".to_string(),
        }
    }

    #[test]
    fn test_join_quit_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = LastOnline::start(dir.path()).unwrap();
        let mut console = Console::open(dir.path()).unwrap();

        output(console.handle(&mut plugin, "join Steve", NOW));
        output(console.handle(&mut plugin, "quit Steve", NOW + 60_000));

        let text = output(console.handle(&mut plugin, "/lo Steve", NOW + 120_000));
        assert_eq!(text, "Steve (offline) was last online 1 minute ago");
    }

    #[test]
    fn test_sudo_requires_permission() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = LastOnline::start(dir.path()).unwrap();
        let mut console = Console::open(dir.path()).unwrap();
        output(console.handle(&mut plugin, "join Alex", NOW));

        let denied = output(console.handle(&mut plugin, "sudo Alex /lastonline", NOW));
        assert_eq!(denied, "No permission");

        output(console.handle(&mut plugin, "grant Alex lastonline.use", NOW));
        let allowed = output(console.handle(&mut plugin, "sudo Alex /lastonline", NOW));
        assert!(allowed.contains("1. Alex (online)"));
    }

    #[test]
    fn test_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = LastOnline::start(dir.path()).unwrap();
        let mut console = Console::open(dir.path()).unwrap();

        assert!(console.handle(&mut plugin, "quit Nobody", NOW).is_err());
        assert!(console.handle(&mut plugin, "join bad-name", NOW).is_err());
        assert!(console.handle(&mut plugin, "page 1", NOW).is_err());
        assert!(console.handle(&mut plugin, "dance", NOW).is_err());
        assert_eq!(
            output(console.handle(&mut plugin, "/seen Steve", NOW)),
            "Unknown command. Type \"/help\" for help."
        );
        assert_eq!(output(console.handle(&mut plugin, "stop", NOW)), "<stop>");
    }

    #[test]
    fn test_names_survive_restart() {
        let dir = tempfile::tempdir().unwrap();

        // GIVEN: Steve played once and the server shut down
        {
            let mut plugin = LastOnline::start(dir.path()).unwrap();
            let mut console = Console::open(dir.path()).unwrap();
            output(console.handle(&mut plugin, "join Steve", NOW));
            output(console.handle(&mut plugin, "quit Steve", NOW + 60_000));
            assert!(console.flush());
            plugin.stop();
        }

        // WHEN: the server starts again
        let mut plugin = LastOnline::start(dir.path()).unwrap();
        let mut console = Console::open(dir.path()).unwrap();

        // THEN: Steve is found by name and listed by name
        assert_eq!(
            output(console.handle(&mut plugin, "/lo Steve", NOW + 120_000)),
            "Steve (offline) was last online 1 minute ago"
        );
        let list = output(console.handle(&mut plugin, "/lo", NOW + 120_000));
        assert!(list.contains("1. Steve (offline)"), "{list}");

        // AND: rejoining updates the same record
        output(console.handle(&mut plugin, "join steve", NOW + 180_000));
        assert_eq!(plugin.tracker().len(), 1);
    }

    #[test]
    fn test_offline_ids_without_cache() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let mut first_plugin = LastOnline::start(first.path()).unwrap();
        let mut second_plugin = LastOnline::start(second.path()).unwrap();
        let mut first_console = Console::open(first.path()).unwrap();
        let mut second_console = Console::open(second.path()).unwrap();

        output(first_console.handle(&mut first_plugin, "join Alex", NOW));
        output(second_console.handle(&mut second_plugin, "join Alex", NOW));

        let ids: Vec<_> = [&first_plugin, &second_plugin]
            .iter()
            .filter_map(|plugin| plugin.tracker().records().next().map(|record| record.id))
            .collect();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[0], lastonline::directory::offline_id("Alex"));
    }
}
