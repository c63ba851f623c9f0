//! The `/lastonline` command.

use lastonline_store::Tracker;
use tracing::debug;

use crate::config::Config;
use crate::directory::{Player, PlayerDirectory, PlayerQuery};
use crate::helpers::colorize;
use crate::menu::Menu;
use crate::messages::Messages;
use crate::report::{ReportBuilder, ReportError};

pub const COMMAND_NAME: &str = "lastonline";
pub const ALIASES: &[&str] = &["lo"];
pub const DESCRIPTION: &str = "Shows the last players to be online";
pub const PERMISSION: &str = "lastonline.use";

/// Whether `label` invokes this command (name or alias, any case).
pub fn matches(label: &str) -> bool {
    let label = label.strip_prefix('/').unwrap_or(label);
    label.eq_ignore_ascii_case(COMMAND_NAME)
        || ALIASES.iter().any(|alias| label.eq_ignore_ascii_case(alias))
}

/// Who ran the command.
#[derive(Debug, Clone)]
pub enum Sender {
    /// The server console, which bypasses permission checks.
    Console,
    Player {
        player: Player,
        permissions: Vec<String>,
    },
}

impl Sender {
    pub fn has_permission(&self, permission: &str) -> bool {
        match self {
            Sender::Console => true,
            Sender::Player { permissions, .. } => permissions.iter().any(|p| p == permission),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Sender::Console => "CONSOLE",
            Sender::Player { player, .. } => player.name.as_str(),
        }
    }
}

/// What the host should show the sender.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    Message(String),
    Menu(Menu),
}

impl CommandOutput {
    /// The chat message, if this output is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            CommandOutput::Message(message) => Some(message.as_str()),
            CommandOutput::Menu(_) => None,
        }
    }
}

/// Everything a command invocation reads.
pub struct CommandContext<'a> {
    pub tracker: &'a Tracker,
    pub config: &'a Config,
    pub messages: &'a Messages,
    pub reports: &'a ReportBuilder,
    pub directory: &'a dyn PlayerDirectory,
    pub now: i64,
}

/// Run `/lastonline` with `args`.
pub fn execute(ctx: &CommandContext<'_>, sender: &Sender, args: &[&str]) -> CommandOutput {
    if !sender.has_permission(PERMISSION) {
        debug!(sender = sender.name(), "denied /{COMMAND_NAME}");
        return message(&ctx.messages.no_permission);
    }

    match args {
        [] => list(ctx),
        [name] => single(ctx, name),
        _ => message(&ctx.messages.error.usage),
    }
}

fn list(ctx: &CommandContext<'_>) -> CommandOutput {
    let limit = ctx.config.max_users_reporting;

    if ctx.config.use_gui {
        return match ctx.reports.ranked_entries(ctx.tracker, limit, ctx.now, ctx.directory) {
            Ok(entries) => CommandOutput::Menu(Menu::new(entries, &ctx.messages.gui)),
            Err(err) => report_error(ctx, err),
        };
    }

    match ctx.reports.build_list_report(ctx.tracker, limit, ctx.now, ctx.directory) {
        Ok(report) => CommandOutput::Message(report),
        Err(err) => report_error(ctx, err),
    }
}

fn single(ctx: &CommandContext<'_>, arg: &str) -> CommandOutput {
    let query = match PlayerQuery::parse(arg) {
        Ok(query) => query,
        Err(err) => {
            debug!(%err, arg, "lookup argument is not a player");
            let err = if ctx.tracker.is_empty() {
                ReportError::NoUsers
            } else {
                ReportError::NoSuchUser
            };
            return report_error(ctx, err);
        }
    };

    match ctx.reports.build_single_report(&query, ctx.tracker, ctx.now, ctx.directory) {
        Ok(report) => CommandOutput::Message(report),
        Err(err) => report_error(ctx, err),
    }
}

fn report_error(ctx: &CommandContext<'_>, err: ReportError) -> CommandOutput {
    match err {
        ReportError::NoUsers => message(&ctx.messages.error.no_users),
        ReportError::NoSuchUser => message(&ctx.messages.error.no_such_user),
    }
}

fn message(raw: &str) -> CommandOutput {
    CommandOutput::Message(colorize(raw))
}
