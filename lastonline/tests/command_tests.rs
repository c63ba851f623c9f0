use std::fs;

use lastonline::LastOnline;
use lastonline::command::{CommandOutput, PERMISSION, Sender};
use lastonline::config::CONFIG_FILE;
use lastonline::directory::{KnownPlayers, Player};
use lastonline::messages::MESSAGES_FILE;
use tempfile::TempDir;
use uuid::Uuid;

const NOW: i64 = 1_700_000_000_000;
const MINUTE: i64 = 60_000;

/// Plain templates so assertions don't need color codes
const TEST_MESSAGES: &str = r#"
ListFormat: "%NUMBER. %NAME (%STATUS) %TIME"
ReportingFormat: "Last %NUMBER players:\n%LIST"
SingleReportFormat: "%NAME is %STATUS, seen %TIME"
NoPermission: "denied"
Error:
  NoUsers: "no users"
  NoSuchUser: "no such user"
  Usage: "usage"
GUI:
  Title: "Menu %PAGE/%PAGES"
  ItemName: "%NAME"
  ItemLore: ["%TIME"]
  PreviousPage: "prev"
  NextPage: "next"
"#;

fn setup(config: &str) -> (TempDir, LastOnline) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), config).unwrap();
    fs::write(dir.path().join(MESSAGES_FILE), TEST_MESSAGES).unwrap();
    let plugin = LastOnline::start(dir.path()).expect("Failed to start plugin");
    (dir, plugin)
}

fn player(n: u128, name: &str) -> Player {
    Player::new(Uuid::from_u128(n), name).unwrap()
}

fn message(output: CommandOutput) -> String {
    output.message().expect("expected a chat message").to_string()
}

fn run(plugin: &LastOnline, directory: &KnownPlayers, args: &[&str]) -> String {
    message(plugin.on_command(&Sender::Console, args, directory, NOW))
}

// =============================================================================
// LIST REPORT TESTS
// =============================================================================

#[test]
fn test_list_report_with_no_users() {
    // GIVEN: Nobody has been recorded
    let (_dir, plugin) = setup("");

    // WHEN: Running /lastonline
    let reply = run(&plugin, &KnownPlayers::new(), &[]);

    // THEN: The no users message is shown instead of an empty list
    assert_eq!(reply, "no users");
}

#[test]
fn test_list_report_is_ranked_and_capped() {
    // GIVEN: Four players and a reporting limit of three
    let (_dir, mut plugin) = setup("MaxUsersReporting: 3\nMaxTimeUnits: 2\n");
    let mut directory = KnownPlayers::new();
    for (n, name, minutes_ago) in [(1, "Steve", 30), (2, "Alex", 5), (3, "Notch", 90), (4, "Jeb", 61)] {
        let p = player(n, name);
        directory.left(&p);
        plugin.on_quit(&p, NOW - minutes_ago * MINUTE);
    }
    directory.joined(&player(2, "Alex"));

    // WHEN: Running /lastonline
    let reply = run(&plugin, &directory, &[]);

    // THEN: The three most recent players are listed newest first
    assert_eq!(
        reply,
        "Last 3 players:\n\
         1. Alex (online) 5 minutes ago\n\
         2. Steve (offline) 30 minutes ago\n\
         3. Jeb (offline) 1 hour, 1 minute ago"
    );
}

#[test]
fn test_list_report_as_menu() {
    // GIVEN: UseGUI is enabled and one player is tracked
    let (_dir, mut plugin) = setup("UseGUI: true\n");
    let mut directory = KnownPlayers::new();
    let steve = player(1, "Steve");
    directory.left(&steve);
    plugin.on_quit(&steve, NOW - 2 * MINUTE);

    // WHEN: Running /lastonline
    let output = plugin.on_command(&Sender::Console, &[], &directory, NOW);

    // THEN: A one page menu with Steve's head is returned
    let CommandOutput::Menu(menu) = output else {
        panic!("expected a menu");
    };
    let page = menu.page(0);
    assert_eq!(page.title, "Menu 1/1");
    let head = page.item_at(0).unwrap();
    assert_eq!(head.name, "Steve");
    assert_eq!(head.lore, vec!["2 minutes ago"]);
}

#[test]
fn test_menu_with_no_users_is_message() {
    // GIVEN: UseGUI is enabled but nobody is tracked
    let (_dir, plugin) = setup("UseGUI: true\n");

    // WHEN / THEN: The no users message is still a chat message
    assert_eq!(run(&plugin, &KnownPlayers::new(), &[]), "no users");
}

// =============================================================================
// SINGLE REPORT TESTS
// =============================================================================

#[test]
fn test_single_report() {
    // GIVEN: Steve left 3 minutes ago
    let (_dir, mut plugin) = setup("");
    let mut directory = KnownPlayers::new();
    let steve = player(1, "Steve");
    directory.left(&steve);
    plugin.on_quit(&steve, NOW - 3 * MINUTE);

    // WHEN: Looking him up with different casing
    let reply = run(&plugin, &directory, &["steve"]);

    // THEN: The single report uses his real name
    assert_eq!(reply, "Steve is offline, seen 3 minutes ago");
}

#[test]
fn test_single_report_unknown_player_with_other_records() {
    // GIVEN: Some other player is tracked
    let (_dir, mut plugin) = setup("");
    let mut directory = KnownPlayers::new();
    let steve = player(1, "Steve");
    directory.left(&steve);
    plugin.on_quit(&steve, NOW);

    // WHEN / THEN: Looking up someone else reports no such user
    assert_eq!(run(&plugin, &directory, &["Herobrine"]), "no such user");
    assert_eq!(run(&plugin, &directory, &["not a name!"]), "no such user");
}

#[test]
fn test_single_report_with_no_records_at_all() {
    // GIVEN: Nobody is tracked
    let (_dir, plugin) = setup("");

    // WHEN / THEN: A lookup reports no users, not no such user
    assert_eq!(run(&plugin, &KnownPlayers::new(), &["Steve"]), "no users");
}

// =============================================================================
// USAGE AND PERMISSION TESTS
// =============================================================================

#[test]
fn test_too_many_arguments() {
    let (_dir, plugin) = setup("");
    assert_eq!(run(&plugin, &KnownPlayers::new(), &["Steve", "Alex"]), "usage");
}

#[test]
fn test_permission_is_checked_first() {
    // GIVEN: A player without the permission
    let (_dir, mut plugin) = setup("");
    let directory = KnownPlayers::new();
    let alex = player(2, "Alex");
    plugin.on_quit(&alex, NOW);
    let sender = Sender::Player {
        player: alex,
        permissions: Vec::new(),
    };

    // WHEN / THEN: Every form of the command is denied
    for args in [&[][..], &["Alex"][..], &["a", "b"][..]] {
        let reply = message(plugin.on_command(&sender, args, &directory, NOW));
        assert_eq!(reply, "denied");
    }

    // AND: Granting the permission lets the command through
    let sender = Sender::Player {
        player: alex,
        permissions: vec![PERMISSION.to_string()],
    };
    let reply = message(plugin.on_command(&sender, &["a", "b"], &directory, NOW));
    assert_eq!(reply, "usage");
}

#[test]
fn test_default_messages_are_colored() {
    // GIVEN: The shipped messages
    let dir = tempfile::tempdir().unwrap();
    let plugin = LastOnline::start(dir.path()).unwrap();

    // WHEN: Triggering an error message
    let reply = run(&plugin, &KnownPlayers::new(), &[]);

    // THEN: Ampersand codes were translated
    assert!(reply.starts_with("§c"));
}
