//! Player names arriving from command arguments, console input and the name cache.
use lastonline_store::PlayerName;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("player name is empty")]
    EmptyName,

    #[error("player name has {0} characters, Minecraft allows at most 16")]
    NameTooLong(usize),

    #[error("player name contains {0:?}, only letters, digits and '_' are allowed")]
    InvalidChar(char),
}

/// Parse a Minecraft username into its fixed capacity form.
///
/// A name is 1 to 16 ASCII letters, digits or underscores. The first
/// offending character is reported, so "Jösé" fails on 'ö'.
pub fn parse_player_name(name: &str) -> Result<PlayerName, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        return Err(ValidationError::InvalidChar(c));
    }

    // ASCII only past this point, bytes are characters
    PlayerName::from(name).map_err(|_| ValidationError::NameTooLong(name.len()))
}
