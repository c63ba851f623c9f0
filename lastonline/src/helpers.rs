use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Character the Minecraft client uses to start a formatting code.
pub const SECTION_SIGN: char = '§';

/// Current time as Unix milliseconds.
pub fn now() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(as_millis)
    .unwrap_or_default()
}

/// Whole milliseconds in `elapsed`, saturating at `i64::MAX`.
fn as_millis(elapsed: Duration) -> i64 {
  i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}

/// Translate `&`-prefixed formatting codes (`&a`, `&l`, `&r`, ...) into the
/// section sign form. Ampersands not followed by a valid code are kept.
pub fn colorize(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(c) = chars.next() {
    match chars.peek() {
      Some(&code) if c == '&' && is_format_code(code) => {
        out.push(SECTION_SIGN);
        out.push(code.to_ascii_lowercase());
        chars.next();
      }
      _ => out.push(c),
    }
  }
  out
}

/// Remove section sign formatting codes, for output that isn't a game client.
pub fn strip_colors(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars();
  while let Some(c) = chars.next() {
    if c == SECTION_SIGN {
      chars.next();
    } else {
      out.push(c);
    }
  }
  out
}

fn is_format_code(c: char) -> bool {
  matches!(c.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}
