//! Placeholder substitution for message templates.

use crate::helpers::colorize;

/// A `%TOKEN` that can appear in a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Name,
    Time,
    Number,
    Status,
    List,
    Page,
    Pages,
}

impl Placeholder {
    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::Name => "%NAME",
            Placeholder::Time => "%TIME",
            Placeholder::Number => "%NUMBER",
            Placeholder::Status => "%STATUS",
            Placeholder::List => "%LIST",
            Placeholder::Page => "%PAGE",
            Placeholder::Pages => "%PAGES",
        }
    }
}

/// A message template with its formatting codes already translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(raw: &str) -> Self {
        Self {
            text: colorize(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Substitute every placeholder that has a value in one left to right pass.
    ///
    /// Substituted values are never scanned again, so a player name containing
    /// `%TIME` stays literal. Tokens without a value are left untouched, and
    /// the longest token wins where one is a prefix of another (`%PAGES`).
    pub fn render(&self, values: &[(Placeholder, &str)]) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(idx) = rest.find('%') {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx..];
            let matched = values
                .iter()
                .filter(|(placeholder, _)| tail.starts_with(placeholder.token()))
                .max_by_key(|(placeholder, _)| placeholder.token().len());

            match matched {
                Some((placeholder, value)) => {
                    out.push_str(value);
                    rest = &tail[placeholder.token().len()..];
                }
                None => {
                    out.push('%');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_values() {
        let template = Template::new("%NUMBER. %NAME was online %TIME");
        let line = template.render(&[
            (Placeholder::Number, "1"),
            (Placeholder::Name, "Steve"),
            (Placeholder::Time, "2 days ago"),
        ]);
        assert_eq!(line, "1. Steve was online 2 days ago");
    }

    #[test]
    fn test_render_translates_colors() {
        let template = Template::new("&a%NAME");
        assert_eq!(template.render(&[(Placeholder::Name, "Alex")]), "§aAlex");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template::new("%NAME %TIME");
        let text = template.render(&[(Placeholder::Name, "%TIME"), (Placeholder::Time, "now")]);
        assert_eq!(text, "%TIME now");
    }

    #[test]
    fn test_missing_values_and_stray_percent_are_kept() {
        let template = Template::new("100% %NAME %STATUS");
        assert_eq!(
            template.render(&[(Placeholder::Name, "Notch")]),
            "100% Notch %STATUS"
        );
    }

    #[test]
    fn test_longest_token_wins() {
        let template = Template::new("%PAGE/%PAGES");
        let text = template.render(&[(Placeholder::Page, "2"), (Placeholder::Pages, "5")]);
        assert_eq!(text, "2/5");
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = Template::new("%NAME, %NAME!");
        assert_eq!(template.render(&[(Placeholder::Name, "Jeb")]), "Jeb, Jeb!");
    }
}
