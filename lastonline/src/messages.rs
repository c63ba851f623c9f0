//! User facing message templates from `messages.yml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::load_yaml_or_create;
use crate::error::PluginError;

/// File name of the message templates inside the data folder.
pub const MESSAGES_FILE: &str = "messages.yml";

/// Shipped `messages.yml`, written to the data folder on first start.
pub const DEFAULT_MESSAGES: &str = include_str!("../assets/messages.yml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Messages {
    /// One line of the list report
    pub list_format: String,
    /// Wraps the joined list lines
    pub reporting_format: String,
    pub single_report_format: String,
    pub no_permission: String,
    pub error: ErrorMessages,
    #[serde(rename = "GUI")]
    pub gui: GuiMessages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ErrorMessages {
    pub no_users: String,
    pub no_such_user: String,
    pub usage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GuiMessages {
    pub title: String,
    pub item_name: String,
    pub item_lore: Vec<String>,
    pub previous_page: String,
    pub next_page: String,
}

impl Messages {
    /// Load `messages.yml` from `path`, writing the shipped templates first if it doesn't exist.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, PluginError> {
        load_yaml_or_create(path.as_ref(), DEFAULT_MESSAGES)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            list_format: "&6%NUMBER. &a%NAME &7(%STATUS) &fwas last online &a%TIME".to_string(),
            reporting_format: "&6The last &a%NUMBER &6players online were:\n%LIST".to_string(),
            single_report_format: "&a%NAME &7(%STATUS) &fwas last online &a%TIME".to_string(),
            no_permission: "&cNo permission".to_string(),
            error: ErrorMessages::default(),
            gui: GuiMessages::default(),
        }
    }
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            no_users: "&cNo users have been recorded yet".to_string(),
            no_such_user: "&cThat player has not been recorded".to_string(),
            usage: "&cUsage: /lastonline [player]".to_string(),
        }
    }
}

impl Default for GuiMessages {
    fn default() -> Self {
        Self {
            title: "&6Last Online &8(%PAGE/%PAGES)".to_string(),
            item_name: "&a%NAME".to_string(),
            item_lore: vec![
                "&7#%NUMBER".to_string(),
                "&fLast online &a%TIME".to_string(),
                "&7Currently %STATUS".to_string(),
            ],
            previous_page: "&ePrevious page".to_string(),
            next_page: "&eNext page".to_string(),
        }
    }
}
