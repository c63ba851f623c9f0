//! Chest menu rendering of the list report.
//!
//! Layout of one page:
//! - Rows 1-5: one player head per ranked entry, in rank order
//! - Row 6: previous page arrow, page indicator, next page arrow
//!
//! The host turns a [`MenuPage`] into a real inventory; the console harness
//! prints it.

use std::fmt;

use uuid::Uuid;

use crate::helpers::strip_colors;
use crate::messages::GuiMessages;
use crate::report::RankedEntry;
use crate::template::{Placeholder, Template};

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 9;
/// Slots available for players on each page; the last row is navigation.
pub const ENTRY_SLOTS: usize = (ROWS - 1) * COLUMNS;

pub const PREVIOUS_SLOT: usize = ENTRY_SLOTS;
pub const INDICATOR_SLOT: usize = ENTRY_SLOTS + COLUMNS / 2;
pub const NEXT_SLOT: usize = ROWS * COLUMNS - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    PlayerHead(Uuid),
    Arrow,
    Paper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub slot: usize,
    pub icon: Icon,
    pub name: String,
    pub lore: Vec<String>,
}

/// One rendered page of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPage {
    pub title: String,
    /// 0-based
    pub index: usize,
    pub items: Vec<MenuItem>,
}

impl MenuPage {
    pub fn item_at(&self, slot: usize) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.slot == slot)
    }
}

impl fmt::Display for MenuPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", strip_colors(&self.title))?;
        for item in &self.items {
            write!(f, "[{:>2}] {}", item.slot, strip_colors(&item.name))?;
            for line in &item.lore {
                write!(f, " | {}", strip_colors(line))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Paginated menu over ranked entries.
#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<RankedEntry>,
    title: Template,
    item_name: Template,
    item_lore: Vec<Template>,
    previous: Template,
    next: Template,
}

impl Menu {
    pub fn new(entries: Vec<RankedEntry>, messages: &GuiMessages) -> Self {
        Self {
            entries,
            title: Template::new(&messages.title),
            item_name: Template::new(&messages.item_name),
            item_lore: messages.item_lore.iter().map(|line| Template::new(line)).collect(),
            previous: Template::new(&messages.previous_page),
            next: Template::new(&messages.next_page),
        }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Number of pages, at least one.
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(ENTRY_SLOTS).max(1)
    }

    /// Render page `index` (0-based). Indices past the end show the last page.
    pub fn page(&self, index: usize) -> MenuPage {
        let index = index.min(self.page_count() - 1);
        let page_label = (index + 1).to_string();
        let pages_label = self.page_count().to_string();
        let page_values = [
            (Placeholder::Page, page_label.as_str()),
            (Placeholder::Pages, pages_label.as_str()),
        ];

        let mut items: Vec<MenuItem> = self
            .entries
            .iter()
            .skip(index * ENTRY_SLOTS)
            .take(ENTRY_SLOTS)
            .enumerate()
            .map(|(slot, entry)| {
                let rank = entry.rank.to_string();
                let values = entry.values(&rank);
                MenuItem {
                    slot,
                    icon: Icon::PlayerHead(entry.id),
                    name: self.item_name.render(&values),
                    lore: self.item_lore.iter().map(|line| line.render(&values)).collect(),
                }
            })
            .collect();

        if index > 0 {
            items.push(MenuItem {
                slot: PREVIOUS_SLOT,
                icon: Icon::Arrow,
                name: self.previous.render(&page_values),
                lore: Vec::new(),
            });
        }
        items.push(MenuItem {
            slot: INDICATOR_SLOT,
            icon: Icon::Paper,
            name: self.title.render(&page_values),
            lore: Vec::new(),
        });
        if index + 1 < self.page_count() {
            items.push(MenuItem {
                slot: NEXT_SLOT,
                icon: Icon::Arrow,
                name: self.next.render(&page_values),
                lore: Vec::new(),
            });
        }

        MenuPage {
            title: self.title.render(&page_values),
            index,
            items,
        }
    }
}
