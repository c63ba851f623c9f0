//! List and single player reports built from the tracker.

use lastonline_store::Tracker;
use thiserror::Error;
use uuid::Uuid;

use crate::directory::{PlayerDirectory, PlayerQuery, Status};
use crate::duration;
use crate::messages::Messages;
use crate::template::{Placeholder, Template};

/// Expected conditions that end a report with a configured message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no players have been recorded yet")]
    NoUsers,

    #[error("no record for the requested player")]
    NoSuchUser,
}

/// A tracked player ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based position, most recently seen first
    pub rank: usize,
    pub id: Uuid,
    /// Host name, or the id when the host doesn't know the player
    pub name: String,
    pub last_seen: i64,
    pub time_ago: String,
    pub status: Status,
}

impl RankedEntry {
    /// Placeholder values for templates describing this entry.
    pub fn values<'a>(&'a self, rank: &'a str) -> [(Placeholder, &'a str); 4] {
        [
            (Placeholder::Name, self.name.as_str()),
            (Placeholder::Time, self.time_ago.as_str()),
            (Placeholder::Number, rank),
            (Placeholder::Status, self.status.as_str()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ReportBuilder {
    line: Template,
    list: Template,
    single: Template,
    max_time_units: usize,
}

impl ReportBuilder {
    pub fn new(messages: &Messages, max_time_units: usize) -> Self {
        Self {
            line: Template::new(&messages.list_format),
            list: Template::new(&messages.reporting_format),
            single: Template::new(&messages.single_report_format),
            max_time_units,
        }
    }

    /// The `limit` most recently seen players, ranked.
    pub fn ranked_entries(
        &self,
        tracker: &Tracker,
        limit: usize,
        now: i64,
        directory: &dyn PlayerDirectory,
    ) -> Result<Vec<RankedEntry>, ReportError> {
        if tracker.is_empty() {
            return Err(ReportError::NoUsers);
        }

        let entries = tracker
            .top_n(limit)
            .into_iter()
            .enumerate()
            .map(|(idx, record)| RankedEntry {
                rank: idx + 1,
                id: record.id,
                name: directory
                    .name_of(record.id)
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| record.id.to_string()),
                last_seen: record.last_seen,
                time_ago: duration::format(record.last_seen, now, self.max_time_units),
                status: Status::of(directory, record.id),
            })
            .collect();

        Ok(entries)
    }

    /// Ranked list of the `limit` most recently seen players.
    pub fn build_list_report(
        &self,
        tracker: &Tracker,
        limit: usize,
        now: i64,
        directory: &dyn PlayerDirectory,
    ) -> Result<String, ReportError> {
        let entries = self.ranked_entries(tracker, limit, now, directory)?;

        let lines = entries
            .iter()
            .map(|entry| {
                let rank = entry.rank.to_string();
                self.line.render(&entry.values(&rank))
            })
            .collect::<Vec<_>>()
            .join("\n");

        let count = entries.len().to_string();
        Ok(self
            .list
            .render(&[(Placeholder::Number, count.as_str()), (Placeholder::List, lines.as_str())]))
    }

    /// Report for one player. A miss on an empty tracker is `NoUsers`.
    pub fn build_single_report(
        &self,
        query: &PlayerQuery,
        tracker: &Tracker,
        now: i64,
        directory: &dyn PlayerDirectory,
    ) -> Result<String, ReportError> {
        if tracker.is_empty() {
            return Err(ReportError::NoUsers);
        }

        let (id, last_seen) = query
            .resolve(directory)
            .and_then(|id| tracker.lookup(id).map(|last_seen| (id, last_seen)))
            .ok_or(ReportError::NoSuchUser)?;

        let name = match (directory.name_of(id), query) {
            (Some(name), _) => name.to_string(),
            (None, PlayerQuery::Name(name)) => name.to_string(),
            (None, PlayerQuery::Id(id)) => id.to_string(),
        };
        let time_ago = duration::format(last_seen, now, self.max_time_units);

        Ok(self.single.render(&[
            (Placeholder::Name, name.as_str()),
            (Placeholder::Time, time_ago.as_str()),
            (Placeholder::Status, Status::of(directory, id).as_str()),
        ]))
    }
}
