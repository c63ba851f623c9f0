//! Bounded in-memory last-seen tracking.
//!
//! Records are kept in a `Vec` in insertion order. Lookups and eviction are
//! linear scans, which stays cheap for the few hundred players a server
//! usually tracks and gives a stable iteration order for tie-breaking.

use tracing::debug;
use uuid::Uuid;

use crate::models::{Capacity, PlayerRecord};

/// What `Tracker::record_activity` did with the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// The player was already tracked, their timestamp was overwritten.
    Updated,
    /// A new record was added without touching any other.
    Inserted,
    /// The tracker was full; the carried record made room for the new one.
    Evicted(PlayerRecord),
    /// The capacity is zero, so unseen players are never tracked.
    Rejected,
}

/// Last-seen timestamps for a bounded set of players.
#[derive(Debug, Default)]
pub struct Tracker {
    records: Vec<PlayerRecord>,
    capacity: Capacity,
    dirty: bool,
}

impl Tracker {
    /// Create an empty tracker.
    pub fn new(capacity: Capacity) -> Self {
        Self {
            records: Vec::new(),
            capacity,
            dirty: false,
        }
    }

    /// Build a tracker from previously persisted records.
    ///
    /// Duplicate ids keep their newest timestamp. If there are more records
    /// than the capacity allows, the oldest are dropped until they fit.
    pub fn with_records(
        capacity: Capacity,
        records: impl IntoIterator<Item = PlayerRecord>,
    ) -> Self {
        let mut tracker = Self::new(capacity);
        for record in records {
            match tracker.position(record.id) {
                Some(idx) => {
                    let existing = &mut tracker.records[idx];
                    existing.last_seen = existing.last_seen.max(record.last_seen);
                }
                None => tracker.records.push(record),
            }
        }

        if let Capacity::Limited(max) = capacity {
            let mut dropped = 0usize;
            while tracker.records.len() > max && tracker.evict_oldest().is_some() {
                dropped += 1;
            }
            if dropped > 0 {
                debug!(dropped, max, "trimmed loaded records to capacity");
                tracker.dirty = true;
            }
        }

        tracker
    }

    /// Mark a player as seen at `now`.
    pub fn record_activity(&mut self, id: Uuid, now: i64) -> Activity {
        if let Some(idx) = self.position(id) {
            self.records[idx].last_seen = now;
            self.dirty = true;
            debug!(%id, now, "updated last seen");
            return Activity::Updated;
        }

        let activity = match self.capacity {
            Capacity::Unlimited => Activity::Inserted,
            Capacity::Limited(0) => {
                debug!(%id, "capacity is zero, not tracking new player");
                return Activity::Rejected;
            }
            Capacity::Limited(max) if self.records.len() < max => Activity::Inserted,
            Capacity::Limited(_) => match self.evict_oldest() {
                Some(evicted) => {
                    debug!(%evicted.id, evicted.last_seen, "evicted least recently seen player");
                    Activity::Evicted(evicted)
                }
                None => Activity::Inserted,
            },
        };

        self.records.push(PlayerRecord::new(id, now));
        self.dirty = true;
        debug!(%id, now, "tracking new player");
        activity
    }

    /// Last seen timestamp for `id`, if tracked.
    pub fn lookup(&self, id: Uuid) -> Option<i64> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.last_seen)
    }

    /// Up to `n` records, most recently seen first.
    /// Records with equal timestamps keep their insertion order.
    pub fn top_n(&self, n: usize) -> Vec<PlayerRecord> {
        let mut ranked = self.records.clone();
        ranked.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
        ranked.truncate(n);
        ranked
    }

    /// All records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Whether anything changed since the last successful flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Remove the record with the smallest timestamp.
    /// Ties go to the record inserted first.
    fn evict_oldest(&mut self) -> Option<PlayerRecord> {
        let idx = self
            .records
            .iter()
            .enumerate()
            .min_by_key(|(_, record)| record.last_seen)
            .map(|(idx, _)| idx)?;
        Some(self.records.remove(idx))
    }
}
