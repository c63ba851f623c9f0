//! Relative time phrases such as "3 days, 4 hours ago".
//!
//! Elapsed time is split greedily into fixed length units from years down to
//! seconds. A month is the average Gregorian month and a year is twelve of
//! them, so long spans line up with calendar intuition without needing dates.
//! Sub-second precision and "just now" style wording are never produced.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    /// Coarsest first.
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Year,
        TimeUnit::Month,
        TimeUnit::Week,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
    ];

    /// Length of one unit in milliseconds.
    pub const fn millis(self) -> u64 {
        match self {
            TimeUnit::Year => 12 * 2_629_743_830,
            TimeUnit::Month => 2_629_743_830,
            TimeUnit::Week => 7 * 86_400_000,
            TimeUnit::Day => 86_400_000,
            TimeUnit::Hour => 3_600_000,
            TimeUnit::Minute => 60_000,
            TimeUnit::Second => 1_000,
        }
    }

    fn name(self, quantity: u64) -> &'static str {
        let (singular, plural) = match self {
            TimeUnit::Year => ("year", "years"),
            TimeUnit::Month => ("month", "months"),
            TimeUnit::Week => ("week", "weeks"),
            TimeUnit::Day => ("day", "days"),
            TimeUnit::Hour => ("hour", "hours"),
            TimeUnit::Minute => ("minute", "minutes"),
            TimeUnit::Second => ("second", "seconds"),
        };
        if quantity == 1 { singular } else { plural }
    }
}

/// One component of a decomposed duration, e.g. "3 days".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPart {
    pub unit: TimeUnit,
    pub quantity: u64,
}

impl fmt::Display for DurationPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.unit.name(self.quantity))
    }
}

/// Split `elapsed_ms` into non-zero components, coarsest first.
/// The sign is ignored. Anything under a second becomes `0 seconds`.
pub fn decompose(elapsed_ms: i64) -> Vec<DurationPart> {
    let mut remaining = elapsed_ms.unsigned_abs();
    let mut parts = Vec::new();

    for unit in TimeUnit::ALL {
        let quantity = remaining / unit.millis();
        if quantity > 0 {
            parts.push(DurationPart { unit, quantity });
            remaining -= quantity * unit.millis();
        }
    }

    if parts.is_empty() {
        parts.push(DurationPart {
            unit: TimeUnit::Second,
            quantity: 0,
        });
    }
    parts
}

/// Describe how long ago `past_ms` was relative to `now_ms`, keeping at most
/// `max_units` of the most significant components (at least one).
/// Timestamps in the future read "... from now".
pub fn format(past_ms: i64, now_ms: i64, max_units: usize) -> String {
    let elapsed = now_ms.saturating_sub(past_ms);
    let mut parts = decompose(elapsed);
    parts.truncate(max_units.max(1));

    let phrase = parts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if elapsed < 0 {
        format!("{phrase} from now")
    } else {
        format!("{phrase} ago")
    }
}
