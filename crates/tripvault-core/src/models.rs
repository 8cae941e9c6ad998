use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

// ---------------------------------------------------------------------------
// Plans and schedules
// ---------------------------------------------------------------------------

/// An inclusive day-precision date range.
///
/// A schedule's dates are either fully specified or fully unspecified, so
/// the two bounds travel together: `Option<DateRange>` cannot express a
/// half-set pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// One stop inside a plan.
///
/// A schedule has no identity of its own; it is addressed by its index in
/// the owning plan's schedule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub title: String,
    pub description: String,
    pub coordinate: Coordinate,
    pub date_range: Option<DateRange>,
}

/// An ordered travel plan.
///
/// A plan's identity in the store is purely positional: it is the integer
/// slot it occupies in the plan collection, not a field carried here.
/// `updated_at` is stamped by callers that track when the plan last changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub title: String,
    pub description: String,
    pub schedules: Vec<Schedule>,
    pub updated_at: Option<NaiveDateTime>,
}

/// The two slots and two payloads of a position swap.
///
/// Transient: built for a single swap call and never persisted. After the
/// swap, `destination_plan` occupies `source_key` and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub source_key: usize,
    pub destination_key: usize,
    pub source_plan: Plan,
    pub destination_plan: Plan,
}

// ---------------------------------------------------------------------------
// Memories
// ---------------------------------------------------------------------------

/// A memory record, optionally paired with an image blob stored elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub title: String,
    pub index: i64,
    pub upload_date: NaiveDate,
}
