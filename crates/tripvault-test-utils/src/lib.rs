//! Shared fixtures for the tripvault test suites.
//!
//! Builders for domain values with sensible defaults, plus constructors for
//! the in-memory store backends the integration tests run against.

use std::sync::Arc;

use chrono::NaiveDate;

use tripvault_core::{Coordinate, DateRange, Memory, Plan, Schedule};
use tripvault_store::{InMemoryBlobStore, InMemoryDocumentStore};

/// Fresh in-memory document store.
pub fn document_store() -> Arc<InMemoryDocumentStore> {
    Arc::new(InMemoryDocumentStore::new())
}

/// Fresh in-memory blob store.
pub fn blob_store() -> Arc<InMemoryBlobStore> {
    Arc::new(InMemoryBlobStore::new())
}

/// A plan with no schedules.
pub fn plan(title: &str) -> Plan {
    Plan {
        title: title.to_owned(),
        description: format!("{title} description"),
        schedules: Vec::new(),
        updated_at: None,
    }
}

/// A plan carrying `count` undated schedules named after the plan.
pub fn plan_with_schedules(title: &str, count: usize) -> Plan {
    Plan {
        schedules: (0..count)
            .map(|index| schedule(&format!("{title} stop {index}")))
            .collect(),
        ..plan(title)
    }
}

/// An undated schedule at a fixed coordinate.
pub fn schedule(title: &str) -> Schedule {
    Schedule {
        title: title.to_owned(),
        description: format!("{title} description"),
        coordinate: Coordinate::new(37.5665, 126.978),
        date_range: None,
    }
}

/// A schedule spanning the given `(year, month, day)` bounds.
pub fn dated_schedule(title: &str, from: (i32, u32, u32), to: (i32, u32, u32)) -> Schedule {
    Schedule {
        date_range: Some(DateRange {
            from: date(from),
            to: date(to),
        }),
        ..schedule(title)
    }
}

/// A memory record with a fixed upload date.
pub fn memory(title: &str, index: i64) -> Memory {
    Memory {
        title: title.to_owned(),
        index,
        upload_date: date((2023, 2, 18)),
    }
}

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}
