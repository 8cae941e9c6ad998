//! Mapping between domain values and stored document fields.
//!
//! This module is the only place that knows the field names and textual date
//! encodings of the persisted shape; repositories build and decode documents
//! exclusively through it.

use tripvault_core::{Coordinate, DateRange, Memory, Plan, Schedule, dateconv};

use crate::document::{Fields, Value};
use crate::error::StoreError;

const TITLE: &str = "title";
const DESCRIPTION: &str = "description";
const UPDATED_AT: &str = "updatedAt";
const FROM_DATE: &str = "fromDate";
const TO_DATE: &str = "toDate";
const COORDINATE: &str = "coordinate";
const INDEX: &str = "index";
const DATE: &str = "date";

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Scalar fields of a plan document. Schedules are not fields: they live as
/// nested sub-documents, built per schedule with [`schedule_fields`].
pub fn plan_fields(plan: &Plan) -> Fields {
    Fields::from([
        (TITLE.to_owned(), Value::Str(plan.title.clone())),
        (
            DESCRIPTION.to_owned(),
            Value::Str(plan.description.clone()),
        ),
        (
            UPDATED_AT.to_owned(),
            Value::Str(dateconv::format_timestamp(plan.updated_at)),
        ),
    ])
}

/// Rebuild a plan from its scalar document plus already-decoded schedules.
pub fn plan_from_fields(
    path: &str,
    fields: &Fields,
    schedules: Vec<Schedule>,
) -> Result<Plan, StoreError> {
    let updated_at = fields
        .get(UPDATED_AT)
        .and_then(Value::as_str)
        .and_then(dateconv::parse_timestamp);

    Ok(Plan {
        title: require_str(fields, path, TITLE)?.to_owned(),
        description: require_str(fields, path, DESCRIPTION)?.to_owned(),
        schedules,
        updated_at,
    })
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

pub fn schedule_fields(schedule: &Schedule) -> Fields {
    let (from, to) = match schedule.date_range {
        Some(range) => (Some(range.from), Some(range.to)),
        None => (None, None),
    };

    Fields::from([
        (TITLE.to_owned(), Value::Str(schedule.title.clone())),
        (
            DESCRIPTION.to_owned(),
            Value::Str(schedule.description.clone()),
        ),
        (FROM_DATE.to_owned(), Value::Str(dateconv::format_date(from))),
        (TO_DATE.to_owned(), Value::Str(dateconv::format_date(to))),
        (
            COORDINATE.to_owned(),
            Value::GeoPoint {
                latitude: schedule.coordinate.latitude,
                longitude: schedule.coordinate.longitude,
            },
        ),
    ])
}

/// Rebuild a schedule from its stored fields.
///
/// A coordinate of the wrong shape is fatal for the whole read. The two date
/// fields are decoded as a unit: unless both parse, the schedule comes back
/// with no date range, never a half-set pair.
pub fn schedule_from_fields(path: &str, fields: &Fields) -> Result<Schedule, StoreError> {
    let (latitude, longitude) = fields
        .get(COORDINATE)
        .and_then(Value::as_geo_point)
        .ok_or_else(|| malformed(path, COORDINATE))?;

    let from = field_text(fields, FROM_DATE).and_then(dateconv::parse_date);
    let to = field_text(fields, TO_DATE).and_then(dateconv::parse_date);
    let date_range = match (from, to) {
        (Some(from), Some(to)) => Some(DateRange { from, to }),
        _ => None,
    };

    Ok(Schedule {
        title: require_str(fields, path, TITLE)?.to_owned(),
        description: require_str(fields, path, DESCRIPTION)?.to_owned(),
        coordinate: Coordinate::new(latitude, longitude),
        date_range,
    })
}

// ---------------------------------------------------------------------------
// Memories
// ---------------------------------------------------------------------------

pub fn memory_fields(memory: &Memory) -> Fields {
    Fields::from([
        (TITLE.to_owned(), Value::Str(memory.title.clone())),
        (INDEX.to_owned(), Value::Int(memory.index)),
        (
            DATE.to_owned(),
            Value::Str(dateconv::format_date(Some(memory.upload_date))),
        ),
    ])
}

pub fn memory_from_fields(path: &str, fields: &Fields) -> Result<Memory, StoreError> {
    let upload_date = field_text(fields, DATE)
        .and_then(dateconv::parse_date)
        .ok_or_else(|| malformed(path, DATE))?;

    Ok(Memory {
        title: require_str(fields, path, TITLE)?.to_owned(),
        index: fields
            .get(INDEX)
            .and_then(Value::as_int)
            .ok_or_else(|| malformed(path, INDEX))?,
        upload_date,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn field_text<'a>(fields: &'a Fields, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn require_str<'a>(fields: &'a Fields, path: &str, key: &str) -> Result<&'a str, StoreError> {
    field_text(fields, key).ok_or_else(|| malformed(path, key))
}

fn malformed(path: &str, field: &str) -> StoreError {
    StoreError::MalformedField {
        path: path.to_owned(),
        field: field.to_owned(),
    }
}
