//! Domain model for the tripvault platform.
//!
//! Plain data types for plans, schedules, and memories, plus the date
//! conversion shared by every persisted record. Persistence itself lives in
//! `tripvault-store`.

pub mod dateconv;
pub mod models;

pub use models::{Coordinate, DateRange, Memory, Plan, Schedule, SwapRequest};
