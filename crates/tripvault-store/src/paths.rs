//! Collection names, document key conventions, and blob paths.

/// Top-level collection of plan documents, keyed by decimal position.
pub const PLANS: &str = "plans";

/// Top-level collection of memory documents.
pub const MEMORIES: &str = "memories";

/// Sub-collection of schedule documents nested under each plan, keyed by
/// decimal schedule index.
pub const SCHEDULES: &str = "schedules";

const MEMORY_PREFIX: &str = "memory";

/// Document key for the memory record at `index`.
pub fn memory_key(index: i64) -> String {
    format!("{MEMORY_PREFIX}{index}")
}

/// Blob-store path for the image attached to a memory record.
pub fn memory_image_path(key: &str) -> String {
    format!("{MEMORIES}/{key}")
}
