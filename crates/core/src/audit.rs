//! Audit trail constants and snapshot helpers.
//!
//! Lives in `core` so both the repository layer and the HTTP handlers agree on
//! the action and entity vocabulary written to `audit_logs`.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Known values for the `audit_logs.action` column.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
}

// ---------------------------------------------------------------------------
// Entity type constants
// ---------------------------------------------------------------------------

/// Known values for the `audit_logs.entity_type` column.
pub mod entity_types {
    pub const USER: &str = "user";
    pub const PROJECT: &str = "project";
    pub const TASK: &str = "task";
    pub const TASK_COMMENT: &str = "task_comment";
}

/// Number of actors reported in the audit summary.
pub const TOP_ACTORS_LIMIT: i64 = 10;

/// Default page size for audit log listings.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 500;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Serialize an entity into the JSON snapshot stored in `old_values` / `new_values`.
///
/// Returns `None` if the value cannot be represented as JSON, which only
/// happens for maps with non-string keys; snapshots are best-effort.
pub fn snapshot<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}

/// Clamp caller-supplied pagination into `(limit, offset)`.
pub fn clamp_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_page_defaults() {
        assert_eq!(clamp_page(None, None), (DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn clamp_page_caps_limit() {
        assert_eq!(clamp_page(Some(10_000), Some(20)), (MAX_PAGE_SIZE, 20));
    }

    #[test]
    fn clamp_page_rejects_negative_values() {
        assert_eq!(clamp_page(Some(-5), Some(-1)), (1, 0));
    }

    #[test]
    fn snapshot_serializes_struct() {
        #[derive(Serialize)]
        struct Row {
            id: i64,
            name: &'static str,
        }
        let value = snapshot(&Row { id: 7, name: "Ana" }).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["name"], "Ana");
    }
}
