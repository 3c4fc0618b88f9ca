//! Structured log field names and event names
//!
//! Shared by the log macros, the capture layer used in tests and every
//! crate that attaches bundle or object context to an event.

// Operation framing
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// What the event is about
pub const FIELD_BUNDLE: &str = "bundle";
pub const FIELD_PATH_ID: &str = "path_id";

// Count reported when a bundle finishes
pub const FIELD_OBJECT_COUNT: &str = "object_count";

// Attached by log_op_error!
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_MESSAGE: &str = "err.message";

/// Value of `event` when an operation begins
pub const EVENT_START: &str = "start";
/// Value of `event` when an operation succeeds
pub const EVENT_END: &str = "end";
/// Value of `event` when an operation fails
pub const EVENT_END_ERROR: &str = "end_error";
