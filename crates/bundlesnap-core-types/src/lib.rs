//! Core types shared across bundlesnap facilities
//!
//! This crate provides foundational types used by the normalizer, the
//! snapshot writers and the logging facility:
//!
//! - **Identifiers**: `PathId`, the 64-bit object identifier that must survive
//!   JSON round-trips as a decimal string
//! - **Schema constants**: Canonical field keys and event names

pub mod path_id;
pub mod schema;

pub use path_id::{is_identifier_field, PathId, PathIdParseError, IDENTIFIER_FIELDS};
