//! Snapshot comparison.
//!
//! [`compare_values`] walks two JSON trees and returns an ordered diff
//! report, one human-readable line per mismatch. An empty report means the
//! trees are equal under the active [`CompareRules`].

pub mod engine;
pub mod identifiers;
pub mod rules;

pub use engine::compare_values;
pub use identifiers::find_non_string_identifiers;
pub use rules::{CompareRules, DEFAULT_FLOAT_TOLERANCE, DEFAULT_SKIP_KEYS};

/// Ordered mismatch lines; empty when equal
pub type DiffReport = Vec<String>;
