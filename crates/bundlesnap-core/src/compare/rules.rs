//! Comparison rules

/// Path keywords excluded from comparison by default
pub const DEFAULT_SKIP_KEYS: &[&str] = &["timestamp", "file_path"];

/// Largest absolute difference at which two floats still compare equal
pub const DEFAULT_FLOAT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct CompareRules {
    /// A path containing any of these as a substring is not compared.
    ///
    /// Matching is on the whole rendered path, so `timestamp` also skips
    /// `meta.timestamps[0]` and `file_path` skips `source_file_path`.
    pub skip_keys: Vec<String>,
    pub float_tolerance: f64,
}

impl CompareRules {
    pub fn new<I, S>(skip_keys: I, float_tolerance: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_keys: skip_keys.into_iter().map(Into::into).collect(),
            float_tolerance,
        }
    }

    /// True when `path` falls under a skip keyword
    pub fn skips(&self, path: &str) -> bool {
        self.skip_keys.iter().any(|key| path.contains(key.as_str()))
    }
}

impl Default for CompareRules {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_KEYS.iter().copied(), DEFAULT_FLOAT_TOLERANCE)
    }
}
