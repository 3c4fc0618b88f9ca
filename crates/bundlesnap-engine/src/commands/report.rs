//! Per-item outcomes of a snapshot run.
//!
//! Nothing below the invocation level aborts a run. Every file the pipeline
//! tries to produce ends up as one [`ItemOutcome`], so callers can report
//! exactly what was written, skipped or failed.

use bundlesnap_core::errors::ExError;
use bundlesnap_core::snapshot::{BundleManifest, TextureIndex};
use std::path::PathBuf;

/// What an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Manifest,
    Summary,
    TexturesIndex,
    Object,
    Texture,
}

#[derive(Debug, Clone)]
pub enum ItemStatus {
    Written,
    /// Nothing to write, e.g. a texture without pixels
    Skipped(String),
    Failed(ExError),
}

/// Outcome of one file of a bundle snapshot
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub kind: ItemKind,
    /// File name, or the identifier for textures that were never written
    pub name: String,
    pub status: ItemStatus,
    /// Problems folded into a written document (parse or decode failures)
    pub issues: Vec<ExError>,
}

impl ItemOutcome {
    pub fn written(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            status: ItemStatus::Written,
            issues: Vec::new(),
        }
    }

    pub fn skipped(kind: ItemKind, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            status: ItemStatus::Skipped(reason.into()),
            issues: Vec::new(),
        }
    }

    pub fn failed(kind: ItemKind, name: impl Into<String>, err: ExError) -> Self {
        Self {
            kind,
            name: name.into(),
            status: ItemStatus::Failed(err),
            issues: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<ExError>) -> Self {
        self.issues = issues;
        self
    }

    pub fn is_written(&self) -> bool {
        matches!(self.status, ItemStatus::Written)
    }
}

/// Everything produced for one bundle
#[derive(Debug, Clone)]
pub struct BundleReport {
    pub bundle_name: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub manifest: BundleManifest,
    pub textures: TextureIndex,
    /// Written object file names, in canonical order
    pub object_files: Vec<String>,
    pub items: Vec<ItemOutcome>,
}

impl BundleReport {
    /// A bundle counts as snapshotted once its manifest is on disk.
    pub fn is_success(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.kind == ItemKind::Manifest && item.is_written())
    }

    pub fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items
            .iter()
            .filter(|item| matches!(item.status, ItemStatus::Failed(_)))
    }

    /// Written documents that carry folded-in parse or decode failures
    pub fn degraded(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items
            .iter()
            .filter(|item| item.is_written() && !item.issues.is_empty())
    }
}

/// Result for one input file of a batch
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub result: Result<BundleReport, ExError>,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        self.result.as_ref().is_ok_and(BundleReport::is_success)
    }
}

/// Result of a whole run
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub output: PathBuf,
    pub entries: Vec<BatchEntry>,
    /// Location of `snapshots_index.json`, when it could be written
    pub index_path: Option<PathBuf>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }
}
