//! Snapshot verification against reference snapshots.
//!
//! A generated snapshot directory is checked against a committed reference
//! in two passes:
//!
//! 1. Structural checks: object and texture counts (against the reference
//!    and, when known, the catalog), per-type counts, identifier fields
//!    rendered as strings, and a sample of objects (first, middle, last)
//!    checked for metadata, mesh counts and material properties.
//! 2. A full deep comparison of every file under the active
//!    [`CompareRules`], producing a diff report.

#![allow(clippy::result_large_err)]

use bundlesnap_core::builder::{MATERIAL_TYPE, MESH_TYPE};
use bundlesnap_core::compare::{
    compare_values, find_non_string_identifiers, CompareRules, DiffReport,
};
use bundlesnap_core::snapshot::MANIFEST_FILE;
use bundlesnap_core::{log_op_end, log_op_start};
use bundlesnap_store::errors::Result;
use bundlesnap_store::SnapshotReader;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Known object and texture counts of a sample bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleExpectation {
    pub name: &'static str,
    pub objects: usize,
    pub textures: usize,
}

impl BundleExpectation {
    pub fn lookup(name: &str) -> Option<&'static BundleExpectation> {
        REFERENCE_CATALOG.iter().find(|e| e.name == name)
    }
}

const fn expect(name: &'static str, objects: usize, textures: usize) -> BundleExpectation {
    BundleExpectation {
        name,
        objects,
        textures,
    }
}

/// The sample bundles and their reference counts
pub const REFERENCE_CATALOG: &[BundleExpectation] = &[
    expect("SamusPlushie_body", 25, 2),
    expect("BambooCopter_head", 13, 0),
    expect("ClownNose_head", 10, 0),
    expect("FoxMask_head", 11, 1),
    expect("FrogHatSmile_head", 11, 1),
    expect("AmyBackpack_body", 13, 1),
    expect("Aku Aku_world", 228, 1),
    expect("Cigar_neck", 17, 0),
    expect("Odradek_neck", 55, 0),
    expect("Volleyball_world", 22, 0),
];

/// Outcome of verifying one bundle snapshot
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub bundle: String,
    /// Failed structural checks
    pub findings: Vec<String>,
    /// Deep comparison mismatches
    pub diff: DiffReport,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.diff.is_empty()
    }
}

/// Verify one generated snapshot directory against its reference.
///
/// # Errors
///
/// `InvalidSnapshot` when either directory, or its manifest or summary, is
/// missing or unreadable. Every other problem is a finding in the report.
pub fn verify_snapshot(
    test_dir: &Path,
    reference_dir: &Path,
    expectation: Option<&BundleExpectation>,
    rules: &CompareRules,
) -> Result<VerificationReport> {
    let start = Instant::now();
    let test = SnapshotReader::open(test_dir)?;
    let reference = SnapshotReader::open(reference_dir)?;
    let bundle = reference.bundle_name();
    log_op_start!("verify_snapshot", bundle = %bundle);

    let mut v = Verifier {
        findings: Vec::new(),
        rules,
    };
    let mut diff = DiffReport::new();

    // Manifest
    let test_manifest = test.manifest()?;
    let ref_manifest = reference.manifest()?;
    let object_count = test_manifest.get("object_count");
    if let Some(exp) = expectation {
        v.check_eq(
            "manifest object_count vs expected",
            object_count,
            Some(&Value::from(exp.objects)),
        );
    }
    v.check_eq(
        "manifest object_count vs reference",
        object_count,
        ref_manifest.get("object_count"),
    );

    // Summary
    let test_summary = test.summary()?;
    let ref_summary = reference.summary()?;
    let total = test_summary.get("total_objects");
    if let Some(exp) = expectation {
        v.check_eq("summary total_objects vs expected", total, Some(&Value::from(exp.objects)));
    }
    v.check_eq(
        "summary total_objects vs reference",
        total,
        ref_summary.get("total_objects"),
    );
    v.check_eq(
        "summary objects_by_type",
        test_summary.get("objects_by_type"),
        ref_summary.get("objects_by_type"),
    );

    // Textures
    let test_textures = test.textures_index()?;
    let ref_textures = reference.textures_index()?;
    let texture_len = |index: &Option<Value>| {
        index
            .as_ref()
            .and_then(Value::as_object)
            .map_or(0, |m| m.len())
    };
    if let Some(exp) = expectation.filter(|e| e.textures > 0) {
        if test_textures.is_none() {
            v.finding("missing textures_index.json");
        }
        if ref_textures.is_none() {
            v.finding("reference missing textures_index.json");
        }
        v.check_eq("texture count vs expected", texture_len(&test_textures), exp.textures);
    }
    v.check_eq(
        "texture count vs reference",
        texture_len(&test_textures),
        texture_len(&ref_textures),
    );

    // Identifiers
    v.findings
        .extend(find_non_string_identifiers(&test_manifest, "manifest"));
    v.findings
        .extend(find_non_string_identifiers(&test_summary, "summary"));

    // Objects
    let test_objects = test.object_files()?;
    let ref_objects = reference.object_files()?;
    if let Some(exp) = expectation {
        v.check_eq("object file count vs expected", test_objects.len(), exp.objects);
    }
    v.check_eq(
        "object file count vs reference",
        test_objects.len(),
        ref_objects.len(),
    );

    let paired = test_objects.len() == ref_objects.len();
    if paired && !test_objects.is_empty() {
        for idx in sample_indices(test_objects.len()) {
            v.check_sampled_object(&test, &reference, &test_objects[idx], &ref_objects[idx])?;
        }
    }

    // Deep comparison
    diff.extend(compare_values(&test_manifest, &ref_manifest, "manifest", rules));
    diff.extend(compare_values(&test_summary, &ref_summary, "summary", rules));
    if let (Some(a), Some(b)) = (&test_textures, &ref_textures) {
        diff.extend(compare_values(a, b, "textures_index", rules));
    }
    if paired {
        for (a, b) in test_objects.iter().zip(&ref_objects) {
            let label = format!("objects/{}", file_name(b));
            diff.extend(compare_values(
                &test.read_json(a)?,
                &reference.read_json(b)?,
                &label,
                rules,
            ));
        }
    }

    let report = VerificationReport {
        bundle: bundle.clone(),
        findings: v.findings,
        diff,
    };
    log_op_end!(
        "verify_snapshot",
        duration_ms = start.elapsed().as_millis() as u64,
        bundle = %bundle,
        findings = report.findings.len(),
        mismatches = report.diff.len()
    );
    Ok(report)
}

/// Verify every bundle snapshot under `test_root` against `reference_root`.
///
/// Bundles are matched by directory name. A reference bundle without a
/// generated counterpart, or the other way round, is a finding. Catalog
/// counts are checked for bundles the catalog knows.
///
/// # Errors
///
/// `InvalidSnapshot` when a root is unreadable or a matched pair cannot be
/// read.
pub fn verify_snapshot_roots(
    test_root: &Path,
    reference_root: &Path,
    rules: &CompareRules,
) -> Result<Vec<VerificationReport>> {
    let test_bundles = bundle_dirs(test_root)?;
    let ref_bundles = bundle_dirs(reference_root)?;
    let names: BTreeSet<&String> = test_bundles.iter().chain(&ref_bundles).collect();

    let mut reports = Vec::new();
    for name in names {
        let in_test = test_bundles.contains(name);
        let in_ref = ref_bundles.contains(name);
        let report = match (in_test, in_ref) {
            (true, true) => verify_snapshot(
                &test_root.join(name),
                &reference_root.join(name),
                BundleExpectation::lookup(name),
                rules,
            )?,
            (false, _) => VerificationReport {
                bundle: name.clone(),
                findings: vec!["snapshot missing from generated output".to_string()],
                diff: DiffReport::new(),
            },
            (_, false) => VerificationReport {
                bundle: name.clone(),
                findings: vec!["snapshot has no reference".to_string()],
                diff: DiffReport::new(),
            },
        };
        reports.push(report);
    }
    Ok(reports)
}

/// Check that a material document's `m_TexEnvs` is a list of `[name, data]`
/// pairs. Non-material documents pass trivially.
pub fn check_texenv_format(document: &Value, label: &str) -> Vec<String> {
    let mut issues = Vec::new();
    if document.pointer("/metadata/type").and_then(Value::as_str) != Some(MATERIAL_TYPE) {
        return issues;
    }
    let Some(tex_envs) = document.pointer("/data/m_SavedProperties/m_TexEnvs") else {
        return issues;
    };
    let Some(entries) = tex_envs.as_array() else {
        issues.push(format!("{}: m_TexEnvs should be a list", label));
        return issues;
    };
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_array().map(Vec::as_slice) {
            Some([name, _]) if name.is_string() => {}
            Some([_, _]) => {
                issues.push(format!("{}: m_TexEnvs[{}] name should be a string", label, i))
            }
            Some(_) => issues.push(format!("{}: m_TexEnvs[{}] should have 2 elements", label, i)),
            None => issues.push(format!("{}: m_TexEnvs[{}] should be a list", label, i)),
        }
    }
    issues
}

/// First, middle and last index; duplicates collapse for short lists
fn sample_indices(len: usize) -> Vec<usize> {
    let mut indices = vec![0, len / 2, len - 1];
    indices.dedup();
    indices
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Subdirectories of `root` holding a manifest, by name
fn bundle_dirs(root: &Path) -> Result<BTreeSet<String>> {
    let reader = SnapshotReader::open(root)?;
    let entries = std::fs::read_dir(reader.root()).map_err(|e| {
        bundlesnap_store::errors::invalid_snapshot(root, format!("cannot list directory: {}", e))
    })?;
    let mut names = BTreeSet::new();
    for entry in entries.flatten() {
        let path: PathBuf = entry.path();
        if path.join(MANIFEST_FILE).is_file() {
            names.insert(file_name(&path));
        }
    }
    Ok(names)
}

struct Verifier<'a> {
    findings: Vec<String>,
    rules: &'a CompareRules,
}

impl Verifier<'_> {
    fn finding(&mut self, message: impl Into<String>) {
        self.findings.push(message.into());
    }

    fn check_eq<T: PartialEq + Debug>(&mut self, label: &str, actual: T, expected: T) {
        if actual != expected {
            self.findings
                .push(format!("{}: {:?} != {:?}", label, actual, expected));
        }
    }

    fn check_close(&mut self, label: &str, actual: f64, expected: f64) {
        if (actual - expected).abs() > self.rules.float_tolerance {
            self.findings
                .push(format!("{}: {} != {}", label, actual, expected));
        }
    }

    fn check_sampled_object(
        &mut self,
        test: &SnapshotReader,
        reference: &SnapshotReader,
        test_path: &Path,
        ref_path: &Path,
    ) -> Result<()> {
        let name = file_name(test_path);
        let test_obj = test.read_json(test_path)?;
        let ref_obj = reference.read_json(ref_path)?;

        self.findings
            .extend(find_non_string_identifiers(&test_obj, &name));
        self.check_eq(
            &format!("{}: metadata.type", name),
            test_obj.pointer("/metadata/type"),
            ref_obj.pointer("/metadata/type"),
        );
        self.check_eq(
            &format!("{}: metadata.path_id", name),
            test_obj.pointer("/metadata/path_id"),
            ref_obj.pointer("/metadata/path_id"),
        );

        match test_obj.pointer("/metadata/type").and_then(Value::as_str) {
            Some(MESH_TYPE) => self.check_mesh(&name, &test_obj, &ref_obj),
            Some(MATERIAL_TYPE) => {
                self.check_material(&name, &test_obj, &ref_obj);
                self.findings.extend(check_texenv_format(&test_obj, &name));
            }
            _ => {}
        }
        Ok(())
    }

    fn check_mesh(&mut self, name: &str, test: &Value, reference: &Value) {
        if let (Some(t), Some(r)) = (test.get("_mesh_data"), reference.get("_mesh_data")) {
            for key in ["vertex_count", "index_count"] {
                self.check_eq(&format!("{}: _mesh_data.{}", name, key), t.get(key), r.get(key));
            }
            for key in ["uv0", "uv1"] {
                if let (Some(a), Some(b)) = (
                    t.get(key).and_then(Value::as_array),
                    r.get(key).and_then(Value::as_array),
                ) {
                    self.check_eq(&format!("{}: {} length", name, key), a.len(), b.len());
                }
            }
        }

        if let (Some(t), Some(r)) = (test.get("_geometry_info"), reference.get("_geometry_info")) {
            for key in ["vertex_count", "index_count"] {
                self.check_eq(
                    &format!("{}: _geometry_info.{}", name, key),
                    t.get(key),
                    r.get(key),
                );
            }
        }
    }

    fn check_material(&mut self, name: &str, test: &Value, reference: &Value) {
        if let (Some(t), Some(r)) = (
            test.get("_colors").and_then(Value::as_object),
            reference.get("_colors").and_then(Value::as_object),
        ) {
            self.check_eq(
                &format!("{}: color keys", name),
                key_set(t),
                key_set(r),
            );
            for (color, tv) in t {
                let Some(rv) = r.get(color) else { continue };
                for channel in ["r", "g", "b", "a"] {
                    let channel_of =
                        |v: &Value| v.get(channel).and_then(Value::as_f64).unwrap_or(1.0);
                    self.check_close(
                        &format!("{}: color {}.{}", name, color, channel),
                        channel_of(tv),
                        channel_of(rv),
                    );
                }
            }
        }

        if let (Some(t), Some(r)) = (
            test.get("_floats").and_then(Value::as_object),
            reference.get("_floats").and_then(Value::as_object),
        ) {
            self.check_eq(&format!("{}: float keys", name), key_set(t), key_set(r));
            for (key, tv) in t {
                if let (Some(a), Some(b)) = (tv.as_f64(), r.get(key).and_then(Value::as_f64)) {
                    self.check_close(&format!("{}: float {}", name, key), a, b);
                }
            }
        }

        if let (Some(t), Some(r)) = (
            test.get("_textures").and_then(Value::as_object),
            reference.get("_textures").and_then(Value::as_object),
        ) {
            self.check_eq(&format!("{}: texture keys", name), key_set(t), key_set(r));
            for (key, tv) in t {
                let test_id = tv.get("path_id");
                if !test_id.is_some_and(Value::is_string) {
                    self.finding(format!("{}: texture {} path_id should be a string", name, key));
                }
                if let Some(rv) = r.get(key) {
                    self.check_eq(
                        &format!("{}: texture {} path_id", name, key),
                        test_id,
                        rv.get("path_id"),
                    );
                }
            }
        }
    }
}

fn key_set(map: &serde_json::Map<String, Value>) -> BTreeSet<&str> {
    map.keys().map(String::as_str).collect()
}
