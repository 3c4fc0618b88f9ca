//! Bundle snapshot orchestration.
//!
//! ## Pipeline (in order):
//! 1. Load the bundle through the asset library (failure skips the bundle)
//! 2. Resolve the declared engine version
//! 3. Enumerate objects once; that order is canonical everywhere
//! 4. Decode and write textures (failures recorded per texture)
//! 5. Write manifest, summary, texture index and object documents, each
//!    independently

#![allow(clippy::result_large_err)]

use bundlesnap_core::builder::build_object_snapshot;
use bundlesnap_core::errors::{ExError, ExErrorKind};
use bundlesnap_core::snapshot::manifest::HeaderFacts;
use bundlesnap_core::snapshot::{
    BundleManifest, Summary, TextureIndex, MANIFEST_FILE, SUMMARY_FILE, TEXTURES_INDEX_FILE,
};
use bundlesnap_core::{log_op_end, log_op_error, log_op_start};
use bundlesnap_core::{AssetFile, AssetLibrary, EngineVersion, ObjectInfo};
use bundlesnap_store::errors::Result;
use bundlesnap_store::fs::file_facts;
use bundlesnap_store::SnapshotWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::report::{BundleReport, ItemKind, ItemOutcome};

/// Type name of texture objects
pub const TEXTURE_TYPE: &str = "Texture2D";

/// Generate the snapshot of one bundle into `output_dir`.
///
/// Per-object and per-texture failures never fail the call; they are listed
/// in the returned report.
///
/// # Errors
///
/// - `BundleLoad` when the library cannot load the bundle
/// - `EmptyBundle` when the bundle holds no asset files
/// - `Io` when the input cannot be read or the output directory cannot be
///   prepared
pub fn generate_bundle_snapshot<L: AssetLibrary>(
    library: &L,
    bundle_path: &Path,
    output_dir: &Path,
) -> Result<BundleReport> {
    let start = Instant::now();
    let bundle_name = bundle_stem(bundle_path);
    log_op_start!("generate_bundle", bundle = %bundle_name);

    match run(library, bundle_path, output_dir, &bundle_name) {
        Ok(report) => {
            log_op_end!(
                "generate_bundle",
                duration_ms = start.elapsed().as_millis() as u64,
                bundle = %bundle_name,
                object_count = report.manifest.object_count,
                texture_count = report.textures.len()
            );
            Ok(report)
        }
        Err(err) => {
            log_op_error!(
                "generate_bundle",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                bundle = %bundle_name
            );
            Err(err)
        }
    }
}

fn run<L: AssetLibrary>(
    library: &L,
    bundle_path: &Path,
    output_dir: &Path,
    bundle_name: &str,
) -> Result<BundleReport> {
    let files = library
        .load(bundle_path)
        .map_err(|e| ExError::from(e).with_path(bundle_path))?;
    let Some(first) = files.first() else {
        return Err(ExError::new(ExErrorKind::EmptyBundle)
            .with_op("load_bundle")
            .with_path(bundle_path)
            .with_message("No asset files found in bundle"));
    };

    let first_header = first.header();
    let bundle_version = first_header.version.clone().unwrap_or_default();

    // (file index, object, engine version of its file)
    let mut objects: Vec<(usize, ObjectInfo, EngineVersion)> = Vec::new();
    for (file_index, file) in files.iter().enumerate() {
        let version = file
            .header()
            .version
            .unwrap_or_else(|| bundle_version.clone())
            .resolve();
        objects.extend(
            file.objects()
                .into_iter()
                .map(|object| (file_index, object, version)),
        );
    }

    let facts = file_facts(bundle_path)?;
    let summary = Summary::from_objects(objects.iter().map(|(_, object, _)| object));
    let writer = SnapshotWriter::create(output_dir)?;
    let mut items = Vec::new();

    let textures = write_textures(&files, &objects, &writer, &mut items);

    let header = HeaderFacts::from(&first_header);
    let manifest = BundleManifest {
        bundle_name: bundle_name.to_string(),
        file_name: bundle_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        file_path: absolute(bundle_path).to_string_lossy().into_owned(),
        file_size: facts.size,
        file_sha256: facts.sha256,
        unity_version: header.unity_version,
        platform: header.platform,
        header_version: header.header_version,
        endianness: header.endianness,
        object_count: summary.total_objects,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    items.push(outcome(
        ItemKind::Manifest,
        MANIFEST_FILE,
        writer.write_manifest(&manifest),
    ));
    items.push(outcome(
        ItemKind::Summary,
        SUMMARY_FILE,
        writer.write_summary(&summary),
    ));
    if !textures.is_empty() {
        items.push(outcome(
            ItemKind::TexturesIndex,
            TEXTURES_INDEX_FILE,
            writer.write_textures_index(&textures),
        ));
    }

    let mut object_files = Vec::with_capacity(objects.len());
    for (index, (file_index, object, version)) in objects.iter().enumerate() {
        let file = &files[*file_index];
        let snapshot = build_object_snapshot(file, object, *version);
        for issue in &snapshot.issues {
            tracing::warn!(
                bundle = %bundle_name,
                path_id = %object.path_id,
                type_name = %object.type_name,
                err.code = issue.code(),
                err.message = issue.message(),
                "Object written with error placeholder"
            );
        }

        let written =
            writer.write_object(index, &object.type_name, object.path_id, &snapshot.document);
        match written {
            Ok(name) => {
                items.push(
                    ItemOutcome::written(ItemKind::Object, name.clone())
                        .with_issues(snapshot.issues),
                );
                object_files.push(name);
            }
            Err(err) => {
                tracing::warn!(
                    bundle = %bundle_name,
                    path_id = %object.path_id,
                    err.code = err.code(),
                    err.message = err.message(),
                    "Object write failed, skipping"
                );
                items.push(ItemOutcome::failed(
                    ItemKind::Object,
                    object.path_id.to_string(),
                    err.with_path_id(object.path_id),
                ));
            }
        }
    }

    Ok(BundleReport {
        bundle_name: bundle_name.to_string(),
        input: bundle_path.to_path_buf(),
        output: output_dir.to_path_buf(),
        manifest,
        textures,
        object_files,
        items,
    })
}

/// Decode and write every texture object, recording one item per texture.
fn write_textures<F: AssetFile>(
    files: &[F],
    objects: &[(usize, ObjectInfo, EngineVersion)],
    writer: &SnapshotWriter,
    items: &mut Vec<ItemOutcome>,
) -> TextureIndex {
    let mut index = TextureIndex::new();

    for (file_index, object, _) in objects {
        if object.type_name != TEXTURE_TYPE {
            continue;
        }
        let id = object.path_id.to_string();

        let decoded = match files[*file_index].decode_texture(object) {
            Ok(Some(texture)) => texture,
            Ok(None) => {
                items.push(ItemOutcome::skipped(ItemKind::Texture, id, "no image data"));
                continue;
            }
            Err(err) => {
                tracing::debug!(path_id = %object.path_id, error = %err, "Texture decode failed");
                items.push(ItemOutcome::failed(ItemKind::Texture, id, err.into()));
                continue;
            }
        };

        match writer.write_texture(object.path_id, &decoded) {
            Ok(Some(relative)) => {
                items.push(ItemOutcome::written(ItemKind::Texture, relative.clone()));
                index.insert(object.path_id, relative);
            }
            Ok(None) => {
                items.push(ItemOutcome::skipped(ItemKind::Texture, id, "empty image"));
            }
            Err(err) => {
                items.push(ItemOutcome::failed(
                    ItemKind::Texture,
                    id,
                    err.with_path_id(object.path_id),
                ));
            }
        }
    }

    index
}

fn outcome(kind: ItemKind, name: &str, result: Result<PathBuf>) -> ItemOutcome {
    match result {
        Ok(_) => ItemOutcome::written(kind, name),
        Err(err) => {
            tracing::warn!(
                file = name,
                err.code = err.code(),
                err.message = err.message(),
                "Write failed"
            );
            ItemOutcome::failed(kind, name, err)
        }
    }
}

/// File stem of a bundle path; also its snapshot directory name
pub fn bundle_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_stem_keeps_spaces() {
        assert_eq!(bundle_stem(Path::new("/mods/Aku Aku_world.hhh")), "Aku Aku_world");
        assert_eq!(bundle_stem(Path::new("Cigar_neck")), "Cigar_neck");
    }
}
