mod common;

use bundlesnap_core::errors::ExErrorKind;
use bundlesnap_core::{DecodedMesh, Node, TextureImage};
use bundlesnap_engine::{generate_bundle_snapshot, ItemKind, ItemStatus};
use common::{head_accessory_bundle, touch_bundle, FakeFile, FakeLibrary, FakeObject};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn test_head_accessory_layout() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "BambooCopter_head");
    let library = FakeLibrary::default().with_bundle("BambooCopter_head", head_accessory_bundle());
    let out = dir.path().join("out").join("BambooCopter_head");

    let report = generate_bundle_snapshot(&library, &input, &out).unwrap();

    assert!(report.is_success());
    assert_eq!(report.manifest.object_count, 13);
    assert_eq!(report.object_files.len(), 13);
    assert!(!out.join("textures_index.json").exists());
    assert_eq!(fs::read_dir(out.join("objects")).unwrap().count(), 13);

    let manifest = read_json(&out.join("manifest.json"));
    assert_eq!(manifest["object_count"], json!(13));
    assert_eq!(manifest["unity_version"], json!("2019.4.31f1"));
    assert_eq!(manifest["platform"], json!("StandaloneWindows64"));
    assert_eq!(manifest["endianness"], json!("little"));
    assert_eq!(manifest["header_version"], json!(22));
    assert_eq!(manifest["file_name"], json!("BambooCopter_head.hhh"));
    assert_eq!(manifest["file_size"], json!("BambooCopter_head".len()));
    assert_eq!(manifest["file_sha256"].as_str().unwrap().len(), 64);

    let summary = read_json(&out.join("summary.json"));
    assert_eq!(summary["total_objects"], json!(13));
    assert_eq!(summary["objects_by_type"]["GameObject"], json!(2));
    assert_eq!(summary["objects_by_type"]["MonoBehaviour"], json!(2));
    assert_eq!(
        summary["object_list"][1]["path_id"],
        json!("-8911878726397676121")
    );

    assert_eq!(report.object_files[1], "001_GameObject_-8911878726397676121.json");
    let mesh = read_json(&out.join("objects").join("007_Mesh_8.json"));
    assert_eq!(mesh["_mesh_data"]["vertex_count"], json!(3));
    assert_eq!(mesh["metadata"]["path_id"], json!("8"));
}

#[test]
fn test_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "ClownNose_head");
    let library = FakeLibrary::default().with_bundle("ClownNose_head", head_accessory_bundle());
    let first = dir.path().join("a");
    let second = dir.path().join("b");

    generate_bundle_snapshot(&library, &input, &first).unwrap();
    generate_bundle_snapshot(&library, &input, &second).unwrap();

    assert_eq!(
        fs::read(first.join("summary.json")).unwrap(),
        fs::read(second.join("summary.json")).unwrap()
    );

    let mut m1 = read_json(&first.join("manifest.json"));
    let mut m2 = read_json(&second.join("manifest.json"));
    for m in [&mut m1, &mut m2] {
        let obj = m.as_object_mut().unwrap();
        obj.remove("timestamp");
        obj.remove("file_path");
    }
    assert_eq!(m1, m2);

    for name in fs::read_dir(first.join("objects")).unwrap() {
        let name = name.unwrap().file_name();
        assert_eq!(
            fs::read(first.join("objects").join(&name)).unwrap(),
            fs::read(second.join("objects").join(&name)).unwrap()
        );
    }
}

#[test]
fn test_object_failures_write_placeholders() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "Cigar_neck");
    let objects = vec![
        FakeObject::new(1, 114, "MonoBehaviour").with_tree(Err("no type tree".to_string())),
        FakeObject::new(2, 43, "Mesh").with_mesh(Err("vertex stream missing".to_string())),
        FakeObject::new(3, 1, "GameObject"),
    ];
    let library = FakeLibrary::default().with_bundle("Cigar_neck", vec![FakeFile::new(objects)]);
    let out = dir.path().join("Cigar_neck");

    let report = generate_bundle_snapshot(&library, &input, &out).unwrap();

    assert_eq!(report.object_files.len(), 3);
    assert_eq!(report.degraded().count(), 2);

    let broken = read_json(&out.join("objects").join("000_MonoBehaviour_1.json"));
    assert_eq!(
        broken["data"],
        json!({"_error": "Failed to parse: no type tree", "_type": "MonoBehaviour"})
    );
    let mesh = read_json(&out.join("objects").join("001_Mesh_2.json"));
    assert_eq!(mesh["_mesh_data"]["vertex_count"], json!(0));
    assert_eq!(
        mesh["_mesh_data"]["error"],
        json!("Failed to extract geometry: vertex stream missing")
    );
}

#[test]
fn test_textures_written_skipped_and_failed() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "SamusPlushie_body");
    let pixel = TextureImage {
        width: 1,
        height: 1,
        rgba: vec![10, 20, 30, 255],
    };
    let objects = vec![
        FakeObject::new(-5, 28, "Texture2D").with_texture(Ok(Some(pixel))),
        FakeObject::new(6, 28, "Texture2D").with_texture(Ok(None)),
        FakeObject::new(7, 28, "Texture2D").with_texture(Err("unsupported format 34".to_string())),
        FakeObject::new(8, 28, "Texture2D").with_texture(Ok(Some(TextureImage::default()))),
    ];
    let library =
        FakeLibrary::default().with_bundle("SamusPlushie_body", vec![FakeFile::new(objects)]);
    let out = dir.path().join("SamusPlushie_body");

    let report = generate_bundle_snapshot(&library, &input, &out).unwrap();

    assert_eq!(report.textures.len(), 1);
    assert!(out.join("textures").join("tex_-5.png").is_file());
    assert_eq!(
        read_json(&out.join("textures_index.json")),
        json!({"-5": "textures/tex_-5.png"})
    );

    let textures: Vec<_> = report.items_of(ItemKind::Texture).collect();
    assert_eq!(textures.len(), 4);
    assert!(textures[0].is_written());
    assert!(matches!(textures[1].status, ItemStatus::Skipped(_)));
    match &textures[2].status {
        ItemStatus::Failed(err) => assert_eq!(err.kind(), ExErrorKind::TextureDecode),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(matches!(textures[3].status, ItemStatus::Skipped(_)));

    // every texture object still gets its document
    assert_eq!(report.object_files.len(), 4);
}

#[test]
fn test_load_failure_is_bundle_error() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "Broken");
    let err = generate_bundle_snapshot(&FakeLibrary::default(), &input, &dir.path().join("Broken"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::BundleLoad);
}

#[test]
fn test_bundle_without_asset_files_is_empty_bundle() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "Hollow");
    let library = FakeLibrary::default().with_bundle("Hollow", Vec::new());
    let err = generate_bundle_snapshot(&library, &input, &dir.path().join("Hollow")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::EmptyBundle);
}

#[test]
fn test_objects_span_all_asset_files() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "Odradek_neck");
    let files = vec![
        FakeFile::new(vec![FakeObject::new(1, 1, "GameObject")]),
        FakeFile::new(vec![
            FakeObject::new(2, 21, "Material").with_tree(Ok(Node::mapping([(
                "m_SavedProperties",
                Node::mapping([(
                    "m_Colors",
                    Node::Sequence(vec![Node::Sequence(vec![
                        Node::from("_Color"),
                        Node::mapping([
                            ("r", Node::Float(1.0)),
                            ("g", Node::Float(0.0)),
                            ("b", Node::Float(0.0)),
                            ("a", Node::Float(1.0)),
                        ]),
                    ])]),
                )]),
            )]))),
            FakeObject::new(3, 43, "Mesh").with_mesh(Ok(DecodedMesh::default())),
        ]),
    ];
    let library = FakeLibrary::default().with_bundle("Odradek_neck", files);
    let out = dir.path().join("Odradek_neck");

    let report = generate_bundle_snapshot(&library, &input, &out).unwrap();

    assert_eq!(report.manifest.object_count, 3);
    let material = read_json(&out.join("objects").join("001_Material_2.json"));
    let red = json!({"r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0});
    assert_eq!(material["_colors"]["_Color"], red);
    assert_eq!(material["_color"], red);
}

#[test]
fn test_missing_header_version_is_zero() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "Antenna_head");
    let mut file = FakeFile::new(vec![FakeObject::new(1, 1, "GameObject")]);
    file.header.header_version = None;
    let library = FakeLibrary::default().with_bundle("Antenna_head", vec![file]);
    let out = dir.path().join("Antenna_head");

    let report = generate_bundle_snapshot(&library, &input, &out).unwrap();

    assert_eq!(report.manifest.header_version, 0);
    let manifest = read_json(&out.join("manifest.json"));
    assert_eq!(manifest["header_version"], json!(0));
}

#[test]
fn test_failed_object_write_keeps_the_rest() {
    let dir = TempDir::new().unwrap();
    let input = touch_bundle(dir.path(), "Halo_head");
    let files = vec![FakeFile::new(vec![
        FakeObject::new(1, 1, "GameObject"),
        FakeObject::new(2, 114, "Bad\0Type"),
        FakeObject::new(3, 4, "Transform"),
    ])];
    let library = FakeLibrary::default().with_bundle("Halo_head", files);
    let out = dir.path().join("Halo_head");

    let report = generate_bundle_snapshot(&library, &input, &out).unwrap();

    assert!(report.is_success());
    assert!(out.join("manifest.json").is_file());
    assert_eq!(
        report.object_files,
        vec!["000_GameObject_1.json", "002_Transform_3.json"]
    );

    let objects: Vec<_> = report.items_of(ItemKind::Object).collect();
    assert_eq!(objects.len(), 3);
    assert_eq!(objects[1].name, "2");
    match &objects[1].status {
        ItemStatus::Failed(err) => {
            assert_eq!(err.kind(), ExErrorKind::Io);
            assert_eq!(err.path_id(), Some(bundlesnap_core_types::PathId::new(2)));
        }
        other => panic!("expected a failed write, got {:?}", other),
    }
    assert_eq!(report.failures().count(), 1);
}
