//! In-memory asset library for engine tests

use bundlesnap_core::{
    AssetFile, AssetFileHeader, AssetLibrary, DecodedMesh, DeclaredVersion, EngineVersion,
    LibraryError, Node, ObjectInfo, TextureImage,
};
use bundlesnap_core_types::PathId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct FakeObject {
    pub info: ObjectInfo,
    pub tree: Result<Node, String>,
    pub mesh: Result<DecodedMesh, String>,
    pub texture: Result<Option<TextureImage>, String>,
}

impl FakeObject {
    pub fn new(path_id: i64, class_id: i32, type_name: &str) -> Self {
        Self {
            info: ObjectInfo {
                path_id: PathId::new(path_id),
                class_id,
                type_name: type_name.to_string(),
                byte_start: 1000 + path_id.unsigned_abs() % 1000,
                byte_size: 64,
            },
            tree: Ok(Node::mapping([("m_Name", Node::from(type_name))])),
            mesh: Ok(DecodedMesh::default()),
            texture: Ok(None),
        }
    }

    #[allow(dead_code)]
    pub fn with_tree(mut self, tree: Result<Node, String>) -> Self {
        self.tree = tree;
        self
    }

    #[allow(dead_code)]
    pub fn with_mesh(mut self, mesh: Result<DecodedMesh, String>) -> Self {
        self.mesh = mesh;
        self
    }

    #[allow(dead_code)]
    pub fn with_texture(mut self, texture: Result<Option<TextureImage>, String>) -> Self {
        self.texture = texture;
        self
    }
}

#[derive(Clone)]
pub struct FakeFile {
    pub header: AssetFileHeader,
    pub objects: Vec<FakeObject>,
}

impl FakeFile {
    pub fn new(objects: Vec<FakeObject>) -> Self {
        Self {
            header: AssetFileHeader {
                version: Some(DeclaredVersion::Text("2019.4.31f1".to_string())),
                platform: Some("StandaloneWindows64".to_string()),
                header_version: Some(22),
                ..Default::default()
            },
            objects,
        }
    }

    fn find(&self, object: &ObjectInfo) -> Result<&FakeObject, LibraryError> {
        self.objects
            .iter()
            .find(|o| o.info.path_id == object.path_id)
            .ok_or(LibraryError::ObjectNotFound {
                path_id: object.path_id,
            })
    }
}

impl AssetFile for FakeFile {
    fn header(&self) -> AssetFileHeader {
        self.header.clone()
    }

    fn objects(&self) -> Vec<ObjectInfo> {
        self.objects.iter().map(|o| o.info.clone()).collect()
    }

    fn read_tree(&self, object: &ObjectInfo) -> Result<Node, LibraryError> {
        self.find(object)?
            .tree
            .clone()
            .map_err(|reason| LibraryError::Parse {
                path_id: object.path_id,
                reason,
            })
    }

    fn decode_mesh(
        &self,
        object: &ObjectInfo,
        _version: EngineVersion,
    ) -> Result<DecodedMesh, LibraryError> {
        self.find(object)?
            .mesh
            .clone()
            .map_err(|reason| LibraryError::MeshDecode {
                path_id: object.path_id,
                reason,
            })
    }

    fn decode_texture(&self, object: &ObjectInfo) -> Result<Option<TextureImage>, LibraryError> {
        self.find(object)?
            .texture
            .clone()
            .map_err(|reason| LibraryError::TextureDecode {
                path_id: object.path_id,
                reason,
            })
    }
}

/// Bundles keyed by file stem. A stem with no entry fails to load.
#[derive(Default)]
pub struct FakeLibrary {
    pub bundles: HashMap<String, Vec<FakeFile>>,
}

impl FakeLibrary {
    pub fn with_bundle(mut self, stem: &str, files: Vec<FakeFile>) -> Self {
        self.bundles.insert(stem.to_string(), files);
        self
    }
}

impl AssetLibrary for FakeLibrary {
    type File = FakeFile;

    fn load(&self, path: &Path) -> Result<Vec<FakeFile>, LibraryError> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bundles
            .get(&stem)
            .cloned()
            .ok_or_else(|| LibraryError::Load {
                reason: format!("unknown bundle {}", stem),
            })
    }
}

/// Create an input file so size and digest can be computed
pub fn touch_bundle(dir: &Path, stem: &str) -> PathBuf {
    let path = dir.join(format!("{}.hhh", stem));
    std::fs::write(&path, stem.as_bytes()).unwrap();
    path
}

/// Thirteen objects and no textures, shaped like a small head accessory
#[allow(dead_code)]
pub fn head_accessory_bundle() -> Vec<FakeFile> {
    let mut objects = vec![
        FakeObject::new(1, 142, "AssetBundle"),
        FakeObject::new(-8911878726397676121, 1, "GameObject"),
        FakeObject::new(3, 4, "Transform"),
        FakeObject::new(4, 1, "GameObject"),
        FakeObject::new(5, 4, "Transform"),
        FakeObject::new(6, 23, "MeshRenderer"),
        FakeObject::new(7, 33, "MeshFilter"),
        FakeObject::new(8, 43, "Mesh"),
        FakeObject::new(9, 21, "Material"),
        FakeObject::new(10, 48, "Shader"),
        FakeObject::new(11, 114, "MonoBehaviour"),
        FakeObject::new(12, 115, "MonoScript"),
        FakeObject::new(13, 114, "MonoBehaviour"),
    ];
    objects[7] = objects[7].clone().with_mesh(Ok(DecodedMesh {
        vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        indices: vec![0, 1, 2],
        uv0: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        ..Default::default()
    }));
    vec![FakeFile::new(objects)]
}
