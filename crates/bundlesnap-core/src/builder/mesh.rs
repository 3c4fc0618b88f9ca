//! Mesh enrichment: raw topology facts and decoded geometry.

use crate::errors::LibraryError;
use crate::library::DecodedMesh;
use crate::tree::Node;

/// Topology facts of the first sub-mesh, read straight from the raw tree.
///
/// Returns `None` when the tree lists no sub-meshes. Nothing here depends on
/// whether geometry decoding succeeds.
pub fn geometry_info(tree: &Node) -> Option<Node> {
    let first = tree
        .get("m_SubMeshes")
        .and_then(Node::as_sequence)
        .and_then(|subs| subs.first())?;

    let count = |key: &str| first.get(key).cloned().unwrap_or(Node::Int(0));
    let stream = tree.get("m_StreamData");

    Some(Node::mapping([
        ("vertex_count", count("vertexCount")),
        ("index_count", count("indexCount")),
        // 0 = triangles, 1 = triangle strip
        ("topology", count("topology")),
        (
            "has_index_buffer",
            Node::Bool(tree.get("m_IndexBuffer").is_some_and(|b| !b.is_empty())),
        ),
        (
            "has_compressed_mesh",
            Node::Bool(tree.get("m_CompressedMesh").is_some_and(Node::is_truthy)),
        ),
        (
            "has_stream_data",
            Node::Bool(stream.is_some_and(Node::is_truthy)),
        ),
        (
            "stream_size",
            stream
                .and_then(|s| s.get("size"))
                .cloned()
                .unwrap_or(Node::Int(0)),
        ),
    ]))
}

/// Decoded geometry block, or an error-shaped block with zeroed counts.
///
/// Vertex colors are never included.
pub fn mesh_data(decoded: Result<DecodedMesh, LibraryError>) -> Node {
    match decoded {
        Ok(mesh) => Node::mapping([
            (
                "vertices",
                Node::Sequence(mesh.vertices.iter().map(|v| Node::from(v.to_vec())).collect()),
            ),
            ("vertex_count", Node::from(mesh.vertices.len())),
            (
                "indices",
                Node::Sequence(mesh.indices.iter().map(|i| Node::UInt(u64::from(*i))).collect()),
            ),
            ("index_count", Node::from(mesh.indices.len())),
            ("uv0", uv_channel(&mesh.uv0)),
            ("uv1", uv_channel(&mesh.uv1)),
            ("has_normals", Node::Bool(!mesh.normals.is_empty())),
            ("has_tangents", Node::Bool(!mesh.tangents.is_empty())),
        ]),
        Err(err) => Node::mapping([
            (
                "error",
                Node::String(format!("Failed to extract geometry: {}", err)),
            ),
            ("vertex_count", Node::Int(0)),
            ("index_count", Node::Int(0)),
            ("uv0", Node::Sequence(Vec::new())),
            ("uv1", Node::Sequence(Vec::new())),
        ]),
    }
}

fn uv_channel(uvs: &[[f32; 2]]) -> Node {
    Node::Sequence(uvs.iter().map(|uv| Node::from(uv.to_vec())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use bundlesnap_core_types::PathId;
    use serde_json::json;

    fn raw_mesh_tree() -> Node {
        Node::mapping([
            (
                "m_SubMeshes",
                Node::Sequence(vec![
                    Node::mapping([
                        ("vertexCount", Node::Int(24)),
                        ("indexCount", Node::Int(36)),
                        ("topology", Node::Int(0)),
                    ]),
                    Node::mapping([("vertexCount", Node::Int(99))]),
                ]),
            ),
            ("m_IndexBuffer", Node::Bytes(vec![0; 72])),
            ("m_CompressedMesh", Node::Mapping(Default::default())),
            (
                "m_StreamData",
                Node::mapping([
                    ("offset", Node::Int(0)),
                    ("size", Node::Int(1024)),
                    ("path", Node::from("archive:/CAB-1/CAB-1.resS")),
                ]),
            ),
        ])
    }

    #[test]
    fn test_geometry_info_reads_first_submesh() {
        let info = normalize(&geometry_info(&raw_mesh_tree()).unwrap());
        assert_eq!(
            info,
            json!({
                "vertex_count": 24,
                "index_count": 36,
                "topology": 0,
                "has_index_buffer": true,
                "has_compressed_mesh": false,
                "has_stream_data": true,
                "stream_size": 1024
            })
        );
    }

    #[test]
    fn test_geometry_info_absent_without_submeshes() {
        let tree = Node::mapping([("m_SubMeshes", Node::Sequence(vec![]))]);
        assert!(geometry_info(&tree).is_none());
        assert!(geometry_info(&Node::Mapping(Default::default())).is_none());
    }

    #[test]
    fn test_mesh_data_counts_and_omits_colors() {
        let mesh = DecodedMesh {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            indices: vec![0, 1, 2],
            uv0: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            uv1: vec![],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            tangents: vec![],
            colors: vec![[1.0, 1.0, 1.0, 1.0]; 3],
        };
        let data = normalize(&mesh_data(Ok(mesh)));
        assert_eq!(data["vertex_count"], json!(3));
        assert_eq!(data["index_count"], json!(3));
        assert_eq!(data["vertices"][1], json!([1.0, 0.0, 0.0]));
        assert_eq!(data["uv0"].as_array().unwrap().len(), 3);
        assert_eq!(data["uv1"], json!([]));
        assert_eq!(data["has_normals"], json!(true));
        assert_eq!(data["has_tangents"], json!(false));
        assert!(data.get("colors").is_none());
    }

    #[test]
    fn test_mesh_data_decode_failure_zeroes_counts() {
        let err = LibraryError::MeshDecode {
            path_id: PathId::new(5),
            reason: "unsupported vertex format".to_string(),
        };
        let data = normalize(&mesh_data(Err(err)));
        assert_eq!(
            data,
            json!({
                "error": "Failed to extract geometry: unsupported vertex format",
                "vertex_count": 0,
                "index_count": 0,
                "uv0": [],
                "uv1": []
            })
        );
    }
}
