//! Programmatic glTF generation for integration tests.
//!
//! Generates a scene with two mesh nodes:
//! - "Hull": indexed quad (2 triangles) with normals and COLOR_0
//! - "Fin": non-indexed triangle strip (2 triangles) in the YZ plane, COLOR_0
//!   but no normals
//!
//! A third node without a mesh is included and should be skipped.

#![allow(dead_code)]

mod glb_assembly;

use serde_json::{json, Value};

pub use glb_assembly::assemble_glb;

/// Hull vertex colors, one per vertex
pub const HULL_COLORS: [[f32; 3]; 4] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Fin color, shared by all of its vertices
pub const FIN_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

const HULL_POSITIONS: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
];
const HULL_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

const FIN_POSITIONS: [[f32; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
];

/// Buffer contents and the matching glTF JSON document
pub struct GltfScene {
    pub root: Value,
    pub buffer: Vec<u8>,
}

/// Generate the two-mesh test scene.
///
/// The JSON buffer has no `uri`; [`assemble_glb`] embeds the data, while
/// [`GltfScene::with_external_buffer`] points it at a sibling .bin file.
pub fn generate_scene() -> GltfScene {
    let mut buffer = Vec::new();
    let hull_pos = push_vec3(&mut buffer, &HULL_POSITIONS);
    let hull_norm = push_vec3(&mut buffer, &[[0.0, 0.0, 1.0]; 4]);
    let hull_color = push_vec3(&mut buffer, &HULL_COLORS);
    let hull_idx = push_indices(&mut buffer, &HULL_INDICES);
    let fin_pos = push_vec3(&mut buffer, &FIN_POSITIONS);
    let fin_color = push_vec3(&mut buffer, &[FIN_COLOR; 4]);

    let views: Vec<Value> = [hull_pos, hull_norm, hull_color, hull_idx, fin_pos, fin_color]
        .iter()
        .map(|&(offset, length)| json!({ "buffer": 0, "byteOffset": offset, "byteLength": length }))
        .collect();

    let root = json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0, 1, 2] }],
        "nodes": [
            { "name": "Hull", "mesh": 0 },
            { "name": "Camera" },
            { "name": "Fin", "mesh": 1 }
        ],
        "meshes": [
            {
                "name": "HullMesh",
                "primitives": [{
                    "attributes": { "POSITION": 0, "NORMAL": 1, "COLOR_0": 2 },
                    "indices": 3,
                    "mode": 4
                }]
            },
            {
                "name": "FinMesh",
                "primitives": [{
                    "attributes": { "POSITION": 4, "COLOR_0": 5 },
                    "mode": 5
                }]
            }
        ],
        "accessors": [
            vec3_accessor(0, &HULL_POSITIONS, true),
            vec3_accessor(1, &[[0.0, 0.0, 1.0]; 4], false),
            vec3_accessor(2, &HULL_COLORS, false),
            {
                "bufferView": 3,
                "componentType": 5123,
                "count": HULL_INDICES.len(),
                "type": "SCALAR"
            },
            vec3_accessor(4, &FIN_POSITIONS, true),
            vec3_accessor(5, &[FIN_COLOR; 4], false)
        ],
        "bufferViews": views,
        "buffers": [{ "byteLength": buffer.len() }]
    });

    GltfScene { root, buffer }
}

impl GltfScene {
    /// JSON for a .gltf file whose buffer lives in `bin_name`
    pub fn with_external_buffer(&self, bin_name: &str) -> Value {
        let mut root = self.root.clone();
        root["buffers"][0]["uri"] = json!(bin_name);
        root
    }
}

fn vec3_accessor(view: usize, values: &[[f32; 3]], bounds: bool) -> Value {
    let mut accessor = json!({
        "bufferView": view,
        "componentType": 5126,
        "count": values.len(),
        "type": "VEC3"
    });
    if bounds {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in values {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
        }
        accessor["min"] = json!(min);
        accessor["max"] = json!(max);
    }
    accessor
}

/// Append floats and return (offset, length) of the written view
fn push_vec3(buffer: &mut Vec<u8>, values: &[[f32; 3]]) -> (usize, usize) {
    let offset = buffer.len();
    for v in values {
        for c in v {
            buffer.extend_from_slice(&c.to_le_bytes());
        }
    }
    (offset, buffer.len() - offset)
}

/// Append u16 indices, padded to 4-byte alignment
fn push_indices(buffer: &mut Vec<u8>, indices: &[u16]) -> (usize, usize) {
    let offset = buffer.len();
    for i in indices {
        buffer.extend_from_slice(&i.to_le_bytes());
    }
    let length = buffer.len() - offset;
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
    (offset, length)
}
