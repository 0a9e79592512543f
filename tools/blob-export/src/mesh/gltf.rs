//! glTF/GLB mesh source
//!
//! One mesh per node that references a mesh, in document node order, named
//! after the node. All primitives of the mesh are merged. Node transforms
//! are not applied: meshes are exported in object space.

use std::path::{Path, PathBuf};

use gltf::mesh::Mode;

use super::source::{source_error, MeshSource};
use super::types::{face_normal, ColorLayer, Polygon, SourceMesh};
use crate::error::Result;

/// Reads every mesh-bearing node of a glTF or GLB file
#[derive(Debug, Clone)]
pub struct GltfSource {
    path: PathBuf,
}

impl GltfSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl MeshSource for GltfSource {
    fn describe(&self) -> String {
        format!("glTF {:?}", self.path)
    }

    fn meshes(&self) -> Result<Vec<SourceMesh>> {
        let (document, buffers, _images) =
            gltf::import(&self.path).map_err(|e| source_error(&self.path, e))?;

        let mut meshes = Vec::new();
        for node in document.nodes() {
            let Some(mesh) = node.mesh() else {
                continue;
            };

            let name = node
                .name()
                .or_else(|| mesh.name())
                .map(str::to_string)
                .unwrap_or_else(|| format!("node{}", node.index()));

            meshes.push(read_mesh(&self.path, name, &mesh, &buffers)?);
        }

        if meshes.is_empty() {
            tracing::warn!("No mesh nodes found in {:?}", self.path);
        }

        Ok(meshes)
    }
}

/// Merge all primitives of a glTF mesh into one source mesh.
///
/// Primitives with normals get one corner per vertex. Primitives without
/// them get flat normals: one corner per triangle corner, carrying the
/// face normal.
fn read_mesh(
    path: &Path,
    name: String,
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
) -> Result<SourceMesh> {
    let mut out = SourceMesh::new(name);
    let mut colors: Option<Vec<[f32; 3]>> = Some(Vec::new());
    let mut uvs: Option<Vec<[f32; 2]>> = Some(Vec::new());

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        // Positions (required)
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| {
                let message = format!(
                    "primitive {} of mesh '{}' has no positions",
                    primitive.index(),
                    out.name
                );
                source_error(path, message)
            })?
            .collect();
        let vertex_count = positions.len();

        // Normals (optional, flat normals when absent)
        let normals: Option<Vec<[f32; 3]>> = reader
            .read_normals()
            .map(|iter| iter.collect::<Vec<_>>())
            .filter(|normals| normals.len() == vertex_count);
        if normals.is_none() {
            tracing::warn!(
                "Primitive {} of mesh '{}' has no normals, computing flat normals",
                primitive.index(),
                out.name
            );
        }

        // Colors (COLOR_0, alpha dropped)
        let primitive_colors: Option<Vec<[f32; 3]>> = reader
            .read_colors(0)
            .map(|iter| iter.into_rgb_f32().collect());

        // UVs (TEXCOORD_0)
        let primitive_uvs: Option<Vec<[f32; 2]>> = reader
            .read_tex_coords(0)
            .map(|iter| iter.into_f32().collect());

        // Indices (optional, sequential when absent)
        let indices: Vec<u32> = reader
            .read_indices()
            .map(|iter| iter.into_u32().collect())
            .unwrap_or_else(|| (0..vertex_count as u32).collect());

        if let Some(index) = out_of_range_index(&indices, vertex_count) {
            let message = format!(
                "primitive {} of mesh '{}' references vertex {}, but has {} vertices",
                primitive.index(),
                out.name,
                index,
                vertex_count
            );
            return Err(source_error(path, message));
        }

        let base = out.positions.len() as u32;
        for &position in &positions {
            out.push_vertex(position);
        }

        let primitive_colors =
            accept_layer(&mut colors, primitive_colors, vertex_count, "COLOR_0", &out.name);
        if let (Some(layer), Some(values)) = (colors.as_mut(), primitive_colors) {
            layer.extend(values);
        }
        let primitive_uvs =
            accept_layer(&mut uvs, primitive_uvs, vertex_count, "TEXCOORD_0", &out.name);

        let polygons = primitive_polygons(primitive.mode(), &indices);
        match normals {
            Some(normals) => {
                let first_corner = out.corners.len() as u32;
                for (i, &normal) in normals.iter().enumerate() {
                    out.push_corner(base + i as u32, normal);
                    push_uv(&mut uvs, primitive_uvs.as_deref(), i as u32);
                }
                for polygon in polygons {
                    out.push_polygon(Polygon::new(polygon.into_iter().map(|i| first_corner + i)));
                }
            }
            None => {
                for polygon in polygons {
                    let normal = face_normal(polygon.iter().map(|&i| positions[i as usize]));
                    let corners: Vec<u32> = polygon
                        .iter()
                        .map(|&i| {
                            push_uv(&mut uvs, primitive_uvs.as_deref(), i);
                            out.push_corner(base + i, normal)
                        })
                        .collect();
                    out.push_polygon(Polygon::new(corners));
                }
            }
        }
    }

    out.colors = colors.map(ColorLayer::per_vertex);
    out.uvs = uvs;
    Ok(out)
}

/// First index that does not address one of the primitive's own vertices
fn out_of_range_index(indices: &[u32], vertex_count: usize) -> Option<u32> {
    indices
        .iter()
        .copied()
        .find(|&i| i as usize >= vertex_count)
}

/// Check one primitive's attribute against the mesh-wide layer.
///
/// The layer is dropped for the whole mesh as soon as one primitive lacks
/// the attribute or carries the wrong number of entries. Returns the values
/// to merge while the layer is still alive.
fn accept_layer<T>(
    layer: &mut Option<Vec<T>>,
    values: Option<Vec<T>>,
    vertex_count: usize,
    attribute: &str,
    mesh: &str,
) -> Option<Vec<T>> {
    if layer.is_none() {
        return None;
    }

    match values {
        Some(values) if values.len() == vertex_count => Some(values),
        Some(values) => {
            tracing::warn!(
                "Mesh '{}' has {} {} entries for {} vertices, ignoring {}",
                mesh,
                values.len(),
                attribute,
                vertex_count,
                attribute
            );
            *layer = None;
            None
        }
        None => {
            *layer = None;
            None
        }
    }
}

/// Append the texcoord of primitive vertex `vertex` for a new corner
fn push_uv(layer: &mut Option<Vec<[f32; 2]>>, values: Option<&[[f32; 2]]>, vertex: u32) {
    if let (Some(layer), Some(values)) = (layer.as_mut(), values) {
        layer.push(values[vertex as usize]);
    }
}

/// Split a primitive's index list into polygons according to its mode.
///
/// Strips and fans expand to triangle lists. Point and line primitives
/// produce polygons with fewer than three corners, which the export rejects.
fn primitive_polygons(mode: Mode, indices: &[u32]) -> Vec<Vec<u32>> {
    match mode {
        Mode::Triangles => indices.chunks(3).map(<[u32]>::to_vec).collect(),
        Mode::TriangleStrip => (0..indices.len().saturating_sub(2))
            .map(|i| {
                if i % 2 == 0 {
                    vec![indices[i], indices[i + 1], indices[i + 2]]
                } else {
                    vec![indices[i], indices[i + 2], indices[i + 1]]
                }
            })
            .collect(),
        Mode::TriangleFan => (1..indices.len().saturating_sub(1))
            .map(|i| vec![indices[i], indices[i + 1], indices[0]])
            .collect(),
        Mode::Points => indices.chunks(1).map(<[u32]>::to_vec).collect(),
        Mode::Lines | Mode::LineStrip | Mode::LineLoop => {
            indices.chunks(2).map(<[u32]>::to_vec).collect()
        }
    }
}
