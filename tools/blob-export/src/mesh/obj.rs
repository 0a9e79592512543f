//! Wavefront OBJ mesh source
//!
//! Every `o` statement starts a new mesh; faces before the first one belong
//! to a mesh named after the file stem. Vertex colors come from the common
//! `v x y z r g b` extension. Polygons are fan-triangulated unless
//! triangulation is turned off, in which case they pass through as-is.

use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::source::{source_error, MeshSource};
use super::types::{face_normal, ColorLayer, Polygon, SourceMesh};
use crate::error::Result;

/// Reads the objects of an OBJ file
#[derive(Debug, Clone)]
pub struct ObjSource {
    path: PathBuf,
    triangulate: bool,
}

impl ObjSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            triangulate: true,
        }
    }

    /// Enable or disable fan triangulation of polygons
    pub fn triangulate(mut self, triangulate: bool) -> Self {
        self.triangulate = triangulate;
        self
    }
}

impl MeshSource for ObjSource {
    fn describe(&self) -> String {
        format!("OBJ {:?}", self.path)
    }

    fn meshes(&self) -> Result<Vec<SourceMesh>> {
        let file = File::open(&self.path).map_err(|e| source_error(&self.path, e))?;
        let default_name = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh");

        parse_obj(BufReader::new(file), default_name, self.triangulate)
            .map_err(|e| source_error(&self.path, e))
    }
}

/// OBJ parse failure
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Global OBJ vertex data (indices are file-wide)
#[derive(Default)]
struct ObjAttributes {
    positions: Vec<[f32; 3]>,
    colors: Vec<Option<[f32; 3]>>,
    tex_coords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

/// One face corner reference: position, optional texcoord, optional normal
type FaceVertex = (usize, Option<usize>, Option<usize>);

/// Mesh under construction, with file-wide vertex indices remapped to
/// mesh-local ones
struct ObjMeshBuilder {
    mesh: SourceMesh,
    /// Created by an `o` statement (kept even without faces)
    explicit: bool,
    vertex_map: HashMap<usize, u32>,
    colors: Vec<Option<[f32; 3]>>,
    uvs: Vec<Option<[f32; 2]>>,
}

impl ObjMeshBuilder {
    fn new(name: &str, explicit: bool) -> Self {
        Self {
            mesh: SourceMesh::new(name),
            explicit,
            vertex_map: HashMap::new(),
            colors: Vec::new(),
            uvs: Vec::new(),
        }
    }

    fn local_vertex(&mut self, attrs: &ObjAttributes, vi: usize) -> u32 {
        if let Some(&local) = self.vertex_map.get(&vi) {
            return local;
        }
        let local = self.mesh.push_vertex(attrs.positions[vi]);
        self.colors.push(attrs.colors[vi]);
        self.vertex_map.insert(vi, local);
        local
    }

    fn add_face(&mut self, attrs: &ObjAttributes, face: &[FaceVertex], triangulate: bool) {
        let face_normal = face_normal(face.iter().map(|&(vi, _, _)| attrs.positions[vi]));

        let corners: Vec<u32> = face
            .iter()
            .map(|&(vi, vti, vni)| {
                let vertex = self.local_vertex(attrs, vi);
                let normal = vni.map(|ni| attrs.normals[ni]).unwrap_or(face_normal);
                self.uvs.push(vti.map(|ti| attrs.tex_coords[ti]));
                self.mesh.push_corner(vertex, normal)
            })
            .collect();

        if triangulate && corners.len() > 3 {
            // Fan triangulation for convex polygons
            for i in 1..corners.len() - 1 {
                self.mesh
                    .push_polygon(Polygon::triangle(corners[0], corners[i], corners[i + 1]));
            }
        } else {
            self.mesh.push_polygon(Polygon::new(corners));
        }
    }

    fn finish(mut self) -> Option<SourceMesh> {
        if self.mesh.polygons.is_empty() && !self.explicit {
            return None;
        }

        // A layer is only exported when every element carries a value
        self.mesh.colors = self
            .colors
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .map(ColorLayer::per_vertex);
        self.mesh.uvs = if self.uvs.is_empty() {
            None
        } else {
            self.uvs.into_iter().collect()
        };

        Some(self.mesh)
    }
}

/// Parse OBJ text into named meshes, in file order
pub fn parse_obj<R: BufRead>(
    reader: R,
    default_name: &str,
    triangulate: bool,
) -> std::result::Result<Vec<SourceMesh>, ObjError> {
    let mut attrs = ObjAttributes::default();
    let mut meshes = Vec::new();
    let mut current = ObjMeshBuilder::new(default_name, false);

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts[0] {
            "o" => {
                let name = line[1..].trim();
                let name = if name.is_empty() { default_name } else { name };
                let finished = std::mem::replace(&mut current, ObjMeshBuilder::new(name, true));
                meshes.extend(finished.finish());
            }
            "v" => {
                let values = parse_floats(&parts, 3, line_no)?;
                attrs.positions.push([values[0], values[1], values[2]]);

                // `v x y z r g b` vertex color extension
                let color = (values.len() >= 6).then(|| [values[3], values[4], values[5]]);
                attrs.colors.push(color);
            }
            "vt" => {
                let values = parse_floats(&parts, 1, line_no)?;
                attrs
                    .tex_coords
                    .push([values[0], values.get(1).copied().unwrap_or(0.0)]);
            }
            "vn" => {
                let values = parse_floats(&parts, 3, line_no)?;
                attrs.normals.push([values[0], values[1], values[2]]);
            }
            "f" => {
                let face = parts[1..]
                    .iter()
                    .map(|v| parse_obj_vertex(v, &attrs))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| ObjError::Syntax {
                        line: line_no,
                        message: format!("invalid face '{}'", line),
                    })?;

                if face.is_empty() {
                    return Err(ObjError::Syntax {
                        line: line_no,
                        message: "face without vertices".to_string(),
                    });
                }

                current.add_face(&attrs, &face, triangulate);
            }
            _ => {}
        }
    }

    meshes.extend(current.finish());
    Ok(meshes)
}

/// Parse every number after the keyword, requiring at least `min` of them
fn parse_floats(
    parts: &[&str],
    min: usize,
    line: usize,
) -> std::result::Result<Vec<f32>, ObjError> {
    let values = parts[1..]
        .iter()
        .map(|s| s.parse::<f32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ObjError::Syntax {
            line,
            message: format!("invalid number in '{}': {}", parts.join(" "), e),
        })?;

    if values.len() < min {
        return Err(ObjError::Syntax {
            line,
            message: format!("'{}' expects at least {} values", parts[0], min),
        });
    }
    Ok(values)
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn"
///
/// Returns `None` for malformed or out-of-range references.
fn parse_obj_vertex(s: &str, attrs: &ObjAttributes) -> Option<FaceVertex> {
    let parts: Vec<&str> = s.split('/').collect();

    let vi = resolve_index(parts.first()?, attrs.positions.len())?;

    let vti = match parts.get(1).filter(|s| !s.is_empty()) {
        Some(s) => Some(resolve_index(s, attrs.tex_coords.len())?),
        None => None,
    };

    let vni = match parts.get(2).filter(|s| !s.is_empty()) {
        Some(s) => Some(resolve_index(s, attrs.normals.len())?),
        None => None,
    };

    Some((vi, vti, vni))
}

/// Resolve a 1-based (or negative, relative) OBJ index against `len`
fn resolve_index(s: &str, len: usize) -> Option<usize> {
    let index: i64 = s.parse().ok()?;
    let resolved = if index < 0 {
        len as i64 + index
    } else {
        index - 1
    };
    (0..len as i64)
        .contains(&resolved)
        .then_some(resolved as usize)
}
