//! Source mesh types handed from mesh sources to the encoder

use smallvec::SmallVec;

/// Default normal for corners whose source carries none
pub(crate) const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Corner indices of one polygon (inline for triangles and quads)
pub type CornerList = SmallVec<[u32; 4]>;

/// One polygon's reference to a vertex, with its own normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Index into [`SourceMesh::positions`]
    pub vertex: u32,
    /// Per-corner (split) normal
    pub normal: [f32; 3],
}

/// A polygon as a list of corner indices, in winding order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    pub corners: CornerList,
}

impl Polygon {
    pub fn new(corners: impl IntoIterator<Item = u32>) -> Self {
        Self {
            corners: corners.into_iter().collect(),
        }
    }

    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self::new([a, b, c])
    }

    /// Number of corners
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }
}

/// Which element a color layer stores one entry for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDomain {
    /// One color per corner
    Corner,
    /// One color per vertex
    Vertex,
}

/// Active color layer of a mesh (RGB in [0, 1], no alpha)
#[derive(Debug, Clone, PartialEq)]
pub struct ColorLayer {
    pub domain: ColorDomain,
    pub values: Vec<[f32; 3]>,
}

impl ColorLayer {
    pub fn per_corner(values: Vec<[f32; 3]>) -> Self {
        Self {
            domain: ColorDomain::Corner,
            values,
        }
    }

    pub fn per_vertex(values: Vec<[f32; 3]>) -> Self {
        Self {
            domain: ColorDomain::Vertex,
            values,
        }
    }
}

/// One named mesh as supplied by a [`super::MeshSource`]
///
/// Sources hand out owned values, so a mesh never aliases data of another
/// mesh in the same export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceMesh {
    /// Name recorded in the blob index (not deduplicated)
    pub name: String,
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Face corners
    pub corners: Vec<Corner>,
    /// Polygons over `corners`
    pub polygons: Vec<Polygon>,
    /// Active color layer, required for export
    pub colors: Option<ColorLayer>,
    /// Active texture coordinate layer, one entry per corner
    pub uvs: Option<Vec<[f32; 2]>>,
}

impl SourceMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a vertex position and return its index
    pub fn push_vertex(&mut self, position: [f32; 3]) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Append a corner and return its index
    pub fn push_corner(&mut self, vertex: u32, normal: [f32; 3]) -> u32 {
        self.corners.push(Corner { vertex, normal });
        (self.corners.len() - 1) as u32
    }

    pub fn push_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn with_colors(mut self, colors: ColorLayer) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn with_uvs(mut self, uvs: Vec<[f32; 2]>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    /// Number of vertex records this mesh encodes to, assuming triangles
    pub fn corner_count(&self) -> usize {
        self.polygons.iter().map(Polygon::len).sum()
    }
}

/// Newell's method face normal; the default normal for degenerate faces
pub(crate) fn face_normal(positions: impl IntoIterator<Item = [f32; 3]>) -> [f32; 3] {
    let positions: Vec<[f32; 3]> = positions.into_iter().collect();
    let mut n = [0.0f32; 3];

    for (i, a) in positions.iter().enumerate() {
        let b = positions[(i + 1) % positions.len()];
        n[0] += (a[1] - b[1]) * (a[2] + b[2]);
        n[1] += (a[2] - b[2]) * (a[0] + b[0]);
        n[2] += (a[0] - b[0]) * (a[1] + b[1]);
    }

    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len <= f32::EPSILON {
        return DEFAULT_NORMAL;
    }
    [n[0] / len, n[1] / len, n[2] / len]
}
