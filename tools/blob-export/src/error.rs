//! Export error and warning types
//!
//! Errors are fatal: the export stops and no blob is written. Warnings are
//! logged and collected in the export report while the export carries on
//! with a substituted value.

use std::fmt;
use std::path::PathBuf;

/// Fatal export failure.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("mesh '{mesh}': polygon {polygon} has {corners} corners, expected 3")]
    NonTriangularFace {
        mesh: String,
        polygon: usize,
        corners: usize,
    },

    #[error("mesh '{mesh}': polygon {polygon} references corner {corner}, but the mesh has {corner_count} corners")]
    CornerOutOfRange {
        mesh: String,
        polygon: usize,
        corner: u32,
        corner_count: usize,
    },

    #[error("mesh '{mesh}': corner {corner} references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        mesh: String,
        corner: u32,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("mesh '{mesh}' has no color layer")]
    MissingColorLayer { mesh: String },

    #[error("mesh '{mesh}': color lookup index {index} is outside the color layer ({len} entries)")]
    ColorIndexOutOfRange {
        mesh: String,
        index: u32,
        len: usize,
    },

    #[error("mesh '{mesh}': texcoord layer has {len} entries for {corner_count} corners")]
    TexcoordLayerMismatch {
        mesh: String,
        len: usize,
        corner_count: usize,
    },

    #[error("{what} exceeds the 32-bit offset range of the blob format")]
    TooLarge { what: &'static str },

    #[error("internal consistency check failed: {0}")]
    Inconsistent(String),

    #[error("failed to load mesh source {path:?}: {message}")]
    Source { path: PathBuf, message: String },

    #[error("unsupported mesh source {0:?} (use .gltf, .glb or .obj)")]
    UnsupportedSource(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the library.
pub type Result<T, E = ExportError> = std::result::Result<T, E>;

/// Non-fatal export condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// Texcoords were requested but the mesh has no coordinate layer;
    /// every corner was written as (0.0, 0.0).
    MissingTexcoords { mesh: String },
}

impl ExportWarning {
    /// Name of the mesh the warning refers to
    pub fn mesh(&self) -> &str {
        match self {
            ExportWarning::MissingTexcoords { mesh } => mesh,
        }
    }
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportWarning::MissingTexcoords { mesh } => write!(
                f,
                "trying to export texcoord data, but mesh '{}' has no uv data; will output (0.0, 0.0)",
                mesh
            ),
        }
    }
}
