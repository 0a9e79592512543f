//! Export configuration
//!
//! One value per export run, handed to [`crate::BlobExporter::new`]. The
//! texcoord toggle fixes the record size for the whole blob.

use serde::Deserialize;

/// How per-corner colors are looked up.
///
/// Earlier versions of the exporter read the active color layer with the mesh-level
/// vertex index instead of the corner index. On meshes where one vertex is
/// shared by corners of different colors (color seams) that picks the wrong
/// color for some corners. `Corner` reads the right entry; `VertexIndex`
/// reproduces the old behavior for byte-compatible output.
///
/// Layers that store one color per vertex are read by vertex index under
/// both settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorLookup {
    /// Index per-corner layers by corner
    #[default]
    Corner,
    /// Index per-corner layers by vertex (legacy)
    VertexIndex,
}

/// Options threaded through a single export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Append a texture coordinate to every vertex record
    pub texcoords: bool,

    /// Color layer lookup mode
    pub color_lookup: ColorLookup,
}

impl ExportConfig {
    /// Size of one vertex record under this configuration
    pub fn record_size(&self) -> usize {
        blob_common::record_size(self.texcoords)
    }

    pub fn with_texcoords(mut self, texcoords: bool) -> Self {
        self.texcoords = texcoords;
        self
    }

    pub fn with_color_lookup(mut self, color_lookup: ColorLookup) -> Self {
        self.color_lookup = color_lookup;
        self
    }
}
