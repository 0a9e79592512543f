//! Mesh sources
//!
//! A [`MeshSource`] is the only thing the exporter sees of where meshes come
//! from. It hands out owned, triangulated meshes in a fixed order.

use std::path::{Path, PathBuf};

use super::gltf::GltfSource;
use super::obj::ObjSource;
use super::types::SourceMesh;
use crate::error::{ExportError, Result};

/// Supplies named meshes to the exporter
pub trait MeshSource: Send + Sync {
    /// Human-readable description for log messages
    fn describe(&self) -> String;

    /// Load every mesh, in export order
    fn meshes(&self) -> Result<Vec<SourceMesh>>;
}

/// Options for file-backed sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// Split polygons with more than three corners before export
    pub triangulate: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { triangulate: true }
    }
}

/// Meshes that are already in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    meshes: Vec<SourceMesh>,
}

impl MemorySource {
    pub fn new(meshes: Vec<SourceMesh>) -> Self {
        Self { meshes }
    }
}

impl MeshSource for MemorySource {
    fn describe(&self) -> String {
        format!("{} in-memory meshes", self.meshes.len())
    }

    fn meshes(&self) -> Result<Vec<SourceMesh>> {
        Ok(self.meshes.clone())
    }
}

/// Mesh file kinds understood by [`open_source`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Gltf,
    Obj,
}

impl SourceKind {
    /// Detect the source kind by file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "gltf" | "glb" => Some(SourceKind::Gltf),
            "obj" => Some(SourceKind::Obj),
            _ => None,
        }
    }
}

/// Open a mesh file as a source, picking the importer by extension
pub fn open_source(path: &Path, options: SourceOptions) -> Result<Box<dyn MeshSource>> {
    match SourceKind::from_path(path) {
        Some(SourceKind::Gltf) => Ok(Box::new(GltfSource::new(path))),
        Some(SourceKind::Obj) => Ok(Box::new(
            ObjSource::new(path).triangulate(options.triangulate),
        )),
        None => Err(ExportError::UnsupportedSource(path.to_path_buf())),
    }
}

/// Wrap an importer failure for `path`
pub(crate) fn source_error(path: &Path, message: impl ToString) -> ExportError {
    ExportError::Source {
        path: PathBuf::from(path),
        message: message.to_string(),
    }
}
