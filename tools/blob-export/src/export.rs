//! Blob export orchestration
//!
//! Encodes every mesh, concatenates the vertex records in source order and
//! writes the three chunks. Nothing reaches the destination path unless the
//! whole export succeeds.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use blob_common::IndexEntry;
use rayon::prelude::*;

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportWarning, Result};
use crate::formats::{write_blob, BlobSummary};
use crate::index::{index_payload, NameIndexBuilder};
use crate::mesh::{encode_mesh, EncodedMesh, MeshSource, SourceMesh};

/// A fully encoded blob, held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedBlob {
    /// `dat0` payload
    pub geometry: Vec<u8>,
    /// `str0` payload
    pub strings: Vec<u8>,
    /// `idx0` entries, one per mesh in export order
    pub entries: Vec<IndexEntry>,
    /// Total vertex records in `geometry`
    pub vertex_count: u32,
    /// Bytes per vertex record
    pub record_size: usize,
    /// Warnings raised while encoding
    pub warnings: Vec<ExportWarning>,
}

impl ExportedBlob {
    /// `idx0` payload
    pub fn index_bytes(&self) -> Vec<u8> {
        index_payload(&self.entries)
    }

    /// Write the three chunks to `w`
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<BlobSummary> {
        write_blob(w, &self.geometry, &self.strings, &self.index_bytes())
    }

    /// Serialize the whole blob
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }
}

/// Outcome of [`BlobExporter::export_to_file`]
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub path: PathBuf,
    pub summary: BlobSummary,
    pub mesh_count: usize,
    pub vertex_count: u32,
    pub warnings: Vec<ExportWarning>,
}

/// Exports a list of meshes into a single blob
#[derive(Debug, Clone, Default)]
pub struct BlobExporter {
    config: ExportConfig,
}

impl BlobExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Encode `meshes` into an in-memory blob.
    ///
    /// Meshes are encoded on the rayon pool, but geometry and index follow
    /// the order of `meshes`. The first fatal error aborts the export.
    pub fn export(&self, meshes: &[SourceMesh]) -> Result<ExportedBlob> {
        let config = &self.config;

        let encoded: Vec<EncodedMesh> = meshes
            .par_iter()
            .map(|mesh| encode_mesh(mesh, config))
            .collect::<Result<Vec<_>>>()?;

        assemble(encoded, config.record_size())
    }

    /// Export `meshes` and write the blob to `path`.
    ///
    /// The blob goes to a temporary sibling first and is renamed over `path`
    /// once fully written.
    pub fn export_to_file(&self, meshes: &[SourceMesh], path: &Path) -> Result<ExportReport> {
        let blob = self.export(meshes)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = temp_path(path);
        let summary = match write_file(&blob, &temp) {
            Ok(summary) => summary,
            Err(e) => {
                let _ = fs::remove_file(&temp);
                return Err(e);
            }
        };
        if let Err(e) = fs::rename(&temp, path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::info!("Wrote {}", summary);

        Ok(ExportReport {
            path: path.to_path_buf(),
            summary,
            mesh_count: blob.entries.len(),
            vertex_count: blob.vertex_count,
            warnings: blob.warnings,
        })
    }
}

/// Concatenate encoded meshes in order and build the name index
fn assemble(encoded: Vec<EncodedMesh>, record_size: usize) -> Result<ExportedBlob> {
    let total_bytes = encoded.iter().map(|m| m.vertex_data.len()).sum();
    let mut geometry = Vec::with_capacity(total_bytes);
    let mut index = NameIndexBuilder::new();
    let mut warnings = Vec::new();

    for mesh in encoded {
        tracing::info!("Writing '{}'...", mesh.name);
        index.push(&mesh.name, mesh.vertex_count)?;
        geometry.extend_from_slice(&mesh.vertex_data);
        warnings.extend(mesh.warnings);
    }

    let vertex_count = index.vertex_count();
    let expected = vertex_count as usize * record_size;
    if geometry.len() != expected {
        return Err(ExportError::Inconsistent(format!(
            "geometry is {} bytes, expected {} ({} records of {} bytes)",
            geometry.len(),
            expected,
            vertex_count,
            record_size
        )));
    }

    let (strings, entries) = index.into_parts();

    Ok(ExportedBlob {
        geometry,
        strings,
        entries,
        vertex_count,
        record_size,
        warnings,
    })
}

/// Load every source in parallel, keeping source order
pub fn load_sources(sources: &[Box<dyn MeshSource>]) -> Result<Vec<SourceMesh>> {
    let loaded = sources
        .par_iter()
        .map(|source| {
            tracing::info!("Loading {}", source.describe());
            source.meshes()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(loaded.into_iter().flatten().collect())
}

fn write_file(blob: &ExportedBlob, path: &Path) -> Result<BlobSummary> {
    let mut writer = BufWriter::new(File::create(path)?);
    let summary = blob.write_to(&mut writer)?;
    writer.flush()?;
    Ok(summary)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
