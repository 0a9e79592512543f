//! Manifest parsing and build orchestration
//!
//! Parses blob.toml and exports every listed source into one blob.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::export::{load_sources, BlobExporter, ExportReport};
use crate::mesh::{open_source, SourceKind, SourceOptions};

/// Root manifest structure
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub options: ExportConfig,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("meshes.blob")
}

/// One mesh file to export
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    pub path: PathBuf,
    #[serde(default = "default_triangulate")]
    pub triangulate: bool,
}

fn default_triangulate() -> bool {
    true
}

impl SourceEntry {
    pub fn options(&self) -> SourceOptions {
        SourceOptions {
            triangulate: self.triangulate,
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

/// Validate a manifest without building.
///
/// Source paths are resolved against `base_dir`.
pub fn validate(manifest: &Manifest, base_dir: &Path) -> Result<()> {
    if manifest.sources.is_empty() {
        anyhow::bail!("Manifest lists no sources");
    }

    for entry in &manifest.sources {
        let path = base_dir.join(&entry.path);
        if SourceKind::from_path(&path).is_none() {
            anyhow::bail!(
                "Unsupported mesh format: {:?} (use .obj, .gltf, or .glb)",
                entry.path
            );
        }
        if !path.exists() {
            anyhow::bail!("Mesh source not found: {:?}", path);
        }
    }
    Ok(())
}

/// Export every source of the manifest, in listed order, into one blob
pub fn build(
    manifest: &Manifest,
    base_dir: &Path,
    output_override: Option<&Path>,
) -> Result<ExportReport> {
    validate(manifest, base_dir)?;

    let output = match output_override {
        Some(path) => path.to_path_buf(),
        None => base_dir.join(&manifest.output.path),
    };

    let sources = manifest
        .sources
        .iter()
        .map(|entry| open_source(&base_dir.join(&entry.path), entry.options()))
        .collect::<crate::Result<Vec<_>>>()?;

    let meshes = load_sources(&sources).context("Failed to load mesh sources")?;

    tracing::info!("Exporting {} meshes -> {:?}", meshes.len(), output);
    let report = BlobExporter::new(manifest.options)
        .export_to_file(&meshes, &output)
        .with_context(|| format!("Failed to export {:?}", output))?;

    Ok(report)
}

/// Directory that relative manifest paths resolve against
pub fn manifest_dir(manifest_path: &Path) -> &Path {
    manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}
