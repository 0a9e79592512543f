//! blob-export - mesh blob export tool
//!
//! Converts glTF/GLB/OBJ meshes into a single chunked blob
//! (.blob: vertex records, mesh names, name/vertex index)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use blob_export::{
    load_sources, manifest, open_source, BlobExporter, ColorLookup, ExportConfig, ExportReport,
    SourceOptions, BLOB_EXT,
};

#[derive(Parser)]
#[command(name = "blob-export")]
#[command(about = "Mesh blob export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export mesh files into one blob
    Export {
        /// Input mesh files (glTF/GLB/OBJ), exported in the given order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output .blob file (default: first input with .blob extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append a texture coordinate to every vertex record
        #[arg(long)]
        texcoords: bool,

        /// How per-corner color layers are indexed
        #[arg(long, value_enum, default_value_t = ColorLookup::Corner)]
        color_lookup: ColorLookup,

        /// Keep polygons as authored instead of fan-triangulating them
        #[arg(long)]
        no_triangulate: bool,
    },

    /// Build a blob from a manifest file
    Build {
        /// Path to blob.toml manifest
        #[arg(default_value = "blob.toml")]
        manifest: PathBuf,

        /// Output .blob file (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to blob.toml manifest
        #[arg(default_value = "blob.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            inputs,
            output,
            texcoords,
            color_lookup,
            no_triangulate,
        } => {
            let output = output.unwrap_or_else(|| inputs[0].with_extension(BLOB_EXT));
            tracing::info!("Converting {:?} -> {:?}", inputs, output);

            let options = SourceOptions {
                triangulate: !no_triangulate,
            };
            let sources = inputs
                .iter()
                .map(|input| open_source(input, options))
                .collect::<blob_export::Result<Vec<_>>>()?;
            let meshes = load_sources(&sources).context("Failed to load mesh sources")?;

            let config = ExportConfig::default()
                .with_texcoords(texcoords)
                .with_color_lookup(color_lookup);
            let report = BlobExporter::new(config)
                .export_to_file(&meshes, &output)
                .with_context(|| format!("Failed to export {:?}", output))?;
            log_report(&report);
            tracing::info!("Done!");
        }

        Commands::Build {
            manifest: manifest_path,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building blob from {:?}", manifest_path);
            }
            let config = manifest::load_manifest(&manifest_path)?;
            let base_dir = manifest::manifest_dir(&manifest_path);
            let report = manifest::build(&config, base_dir, output.as_deref())?;
            if verbose {
                log_report(&report);
            }
            tracing::info!("Build complete!");
        }

        Commands::Check {
            manifest: manifest_path,
        } => {
            tracing::info!("Checking manifest {:?}", manifest_path);
            let config = manifest::load_manifest(&manifest_path)?;
            manifest::validate(&config, manifest::manifest_dir(&manifest_path))?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}

fn log_report(report: &ExportReport) {
    tracing::info!(
        "{:?}: {} meshes, {} vertices",
        report.path,
        report.mesh_count,
        report.vertex_count
    );
    if !report.warnings.is_empty() {
        tracing::info!("{} warnings", report.warnings.len());
    }
}
