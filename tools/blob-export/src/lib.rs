//! blob-export library
//!
//! Exports triangulated, vertex-colored meshes into a single chunked blob
//! (`dat0` vertex records, `str0` mesh names, `idx0` name/vertex ranges).

pub mod config;
pub mod error;
pub mod export;
pub mod formats;
pub mod index;
pub mod manifest;
pub mod mesh;

// Re-export record packing and container format from blob-common
pub use blob_common::{
    record_size, ChunkHeader, ChunkKind, IndexEntry, BLOB_EXT, CHUNK_HEADER_SIZE,
    INDEX_ENTRY_SIZE,
};

pub use config::{ColorLookup, ExportConfig};
pub use error::{ExportError, ExportWarning, Result};
pub use export::{load_sources, BlobExporter, ExportReport, ExportedBlob};
pub use formats::{write_blob, BlobSummary};
pub use index::NameIndexBuilder;

// Re-export key types for mesh sources
pub use mesh::{
    encode_mesh, open_source, ColorLayer, GltfSource, MemorySource, MeshSource, ObjSource,
    Polygon, SourceMesh, SourceOptions,
};
