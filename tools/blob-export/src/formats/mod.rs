//! Blob container writer
//!
//! Re-exports the format definitions from blob-common for writing blob files.

pub use blob_common::formats::*;

use std::fmt;
use std::io::Write;

use crate::error::{ExportError, Result};

/// Bytes written per chunk, header included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlobSummary {
    /// `dat0` chunk size (8 + vertex record bytes)
    pub geometry_bytes: usize,
    /// `str0` chunk size (8 + name bytes)
    pub strings_bytes: usize,
    /// `idx0` chunk size (8 + 16 per mesh)
    pub index_bytes: usize,
}

impl BlobSummary {
    /// Total bytes written
    pub fn total(&self) -> usize {
        self.geometry_bytes + self.strings_bytes + self.index_bytes
    }
}

impl fmt::Display for BlobSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes [== {} bytes of data + {} bytes of strings + {} bytes of index]",
            self.total(),
            self.geometry_bytes,
            self.strings_bytes,
            self.index_bytes
        )
    }
}

/// Write a complete blob: geometry, strings and index chunks, in that order
pub fn write_blob<W: Write>(
    w: &mut W,
    geometry: &[u8],
    strings: &[u8],
    index: &[u8],
) -> Result<BlobSummary> {
    Ok(BlobSummary {
        geometry_bytes: write_chunk(w, ChunkKind::Geometry, geometry)?,
        strings_bytes: write_chunk(w, ChunkKind::Strings, strings)?,
        index_bytes: write_chunk(w, ChunkKind::Index, index)?,
    })
}

/// Write one tagged chunk and return its size including the header
pub fn write_chunk<W: Write>(w: &mut W, kind: ChunkKind, payload: &[u8]) -> Result<usize> {
    let length = u32::try_from(payload.len()).map_err(|_| ExportError::TooLarge {
        what: chunk_name(kind),
    })?;

    let header = ChunkHeader::new(kind, length);
    w.write_all(&header.to_bytes())?;
    w.write_all(payload)?;

    Ok(ChunkHeader::SIZE + payload.len())
}

fn chunk_name(kind: ChunkKind) -> &'static str {
    match kind {
        ChunkKind::Geometry => "geometry chunk",
        ChunkKind::Strings => "strings chunk",
        ChunkKind::Index => "index chunk",
    }
}
