//! Name index builder
//!
//! Accumulates the `str0` payload (mesh names back to back) and the `idx0`
//! entries mapping each name range to its vertex range, in export order.

use blob_common::IndexEntry;

use crate::error::{ExportError, Result};

/// Builds the strings and index chunk payloads
#[derive(Debug, Default)]
pub struct NameIndexBuilder {
    strings: Vec<u8>,
    entries: Vec<IndexEntry>,
    vertex_count: u32,
}

impl NameIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mesh that contributed `vertex_count` records right after
    /// the previous one.
    ///
    /// Names are not deduplicated; a repeated name gets its own entry.
    pub fn push(&mut self, name: &str, vertex_count: usize) -> Result<IndexEntry> {
        let name_begin = offset(self.strings.len(), "strings chunk")?;
        let name_end = offset(self.strings.len() + name.len(), "strings chunk")?;

        let vertex_begin = self.vertex_count;
        let vertex_end = offset(vertex_begin as usize + vertex_count, "vertex count")?;

        self.strings.extend_from_slice(name.as_bytes());
        self.vertex_count = vertex_end;

        let entry = IndexEntry::new(name_begin, name_end, vertex_begin, vertex_end);
        self.entries.push(entry);
        Ok(entry)
    }

    /// Total vertex records recorded so far
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn strings(&self) -> &[u8] {
        &self.strings
    }

    /// Split into the strings payload and the index entries
    pub fn into_parts(self) -> (Vec<u8>, Vec<IndexEntry>) {
        (self.strings, self.entries)
    }
}

/// Pack index entries into the `idx0` payload
pub fn index_payload(entries: &[IndexEntry]) -> Vec<u8> {
    let mut data = Vec::with_capacity(entries.len() * IndexEntry::SIZE);
    for entry in entries {
        data.extend_from_slice(&entry.to_bytes());
    }
    data
}

fn offset(value: usize, what: &'static str) -> Result<u32> {
    u32::try_from(value).map_err(|_| ExportError::TooLarge { what })
}
