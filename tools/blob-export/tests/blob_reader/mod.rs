//! Chunk walker for verifying written blobs.

#![allow(dead_code)]

use blob_common::formats::{BinarySerializable, ChunkHeader, ChunkKind, IndexEntry};

/// A blob split back into its three chunk payloads
pub struct ParsedBlob {
    pub geometry: Vec<u8>,
    pub strings: Vec<u8>,
    pub index: Vec<IndexEntry>,
}

impl ParsedBlob {
    /// Name of the mesh described by `entry`
    pub fn name(&self, entry: &IndexEntry) -> &str {
        std::str::from_utf8(&self.strings[entry.name_begin as usize..entry.name_end as usize])
            .expect("Mesh name should be UTF-8")
    }

    pub fn names(&self) -> Vec<&str> {
        self.index.iter().map(|e| self.name(e)).collect()
    }

    /// Vertex records of one mesh
    pub fn records(&self, entry: &IndexEntry, record_size: usize) -> &[u8] {
        &self.geometry
            [entry.vertex_begin as usize * record_size..entry.vertex_end as usize * record_size]
    }
}

/// Parse a blob, asserting chunk order and that no bytes trail the index
pub fn parse_blob(data: &[u8]) -> ParsedBlob {
    let mut offset = 0;
    let mut payloads = Vec::new();

    for expected in ChunkKind::ALL {
        let header =
            ChunkHeader::from_bytes(&data[offset..]).expect("Blob should hold a chunk header");
        assert_eq!(header.kind(), Some(expected), "Chunks out of order");
        offset += ChunkHeader::SIZE;

        let end = offset + header.length as usize;
        assert!(end <= data.len(), "Chunk {:?} runs past end of file", expected);
        payloads.push(data[offset..end].to_vec());
        offset = end;
    }
    assert_eq!(offset, data.len(), "Trailing bytes after index chunk");

    let index_bytes = payloads.pop().unwrap();
    assert_eq!(index_bytes.len() % IndexEntry::SIZE, 0);
    let strings = payloads.pop().unwrap();
    let geometry = payloads.pop().unwrap();

    ParsedBlob {
        geometry,
        strings,
        index: IndexEntry::deserialize_all(&index_bytes),
    }
}

/// Read one little-endian f32 at `at`
pub fn f32_at(data: &[u8], at: usize) -> f32 {
    f32::from_le_bytes(data[at..at + 4].try_into().unwrap())
}

/// The RGBA color of record `record`
pub fn color_at(geometry: &[u8], record_size: usize, record: usize) -> [u8; 4] {
    let at = record * record_size + 24;
    geometry[at..at + 4].try_into().unwrap()
}

/// Assert the index ranges are contiguous and cover every record
pub fn assert_partition(blob: &ParsedBlob, record_size: usize) {
    let mut next = 0;
    for entry in &blob.index {
        assert_eq!(entry.vertex_begin, next, "Index ranges must be contiguous");
        assert!(entry.vertex_end >= entry.vertex_begin);
        assert_eq!(entry.vertex_count() % 3, 0);
        next = entry.vertex_end;
    }
    assert_eq!(next as usize * record_size, blob.geometry.len());
}
