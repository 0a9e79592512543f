//! Chunk container format (.blob)
//!
//! A blob is a sequence of tagged, length-prefixed chunks. POD format,
//! no file-level magic bytes; readers recognize chunks by tag.
//!
//! # Layout
//! ```text
//! 0x00: tag     [u8; 4] (ASCII, e.g. "dat0")
//! 0x04: length  u32     (payload bytes, excluding this 8-byte header)
//! 0x08: payload (length bytes)
//! ```
//!
//! The exporter always writes exactly three chunks, in this order:
//! `dat0` (vertex records), `str0` (mesh names), `idx0` (index entries).

/// Size of a chunk header (tag + length)
pub const CHUNK_HEADER_SIZE: usize = 8;

/// The kinds of chunk a blob carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    /// Concatenated vertex records for every mesh
    Geometry,
    /// Concatenated UTF-8 mesh names, no delimiters
    Strings,
    /// Concatenated 16-byte index entries
    Index,
}

impl ChunkKind {
    /// All chunk kinds in the order the exporter writes them
    pub const ALL: [ChunkKind; 3] = [ChunkKind::Geometry, ChunkKind::Strings, ChunkKind::Index];

    /// The four-byte tag identifying this chunk kind
    pub const fn tag(self) -> [u8; 4] {
        match self {
            ChunkKind::Geometry => *b"dat0",
            ChunkKind::Strings => *b"str0",
            ChunkKind::Index => *b"idx0",
        }
    }

    /// Look up the chunk kind for a tag
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// Chunk header (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ChunkHeader {
    pub tag: [u8; 4],
    pub length: u32,
}

impl ChunkHeader {
    pub const SIZE: usize = CHUNK_HEADER_SIZE;

    pub fn new(kind: ChunkKind, length: u32) -> Self {
        Self {
            tag: kind.tag(),
            length,
        }
    }

    /// Chunk kind, if the tag is one this format defines
    pub fn kind(&self) -> Option<ChunkKind> {
        ChunkKind::from_tag(self.tag)
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.tag);
        bytes[4..8].copy_from_slice(&self.length.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            tag: [bytes[0], bytes[1], bytes[2], bytes[3]],
            length: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}
