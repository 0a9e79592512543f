//! Index entry format (`idx0` chunk payload)
//!
//! # Layout
//! ```text
//! 0x00: name_begin   u32  (byte offset into the str0 payload)
//! 0x04: name_end     u32
//! 0x08: vertex_begin u32  (record offset into the dat0 payload)
//! 0x0C: vertex_end   u32
//! ```
//!
//! Both ranges are half-open. Vertex offsets count records, not bytes.

/// Size of one index entry
pub const INDEX_ENTRY_SIZE: usize = 16;

/// One mesh in the blob index (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct IndexEntry {
    pub name_begin: u32,
    pub name_end: u32,
    pub vertex_begin: u32,
    pub vertex_end: u32,
}

impl IndexEntry {
    pub const SIZE: usize = INDEX_ENTRY_SIZE;

    pub fn new(name_begin: u32, name_end: u32, vertex_begin: u32, vertex_end: u32) -> Self {
        Self {
            name_begin,
            name_end,
            vertex_begin,
            vertex_end,
        }
    }

    /// Number of vertex records this mesh spans
    pub fn vertex_count(&self) -> u32 {
        self.vertex_end.saturating_sub(self.vertex_begin)
    }

    /// Number of triangles this mesh spans
    pub fn triangle_count(&self) -> u32 {
        self.vertex_count() / 3
    }

    /// Write entry to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.name_begin.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.name_end.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.vertex_begin.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.vertex_end.to_le_bytes());
        bytes
    }

    /// Read entry from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let word = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        Some(Self {
            name_begin: word(0),
            name_end: word(4),
            vertex_begin: word(8),
            vertex_end: word(12),
        })
    }
}
