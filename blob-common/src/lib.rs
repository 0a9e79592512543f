//! Shared types and utilities for the mesh blob container
//!
//! This crate provides the format definitions shared between:
//! - `blob-export` (asset pipeline)
//! - integration tests that walk exported blobs
//!
//! # Modules
//!
//! - [`packing`] - Vertex record layout and attribute packing (f32 LE, unorm8 color)
//! - [`formats`] - Chunk header, chunk tags and index entry layout

pub mod formats;
pub mod packing;

// Re-export commonly used packing items
pub use packing::{
    COLOR_SIZE, NORMAL_SIZE, POSITION_SIZE, TEXCOORD_SIZE, f32_to_unorm8, pack_color_unorm8,
    pack_texcoord_f32, pack_vec3_f32, record_size,
};

// Re-export commonly used format items
pub use formats::{
    BLOB_EXT, BinarySerializable, CHUNK_HEADER_SIZE, ChunkHeader, ChunkKind, INDEX_ENTRY_SIZE,
    IndexEntry,
};
