//! Mesh blob binary formats
//!
//! POD formats for the chunked mesh container. All multi-byte values are
//! little-endian.
//!
//! All fixed-size records implement the [`BinarySerializable`] trait for
//! consistent serialization/deserialization.

pub mod chunk;
pub mod index;
mod serialization;

pub use chunk::*;
pub use index::*;
pub use serialization::BinarySerializable;

/// Blob file extension without dot
pub const BLOB_EXT: &str = "blob";
