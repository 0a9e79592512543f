//! Binary serialization trait for fixed-size format records.
//!
//! The chunk header and the index entry implement `BinarySerializable` for
//! use from generic code, while each type keeps its own `to_bytes()` method
//! returning a fixed-size array.

/// Trait for binary-serializable format records.
///
/// The trait uses `Vec<u8>` for the return type because associated const
/// generics in return types (`[u8; Self::SIZE]`) are not yet stable in Rust.
///
/// # Example
///
/// ```
/// use blob_common::formats::{BinarySerializable, IndexEntry};
///
/// let entry = IndexEntry::new(0, 3, 0, 3);
///
/// // Using the trait (returns Vec<u8>)
/// let bytes = entry.serialize();
/// let parsed = IndexEntry::deserialize(&bytes).unwrap();
/// assert_eq!(parsed, entry);
///
/// // Using the type-specific method (returns [u8; 16])
/// let bytes_array = entry.to_bytes();
/// assert_eq!(bytes_array.len(), 16);
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized record in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes.
    ///
    /// Returns `None` if the byte slice is too short.
    fn deserialize(bytes: &[u8]) -> Option<Self>;

    /// Deserialize every whole record from a packed slice.
    ///
    /// Trailing bytes shorter than one record are ignored.
    fn deserialize_all(bytes: &[u8]) -> Vec<Self> {
        bytes
            .chunks_exact(Self::SIZE)
            .filter_map(Self::deserialize)
            .collect()
    }
}

impl BinarySerializable for super::ChunkHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::IndexEntry {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}
