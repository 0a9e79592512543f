//! Vertex record packing utilities
//!
//! Every triangle corner becomes one fixed-size record:
//!
//! ```text
//! 0x00: position  f32 × 3 (LE)
//! 0x0C: normal    f32 × 3 (LE)
//! 0x18: color     u8 × 4  (r, g, b, 255)
//! 0x1C: texcoord  f32 × 2 (LE), only when texcoords are enabled
//! ```
//!
//! The record size is fixed for a whole blob: 28 bytes, or 36 with texcoords.

// ============================================================================
// Record Layout Constants
// ============================================================================

/// Position: Float32x3
pub const POSITION_SIZE: usize = 12;
/// Normal: Float32x3
pub const NORMAL_SIZE: usize = 12;
/// Color: Unorm8x4
pub const COLOR_SIZE: usize = 4;
/// Texcoord: Float32x2
pub const TEXCOORD_SIZE: usize = 8;

/// Calculate the record size in bytes for one triangle corner
#[inline]
pub const fn record_size(texcoords: bool) -> usize {
    let mut size = POSITION_SIZE + NORMAL_SIZE + COLOR_SIZE;

    if texcoords {
        size += TEXCOORD_SIZE;
    }

    size
}

// ============================================================================
// Basic Conversion Functions
// ============================================================================

/// Convert f32 to unsigned normalized 8-bit integer (unorm8)
///
/// Maps f32 range [0.0, 1.0] to u8 range [0, 255] by truncation,
/// so `0.999` becomes 254 rather than 255. NaN maps to 0.
#[inline]
pub fn f32_to_unorm8(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 255.0) as u8
}

// ============================================================================
// Attribute Packing
// ============================================================================

/// Pack a 3-component vector (position or normal) to little-endian Float32x3
#[inline]
pub fn pack_vec3_f32(v: [f32; 3]) -> [u8; 12] {
    let mut bytes = [0u8; 12];
    bytes[0..4].copy_from_slice(&v[0].to_le_bytes());
    bytes[4..8].copy_from_slice(&v[1].to_le_bytes());
    bytes[8..12].copy_from_slice(&v[2].to_le_bytes());
    bytes
}

/// Pack a texture coordinate to little-endian Float32x2
#[inline]
pub fn pack_texcoord_f32(uv: [f32; 2]) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    bytes[0..4].copy_from_slice(&uv[0].to_le_bytes());
    bytes[4..8].copy_from_slice(&uv[1].to_le_bytes());
    bytes
}

/// Pack an RGB color (f32x3) to Unorm8x4 format (with alpha=255)
#[inline]
pub fn pack_color_unorm8(rgb: [f32; 3]) -> [u8; 4] {
    [
        f32_to_unorm8(rgb[0]),
        f32_to_unorm8(rgb[1]),
        f32_to_unorm8(rgb[2]),
        255,
    ]
}
