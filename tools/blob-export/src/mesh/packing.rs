//! Vertex record packing
//!
//! Record layout (in order): Position → Normal → Color → Texcoord
//! - Position and normal are Float32x3, little-endian
//! - Color is Unorm8x4 with alpha forced to 255
//! - Texcoord (Float32x2) is only present when the export enables it

use super::normalize::{self, Triangle};
use super::types::{ColorDomain, ColorLayer, SourceMesh};
use crate::config::{ColorLookup, ExportConfig};
use crate::error::{ExportError, ExportWarning, Result};
use blob_common::{pack_color_unorm8, pack_texcoord_f32, pack_vec3_f32};

/// One mesh packed into vertex records
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedMesh {
    /// Mesh name, as supplied by the source
    pub name: String,
    /// Number of records in `vertex_data` (three per triangle)
    pub vertex_count: usize,
    /// Packed vertex records
    pub vertex_data: Vec<u8>,
    /// Non-fatal conditions hit while packing
    pub warnings: Vec<ExportWarning>,
}

/// Validate and pack every triangle corner of `mesh` into vertex records
pub fn encode_mesh(mesh: &SourceMesh, config: &ExportConfig) -> Result<EncodedMesh> {
    let triangles = normalize::triangles(mesh)?;

    let colors = mesh
        .colors
        .as_ref()
        .ok_or_else(|| ExportError::MissingColorLayer {
            mesh: mesh.name.clone(),
        })?;

    let mut warnings = Vec::new();
    let uvs = if config.texcoords {
        match mesh.uvs.as_deref() {
            Some(uvs) if uvs.len() >= mesh.corners.len() => Some(uvs),
            Some(uvs) => {
                return Err(ExportError::TexcoordLayerMismatch {
                    mesh: mesh.name.clone(),
                    len: uvs.len(),
                    corner_count: mesh.corners.len(),
                });
            }
            None => {
                let warning = ExportWarning::MissingTexcoords {
                    mesh: mesh.name.clone(),
                };
                tracing::warn!("{}", warning);
                warnings.push(warning);
                None
            }
        }
    } else {
        None
    };

    let vertex_data = pack_triangles(mesh, &triangles, colors, uvs, config)?;

    Ok(EncodedMesh {
        name: mesh.name.clone(),
        vertex_count: triangles.len() * 3,
        vertex_data,
        warnings,
    })
}

fn pack_triangles(
    mesh: &SourceMesh,
    triangles: &[Triangle],
    colors: &ColorLayer,
    uvs: Option<&[[f32; 2]]>,
    config: &ExportConfig,
) -> Result<Vec<u8>> {
    let stride = config.record_size();
    let mut data = Vec::with_capacity(triangles.len() * 3 * stride);

    for triangle in triangles {
        for &corner_idx in triangle {
            // Indices were checked by the triangulation gate
            let corner = mesh.corners[corner_idx as usize];

            // Position (f32x3) - 12 bytes
            data.extend_from_slice(&pack_vec3_f32(mesh.positions[corner.vertex as usize]));

            // Normal (f32x3) - 12 bytes
            data.extend_from_slice(&pack_vec3_f32(corner.normal));

            // Color (unorm8x4) - 4 bytes
            let color_idx =
                color_index(colors.domain, config.color_lookup, corner_idx, corner.vertex);
            let rgb = colors.values.get(color_idx as usize).ok_or_else(|| {
                ExportError::ColorIndexOutOfRange {
                    mesh: mesh.name.clone(),
                    index: color_idx,
                    len: colors.values.len(),
                }
            })?;
            data.extend_from_slice(&pack_color_unorm8(*rgb));

            // Texcoord (f32x2) - 8 bytes
            if config.texcoords {
                let uv = uvs.map(|u| u[corner_idx as usize]).unwrap_or([0.0, 0.0]);
                data.extend_from_slice(&pack_texcoord_f32(uv));
            }
        }
    }

    Ok(data)
}

/// Pick the color layer entry for a corner
fn color_index(domain: ColorDomain, lookup: ColorLookup, corner: u32, vertex: u32) -> u32 {
    match (domain, lookup) {
        (ColorDomain::Corner, ColorLookup::Corner) => corner,
        (ColorDomain::Corner, ColorLookup::VertexIndex) | (ColorDomain::Vertex, _) => vertex,
    }
}
