//! Triangulation gate
//!
//! Sources triangulate; this only checks the result. Any polygon that is not
//! a triangle, or any corner that points outside the mesh, stops the export.

use super::types::SourceMesh;
use crate::error::{ExportError, Result};

/// Corner indices of one triangle, in source winding order
pub type Triangle = [u32; 3];

/// Validate that every polygon of `mesh` is a triangle and return the
/// triangles as corner index triples.
pub fn triangles(mesh: &SourceMesh) -> Result<Vec<Triangle>> {
    let mut triangles = Vec::with_capacity(mesh.polygons.len());

    for (polygon_idx, polygon) in mesh.polygons.iter().enumerate() {
        let &[a, b, c] = polygon.corners.as_slice() else {
            return Err(ExportError::NonTriangularFace {
                mesh: mesh.name.clone(),
                polygon: polygon_idx,
                corners: polygon.len(),
            });
        };

        for corner_idx in [a, b, c] {
            check_corner(mesh, polygon_idx, corner_idx)?;
        }

        triangles.push([a, b, c]);
    }

    Ok(triangles)
}

fn check_corner(mesh: &SourceMesh, polygon_idx: usize, corner_idx: u32) -> Result<()> {
    let corner = mesh
        .corners
        .get(corner_idx as usize)
        .ok_or_else(|| ExportError::CornerOutOfRange {
            mesh: mesh.name.clone(),
            polygon: polygon_idx,
            corner: corner_idx,
            corner_count: mesh.corners.len(),
        })?;

    if corner.vertex as usize >= mesh.positions.len() {
        return Err(ExportError::VertexOutOfRange {
            mesh: mesh.name.clone(),
            corner: corner_idx,
            vertex: corner.vertex,
            vertex_count: mesh.positions.len(),
        });
    }

    Ok(())
}
