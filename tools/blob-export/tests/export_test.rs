//! Library-level export tests
//!
//! Builds meshes in memory, exports them and walks the resulting chunks.

mod blob_reader;

use blob_export::{
    BlobExporter, ColorLayer, ColorLookup, ExportConfig, ExportError, ExportWarning, IndexEntry,
    Polygon, SourceMesh,
};
use blob_reader::{assert_partition, color_at, f32_at, parse_blob};
use tempfile::tempdir;

const RED: [f32; 3] = [1.0, 0.0, 0.0];

/// `triangles` separate triangles, every corner colored `color`
fn mesh(name: &str, triangles: usize, color: [f32; 3]) -> SourceMesh {
    let mut mesh = SourceMesh::new(name);
    for t in 0..triangles {
        let x = t as f32;
        for p in [[x, 0.0, 0.0], [x + 1.0, 0.0, 0.0], [x, 1.0, 0.0]] {
            let v = mesh.push_vertex(p);
            mesh.push_corner(v, [0.0, 0.0, 1.0]);
        }
        let base = (t * 3) as u32;
        mesh.push_polygon(Polygon::triangle(base, base + 1, base + 2));
    }
    mesh.with_colors(ColorLayer::per_corner(vec![color; triangles * 3]))
}

#[test]
fn test_single_red_triangle() {
    let blob = BlobExporter::default()
        .export(&[mesh("Tri", 1, RED)])
        .unwrap();
    let data = blob.to_bytes().unwrap();
    let parsed = parse_blob(&data);

    assert_eq!(parsed.geometry.len(), 84);
    for record in 0..3 {
        assert_eq!(color_at(&parsed.geometry, 28, record), [255, 0, 0, 255]);
    }
    assert_eq!(parsed.strings, b"Tri");
    assert_eq!(parsed.index, vec![IndexEntry::new(0, 3, 0, 3)]);

    // dat0 + 84, str0 + 3, idx0 + 16
    assert_eq!(data.len(), 8 + 84 + 8 + 3 + 8 + 16);
}

#[test]
fn test_two_meshes_in_order() {
    let blob = BlobExporter::default()
        .export(&[mesh("Hull", 2, RED), mesh("Fin", 1, [0.0, 0.0, 1.0])])
        .unwrap();
    let parsed = parse_blob(&blob.to_bytes().unwrap());

    assert_eq!(parsed.names(), ["Hull", "Fin"]);
    assert_eq!(parsed.index[0].vertex_begin, 0);
    assert_eq!(parsed.index[0].vertex_end, 6);
    assert_eq!(parsed.index[1].vertex_begin, 6);
    assert_eq!(parsed.index[1].vertex_end, 9);
    assert_eq!(blob.vertex_count, 9);
    assert_partition(&parsed, 28);

    let fin = parsed.records(&parsed.index[1], 28);
    assert_eq!(color_at(fin, 28, 0), [0, 0, 255, 255]);
}

#[test]
fn test_positions_and_normals_written_per_corner() {
    let blob = BlobExporter::default()
        .export(&[mesh("A", 1, RED), mesh("B", 2, RED)])
        .unwrap();
    let parsed = parse_blob(&blob.to_bytes().unwrap());

    // B's second triangle starts at x = 1.0
    let b = parsed.records(&parsed.index[1], 28);
    assert_eq!(f32_at(b, 3 * 28), 1.0);
    assert_eq!(f32_at(b, 4 * 28), 2.0);
    assert_eq!(f32_at(b, 3 * 28 + 20), 1.0);
}

#[test]
fn test_many_meshes_partition_vertex_range() {
    let meshes: Vec<_> = (0..32)
        .map(|i| mesh(&format!("Mesh{i}"), i % 4, RED))
        .collect();
    let blob = BlobExporter::default().export(&meshes).unwrap();
    let parsed = parse_blob(&blob.to_bytes().unwrap());

    assert_eq!(parsed.index.len(), 32);
    assert_partition(&parsed, 28);
    for (i, entry) in parsed.index.iter().enumerate() {
        assert_eq!(parsed.name(entry), format!("Mesh{i}"));
    }
}

#[test]
fn test_export_is_deterministic() {
    let meshes: Vec<_> = (0..16).map(|i| mesh(&format!("M{i}"), 3, RED)).collect();
    let exporter = BlobExporter::new(ExportConfig::default().with_texcoords(true));

    let first = exporter.export(&meshes).unwrap().to_bytes().unwrap();
    let second = exporter.export(&meshes).unwrap().to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_texcoords_warn_and_zero() {
    let config = ExportConfig::default().with_texcoords(true);
    let blob = BlobExporter::new(config)
        .export(&[mesh("NoUv", 1, RED)])
        .unwrap();
    let parsed = parse_blob(&blob.to_bytes().unwrap());

    assert_eq!(parsed.geometry.len(), 3 * 36);
    for record in parsed.geometry.chunks_exact(36) {
        assert_eq!(f32_at(record, 28), 0.0);
        assert_eq!(f32_at(record, 32), 0.0);
    }
    assert_eq!(
        blob.warnings,
        vec![ExportWarning::MissingTexcoords {
            mesh: "NoUv".to_string()
        }]
    );
}

#[test]
fn test_color_lookup_modes_differ_on_seams() {
    // Quad split along vertices 1-2; the two triangles carry different
    // corner colors on the shared vertices
    let mut quad = SourceMesh::new("Seam");
    for p in [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ] {
        quad.push_vertex(p);
    }
    for v in [0, 1, 2, 2, 1, 3] {
        quad.push_corner(v, [0.0, 0.0, 1.0]);
    }
    quad.push_polygon(Polygon::triangle(0, 1, 2));
    quad.push_polygon(Polygon::triangle(3, 4, 5));
    let green = [0.0, 1.0, 0.0];
    let quad = quad.with_colors(ColorLayer::per_corner(vec![
        RED, RED, RED, green, green, green,
    ]));

    let corner = BlobExporter::default().export(&[quad.clone()]).unwrap();
    let legacy = BlobExporter::new(
        ExportConfig::default().with_color_lookup(ColorLookup::VertexIndex),
    )
    .export(&[quad])
    .unwrap();

    assert_ne!(corner.geometry, legacy.geometry);
    assert_eq!(color_at(&corner.geometry, 28, 4), [0, 255, 0, 255]);
    assert_eq!(color_at(&legacy.geometry, 28, 4), [255, 0, 0, 255]);
}

#[test]
fn test_export_to_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("meshes.blob");

    let report = BlobExporter::default()
        .export_to_file(&[mesh("Tri", 1, RED)], &path)
        .unwrap();

    let data = std::fs::read(&path).expect("Blob should exist");
    assert_eq!(report.summary.total(), data.len());
    assert_eq!(report.mesh_count, 1);
    assert_eq!(report.vertex_count, 3);
    assert!(!dir.path().join("nested").join("meshes.blob.tmp").exists());
}

#[test]
fn test_failed_export_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.blob");

    let mut quad = mesh("Quad", 1, RED);
    let v = quad.push_vertex([1.0, 1.0, 0.0]);
    quad.push_corner(v, [0.0, 0.0, 1.0]);
    quad.polygons.clear();
    quad.push_polygon(Polygon::new([0, 1, 3, 2]));

    let err = BlobExporter::default()
        .export_to_file(&[mesh("Good", 1, RED), quad], &path)
        .unwrap_err();

    assert!(matches!(
        err,
        ExportError::NonTriangularFace { corners: 4, .. }
    ));
    assert!(err.to_string().contains("Quad"));
    assert!(!path.exists());
}

#[test]
fn test_failed_export_keeps_previous_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("meshes.blob");
    std::fs::write(&path, b"previous").unwrap();

    let mut plain = mesh("Plain", 1, RED);
    plain.colors = None;
    let err = BlobExporter::default()
        .export_to_file(&[plain], &path)
        .unwrap_err();

    assert!(matches!(err, ExportError::MissingColorLayer { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), b"previous");
}
