//! Mesh sources and vertex record encoding (glTF/OBJ -> vertex records)

mod gltf;
pub mod normalize;
mod obj;
mod packing;
mod source;
mod types;

// Re-export public API
pub use self::gltf::GltfSource;
pub use obj::{parse_obj, ObjError, ObjSource};
pub use packing::{encode_mesh, EncodedMesh};
pub use source::{open_source, MemorySource, MeshSource, SourceKind, SourceOptions};
pub use types::{ColorDomain, ColorLayer, Corner, CornerList, Polygon, SourceMesh};
