//! CPU-side geometry storage.
//!
//! Responsibilities:
//! - describe vertex layouts in a backend-neutral way (`description`)
//! - define the batcher's vertex and its blend encoding (`vertex`)
//! - accumulate vertices/indices with amortized growth (`growable`)

mod description;
mod growable;
mod vertex;

pub use description::{VertexAttribute, VertexAttributeType, VertexDescription};
pub use growable::{GrowableMesh, MeshData};
pub use vertex::{BlendMode, Vertex, VertexShape};
