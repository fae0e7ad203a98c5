//! Coordinate and value types shared by the mesh, batcher and backends.
//!
//! Canonical CPU space:
//! - target pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! Vectors and affine transforms come from `glam`; this module only adds the
//! small types and helpers the batcher needs on top of it.

mod color;
mod rect;
mod rect_i;
mod transform;

pub use color::Color;
pub use rect::Rect;
pub use rect_i::RectI;
pub use transform::{affine_to_mat4, orthographic, transform_matrix, turn_left, Transform2};

pub use glam::{Affine2, Mat4, Vec2};
