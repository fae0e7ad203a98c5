//! Geometry generators.
//!
//! Each file adds the `Batch` methods for one primitive family. Generators
//! only append geometry; the texture draws are the only ones that touch
//! render state (they set the batch texture first).

mod circle;
mod line;
mod quad;
mod rect;
mod texture;
mod wave;

pub use line::{dash_count, dash_spans};
pub use texture::flip_uvs;
