use crate::coords::Color;
use crate::mesh::{VertexDescription, VertexShape};

use super::pass::RenderPass;
use super::registry::ResourceId;
use super::resource::{Material, RenderTarget, Surface, Texture};

/// Graphics API seam.
///
/// Implementations own the GPU objects behind every id they hand out. All
/// calls happen on the thread that owns the batcher, in submission order.
/// Failures are reported as `anyhow::Error`; the batcher forwards them
/// unchanged.
pub trait GraphicsBackend {
    /// Creates GPU storage for meshes laid out as `description`.
    fn create_mesh(&mut self, description: &VertexDescription) -> anyhow::Result<ResourceId>;

    /// Creates an empty RGBA texture.
    fn create_texture(&mut self, width: u32, height: u32) -> anyhow::Result<Texture>;

    /// Creates an off-screen target with its own texture attachment.
    fn create_surface(&mut self, width: u32, height: u32) -> anyhow::Result<Surface>;

    /// Material for the built-in batch shader (reads `u_matrix`/`u_texture`).
    fn create_default_material(&mut self) -> anyhow::Result<Material>;

    /// Draws `pass.index_range()` of `pass.mesh` into `pass.target`.
    fn present<V: VertexShape>(&mut self, pass: &RenderPass<'_, V>) -> anyhow::Result<()>;

    /// Fills `target` with `color`.
    fn clear(&mut self, target: &RenderTarget, color: Color) -> anyhow::Result<()>;

    /// The backbuffer at its current size.
    fn screen(&self) -> RenderTarget;
}
