use core::ops::Range;

use crate::coords::{Color, RectI};
use crate::mesh::{GrowableMesh, VertexShape};

use super::resource::{Material, RenderTarget};

/// One indexed draw submitted to a backend.
///
/// The pass borrows the mesh; the backend decides whether it needs to upload
/// it by calling [`GrowableMesh::bind`].
#[derive(Debug)]
pub struct RenderPass<'a, V: VertexShape> {
    pub target: RenderTarget,
    /// `None` = whole target.
    pub viewport: Option<RectI>,
    /// `None` = no scissor test.
    pub scissor: Option<RectI>,
    pub mesh: &'a GrowableMesh<V>,
    pub material: Material,
    pub index_start: usize,
    pub index_count: usize,
    /// Clear the target to this color before drawing.
    pub clear_color: Option<Color>,
}

impl<'a, V: VertexShape> RenderPass<'a, V> {
    /// Pass drawing the whole mesh with `material`.
    pub fn new(target: RenderTarget, mesh: &'a GrowableMesh<V>, material: Material) -> Self {
        Self {
            target,
            viewport: None,
            scissor: None,
            mesh,
            material,
            index_start: 0,
            index_count: mesh.index_count(),
            clear_color: None,
        }
    }

    #[inline]
    pub fn index_range(&self) -> Range<usize> {
        self.index_start..self.index_start + self.index_count
    }

    /// The viewport, defaulting to the full target.
    #[inline]
    pub fn effective_viewport(&self) -> RectI {
        self.viewport
            .unwrap_or_else(|| RectI::from_size(self.target.width(), self.target.height()))
    }

    /// Indices this pass draws, or `None` if the range is outside the mesh.
    pub fn indices(&self) -> Option<&'a [u32]> {
        self.mesh.indices().get(self.index_range())
    }
}
