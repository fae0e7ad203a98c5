use core::ops::Range;

use glam::Affine2;

use crate::render::{Material, RenderTarget, Texture};

/// A run of indices sharing one render state.
///
/// Items are views into the batcher's mesh; they own no geometry. Positions
/// are transformed on the CPU when appended; `matrix` is the view set with
/// `Batch::set_view`, applied on top of them by the GPU at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub matrix: Affine2,
    /// `None` = the batcher's default material.
    pub material: Option<Material>,
    pub texture: Option<Texture>,
    pub target: RenderTarget,
    pub index_start: usize,
    pub index_count: usize,
}

impl BatchItem {
    /// Empty item at `index_start` with no material or texture.
    #[inline]
    pub fn new(target: RenderTarget, index_start: usize) -> Self {
        Self {
            matrix: Affine2::IDENTITY,
            material: None,
            texture: None,
            target,
            index_start,
            index_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index_count == 0
    }

    #[inline]
    pub fn index_end(&self) -> usize {
        self.index_start + self.index_count
    }

    #[inline]
    pub fn index_range(&self) -> Range<usize> {
        self.index_start..self.index_end()
    }

    /// The item that continues this one: same state, starting where this one ends.
    #[inline]
    pub(crate) fn successor(&self) -> Self {
        Self {
            index_start: self.index_end(),
            index_count: 0,
            ..self.clone()
        }
    }
}
