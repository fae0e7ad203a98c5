//! Handles to backend-owned resources.
//!
//! These are plain values: the backend owns the GPU objects and the batcher
//! only carries ids plus the little metadata it needs (sizes, flip flags,
//! uniform values). Equality is identity, i.e. the resource id.

use std::collections::BTreeMap;

use glam::{Mat4, Vec2};

use crate::coords::Color;

use super::registry::ResourceId;

/// Uniform receiving `projection * view` for each batch.
pub const U_MATRIX: &str = "u_matrix";
/// Uniform receiving the batch texture.
pub const U_TEXTURE: &str = "u_texture";

/// A sampled image.
#[derive(Debug, Copy, Clone)]
pub struct Texture {
    pub id: ResourceId,
    pub width: u32,
    pub height: u32,
    /// Mirror texture coordinates horizontally when drawn.
    pub flip_x: bool,
    /// Mirror texture coordinates vertically when drawn.
    pub flip_y: bool,
}

impl Texture {
    #[inline]
    pub const fn new(id: ResourceId, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            flip_x: false,
            flip_y: false,
        }
    }

    #[inline]
    pub const fn with_flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Texture {}

/// Off-screen render target backed by a texture.
#[derive(Debug, Copy, Clone)]
pub struct Surface {
    pub id: ResourceId,
    /// Color attachment; sample it to draw the surface's contents.
    pub attachment: Texture,
}

impl Surface {
    #[inline]
    pub const fn new(id: ResourceId, attachment: Texture) -> Self {
        Self { id, attachment }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.attachment.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.attachment.height
    }
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Surface {}

impl From<Surface> for Texture {
    #[inline]
    fn from(surface: Surface) -> Self {
        surface.attachment
    }
}

/// Where a batch is drawn.
#[derive(Debug, Copy, Clone)]
pub enum RenderTarget {
    /// The backbuffer. All `Screen` values are the same target; the size is
    /// whatever the backend last reported.
    Screen { width: u32, height: u32 },
    Surface(Surface),
}

impl RenderTarget {
    #[inline]
    pub const fn screen(width: u32, height: u32) -> Self {
        RenderTarget::Screen { width, height }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        match self {
            RenderTarget::Screen { width, .. } => *width,
            RenderTarget::Surface(s) => s.width(),
        }
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        match self {
            RenderTarget::Screen { height, .. } => *height,
            RenderTarget::Surface(s) => s.height(),
        }
    }

    #[inline]
    pub const fn is_screen(&self) -> bool {
        matches!(self, RenderTarget::Screen { .. })
    }

    /// Identity comparison: screen equals screen, surfaces compare by id.
    pub fn same_as(&self, other: &RenderTarget) -> bool {
        match (self, other) {
            (RenderTarget::Screen { .. }, RenderTarget::Screen { .. }) => true,
            (RenderTarget::Surface(a), RenderTarget::Surface(b)) => a.id == b.id,
            _ => false,
        }
    }
}

impl PartialEq for RenderTarget {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for RenderTarget {}

impl From<Surface> for RenderTarget {
    #[inline]
    fn from(surface: Surface) -> Self {
        RenderTarget::Surface(surface)
    }
}

/// Value stored in a material uniform slot.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Color(Color),
    Matrix(Mat4),
    Texture(Option<Texture>),
}

/// A shader plus its uniform values.
#[derive(Debug, Clone)]
pub struct Material {
    pub id: ResourceId,
    pub shader: ResourceId,
    uniforms: BTreeMap<String, UniformValue>,
}

impl Material {
    #[inline]
    pub fn new(id: ResourceId, shader: ResourceId) -> Self {
        Self {
            id,
            shader,
            uniforms: BTreeMap::new(),
        }
    }

    /// Sets or replaces a uniform.
    pub fn set_uniform(&mut self, name: &str, value: UniformValue) {
        match self.uniforms.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.uniforms.insert(name.to_owned(), value);
            }
        }
    }

    #[inline]
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    /// Uniforms sorted by name.
    pub fn uniforms(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.uniforms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `u_matrix`, if set to a matrix.
    pub fn matrix(&self) -> Option<Mat4> {
        match self.uniform(U_MATRIX) {
            Some(UniformValue::Matrix(m)) => Some(*m),
            _ => None,
        }
    }

    /// `u_texture`; `None` when unset or explicitly empty.
    pub fn texture(&self) -> Option<Texture> {
        match self.uniform(U_TEXTURE) {
            Some(UniformValue::Texture(t)) => *t,
            _ => None,
        }
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Material {}
