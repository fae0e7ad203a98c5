use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::coords::Color;

use super::description::{VertexAttribute, VertexAttributeType, VertexDescription};

/// Implemented by every vertex type a [`GrowableMesh`](super::GrowableMesh) can hold.
///
/// The description must match the `#[repr(C)]` layout of the type byte for byte;
/// backends upload the mesh slices as raw bytes.
pub trait VertexShape: Pod {
    const DESCRIPTION: VertexDescription;
}

/// How a vertex's color combines with the bound texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    /// Texture sample multiplied by the vertex color.
    Texture,
    /// Texture alpha only, tinted with the vertex color.
    WashedTexture,
    /// Vertex color only; the texture is ignored.
    #[default]
    Fill,
}

impl BlendMode {
    /// Texture draws pick between the two textured modes with a flag.
    #[inline]
    pub fn textured(washed: bool) -> Self {
        if washed { BlendMode::WashedTexture } else { BlendMode::Texture }
    }

    /// Byte encoding consumed by the default shader: `[mult, wash, fill, pad]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        match self {
            BlendMode::Texture => [255, 0, 0, 0],
            BlendMode::WashedTexture => [0, 255, 0, 0],
            BlendMode::Fill => [0, 0, 255, 0],
        }
    }
}

/// Vertex emitted by the batcher.
///
/// Layout (24 bytes): position, texture coordinate, RGBA8 color, blend bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
    pub color: [u8; 4],
    pub mode: [u8; 4],
}

const VERTEX_ATTRIBUTES: &[VertexAttribute] = &[
    VertexAttribute::new("in_position", VertexAttributeType::Float, 2, false),
    VertexAttribute::new("in_tex_coord", VertexAttributeType::Float, 2, false),
    VertexAttribute::new("in_color", VertexAttributeType::Byte, 4, true),
    VertexAttribute::new("in_type", VertexAttributeType::Byte, 4, true),
];

impl VertexShape for Vertex {
    const DESCRIPTION: VertexDescription = VertexDescription::new(VERTEX_ATTRIBUTES);
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec2, tex_coord: Vec2, color: Color, mode: BlendMode) -> Self {
        Self {
            position: position.to_array(),
            tex_coord: tex_coord.to_array(),
            color: color.to_array(),
            mode: mode.to_bytes(),
        }
    }

    /// Untextured vertex.
    #[inline]
    pub fn fill(position: Vec2, color: Color) -> Self {
        Self::new(position, Vec2::ZERO, color, BlendMode::Fill)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    #[inline]
    pub fn tex_coord(&self) -> Vec2 {
        Vec2::from_array(self.tex_coord)
    }

    #[inline]
    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.color;
        Color::new(r, g, b, a)
    }

    /// Decodes the blend bytes. `None` for hand-built vertices that do not set
    /// exactly one mode byte.
    pub fn blend_mode(&self) -> Option<BlendMode> {
        match self.mode {
            [255, 0, 0, 0] => Some(BlendMode::Texture),
            [0, 255, 0, 0] => Some(BlendMode::WashedTexture),
            [0, 0, 255, 0] => Some(BlendMode::Fill),
            _ => None,
        }
    }
}
