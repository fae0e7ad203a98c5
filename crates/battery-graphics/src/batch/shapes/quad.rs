use glam::Vec2;

use crate::batch::Batch;
use crate::coords::Color;
use crate::error::Result;
use crate::mesh::{BlendMode, Vertex};

impl Batch {
    /// Flat-filled quad. Corners walk the perimeter (`[0] → [1] → [2] → [3]`).
    pub fn quad(&mut self, corners: [Vec2; 4], color: Color) -> Result<()> {
        let [a, b, c, d] = corners.map(|p| self.fill_vertex(p, color));
        self.append(|mesh| mesh.add_quad(a, b, c, d))
    }

    /// Textured quad with explicit texture coordinates, drawn with whatever
    /// texture is currently set.
    ///
    /// `washed` uses only the texture's alpha, tinted by `color`.
    pub fn textured_quad(
        &mut self,
        corners: [Vec2; 4],
        uvs: [Vec2; 4],
        color: Color,
        washed: bool,
    ) -> Result<()> {
        let mode = BlendMode::textured(washed);
        let vertices: [Vertex; 4] =
            core::array::from_fn(|i| self.vertex(corners[i], uvs[i], color, mode));
        let [a, b, c, d] = vertices;
        self.append(|mesh| mesh.add_quad(a, b, c, d))
    }

    /// Flat-filled triangle.
    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) -> Result<()> {
        let [a, b, c] = [a, b, c].map(|p| self.fill_vertex(p, color));
        self.append(|mesh| mesh.add_triangle(a, b, c))
    }
}
