use core::f32::consts::TAU;

use glam::Vec2;

use crate::batch::Batch;
use crate::coords::Color;
use crate::error::Result;

impl Batch {
    /// Filled circle with the configured segment count.
    #[inline]
    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<()> {
        let segments = self.config().circle_segments;
        self.circle_with_segments(center, radius, color, segments)
    }

    /// Filled circle as a triangle fan of `segments` triangles (at least 3).
    ///
    /// Emits the center, then `segments + 1` rim vertices where the last one
    /// repeats the first: `segments + 2` vertices and `3 * segments` indices.
    pub fn circle_with_segments(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
        segments: u32,
    ) -> Result<()> {
        let segments = segments.max(3);
        let step = TAU / segments as f32;

        self.append_scratch(|batch, vertices, indices| {
            vertices.push(batch.fill_vertex(center, color));
            for k in 0..segments {
                let angle = step * k as f32;
                let rim = center + Vec2::new(angle.cos(), angle.sin()) * radius;
                vertices.push(batch.fill_vertex(rim, color));
            }
            let first_rim = vertices[1];
            vertices.push(first_rim);

            for k in 0..segments {
                indices.extend_from_slice(&[0, k + 1, k + 2]);
            }
        })
    }
}
