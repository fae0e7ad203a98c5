use glam::Vec2;

use crate::batch::Batch;
use crate::coords::{Color, Rect};
use crate::error::Result;

impl Batch {
    /// Filled rectangle.
    #[inline]
    pub fn rectangle(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.quad(rect.corners(), color)
    }

    /// Rectangle outline: four lines `thickness` wide, centered on the edges.
    pub fn hollow_rectangle(&mut self, rect: Rect, color: Color, thickness: f32) -> Result<()> {
        let [tl, tr, br, bl] = rect.corners();

        self.reserve(16, 24)?;
        self.line(tl, tr, color, thickness)?;
        self.line(tl, bl, color, thickness)?;
        self.line(br, tr, color, thickness)?;
        self.line(br, bl, color, thickness)
    }

    /// Rectangle outline made of dashed lines.
    pub fn dashed_rectangle(
        &mut self,
        rect: Rect,
        color: Color,
        thickness: f32,
        length: f32,
        offset: f32,
    ) -> Result<()> {
        let [tl, tr, br, bl] = rect.corners();

        self.dashed_line(tl, tr, color, thickness, length, offset)?;
        self.dashed_line(tl, bl, color, thickness, length, offset)?;
        self.dashed_line(tr, br, color, thickness, length, offset)?;
        self.dashed_line(bl, br, color, thickness, length, offset)
    }

    /// [`hollow_rectangle`](Self::hollow_rectangle) with the configured line thickness.
    #[inline]
    pub fn outline(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.hollow_rectangle(rect, color, self.config().line_thickness)
    }

    /// [`dashed_rectangle`](Self::dashed_rectangle) with the configured thickness
    /// and dash length.
    #[inline]
    pub fn dashed_outline(&mut self, rect: Rect, color: Color, offset: f32) -> Result<()> {
        let thickness = self.config().line_thickness;
        let length = self.config().dash_length;
        self.dashed_rectangle(rect, color, thickness, length, offset)
    }

    /// Filled axis-aligned square centered on `center`.
    #[inline]
    pub fn point(&mut self, center: Vec2, size: f32, color: Color) -> Result<()> {
        let half = Vec2::splat(size * 0.5);
        self.rectangle(Rect::from_origin_size(center - half, half * 2.0), color)
    }
}
