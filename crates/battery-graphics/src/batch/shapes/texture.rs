use glam::Vec2;

use crate::batch::Batch;
use crate::coords::{Color, Rect, Transform2};
use crate::error::Result;
use crate::render::Texture;

/// Texture coordinates of a whole image, in corner order.
const FULL_UVS: [Vec2; 4] = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];

/// Mirrors texture coordinates (`u → 1 - u`, `v → 1 - v`) per flag.
pub fn flip_uvs(uvs: [Vec2; 4], flip_x: bool, flip_y: bool) -> [Vec2; 4] {
    uvs.map(|uv| {
        Vec2::new(
            if flip_x { 1.0 - uv.x } else { uv.x },
            if flip_y { 1.0 - uv.y } else { uv.y },
        )
    })
}

#[inline]
fn region_uvs(texture: &Texture, region: Rect) -> [Vec2; 4] {
    region.to_uv(texture.width, texture.height).corners()
}

impl Batch {
    /// Draws `texture` at its native size with its top-left corner at `position`.
    ///
    /// `tint` defaults to white. `washed` keeps only the texture's alpha.
    pub fn texture(
        &mut self,
        texture: Texture,
        position: Vec2,
        tint: Option<Color>,
        washed: bool,
    ) -> Result<()> {
        let corners = Rect::from_origin_size(position, texture.size()).corners();
        self.texture_quad(texture, corners, FULL_UVS, tint, washed)
    }

    /// Draws the `region` (in texels) of `texture` at `position`, at the region's size.
    pub fn texture_region(
        &mut self,
        texture: Texture,
        region: Rect,
        position: Vec2,
        tint: Option<Color>,
        washed: bool,
    ) -> Result<()> {
        let corners = Rect::from_origin_size(position, region.size).corners();
        self.texture_quad(texture, corners, region_uvs(&texture, region), tint, washed)
    }

    /// Draws `texture` placed by `transform` on top of the active transform.
    pub fn texture_transformed(
        &mut self,
        texture: Texture,
        transform: Transform2,
        tint: Option<Color>,
        washed: bool,
    ) -> Result<()> {
        let corners = Rect::from_origin_size(Vec2::ZERO, texture.size()).corners();
        self.with_local_matrix(transform.matrix(), |batch| {
            batch.texture_quad(texture, corners, FULL_UVS, tint, washed)
        })
    }

    /// Draws the `region` of `texture` placed by `transform`.
    pub fn texture_region_transformed(
        &mut self,
        texture: Texture,
        region: Rect,
        transform: Transform2,
        tint: Option<Color>,
        washed: bool,
    ) -> Result<()> {
        let corners = Rect::from_origin_size(Vec2::ZERO, region.size).corners();
        let uvs = region_uvs(&texture, region);
        self.with_local_matrix(transform.matrix(), |batch| {
            batch.texture_quad(texture, corners, uvs, tint, washed)
        })
    }

    /// Draws `texture` onto an arbitrary quad with explicit texture coordinates.
    ///
    /// Switches the batch texture first; the texture's flip flags are applied
    /// to `uvs`.
    pub fn texture_quad(
        &mut self,
        texture: Texture,
        corners: [Vec2; 4],
        uvs: [Vec2; 4],
        tint: Option<Color>,
        washed: bool,
    ) -> Result<()> {
        let uvs = flip_uvs(uvs, texture.flip_x, texture.flip_y);
        self.set_texture(Some(texture));
        self.textured_quad(corners, uvs, tint.unwrap_or(Color::WHITE), washed)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::BatchConfig;
    use crate::mesh::BlendMode;
    use crate::render::{GraphicsBackend, RecordingBackend};

    fn setup() -> (Batch, Texture) {
        let mut backend = RecordingBackend::new(100, 100);
        let tex = backend.create_texture(16, 8).unwrap();
        let batch = Batch::new(&mut backend, BatchConfig::default()).unwrap();
        (batch, tex)
    }

    fn uvs(b: &Batch) -> Vec<[f32; 2]> {
        b.mesh().vertices().iter().map(|v| v.tex_coord).collect()
    }

    #[test]
    fn flip_mirrors_selected_axes() {
        let flipped = flip_uvs(FULL_UVS, true, false);
        assert_eq!(flipped, [Vec2::X, Vec2::ZERO, Vec2::Y, Vec2::ONE]);

        let both = flip_uvs(FULL_UVS, true, true);
        assert_eq!(both, [Vec2::ONE, Vec2::Y, Vec2::ZERO, Vec2::X]);

        assert_eq!(flip_uvs(FULL_UVS, false, false), FULL_UVS);
    }

    #[test]
    fn texture_draw_sets_the_batch_texture() {
        let (mut b, tex) = setup();
        b.texture(tex, Vec2::new(5.0, 5.0), None, false).unwrap();

        assert_eq!(b.pending().texture, Some(tex));
        let vs = b.mesh().vertices();
        assert_eq!(vs[0].position, [5.0, 5.0]);
        assert_eq!(vs[2].position, [21.0, 13.0]);
        assert_eq!(vs[0].color(), Color::WHITE);
        assert!(vs.iter().all(|v| v.blend_mode() == Some(BlendMode::Texture)));
        assert_eq!(uvs(&b), vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    #[test]
    fn washed_draw_uses_wash_mode_and_tint() {
        let (mut b, tex) = setup();
        b.texture(tex, Vec2::ZERO, Some(Color::RED), true).unwrap();
        let v = b.mesh().vertices()[0];
        assert_eq!(v.blend_mode(), Some(BlendMode::WashedTexture));
        assert_eq!(v.color(), Color::RED);
    }

    #[test]
    fn flipped_texture_mirrors_uvs() {
        let (mut b, tex) = setup();
        b.texture(tex.with_flip(false, true), Vec2::ZERO, None, false).unwrap();
        assert_eq!(uvs(&b), vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn region_uses_region_size_and_uvs() {
        let (mut b, tex) = setup();
        b.texture_region(tex, Rect::new(8.0, 0.0, 8.0, 4.0), Vec2::new(1.0, 1.0), None, false)
            .unwrap();

        let vs = b.mesh().vertices();
        assert_eq!(vs[2].position, [9.0, 5.0]);
        assert_eq!(uvs(&b), vec![[0.5, 0.0], [1.0, 0.0], [1.0, 0.5], [0.5, 0.5]]);
    }

    #[test]
    fn transformed_draw_restores_the_active_matrix() {
        let (mut b, tex) = setup();
        let before = b.matrix();
        let transform = Transform2::at(Vec2::new(50.0, 50.0))
            .with_origin(Vec2::new(8.0, 4.0))
            .with_angle(core::f32::consts::PI);

        b.texture_transformed(tex, transform, None, false).unwrap();
        assert_eq!(b.matrix(), before);

        // rotated half a turn around its center, which lands on (50, 50)
        let tl = b.mesh().vertices()[0].position();
        assert_relative_eq!(tl.x, 58.0, epsilon = 1e-4);
        assert_relative_eq!(tl.y, 54.0, epsilon = 1e-4);
    }

    #[test]
    fn region_transformed_scales_the_region() {
        let (mut b, tex) = setup();
        let transform = Transform2::at(Vec2::new(10.0, 10.0)).with_scale(Vec2::splat(2.0));
        b.texture_region_transformed(tex, Rect::new(0.0, 0.0, 4.0, 4.0), transform, None, false)
            .unwrap();

        let br = b.mesh().vertices()[2].position();
        assert_relative_eq!(br.x, 18.0);
        assert_relative_eq!(br.y, 18.0);
        assert_eq!(uvs(&b)[2], [0.25, 0.5]);
    }

    #[test]
    fn transformed_draw_composes_with_pushed_matrix() {
        let (mut b, tex) = setup();
        b.push_matrix(glam::Affine2::from_translation(Vec2::new(100.0, 0.0)));
        b.texture_transformed(tex, Transform2::at(Vec2::new(1.0, 2.0)), None, false).unwrap();
        assert_eq!(b.mesh().vertices()[0].position, [101.0, 2.0]);
    }
}
