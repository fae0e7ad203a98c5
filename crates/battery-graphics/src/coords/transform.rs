use glam::{Affine2, Mat4, Vec2, Vec4};

/// Placement of a sprite-like draw: where its `origin` lands, and how it is
/// scaled and rotated around that origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2 {
    pub position: Vec2,
    pub origin: Vec2,
    pub scale: Vec2,
    /// Radians, clockwise on screen (+Y down).
    pub angle: f32,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            scale: Vec2::ONE,
            angle: 0.0,
        }
    }
}

impl Transform2 {
    #[inline]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    #[inline]
    pub fn matrix(&self) -> Affine2 {
        transform_matrix(self.position, self.origin, self.scale, self.angle)
    }
}

/// Builds a 2D transform that moves `origin` to `position` after scaling by
/// `scale` and rotating by `angle` radians.
///
/// Application order on a point: translate by `-origin`, scale, rotate,
/// translate by `position`.
pub fn transform_matrix(position: Vec2, origin: Vec2, scale: Vec2, angle: f32) -> Affine2 {
    let mut m = Affine2::IDENTITY;

    if position != Vec2::ZERO {
        m = m * Affine2::from_translation(position);
    }
    if angle != 0.0 {
        m = m * Affine2::from_angle(angle);
    }
    if scale != Vec2::ONE {
        m = m * Affine2::from_scale(scale);
    }
    if origin != Vec2::ZERO {
        m = m * Affine2::from_translation(-origin);
    }

    m
}

/// Embeds a 2D affine transform in a 4x4 matrix (z untouched).
pub fn affine_to_mat4(m: Affine2) -> Mat4 {
    let x = m.matrix2.x_axis;
    let y = m.matrix2.y_axis;
    let t = m.translation;
    Mat4::from_cols(
        Vec4::new(x.x, x.y, 0.0, 0.0),
        Vec4::new(y.x, y.y, 0.0, 0.0),
        Vec4::Z,
        Vec4::new(t.x, t.y, 0.0, 1.0),
    )
}

/// Pixel-space projection for a `width` × `height` target: origin top-left, +Y down,
/// depth range `[0, 1]`.
pub fn orthographic(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width.max(1) as f32, height.max(1) as f32, 0.0, 0.0, 1.0)
}

/// Left-hand perpendicular of `v` (`(y, -x)`).
#[inline]
pub fn turn_left(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}
