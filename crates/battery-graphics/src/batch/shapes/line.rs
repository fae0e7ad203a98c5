use glam::Vec2;

use crate::batch::Batch;
use crate::coords::{turn_left, Color};
use crate::error::Result;

/// Start of the first dash and the dash-to-dash step, or `None` when the
/// inputs produce no dashes.
fn dash_pattern(distance: f32, length: f32, offset: f32) -> Option<(f32, f32)> {
    if distance <= 0.0 || length <= 0.0 || !distance.is_finite() || !length.is_finite() {
        return None;
    }

    let offset = if offset.is_finite() { ((offset % 1.0) + 1.0) % 1.0 } else { 0.0 };
    let step = length * 2.0;

    let mut start = step * offset;
    if start > length {
        start -= step;
    }
    Some((start, step))
}

/// Number of dashes [`dash_spans`] yields for the same arguments.
pub fn dash_count(distance: f32, length: f32, offset: f32) -> usize {
    match dash_pattern(distance, length, offset) {
        // saturating float -> int cast
        Some((start, step)) => ((distance - start) / step).ceil() as usize,
        None => 0,
    }
}

/// Dash spans `(start, end)` along a segment of length `distance`.
///
/// Dashes are `length` long and start every `2 * length`. `offset` is
/// wrapped into `[0, 1)` and shifts the pattern forward by up to one
/// dash-plus-gap. Spans are clipped to `[0, distance]`.
///
/// Returns nothing for an empty segment or a non-positive/non-finite length.
pub fn dash_spans(distance: f32, length: f32, offset: f32) -> Vec<(f32, f32)> {
    let Some((start, step)) = dash_pattern(distance, length, offset) else {
        return Vec::new();
    };

    // positions are computed from the dash number, so the walk ends even
    // where `d + step` rounds back to `d`
    (0..dash_count(distance, length, offset))
        .map(|k| {
            let d = start + k as f32 * step;
            (d.max(0.0), (d + length).min(distance))
        })
        .collect()
}

impl Batch {
    /// Line drawn as a quad `thickness` wide, centered on `from → to`.
    ///
    /// A zero-length line draws nothing.
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32) -> Result<()> {
        let axis = (to - from).normalize_or_zero();
        if axis == Vec2::ZERO || !thickness.is_finite() {
            log::trace!("line {from} -> {to}: degenerate, skipped");
            return Ok(());
        }

        let side = turn_left(axis) * (thickness * 0.5);
        self.quad([from + side, to + side, to - side, from - side], color)
    }

    /// Connected line segments through `points`. Fewer than two points draw nothing.
    pub fn lines(&mut self, points: &[Vec2], color: Color, thickness: f32) -> Result<()> {
        let segments = points.len().saturating_sub(1);
        if segments == 0 {
            return Ok(());
        }

        self.reserve(segments * 4, segments * 6)?;
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, thickness)?;
        }
        Ok(())
    }

    /// Dashed line; see [`dash_spans`] for how `length` and `offset` shape it.
    pub fn dashed_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        color: Color,
        thickness: f32,
        length: f32,
        offset: f32,
    ) -> Result<()> {
        let delta = to - from;
        let distance = delta.length();
        let count = dash_count(distance, length, offset);
        if count == 0 || !thickness.is_finite() {
            log::trace!("dashed line {from} -> {to}: nothing to draw");
            return Ok(());
        }

        self.reserve(count.saturating_mul(4), count.saturating_mul(6))?;

        let axis = delta / distance;
        let side = turn_left(axis) * (thickness * 0.5);
        for (start, end) in dash_spans(distance, length, offset) {
            let a = from + axis * start;
            let b = from + axis * end;
            self.quad([a + side, b + side, b - side, a - side], color)?;
        }
        Ok(())
    }
}
