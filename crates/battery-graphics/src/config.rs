/// Tuning parameters for a [`Batch`](crate::batch::Batch).
///
/// Keep this structure small. Per-draw parameters belong on the draw calls;
/// only values shared by a whole batcher live here.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Initial physical capacity of the vertex and index buffers.
    ///
    /// Buffers double from here whenever an append does not fit.
    pub initial_capacity: usize,

    /// Upper bound on the vertex buffer length. `None` means unbounded.
    pub max_vertices: Option<usize>,

    /// Upper bound on the index buffer length. `None` means unbounded.
    pub max_indices: Option<usize>,

    /// Segment count used by `Batch::circle`.
    pub circle_segments: u32,

    /// Stroke width used by convenience outlines.
    pub line_thickness: f32,

    /// Dash length used by convenience dashed outlines.
    pub dash_length: f32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
            max_vertices: None,
            max_indices: None,
            circle_segments: 32,
            line_thickness: 1.0,
            dash_length: 4.0,
        }
    }
}

impl BatchConfig {
    /// Returns a copy with out-of-range values replaced by usable ones.
    ///
    /// - capacity is at least 1 (doubling from 0 never terminates)
    /// - circles have at least 3 segments
    /// - non-finite or non-positive stroke/dash sizes fall back to defaults
    pub fn validated(&self) -> Self {
        let defaults = Self::default();

        let line_thickness = if self.line_thickness.is_finite() && self.line_thickness > 0.0 {
            self.line_thickness
        } else {
            defaults.line_thickness
        };
        let dash_length = if self.dash_length.is_finite() && self.dash_length > 0.0 {
            self.dash_length
        } else {
            defaults.dash_length
        };

        Self {
            initial_capacity: self.initial_capacity.max(1),
            max_vertices: self.max_vertices,
            max_indices: self.max_indices,
            circle_segments: self.circle_segments.max(3),
            line_thickness,
            dash_length,
        }
    }
}
