use glam::Vec2;

use crate::batch::Batch;
use crate::coords::Color;
use crate::error::Result;

impl Batch {
    /// Sine curve starting at `origin`, `size.x` wide with amplitude `size.y`,
    /// drawn as `steps` line segments with the configured thickness.
    ///
    /// Sample `i` sits at `sin(i * frequency + offset)`.
    pub fn sine_wave(
        &mut self,
        origin: Vec2,
        size: Vec2,
        color: Color,
        offset: f32,
        frequency: f32,
        steps: u32,
    ) -> Result<()> {
        if steps == 0 {
            return Ok(());
        }

        let thickness = self.config().line_thickness;
        let dx = size.x / steps as f32;
        // segments overlap slightly so the curve has no hairline gaps
        let span = dx.ceil();

        self.reserve(steps as usize * 4, steps as usize * 6)?;
        for i in 0..steps {
            let x = i as f32 * dx;
            let y0 = size.y * (i as f32 * frequency + offset).sin();
            let y1 = size.y * ((i + 1) as f32 * frequency + offset).sin();

            self.line(
                origin + Vec2::new(x, y0),
                origin + Vec2::new(x + span, y1),
                color,
                thickness,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BatchConfig;
    use crate::render::RecordingBackend;

    fn batch() -> Batch {
        let mut backend = RecordingBackend::new(100, 100);
        Batch::new(&mut backend, BatchConfig::default()).unwrap()
    }

    #[test]
    fn one_quad_per_step() {
        let mut b = batch();
        b.sine_wave(Vec2::ZERO, Vec2::new(64.0, 8.0), Color::WHITE, 0.0, 0.5, 16).unwrap();
        assert_eq!(b.index_count(), 16 * 6);
        assert_eq!(b.batch_count(), 1);
    }

    #[test]
    fn zero_steps_draws_nothing() {
        let mut b = batch();
        b.sine_wave(Vec2::ZERO, Vec2::new(64.0, 8.0), Color::WHITE, 0.0, 0.5, 0).unwrap();
        assert_eq!(b.vertex_count(), 0);
    }

    #[test]
    fn flat_wave_stays_on_the_baseline() {
        let mut b = batch();
        b.sine_wave(Vec2::new(0.0, 10.0), Vec2::new(8.0, 0.0), Color::WHITE, 0.0, 1.0, 4).unwrap();
        // amplitude 0: every quad is a horizontal line of thickness 1 around y = 10
        assert!(b.mesh().vertices().iter().all(|v| (v.position[1] - 10.0).abs() <= 0.5));
    }
}
