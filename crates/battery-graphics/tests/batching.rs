use battery_graphics::logging::{init_logging, LoggingConfig};
use battery_graphics::render::RecordedPass;
use battery_graphics::{
    Batch, BatchConfig, BlendMode, Color, GraphicsBackend, Rect, RecordingBackend, RenderTarget,
    ResourceId, Transform2,
};
use glam::{Affine2, Vec2};
use pretty_assertions::assert_eq;

fn setup() -> (RecordingBackend, Batch) {
    init_logging(LoggingConfig::for_tests());
    let mut backend = RecordingBackend::new(320, 240);
    let batch = Batch::new(&mut backend, BatchConfig::default()).unwrap();
    (backend, batch)
}

fn rect(batch: &mut Batch) {
    batch
        .rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE)
        .unwrap();
}

fn textures(passes: &[RecordedPass]) -> Vec<Option<ResourceId>> {
    passes.iter().map(|p| p.texture).collect()
}

fn targets(passes: &[RecordedPass]) -> Vec<Option<ResourceId>> {
    passes
        .iter()
        .map(|p| match p.target {
            RenderTarget::Screen { .. } => None,
            RenderTarget::Surface(s) => Some(s.id),
        })
        .collect()
}

/// Index ranges in replay order must tile `[0, index_count)`.
fn assert_contiguous(batch: &Batch) {
    let mut next = 0;
    for item in batch.batches() {
        assert_eq!(item.index_start, next, "gap or overlap before {:?}", item.index_range());
        assert!(item.index_count > 0);
        next = item.index_end();
    }
    assert_eq!(next, batch.index_count());
}

#[test]
fn flat_then_textured_makes_two_batches() {
    let (mut backend, mut batch) = setup();
    let tex = backend.create_texture(16, 16).unwrap();

    batch.clear();
    batch.set_texture(None);
    batch
        .rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE)
        .unwrap();
    batch.set_texture(Some(tex));
    batch.texture(tex, Vec2::new(5.0, 5.0), None, false).unwrap();

    let stats = batch.present(&mut backend).unwrap();
    assert_eq!(stats.passes, 2);

    let passes = backend.passes();
    assert_eq!(textures(passes), vec![None, Some(tex.id)]);
    assert_eq!((passes[0].index_start, passes[0].index_count), (0, 6));
    assert_eq!((passes[1].index_start, passes[1].index_count), (6, 6));
}

#[test]
fn nested_targets_replay_in_request_order() {
    let (mut backend, mut batch) = setup();
    let a = backend.create_surface(64, 64).unwrap();
    let b = backend.create_surface(32, 32).unwrap();

    batch.push_target(a.into(), None);
    rect(&mut batch);
    batch.push_target(b.into(), None);
    rect(&mut batch);
    batch.pop_target().unwrap();
    rect(&mut batch);
    batch.pop_target().unwrap();

    batch.present(&mut backend).unwrap();
    assert_eq!(
        targets(backend.passes()),
        vec![Some(a.id), Some(b.id), Some(a.id)]
    );
    assert_contiguous(&batch);
}

#[test]
fn nested_targets_between_screen_draws() {
    let (mut backend, mut batch) = setup();
    let surface = backend.create_surface(64, 64).unwrap();

    rect(&mut batch);
    batch.push_target(surface.into(), None);
    rect(&mut batch);
    batch.pop_target().unwrap();
    rect(&mut batch);

    batch.present(&mut backend).unwrap();
    assert_eq!(
        targets(backend.passes()),
        vec![None, Some(surface.id), None]
    );

    let viewports: Vec<_> = backend.passes().iter().map(|p| p.viewport.width).collect();
    assert_eq!(viewports, vec![320, 64, 320]);
}

#[test]
fn pushing_the_current_target_again_does_not_split() {
    let (mut backend, mut batch) = setup();
    let a = backend.create_surface(64, 64).unwrap();

    batch.push_target(a.into(), None);
    rect(&mut batch);
    batch.push_target(a.into(), None);
    rect(&mut batch);
    batch.pop_target().unwrap();
    rect(&mut batch);
    batch.pop_target().unwrap();

    assert_eq!(batch.batch_count(), 1);
    batch.present(&mut backend).unwrap();
    assert_eq!(targets(backend.passes()), vec![Some(a.id)]);
    assert_eq!(backend.passes()[0].index_count, 18);
}

#[test]
fn consecutive_draws_coalesce_into_one_batch() {
    let (mut backend, mut batch) = setup();
    let tex = backend.create_texture(8, 8).unwrap();

    for i in 0..50 {
        batch.texture(tex, Vec2::splat(i as f32), None, false).unwrap();
    }
    assert_eq!(batch.batch_count(), 1);
    assert_eq!(batch.index_count(), 300);
}

#[test]
fn each_distinct_state_change_opens_a_batch() {
    let (mut backend, mut batch) = setup();
    let texs: Vec<_> = (0..4).map(|_| backend.create_texture(8, 8).unwrap()).collect();

    for i in 0..12 {
        batch.texture(texs[i % 4], Vec2::ZERO, None, false).unwrap();
    }
    assert_eq!(batch.batch_count(), 12);

    batch.present(&mut backend).unwrap();
    let expected: Vec<_> = (0..12).map(|i| Some(texs[i % 4].id)).collect();
    assert_eq!(textures(backend.passes()), expected);
}

#[test]
fn mixed_sequence_stays_contiguous() {
    let (mut backend, mut batch) = setup();
    let tex = backend.create_texture(8, 8).unwrap();
    let surface = backend.create_surface(16, 16).unwrap();
    let material = backend.create_material().unwrap();

    // deterministic pseudo-random op stream
    let mut state = 0x2545_f491_u32;
    let mut depth = 0;
    for _ in 0..400 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;

        match state % 9 {
            0 => batch.set_texture(Some(tex)),
            1 => batch.set_texture(None),
            2 => batch.set_material(Some(material.clone())),
            3 => batch.set_material(None),
            4 => {
                batch.push_target(surface.into(), None);
                depth += 1;
            }
            5 if depth > 0 => {
                batch.pop_target().unwrap();
                depth -= 1;
            }
            6 => batch.circle(Vec2::new(5.0, 5.0), 3.0, Color::GREEN).unwrap(),
            7 => batch
                .line(Vec2::ZERO, Vec2::new(4.0, 3.0), Color::RED, 1.0)
                .unwrap(),
            _ => rect(&mut batch),
        }
        assert_contiguous(&batch);
        assert!(batch.cursor() <= batch.batch_count());
    }

    let stats = batch.present(&mut backend).unwrap();
    assert_eq!(stats.indices, batch.index_count());
    assert_eq!(stats.passes, batch.batch_count());
}

#[test]
fn present_uploads_the_mesh_lazily() {
    let (mut backend, mut batch) = setup();
    let tex = backend.create_texture(8, 8).unwrap();

    rect(&mut batch);
    batch.texture(tex, Vec2::ZERO, None, false).unwrap();

    batch.present(&mut backend).unwrap();
    let uploaded: Vec<_> = backend.passes().iter().map(|p| p.uploaded).collect();
    assert_eq!(uploaded, vec![true, false]);
    assert_eq!(backend.uploads(), 1);

    batch.present(&mut backend).unwrap();
    assert_eq!(backend.uploads(), 1);

    rect(&mut batch);
    batch.present(&mut backend).unwrap();
    assert_eq!(backend.uploads(), 2);
}

#[test]
fn growth_keeps_all_geometry() {
    init_logging(LoggingConfig::for_tests());
    let mut backend = RecordingBackend::new(100, 100);
    let config = BatchConfig {
        initial_capacity: 1,
        ..BatchConfig::default()
    };
    let mut batch = Batch::new(&mut backend, config).unwrap();

    for i in 0..100 {
        batch
            .rectangle(Rect::new(i as f32, 0.0, 1.0, 1.0), Color::WHITE)
            .unwrap();
    }

    assert_eq!(batch.vertex_count(), 400);
    assert_eq!(batch.index_count(), 600);
    assert_eq!(batch.mesh().vertex_capacity(), 512);
    assert_eq!(batch.mesh().index_capacity(), 1024);

    for (i, quad) in batch.mesh().vertices().chunks(4).enumerate() {
        assert_eq!(quad[0].position, [i as f32, 0.0]);
    }
    assert!(batch
        .mesh()
        .indices()
        .iter()
        .all(|&i| (i as usize) < batch.vertex_count()));
}

#[test]
fn every_generated_vertex_has_exactly_one_blend_byte() {
    let (mut backend, mut batch) = setup();
    let tex = backend.create_texture(8, 8).unwrap();
    let r = Rect::new(0.0, 0.0, 20.0, 10.0);

    batch.quad(r.corners(), Color::RED).unwrap();
    batch.triangle(Vec2::ZERO, Vec2::X, Vec2::Y, Color::RED).unwrap();
    batch.line(Vec2::ZERO, Vec2::ONE, Color::RED, 2.0).unwrap();
    batch.dashed_line(Vec2::ZERO, Vec2::new(30.0, 0.0), Color::RED, 1.0, 3.0, 0.3).unwrap();
    batch.hollow_rectangle(r, Color::RED, 1.0).unwrap();
    batch.dashed_rectangle(r, Color::RED, 1.0, 2.0, 0.5).unwrap();
    batch.circle(Vec2::ONE, 4.0, Color::RED).unwrap();
    batch.sine_wave(Vec2::ZERO, Vec2::new(32.0, 4.0), Color::RED, 0.0, 0.5, 8).unwrap();
    batch.texture(tex, Vec2::ZERO, None, false).unwrap();
    batch.texture(tex, Vec2::ZERO, None, true).unwrap();
    batch
        .texture_transformed(tex, Transform2::at(Vec2::ONE).with_angle(0.3), None, false)
        .unwrap();

    for v in batch.mesh().vertices() {
        let [mult, wash, fill, pad] = v.mode;
        let set = [mult, wash, fill].iter().filter(|&&b| b == 255).count();
        let clear = [mult, wash, fill].iter().filter(|&&b| b == 0).count();
        assert_eq!((set, clear, pad), (1, 2, 0));
        assert!(v.blend_mode().is_some());
    }

    let textured = batch
        .mesh()
        .vertices()
        .iter()
        .filter(|v| v.blend_mode() != Some(BlendMode::Fill))
        .count();
    assert_eq!(textured, 12);
}

#[test]
fn quad_winding_is_fixed_for_any_corners() {
    let (_, mut batch) = setup();
    let corners = [
        Vec2::new(3.0, 9.0),
        Vec2::new(-1.0, 2.0),
        Vec2::new(7.0, 7.0),
        Vec2::new(0.0, 0.0),
    ];

    batch.triangle(Vec2::ZERO, Vec2::X, Vec2::Y, Color::WHITE).unwrap();
    batch.quad(corners, Color::WHITE).unwrap();

    assert_eq!(&batch.mesh().indices()[3..], &[3, 4, 5, 3, 5, 6]);
}

#[test]
fn popping_empty_stacks_is_an_error() {
    let (_, mut batch) = setup();
    assert!(batch.pop_target().is_err());
    assert!(batch.pop_matrix().is_err());

    batch.push_matrix(Affine2::from_scale(Vec2::splat(2.0)));
    assert!(batch.pop_matrix().is_ok());
    assert!(batch.pop_matrix().is_err());
}

#[test]
fn frames_are_independent_after_clear() {
    let (mut backend, mut batch) = setup();
    let tex = backend.create_texture(8, 8).unwrap();

    rect(&mut batch);
    batch.texture(tex, Vec2::ZERO, None, false).unwrap();
    batch.present(&mut backend).unwrap();
    assert_eq!(backend.passes().len(), 2);

    backend.reset();
    batch.clear();
    rect(&mut batch);
    batch.present(&mut backend).unwrap();

    assert_eq!(textures(backend.passes()), vec![None]);
    assert_eq!(backend.passes()[0].index_start, 0);
}
