use core::mem;

use glam::{Affine2, Vec2};

use crate::config::BatchConfig;
use crate::coords::{affine_to_mat4, orthographic, Color, RectI};
use crate::error::{BatchError, Result, StackKind};
use crate::mesh::{BlendMode, GrowableMesh, Vertex, VertexShape};
use crate::render::{
    GraphicsBackend, Material, RenderPass, RenderTarget, Texture, UniformValue, U_MATRIX,
    U_TEXTURE,
};

use super::item::BatchItem;

/// What a [`Batch::present`] call submitted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PresentStats {
    pub passes: usize,
    pub indices: usize,
}

/// 2D draw batcher.
///
/// Geometry calls append to one shared mesh and grow the *open* batch. State
/// setters ([`set_texture`], [`set_material`], [`set_render_target`]) close
/// the open batch when they change something it already drew with, so a frame
/// ends up as the shortest list of same-state index runs.
///
/// Closed batches are inserted at a cursor rather than pushed, and the open
/// batch is replayed at the cursor position. Replay order therefore always
/// matches the order in which state changes were requested, including across
/// nested [`push_target`] / [`pop_target`].
///
/// Performance characteristics:
/// - appends are amortized O(1); the mesh is reused across frames
/// - `clear()` keeps every allocation
///
/// [`set_texture`]: Self::set_texture
/// [`set_material`]: Self::set_material
/// [`set_render_target`]: Self::set_render_target
/// [`push_target`]: Self::push_target
/// [`pop_target`]: Self::pop_target
#[derive(Debug)]
pub struct Batch {
    config: BatchConfig,
    mesh: GrowableMesh<Vertex>,
    default_material: Material,
    screen: RenderTarget,

    /// Closed batches.
    items: Vec<BatchItem>,
    /// Open batch, receiving new geometry.
    batch: BatchItem,
    /// Where the open batch sits among `items` in replay order.
    insert: usize,

    matrix: Affine2,
    matrix_stack: Vec<Affine2>,
    target_stack: Vec<RenderTarget>,

    scratch_vertices: Vec<Vertex>,
    scratch_indices: Vec<u32>,
}

impl Batch {
    /// Creates the mesh and default material on `backend`.
    pub fn new<B: GraphicsBackend>(backend: &mut B, config: BatchConfig) -> Result<Self> {
        let config = config.validated();

        let mesh_id = backend.create_mesh(&Vertex::DESCRIPTION)?;
        let mesh = GrowableMesh::new(mesh_id, config.initial_capacity)
            .with_limits(config.max_vertices, config.max_indices);
        let default_material = backend.create_default_material()?;
        let screen = backend.screen();

        log::debug!(
            "batch: mesh {mesh_id}, material {}, screen {}x{}, capacity {}",
            default_material.id,
            screen.width(),
            screen.height(),
            config.initial_capacity
        );

        Ok(Self {
            config,
            mesh,
            default_material,
            screen,
            items: Vec::new(),
            batch: BatchItem::new(screen, 0),
            insert: 0,
            matrix: Affine2::IDENTITY,
            matrix_stack: Vec::new(),
            target_stack: Vec::new(),
            scratch_vertices: Vec::new(),
            scratch_indices: Vec::new(),
        })
    }

    /// Drops all geometry, batches and stacks. Keeps allocated capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.insert = 0;
        self.batch = BatchItem::new(self.screen, 0);

        self.matrix = Affine2::IDENTITY;
        self.matrix_stack.clear();
        self.target_stack.clear();

        self.mesh.clear();
    }

    /// Updates the backbuffer size used for screen batches.
    pub fn resize_screen(&mut self, width: u32, height: u32) {
        self.screen = RenderTarget::screen(width, height);
        if self.batch.target.is_screen() {
            self.batch.target = self.screen;
        }
    }

    // ── inspection ────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    #[inline]
    pub fn mesh(&self) -> &GrowableMesh<Vertex> {
        &self.mesh
    }

    #[inline]
    pub fn default_material(&self) -> &Material {
        &self.default_material
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.mesh.index_count()
    }

    /// Active transform applied to new geometry.
    #[inline]
    pub fn matrix(&self) -> Affine2 {
        self.matrix
    }

    /// Target of the open batch.
    #[inline]
    pub fn target(&self) -> RenderTarget {
        self.resolve(self.batch.target)
    }

    /// The open batch.
    #[inline]
    pub fn pending(&self) -> &BatchItem {
        &self.batch
    }

    /// Position of the open batch among the closed ones.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.insert
    }

    /// Batches in replay order, including the open batch when it has geometry.
    pub fn batches(&self) -> impl Iterator<Item = &BatchItem> + '_ {
        let (before, after) = self.items.split_at(self.insert.min(self.items.len()));
        let open = (!self.batch.is_empty()).then_some(&self.batch);
        before.iter().chain(open).chain(after)
    }

    /// Number of passes the next [`present`](Self::present) would submit.
    #[inline]
    pub fn batch_count(&self) -> usize {
        self.batches().count()
    }

    // ── render state ──────────────────────────────────────────────────────

    /// Texture for subsequent geometry. `None` draws untextured.
    pub fn set_texture(&mut self, texture: Option<Texture>) {
        let changed = self.batch.texture != texture;
        self.change_state(changed, |b| b.texture = texture);
    }

    /// Material for subsequent geometry. `None` selects the default material.
    pub fn set_material(&mut self, material: Option<Material>) {
        let changed = self.batch.material != material;
        self.change_state(changed, |b| b.material = material);
    }

    /// Target for subsequent geometry.
    pub fn set_render_target(&mut self, target: RenderTarget) {
        let changed = !self.batch.target.same_as(&target);
        self.change_state(changed, |b| b.target = target);
    }

    /// View transform applied by the GPU to subsequent batches, on top of
    /// the CPU-side active matrix. Identity until set; [`clear`](Self::clear)
    /// resets it.
    pub fn set_view(&mut self, view: Affine2) {
        let changed = self.batch.matrix != view;
        self.change_state(changed, |b| b.matrix = view);
    }

    fn change_state(&mut self, changed: bool, apply: impl FnOnce(&mut BatchItem)) {
        if self.batch.is_empty() {
            apply(&mut self.batch);
        } else if changed {
            self.close_batch();
            apply(&mut self.batch);
        }
    }

    fn close_batch(&mut self) {
        let next = self.batch.successor();
        let closed = mem::replace(&mut self.batch, next);

        log::trace!(
            "batch closed: indices {:?} at slot {}",
            closed.index_range(),
            self.insert
        );

        // no operation moves the cursor off the end yet
        debug_assert_eq!(self.insert, self.items.len());
        self.items.insert(self.insert, closed);
        self.insert += 1;
    }

    // ── stacks ────────────────────────────────────────────────────────────

    /// Redirects drawing to `target` until the matching [`pop_target`](Self::pop_target).
    ///
    /// `matrix` becomes the absolute transform inside the target (identity
    /// when `None`); the outer transform does not carry over.
    pub fn push_target(&mut self, target: RenderTarget, matrix: Option<Affine2>) {
        self.target_stack.push(self.batch.target);
        self.set_render_target(target);
        self.push_matrix_absolute(matrix.unwrap_or(Affine2::IDENTITY));
    }

    /// Restores the target and transform saved by the last [`push_target`](Self::push_target).
    ///
    /// Fails without touching any state when either stack is empty.
    pub fn pop_target(&mut self) -> Result<()> {
        let Some(&target) = self.target_stack.last() else {
            return Err(BatchError::StackUnderflow {
                stack: StackKind::Target,
            });
        };
        if self.matrix_stack.is_empty() {
            return Err(BatchError::StackUnderflow {
                stack: StackKind::Matrix,
            });
        }

        self.target_stack.pop();
        self.set_render_target(target);
        self.pop_matrix()
    }

    /// Saves the active transform and composes `matrix` onto it.
    pub fn push_matrix(&mut self, matrix: Affine2) {
        self.matrix_stack.push(self.matrix);
        self.matrix = self.matrix * matrix;
    }

    /// Saves the active transform and replaces it with `matrix`.
    pub fn push_matrix_absolute(&mut self, matrix: Affine2) {
        self.matrix_stack.push(self.matrix);
        self.matrix = matrix;
    }

    pub fn pop_matrix(&mut self) -> Result<()> {
        match self.matrix_stack.pop() {
            Some(m) => {
                self.matrix = m;
                Ok(())
            }
            None => Err(BatchError::StackUnderflow {
                stack: StackKind::Matrix,
            }),
        }
    }

    // ── presenting ────────────────────────────────────────────────────────

    /// Submits every batch to `backend` in replay order, one pass each.
    ///
    /// Stops at the first backend error.
    pub fn present<B: GraphicsBackend>(&self, backend: &mut B) -> Result<PresentStats> {
        let mut stats = PresentStats::default();
        if self.items.is_empty() && self.batch.is_empty() {
            return Ok(stats);
        }

        for item in self.batches() {
            self.draw(backend, item)?;
            stats.passes += 1;
            stats.indices += item.index_count;
        }

        log::debug!(
            "presented {} passes, {} indices, {} vertices",
            stats.passes,
            stats.indices,
            self.mesh.vertex_count()
        );
        Ok(stats)
    }

    fn draw<B: GraphicsBackend>(&self, backend: &mut B, item: &BatchItem) -> Result<()> {
        let target = self.resolve(item.target);
        let projection = orthographic(target.width(), target.height());

        let mut material = item
            .material
            .clone()
            .unwrap_or_else(|| self.default_material.clone());
        material.set_uniform(
            U_MATRIX,
            UniformValue::Matrix(projection * affine_to_mat4(item.matrix)),
        );
        material.set_uniform(U_TEXTURE, UniformValue::Texture(item.texture));

        let mut pass = RenderPass::new(target, &self.mesh, material);
        pass.viewport = Some(RectI::from_size(target.width(), target.height()));
        pass.index_start = item.index_start;
        pass.index_count = item.index_count;

        backend.present(&pass)?;
        Ok(())
    }

    /// Screen batches always draw at the current backbuffer size.
    #[inline]
    fn resolve(&self, target: RenderTarget) -> RenderTarget {
        if target.is_screen() { self.screen } else { target }
    }

    // ── geometry plumbing for `shapes` ────────────────────────────────────

    /// Vertex at `position` under the active transform.
    #[inline]
    pub(crate) fn vertex(
        &self,
        position: Vec2,
        tex_coord: Vec2,
        color: Color,
        mode: BlendMode,
    ) -> Vertex {
        Vertex::new(self.matrix.transform_point2(position), tex_coord, color, mode)
    }

    #[inline]
    pub(crate) fn fill_vertex(&self, position: Vec2, color: Color) -> Vertex {
        self.vertex(position, Vec2::ZERO, color, BlendMode::Fill)
    }

    /// Runs a mesh append and credits the indices it wrote to the open batch.
    pub(crate) fn append(
        &mut self,
        write: impl FnOnce(&mut GrowableMesh<Vertex>) -> Result<()>,
    ) -> Result<()> {
        let before = self.mesh.index_count();
        let result = write(&mut self.mesh);
        self.batch.index_count += self.mesh.index_count() - before;
        result
    }

    /// Pre-grows the mesh so a multi-part primitive is written whole or not at all.
    #[inline]
    pub(crate) fn reserve(&mut self, vertices: usize, indices: usize) -> Result<()> {
        self.mesh.reserve(vertices, indices)
    }

    /// Appends geometry built into the reusable scratch buffers.
    pub(crate) fn append_scratch(
        &mut self,
        build: impl FnOnce(&Self, &mut Vec<Vertex>, &mut Vec<u32>),
    ) -> Result<()> {
        let mut vertices = mem::take(&mut self.scratch_vertices);
        let mut indices = mem::take(&mut self.scratch_indices);
        vertices.clear();
        indices.clear();

        build(self, &mut vertices, &mut indices);
        let result = self.append(|mesh| mesh.add_geometry(&vertices, &indices));

        self.scratch_vertices = vertices;
        self.scratch_indices = indices;
        result
    }

    /// Runs `draw` with `local` composed onto the active transform.
    pub(crate) fn with_local_matrix<R>(
        &mut self,
        local: Affine2,
        draw: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let saved = self.matrix;
        self.matrix = saved * local;
        let out = draw(self);
        self.matrix = saved;
        out
    }
}
