//! Headless backend that records what it is asked to draw.
//!
//! No GPU work happens here. Every pass is validated and stored so tests and
//! tools can inspect the exact submission stream a frame produced.

use anyhow::{bail, Context as _};
use glam::Mat4;

use crate::coords::{Color, RectI};
use crate::mesh::{VertexDescription, VertexShape};

use super::backend::GraphicsBackend;
use super::pass::RenderPass;
use super::registry::{ResourceId, ResourceKind, ResourceRegistry};
use super::resource::{Material, RenderTarget, Surface, Texture};

/// A pass as seen by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPass {
    pub target: RenderTarget,
    pub viewport: RectI,
    pub material: ResourceId,
    pub texture: Option<ResourceId>,
    /// Value of `u_matrix` at submission.
    pub matrix: Mat4,
    pub index_start: usize,
    pub index_count: usize,
    /// Whether the mesh was (re)uploaded for this pass.
    pub uploaded: bool,
}

/// A `clear` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedClear {
    pub target: RenderTarget,
    pub color: Color,
}

/// In-memory [`GraphicsBackend`].
#[derive(Debug)]
pub struct RecordingBackend {
    registry: ResourceRegistry,
    screen: (u32, u32),
    default_shader: Option<ResourceId>,

    passes: Vec<RecordedPass>,
    clears: Vec<RecordedClear>,
    uploads: usize,
    uploaded_bytes: usize,

    fail_presents_after: Option<usize>,
}

impl RecordingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        log::debug!("recording backend: {width}x{height} screen");
        Self {
            registry: ResourceRegistry::new(),
            screen: (width, height),
            default_shader: None,
            passes: Vec::new(),
            clears: Vec::new(),
            uploads: 0,
            uploaded_bytes: 0,
            fail_presents_after: None,
        }
    }

    #[inline]
    pub fn passes(&self) -> &[RecordedPass] {
        &self.passes
    }

    #[inline]
    pub fn clears(&self) -> &[RecordedClear] {
        &self.clears
    }

    /// Number of mesh uploads so far.
    #[inline]
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    #[inline]
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    #[inline]
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// Forgets recorded passes and clears, keeping resources.
    pub fn reset(&mut self) {
        self.passes.clear();
        self.clears.clear();
        self.uploads = 0;
        self.uploaded_bytes = 0;
    }

    /// Changes the size reported by [`GraphicsBackend::screen`].
    pub fn resize(&mut self, width: u32, height: u32) {
        self.screen = (width, height);
    }

    /// Makes every `present` after the next `n` successful ones fail.
    pub fn fail_presents_after(&mut self, n: usize) {
        self.fail_presents_after = Some(n);
    }

    /// Material over the built-in shader. Each call yields a distinct material.
    pub fn create_material(&mut self) -> anyhow::Result<Material> {
        let shader = self.default_shader()?;
        let id = self.registry.register(ResourceKind::Material);
        Ok(Material::new(id, shader))
    }

    /// Releases a resource created by this backend.
    pub fn release(&mut self, id: ResourceId) -> Option<ResourceKind> {
        self.registry.release(id)
    }

    /// Releases everything still alive.
    pub fn dispose_all(&mut self) -> Vec<(ResourceId, ResourceKind)> {
        self.default_shader = None;
        self.registry.drain()
    }

    fn default_shader(&mut self) -> anyhow::Result<ResourceId> {
        if let Some(id) = self.default_shader {
            return Ok(id);
        }
        let id = self.registry.register(ResourceKind::Shader);
        self.default_shader = Some(id);
        Ok(id)
    }

    fn check_live(&self, id: ResourceId, what: &str) -> anyhow::Result<()> {
        if !self.registry.contains(id) {
            bail!("{what} {id} is not a live resource");
        }
        Ok(())
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_mesh(&mut self, description: &VertexDescription) -> anyhow::Result<ResourceId> {
        // same validation a wgpu pipeline would run into
        description
            .wgpu_attributes()
            .context("mesh vertex layout is not representable")?;
        Ok(self.registry.register(ResourceKind::Mesh))
    }

    fn create_texture(&mut self, width: u32, height: u32) -> anyhow::Result<Texture> {
        if width == 0 || height == 0 {
            bail!("texture size must be non-zero, got {width}x{height}");
        }
        let id = self.registry.register(ResourceKind::Texture);
        Ok(Texture::new(id, width, height))
    }

    fn create_surface(&mut self, width: u32, height: u32) -> anyhow::Result<Surface> {
        let attachment = self
            .create_texture(width, height)
            .context("creating surface attachment")?;
        let id = self.registry.register(ResourceKind::Surface);
        Ok(Surface::new(id, attachment))
    }

    fn create_default_material(&mut self) -> anyhow::Result<Material> {
        self.create_material()
    }

    fn present<V: VertexShape>(&mut self, pass: &RenderPass<'_, V>) -> anyhow::Result<()> {
        if let Some(0) = self.fail_presents_after {
            bail!("present rejected after {} passes", self.passes.len());
        }

        self.check_live(pass.mesh.id(), "mesh")?;
        if let RenderTarget::Surface(surface) = &pass.target {
            self.check_live(surface.id, "surface")?;
        }
        if pass.indices().is_none() {
            bail!(
                "index range {:?} exceeds mesh index count {}",
                pass.index_range(),
                pass.mesh.index_count()
            );
        }

        if let Some(color) = pass.clear_color {
            self.clear(&pass.target, color)?;
        }

        let uploaded = match pass.mesh.bind() {
            Some(data) => {
                self.uploads += 1;
                self.uploaded_bytes += data.vertex_bytes().len() + data.index_bytes().len();
                true
            }
            None => false,
        };

        self.passes.push(RecordedPass {
            target: pass.target,
            viewport: pass.effective_viewport(),
            material: pass.material.id,
            texture: pass.material.texture().map(|t| t.id),
            matrix: pass.material.matrix().unwrap_or(Mat4::IDENTITY),
            index_start: pass.index_start,
            index_count: pass.index_count,
            uploaded,
        });

        if let Some(n) = self.fail_presents_after.as_mut() {
            *n = n.saturating_sub(1);
        }
        Ok(())
    }

    fn clear(&mut self, target: &RenderTarget, color: Color) -> anyhow::Result<()> {
        self.clears.push(RecordedClear {
            target: *target,
            color,
        });
        Ok(())
    }

    fn screen(&self) -> RenderTarget {
        RenderTarget::screen(self.screen.0, self.screen.1)
    }
}
