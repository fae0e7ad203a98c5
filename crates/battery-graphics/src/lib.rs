//! CPU-side 2D draw batching.
//!
//! Applications issue shape, line and texture draws against a [`Batch`]; the
//! batch appends them to one growable mesh and splits it into the fewest
//! same-state runs (texture, material, render target), replayed in exactly
//! the order the state changes were requested. A [`GraphicsBackend`] turns
//! each run into one indexed draw.
//!
//! ```
//! use battery_graphics::{Batch, BatchConfig, Color, Rect, RecordingBackend};
//!
//! let mut backend = RecordingBackend::new(320, 240);
//! let mut batch = Batch::new(&mut backend, BatchConfig::default())?;
//!
//! batch.rectangle(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE)?;
//! batch.present(&mut backend)?;
//! assert_eq!(backend.passes().len(), 1);
//! # Ok::<(), battery_graphics::BatchError>(())
//! ```

pub mod batch;
pub mod config;
pub mod coords;
pub mod error;
pub mod logging;
pub mod mesh;
pub mod render;

pub use batch::{Batch, BatchItem, PresentStats};
pub use config::BatchConfig;
pub use coords::{Color, Rect, RectI, Transform2};
pub use error::{BatchError, MeshBuffer, StackKind};
pub use mesh::{BlendMode, GrowableMesh, Vertex, VertexDescription, VertexShape};
pub use render::{
    GraphicsBackend, Material, RecordingBackend, RenderPass, RenderTarget, ResourceId, Surface,
    Texture,
};
