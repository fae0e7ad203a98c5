//! Backend seam.
//!
//! The batcher never talks to a graphics API directly. It hands
//! [`RenderPass`]es to a [`GraphicsBackend`], which owns every GPU object and
//! identifies them to the batcher by [`ResourceId`].
//!
//! Convention:
//! - geometry is in target pixels (top-left origin, +Y down)
//! - `u_matrix` carries `projection * view` per pass

mod backend;
mod pass;
mod recording;
mod registry;
mod resource;

pub use backend::GraphicsBackend;
pub use pass::RenderPass;
pub use recording::{RecordedClear, RecordedPass, RecordingBackend};
pub use registry::{ResourceId, ResourceKind, ResourceRegistry};
pub use resource::{Material, RenderTarget, Surface, Texture, UniformValue, U_MATRIX, U_TEXTURE};
