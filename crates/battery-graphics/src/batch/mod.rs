//! Draw batching.
//!
//! Responsibilities:
//! - accumulate primitives into one shared mesh (`batcher`)
//! - split that mesh into same-state index runs, in request order (`item`)
//! - keep shape-specific tessellation isolated per file under `batch::shapes`

mod batcher;
mod item;

pub mod shapes;

pub use batcher::{Batch, PresentStats};
pub use item::BatchItem;
