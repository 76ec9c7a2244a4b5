//! Core types for multi-scale image pyramids.
//!
//! This crate is intentionally small. It holds the planar `f32` image storage
//! shared by the resizer and the pyramid scheduler, the per-level cell
//! geometry, stage timing and logger setup. It does not resample anything
//! itself.

mod geometry;
mod image;
mod logger;
mod timing;

pub use geometry::CellGeometry;
pub use image::{ImageError, PlanarBuffer, PlanarImage};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, parse_level};
pub use timing::{StageTimer, StageTiming, TimingsMs};
