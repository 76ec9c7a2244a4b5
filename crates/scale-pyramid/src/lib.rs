//! Multi-scale image pyramids for per-cell feature extraction.
//!
//! This crate provides:
//! - the octave/interval scheduler ([`PyramidBuilder`]) that resamples a base
//!   image to `2^-(o + i/n)` of its size and feeds every level to a
//!   [`CellFeatureExtractor`],
//! - re-exports of the planar image types and the separable resizer,
//! - (feature `image`) decoding helpers that turn an image file into planar
//!   RGBA and normalize it to a square patch.
//!
//! ## Quickstart
//!
//! ```
//! use scale_pyramid::{PlanarImage, PyramidBuilder, PyramidParams, ZeroDescriptors};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = PlanarImage::filled(64, 64, &[0.1, 0.2, 0.3, 0.4])?;
//! let params = PyramidParams {
//!     intervals_per_octave: 4,
//!     ..PyramidParams::default()
//! };
//! let builder = PyramidBuilder::new(params)?;
//! let pyramid = builder.build(image, &mut ZeroDescriptors)?;
//! println!("levels: {}", pyramid.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `scale_pyramid::core`: planar image storage and cell geometry.
//! - `scale_pyramid::resize`: weight tables, axis passes and the 2-D resize.
//! - `scale_pyramid::load` (feature `image`): file decoding and patch helpers.

pub use scale_pyramid_core as core;
pub use scale_pyramid_resize as resize;

pub use scale_pyramid_core::{
    CellGeometry, ImageError, PlanarBuffer, PlanarImage, StageTiming, TimingsMs,
};
pub use scale_pyramid_resize::{resize_image, ResizeError};

mod builder;
mod error;
mod extractor;
mod io;
mod params;
mod result;

#[cfg(feature = "image")]
pub mod load;

pub use builder::PyramidBuilder;
pub use error::PyramidError;
pub use extractor::{CellFeatureExtractor, FnExtractor, ZeroDescriptors};
pub use io::{PyramidConfig, PyramidReport};
pub use params::{PyramidParams, DEFAULT_DEPTH};
pub use result::{LevelKey, LevelPlan, LevelSummary, Pyramid, PyramidLevel, PyramidSummary};
