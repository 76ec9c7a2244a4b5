//! Separable linear resampling for planar `f32` images.
//!
//! Pieces, smallest first:
//! - [`AxisWeights`]: precomputed `(src, dst, weight)` table for one axis,
//!   plus the accumulate step that applies it to a 1-D run of samples;
//! - [`resize_axis_transposed`]: one axis pass over every channel and lane,
//!   writing a buffer with swapped axes;
//! - [`resize_image`]: two passes, height then width.

mod axis;
mod error;
mod resize;
mod weights;

pub use axis::{resize_axis_transposed, resize_axis_transposed_into, resize_axis_transposed_with};
pub use error::ResizeError;
pub use resize::{resize_image, resize_image_into};
pub use weights::{capacity_bound, AxisWeight, AxisWeights};
