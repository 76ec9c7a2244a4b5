//! Decoding helpers built on the `image` crate.

use std::path::Path;

use ::image::{DynamicImage, ImageReader, Rgba32FImage};
use scale_pyramid_core::PlanarImage;
use scale_pyramid_resize::resize_image;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::PyramidError;

/// Convert an `Rgba32FImage` into the planar layout, keeping all 4 channels.
pub fn planar_from_rgba32f(img: &Rgba32FImage) -> Result<PlanarImage, PyramidError> {
    Ok(PlanarImage::from_interleaved(
        img.height() as usize,
        img.width() as usize,
        4,
        img.as_raw(),
    )?)
}

/// Convert any decoded image to 4-channel `f32` RGBA in `[0, 1]`.
pub fn planar_from_dynamic(img: &DynamicImage) -> Result<PlanarImage, PyramidError> {
    planar_from_rgba32f(&img.to_rgba32f())
}

/// Decode an image file into planar RGBA.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
pub fn load_rgba(path: impl AsRef<Path>) -> Result<PlanarImage, PyramidError> {
    let img = ImageReader::open(path)?.decode()?;
    log::debug!("decoded {}x{} image", img.width(), img.height());
    planar_from_dynamic(&img)
}

/// Resample to a `size x size` square patch, the fixed input size the
/// pyramid is usually run on.
pub fn to_patch(image: &PlanarImage, size: usize) -> Result<PlanarImage, PyramidError> {
    Ok(resize_image(image, size, size)?)
}
