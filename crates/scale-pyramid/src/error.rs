use scale_pyramid_core::ImageError;
use scale_pyramid_resize::ResizeError;

/// Errors returned while scheduling or building a pyramid.
#[derive(thiserror::Error, Debug)]
pub enum PyramidError {
    #[error("invalid pyramid parameters: {0}")]
    InvalidParams(String),
    #[error(
        "descriptor for level ({octave}, {interval}) has {got} values, expected {expected}"
    )]
    DescriptorLength {
        octave: usize,
        interval: usize,
        expected: usize,
        got: usize,
    },
    #[error(transparent)]
    Resize(#[from] ResizeError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Decode(#[from] ::image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
