use scale_pyramid_core::ImageError;

/// Errors returned by the separable resizer.
///
/// Everything except `Image` signals a caller bug or a broken internal
/// invariant; the resize is aborted before any out-of-range write happens.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ResizeError {
    #[error("axis length must be positive (src={src_len}, dst={dst_len})")]
    EmptyAxis { src_len: usize, dst_len: usize },
    #[error("weight table overflowed its bound ({bound} entries) for {src_len} -> {dst_len}")]
    WeightBound {
        src_len: usize,
        dst_len: usize,
        bound: usize,
    },
    #[error("source index {index} out of range for axis of length {len}")]
    SourceIndexOutOfRange { index: i64, len: usize },
    #[error("weights built for source length {weights}, buffer inner axis is {buffer}")]
    WeightsMismatch { weights: usize, buffer: usize },
    #[error("destination shape mismatch (expected {expected:?}, got {got:?})")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        got: (usize, usize, usize),
    },
    #[error(transparent)]
    Image(#[from] ImageError),
}
