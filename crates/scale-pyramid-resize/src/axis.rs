use scale_pyramid_core::PlanarBuffer;

use crate::{AxisWeights, ResizeError};

/// Resize the inner axis of `src` to `dst_len` samples.
///
/// The result has `outer = dst_len` and `inner = src.outer()`: the resized
/// axis becomes the slow one. Applying this twice resizes both spatial axes
/// and restores the original orientation.
pub fn resize_axis_transposed(
    src: &PlanarBuffer,
    dst_len: usize,
) -> Result<PlanarBuffer, ResizeError> {
    let weights = AxisWeights::linear(src.inner(), dst_len)?;
    resize_axis_transposed_with(src, &weights)
}

/// Same as [`resize_axis_transposed`] with a prebuilt weight table.
pub fn resize_axis_transposed_with(
    src: &PlanarBuffer,
    weights: &AxisWeights,
) -> Result<PlanarBuffer, ResizeError> {
    check_weights(src, weights)?;
    let mut dst = PlanarBuffer::zeros(src.channels(), weights.dst_len(), src.outer())?;
    accumulate_lanes(src, weights, &mut dst);
    Ok(dst)
}

/// Same as [`resize_axis_transposed_with`], writing into `dst`.
///
/// `dst` must already have shape `(src.channels(), weights.dst_len(),
/// src.outer())`. Its previous contents are overwritten.
pub fn resize_axis_transposed_into(
    src: &PlanarBuffer,
    weights: &AxisWeights,
    dst: &mut PlanarBuffer,
) -> Result<(), ResizeError> {
    check_weights(src, weights)?;
    let expected = (src.channels(), weights.dst_len(), src.outer());
    let got = (dst.channels(), dst.outer(), dst.inner());
    if got != expected {
        return Err(ResizeError::ShapeMismatch { expected, got });
    }

    dst.as_mut_slice().fill(0.0);
    accumulate_lanes(src, weights, dst);
    Ok(())
}

fn check_weights(src: &PlanarBuffer, weights: &AxisWeights) -> Result<(), ResizeError> {
    if weights.src_len() != src.inner() {
        return Err(ResizeError::WeightsMismatch {
            weights: weights.src_len(),
            buffer: src.inner(),
        });
    }
    Ok(())
}

// `dst` is zeroed and shaped `(channels, dst_len, src.outer())`.
fn accumulate_lanes(src: &PlanarBuffer, weights: &AxisWeights, dst: &mut PlanarBuffer) {
    let other = src.outer();
    for c in 0..src.channels() {
        let plane = dst.plane_mut(c);
        for o in 0..other {
            weights.accumulate_strided(src.lane(c, o), &mut plane[o..], other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_axes_and_resizes_inner() {
        // 1 channel, outer = 2, inner = 4
        let src = PlanarBuffer::from_vec(1, 2, 4, vec![0., 2., 4., 6., 1., 1., 1., 1.]).unwrap();
        let dst = resize_axis_transposed(&src, 2).unwrap();
        assert_eq!((dst.channels(), dst.outer(), dst.inner()), (1, 2, 2));
        // each former lane is now a column of the output
        assert_eq!(dst.lane(0, 0), &[1.0, 1.0]);
        assert_eq!(dst.lane(0, 1), &[5.0, 1.0]);
    }

    #[test]
    fn channels_are_resized_independently() {
        let mut data = vec![0.0; 2 * 3 * 5];
        data[..15].fill(1.0);
        data[15..].fill(-2.0);
        let src = PlanarBuffer::from_vec(2, 3, 5, data).unwrap();
        let dst = resize_axis_transposed(&src, 4).unwrap();
        assert!(dst.plane(0).iter().all(|v| (v - 1.0).abs() < 1e-5));
        assert!(dst.plane(1).iter().all(|v| (v + 2.0).abs() < 1e-5));
    }

    #[test]
    fn source_is_left_untouched() {
        let src = PlanarBuffer::from_vec(1, 1, 3, vec![3.0, 1.0, 2.0]).unwrap();
        let before = src.clone();
        let _ = resize_axis_transposed(&src, 5).unwrap();
        assert_eq!(src, before);
    }

    #[test]
    fn rejects_mismatched_weights() {
        let src = PlanarBuffer::zeros(1, 2, 6).unwrap();
        let weights = AxisWeights::linear(5, 3).unwrap();
        assert_eq!(
            resize_axis_transposed_with(&src, &weights).unwrap_err(),
            ResizeError::WeightsMismatch {
                weights: 5,
                buffer: 6
            }
        );
    }

    #[test]
    fn into_overwrites_destination_in_place() {
        let src = PlanarBuffer::from_vec(1, 2, 4, vec![0., 2., 4., 6., 1., 1., 1., 1.]).unwrap();
        let weights = AxisWeights::linear(4, 2).unwrap();
        let mut dst = PlanarBuffer::from_vec(1, 2, 2, vec![9.0; 4]).unwrap();
        let ptr = dst.as_slice().as_ptr();

        resize_axis_transposed_into(&src, &weights, &mut dst).unwrap();
        assert_eq!(dst.as_slice().as_ptr(), ptr);
        assert_eq!(dst, resize_axis_transposed_with(&src, &weights).unwrap());
    }

    #[test]
    fn into_rejects_wrong_destination_shape() {
        let src = PlanarBuffer::zeros(2, 3, 4).unwrap();
        let weights = AxisWeights::linear(4, 2).unwrap();
        let mut dst = PlanarBuffer::zeros(2, 3, 2).unwrap();
        assert_eq!(
            resize_axis_transposed_into(&src, &weights, &mut dst).unwrap_err(),
            ResizeError::ShapeMismatch {
                expected: (2, 2, 3),
                got: (2, 3, 2)
            }
        );
    }
}
