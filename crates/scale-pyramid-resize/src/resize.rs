use scale_pyramid_core::PlanarImage;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{resize_axis_transposed, resize_axis_transposed_into, AxisWeights, ResizeError};

/// Resize `src` to `dst_height x dst_width` with separable linear weights.
///
/// The first pass resizes the height axis into a temporary whose slow axis is
/// `y`; the second pass resizes the width axis and lands back in the
/// column-major layout of [`PlanarImage`]. The temporary is dropped on return.
pub fn resize_image(
    src: &PlanarImage,
    dst_height: usize,
    dst_width: usize,
) -> Result<PlanarImage, ResizeError> {
    if dst_height == 0 || dst_width == 0 {
        return Err(ResizeError::EmptyAxis {
            src_len: src.height().min(src.width()),
            dst_len: 0,
        });
    }

    let mut dst = PlanarImage::zeros(dst_height, dst_width, src.channels())?;
    resize_image_into(src, &mut dst)?;
    Ok(dst)
}

/// Resize into a caller-owned destination; its shape selects the target size.
///
/// The second pass writes straight into `dst`'s storage, which is never
/// reallocated.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(src, dst),
        fields(
            src_h = src.height(),
            src_w = src.width(),
            dst_h = dst.height(),
            dst_w = dst.width(),
            channels = src.channels()
        )
    )
)]
pub fn resize_image_into(src: &PlanarImage, dst: &mut PlanarImage) -> Result<(), ResizeError> {
    if dst.channels() != src.channels() {
        return Err(ResizeError::ShapeMismatch {
            expected: (dst.height(), dst.width(), src.channels()),
            got: (dst.height(), dst.width(), dst.channels()),
        });
    }
    let (dst_height, dst_width) = (dst.height(), dst.width());

    // {c, outer = x, inner = y} -> {c, outer = y', inner = x}
    let rows = resize_axis_transposed(src.as_buffer(), dst_height)?;
    // {c, outer = y', inner = x} -> {c, outer = x', inner = y'}
    let weights = AxisWeights::linear(rows.inner(), dst_width)?;
    resize_axis_transposed_into(&rows, &weights, dst.as_mut_buffer())?;

    log::trace!(
        "resized {}x{} -> {}x{} ({} channels)",
        src.height(),
        src.width(),
        dst_height,
        dst_width,
        src.channels()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gradient(h: usize, w: usize) -> PlanarImage {
        let mut img = PlanarImage::zeros(h, w, 2).unwrap();
        for y in 0..h {
            for x in 0..w {
                img.set(0, y, x, (y * w + x) as f32 / (h * w) as f32);
                img.set(1, y, x, 1.0 - x as f32 / w as f32);
            }
        }
        img
    }

    #[test]
    fn same_size_round_trip_reproduces_source() {
        let src = gradient(13, 21);
        let out = resize_image(&src, 13, 21).unwrap();
        assert_eq!((out.height(), out.width(), out.channels()), (13, 21, 2));
        for (a, b) in src.as_slice().iter().zip(out.as_slice()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn constant_rgba_stays_constant() {
        let values = [0.1, 0.2, 0.3, 0.4];
        let src = PlanarImage::filled(64, 64, &values).unwrap();
        let out = resize_image(&src, 32, 32).unwrap();
        assert_eq!((out.height(), out.width(), out.channels()), (32, 32, 4));
        for (c, &v) in values.iter().enumerate() {
            for y in 0..32 {
                for x in 0..32 {
                    assert_abs_diff_eq!(out.get(c, y, x), v, epsilon = 1e-4);
                }
            }
        }
    }

    #[test]
    fn non_square_targets_keep_orientation() {
        let src = gradient(8, 4);
        let out = resize_image(&src, 4, 2).unwrap();
        assert_eq!((out.height(), out.width()), (4, 2));
        // channel 1 only varies along x
        for y in 0..4 {
            assert!(out.get(1, y, 0) > out.get(1, y, 1));
            assert_abs_diff_eq!(out.get(1, y, 0), out.get(1, 0, 0), epsilon = 1e-6);
        }
        // 2x2 block mean of channel 0
        let expected =
            (src.get(0, 2, 2) + src.get(0, 2, 3) + src.get(0, 3, 2) + src.get(0, 3, 3)) / 4.0;
        assert_abs_diff_eq!(out.get(0, 1, 1), expected, epsilon = 1e-6);
    }

    #[test]
    fn into_uses_destination_shape() {
        let src = gradient(10, 10);
        let mut dst = PlanarImage::zeros(5, 7, 2).unwrap();
        resize_image_into(&src, &mut dst).unwrap();
        assert_eq!((dst.height(), dst.width()), (5, 7));

        let mut wrong = PlanarImage::zeros(5, 7, 3).unwrap();
        assert!(matches!(
            resize_image_into(&src, &mut wrong),
            Err(ResizeError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn into_reuses_destination_storage() {
        let src = gradient(12, 9);
        let mut dst = PlanarImage::filled(5, 4, &[7.0, -3.0]).unwrap();
        let ptr = dst.as_slice().as_ptr();

        resize_image_into(&src, &mut dst).unwrap();
        assert_eq!(dst.as_slice().as_ptr(), ptr);

        let fresh = resize_image(&src, 5, 4).unwrap();
        for (a, b) in dst.as_slice().iter().zip(fresh.as_slice()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn zero_target_is_rejected() {
        let src = gradient(4, 4);
        assert!(matches!(
            resize_image(&src, 0, 4),
            Err(ResizeError::EmptyAxis { .. })
        ));
    }
}
