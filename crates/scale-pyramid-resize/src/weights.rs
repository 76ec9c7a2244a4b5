//! Precomputed 1-D linear resampling weights.
//!
//! Destination sample `dy` covers the source interval
//! `[dy * inv_scale, (dy + 1) * inv_scale)`. Every source sample overlapping
//! that interval contributes in proportion to the overlap, scaled by
//! `dst_len / src_len` so the weights of one destination sum to one.

use crate::ResizeError;

/// Boundary fractions smaller than this are treated as aligned.
const ALIGN_EPS: f64 = 1e-3;

/// One contribution of a source sample to a destination sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisWeight {
    pub src: usize,
    pub dst: usize,
    pub weight: f32,
}

/// Ordered weight table for one `(src_len, dst_len)` pair.
///
/// The table only depends on the two lengths, so one table serves every
/// channel and every position along the untouched axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisWeights {
    src_len: usize,
    dst_len: usize,
    entries: Vec<AxisWeight>,
}

impl AxisWeights {
    /// Build the linear (area-weighted) table resampling `src_len` samples to
    /// `dst_len` samples. Upsampling uses the same arithmetic.
    pub fn linear(src_len: usize, dst_len: usize) -> Result<Self, ResizeError> {
        if src_len == 0 || dst_len == 0 {
            return Err(ResizeError::EmptyAxis { src_len, dst_len });
        }

        let scale = dst_len as f64 / src_len as f64;
        let inv_scale = src_len as f64 / dst_len as f64;
        let bound = capacity_bound(src_len, dst_len);

        let mut table = Self {
            src_len,
            dst_len,
            entries: Vec::with_capacity(bound),
        };

        for dy in 0..dst_len {
            let fsy1 = dy as f64 * inv_scale;
            let fsy2 = fsy1 + inv_scale;
            let sy1 = fsy1.ceil() as i64;
            let sy2 = fsy2.floor() as i64;

            // Interval lies strictly inside source sample `sy2` (upsampling).
            if sy1 > sy2 {
                table.push(sy2, dy, inv_scale * scale, bound)?;
                continue;
            }

            if sy1 as f64 - fsy1 > ALIGN_EPS {
                table.push(sy1 - 1, dy, (sy1 as f64 - fsy1) * scale, bound)?;
            }
            for sy in sy1..sy2 {
                table.push(sy, dy, scale, bound)?;
            }
            if fsy2 - sy2 as f64 > ALIGN_EPS {
                table.push(sy2, dy, (fsy2 - sy2 as f64) * scale, bound)?;
            }
        }

        Ok(table)
    }

    fn push(&mut self, src: i64, dst: usize, weight: f64, bound: usize) -> Result<(), ResizeError> {
        if self.entries.len() >= bound {
            return Err(ResizeError::WeightBound {
                src_len: self.src_len,
                dst_len: self.dst_len,
                bound,
            });
        }
        if src < 0 || src as usize >= self.src_len {
            return Err(ResizeError::SourceIndexOutOfRange {
                index: src,
                len: self.src_len,
            });
        }
        self.entries.push(AxisWeight {
            src: src as usize,
            dst,
            weight: weight as f32,
        });
        Ok(())
    }

    #[inline]
    pub fn src_len(&self) -> usize {
        self.src_len
    }

    #[inline]
    pub fn dst_len(&self) -> usize {
        self.dst_len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AxisWeight> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[AxisWeight] {
        &self.entries
    }

    /// Sum of weights landing on each destination index.
    pub fn coverage(&self) -> Vec<f32> {
        let mut sums = vec![0.0f32; self.dst_len];
        for w in &self.entries {
            sums[w.dst] += w.weight;
        }
        sums
    }

    /// `dst[w.dst] += w.weight * src[w.src]` for every entry.
    #[inline]
    pub fn accumulate(&self, src: &[f32], dst: &mut [f32]) {
        self.accumulate_strided(src, dst, 1);
    }

    /// Like [`accumulate`](Self::accumulate) but destination index `d` lands
    /// at `dst[d * stride]`. Used to write one column of a transposed buffer.
    #[inline]
    pub fn accumulate_strided(&self, src: &[f32], dst: &mut [f32], stride: usize) {
        for w in &self.entries {
            dst[w.dst * stride] += w.weight * src[w.src];
        }
    }
}

impl<'a> IntoIterator for &'a AxisWeights {
    type Item = &'a AxisWeight;
    type IntoIter = std::slice::Iter<'a, AxisWeight>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Upper bound on the number of entries: `ceil(dst * inv_scale) + 2 * dst`.
pub fn capacity_bound(src_len: usize, dst_len: usize) -> usize {
    let inv_scale = src_len as f64 / dst_len as f64;
    (dst_len as f64 * inv_scale).ceil() as usize + 2 * dst_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn resample(src: &[f32], dst_len: usize) -> Vec<f32> {
        let table = AxisWeights::linear(src.len(), dst_len).unwrap();
        let mut dst = vec![0.0; dst_len];
        table.accumulate(src, &mut dst);
        dst
    }

    /// Mean of the step function `x -> src[floor(x)]` over `[a, b)`.
    fn box_mean(src: &[f32], a: f64, b: f64) -> f64 {
        let mut acc = 0.0;
        for (k, &v) in src.iter().enumerate() {
            let lo = a.max(k as f64);
            let hi = b.min(k as f64 + 1.0);
            if hi > lo {
                acc += (hi - lo) * v as f64;
            }
        }
        acc / (b - a)
    }

    #[test]
    fn identity_is_one_full_weight_per_index() {
        let table = AxisWeights::linear(7, 7).unwrap();
        assert_eq!(table.len(), 7);
        for (i, w) in table.iter().enumerate() {
            assert_eq!(
                *w,
                AxisWeight {
                    src: i,
                    dst: i,
                    weight: 1.0
                }
            );
        }
        let src = [0.3, -1.0, 2.5, 4.0, 0.0, 9.75, 1.0];
        assert_eq!(resample(&src, 7), src.to_vec());
    }

    #[test]
    fn weights_of_each_destination_sum_to_one() {
        for (s, d) in [(64, 32), (64, 59), (10, 3), (7, 13), (3, 10), (1, 5), (5, 1)] {
            let table = AxisWeights::linear(s, d).unwrap();
            for (dy, sum) in table.coverage().into_iter().enumerate() {
                assert_abs_diff_eq!(sum, 1.0, epsilon = 2e-3);
                assert!(sum > 0.0, "{s}->{d}: dst {dy} uncovered");
            }
        }
    }

    #[test]
    fn four_to_three_splits_boundary_samples() {
        let table = AxisWeights::linear(4, 3).unwrap();
        let first: Vec<_> = table.iter().filter(|w| w.dst == 0).collect();
        assert_eq!(first.len(), 2);
        assert_eq!((first[0].src, first[1].src), (0, 1));
        assert_abs_diff_eq!(first[0].weight, 0.75, epsilon = 1e-6);
        assert_abs_diff_eq!(first[1].weight, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn ramp_matches_box_averaged_interpolation() {
        let src: Vec<f32> = (0..37).map(|v| v as f32 * 0.5 - 3.0).collect();
        for dst_len in [5usize, 12, 18, 36, 37, 50, 111] {
            let out = resample(&src, dst_len);
            let inv = src.len() as f64 / dst_len as f64;
            for (dy, &v) in out.iter().enumerate() {
                let a = dy as f64 * inv;
                let expected = box_mean(&src, a, a + inv);
                assert_abs_diff_eq!(v as f64, expected, epsilon = 2e-2);
            }
        }
    }

    #[test]
    fn halving_a_ramp_averages_pairs() {
        let src: Vec<f32> = (0..16).map(|v| v as f32).collect();
        let out = resample(&src, 8);
        for (d, v) in out.iter().enumerate() {
            assert_abs_diff_eq!(*v, 2.0 * d as f32 + 0.5, epsilon = 1e-5);
        }
    }

    #[test]
    fn upsampling_replicates_samples() {
        let out = resample(&[1.0, 3.0], 4);
        assert_eq!(out, vec![1.0, 1.0, 3.0, 3.0]);
    }

    #[test]
    fn interior_upsampled_samples_get_one_full_weight() {
        let table = AxisWeights::linear(2, 6).unwrap();
        let middle: Vec<_> = table.iter().filter(|w| w.dst == 1).collect();
        assert_eq!(middle.len(), 1);
        assert_eq!(middle[0].src, 0);
        assert_abs_diff_eq!(middle[0].weight, 1.0, epsilon = 1e-6);
        assert_eq!(resample(&[2.0, 6.0], 6), vec![2.0, 2.0, 2.0, 6.0, 6.0, 6.0]);
    }

    #[test]
    fn table_stays_within_bound() {
        for s in 1..40 {
            for d in 1..40 {
                let table = AxisWeights::linear(s, d).unwrap();
                assert!(table.len() <= capacity_bound(s, d), "{s}->{d}");
            }
        }
    }

    #[test]
    fn zero_lengths_are_rejected() {
        assert_eq!(
            AxisWeights::linear(0, 3).unwrap_err(),
            ResizeError::EmptyAxis {
                src_len: 0,
                dst_len: 3
            }
        );
        assert!(AxisWeights::linear(3, 0).is_err());
    }

    #[test]
    fn strided_accumulation_skips_lanes() {
        let table = AxisWeights::linear(2, 2).unwrap();
        let mut dst = vec![0.0; 6];
        table.accumulate_strided(&[4.0, 5.0], &mut dst[1..], 3);
        assert_eq!(dst, vec![0.0, 4.0, 0.0, 0.0, 5.0, 0.0]);
    }

    #[test]
    fn push_enforces_bound_and_source_range() {
        let mut table = AxisWeights {
            src_len: 3,
            dst_len: 2,
            entries: Vec::new(),
        };
        table.push(0, 0, 1.0, 1).unwrap();
        assert_eq!(
            table.push(1, 1, 1.0, 1).unwrap_err(),
            ResizeError::WeightBound {
                src_len: 3,
                dst_len: 2,
                bound: 1
            }
        );
        assert_eq!(
            table.push(-1, 1, 0.5, 8).unwrap_err(),
            ResizeError::SourceIndexOutOfRange { index: -1, len: 3 }
        );
        assert_eq!(
            table.push(3, 1, 0.5, 8).unwrap_err(),
            ResizeError::SourceIndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(table.len(), 1);

        table.push(2, 1, 0.5, 8).unwrap();
        assert_eq!(
            table.as_slice().last().copied(),
            Some(AxisWeight {
                src: 2,
                dst: 1,
                weight: 0.5
            })
        );
    }
}
