use serde::{Deserialize, Serialize};

use crate::PyramidError;

/// Descriptor depth of the HOG-style cell routine the pyramid is built for.
pub const DEFAULT_DEPTH: usize = 31;

/// Configuration for [`PyramidBuilder`](crate::PyramidBuilder).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidParams {
    /// Side of one square cell in pixels.
    pub cell_size: usize,
    /// Values per cell returned by the feature routine.
    pub depth: usize,
    /// Sub-scale steps per halving of the resolution.
    pub intervals_per_octave: usize,
    /// Number of octaves. `None` derives it from the input size with
    /// [`PyramidParams::default_max_octaves`].
    pub max_octaves: Option<usize>,
    /// Keep every resampled level image in the result.
    pub keep_images: bool,
}

impl Default for PyramidParams {
    fn default() -> Self {
        Self {
            cell_size: 8,
            depth: DEFAULT_DEPTH,
            intervals_per_octave: 10,
            max_octaves: None,
            keep_images: false,
        }
    }
}

impl PyramidParams {
    pub fn validate(&self) -> Result<(), PyramidError> {
        if self.cell_size == 0 {
            return Err(PyramidError::InvalidParams(
                "cell_size must be positive".into(),
            ));
        }
        if self.intervals_per_octave == 0 {
            return Err(PyramidError::InvalidParams(
                "intervals_per_octave must be positive".into(),
            ));
        }
        if self.max_octaves == Some(0) {
            return Err(PyramidError::InvalidParams(
                "max_octaves must be positive when set".into(),
            ));
        }
        Ok(())
    }

    /// Octaves that still leave a few cells at the coarsest level:
    /// `floor(log2(min(h, w) / cell_size)) - 1`, at least one.
    pub fn default_max_octaves(height: usize, width: usize, cell_size: usize) -> usize {
        let side = height.min(width) as f64 / cell_size.max(1) as f64;
        if side < 1.0 {
            return 1;
        }
        (side.log2().floor() as i64 - 1).max(1) as usize
    }

    /// Octave count for an input of the given size.
    pub fn octaves_for(&self, height: usize, width: usize) -> usize {
        self.max_octaves
            .unwrap_or_else(|| Self::default_max_octaves(height, width, self.cell_size))
    }
}
