//! Octave/interval scheduling.
//!
//! Within an octave every interval is resampled from the octave's base image,
//! never from the previous interval, so rounding errors do not compound. The
//! level handed to the feature routine at step `(o, i)` is the one already
//! resident: the octave base for `i = 0`, otherwise the image produced by step
//! `(o, i - 1)`. The image produced by the last interval, at half the base
//! resolution, becomes the next octave's base.

use log::{debug, info};
use scale_pyramid_core::{CellGeometry, PlanarImage, StageTimer};
use scale_pyramid_resize::resize_image;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    CellFeatureExtractor, LevelKey, LevelPlan, Pyramid, PyramidError, PyramidLevel, PyramidParams,
};

/// Builds scale pyramids and hands each level to a feature routine.
#[derive(Clone, Debug)]
pub struct PyramidBuilder {
    params: PyramidParams,
}

/// Carried between octaves. The base is replaced by move at each boundary.
struct OctaveState {
    octave: usize,
    base: PlanarImage,
}

impl OctaveState {
    fn base_dims(&self) -> (usize, usize) {
        (self.base.height(), self.base.width())
    }
}

impl PyramidBuilder {
    pub fn new(params: PyramidParams) -> Result<Self, PyramidError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PyramidParams {
        &self.params
    }

    /// Scale of interval `interval`'s resample target relative to the octave
    /// base: `2^-((interval + 1) / n)`.
    pub fn interval_scale(&self, interval: usize) -> f64 {
        let n = self.params.intervals_per_octave as f64;
        2f64.powf(-((interval + 1) as f64) / n)
    }

    fn level_scale(&self, key: LevelKey) -> f64 {
        let n = self.params.intervals_per_octave as f64;
        2f64.powf(-(key.octave as f64 + key.interval as f64 / n))
    }

    fn target_dims(&self, base: (usize, usize), interval: usize) -> (usize, usize) {
        let s = self.interval_scale(interval);
        (scaled(base.0, s), scaled(base.1, s))
    }

    fn plan_for(&self, key: LevelKey, height: usize, width: usize) -> LevelPlan {
        LevelPlan {
            key,
            height,
            width,
            scale: self.level_scale(key),
            geometry: CellGeometry::for_resolution(
                height,
                width,
                self.params.cell_size,
                self.params.depth,
            ),
        }
    }

    /// Level resolutions and geometries for an input of the given size,
    /// without resampling anything.
    pub fn plan(&self, height: usize, width: usize) -> Vec<LevelPlan> {
        let octaves = self.params.octaves_for(height, width);
        let n = self.params.intervals_per_octave;
        let mut plans = Vec::with_capacity(octaves * n);

        let mut base = (height, width);
        for octave in 0..octaves {
            let mut resident = base;
            for interval in 0..n {
                let key = LevelKey::new(octave, interval);
                plans.push(self.plan_for(key, resident.0, resident.1));
                resident = self.target_dims(base, interval);
            }
            base = resident;
        }
        plans
    }

    /// Build the pyramid for `image`, calling `extractor` once per level.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, image, extractor),
            fields(height = image.height(), width = image.width())
        )
    )]
    pub fn build<E: CellFeatureExtractor + ?Sized>(
        &self,
        image: PlanarImage,
        extractor: &mut E,
    ) -> Result<Pyramid, PyramidError> {
        let (base_height, base_width) = (image.height(), image.width());
        let octaves = self.params.octaves_for(base_height, base_width);
        let n = self.params.intervals_per_octave;

        let mut timer = StageTimer::start();
        let mut levels = Vec::with_capacity(octaves * n);
        let mut state = OctaveState {
            octave: 0,
            base: image,
        };
        while state.octave < octaves {
            state = self.run_octave(state, extractor, &mut levels, &mut timer)?;
        }
        let timings = timer.finish();

        info!(
            "built pyramid: {} levels over {} octaves from {}x{} in {:.1} ms",
            levels.len(),
            octaves,
            base_height,
            base_width,
            timings.total
        );
        for stage in &timings.stages {
            debug!(
                "  {:<8} {:>4} calls {:>9.3} ms",
                stage.name, stage.calls, stage.total_ms
            );
        }

        Ok(Pyramid {
            base_height,
            base_width,
            octaves,
            intervals_per_octave: n,
            levels,
            timings,
        })
    }

    /// Run every interval of one octave and return the next octave's state.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(octave = state.octave))
    )]
    fn run_octave<E: CellFeatureExtractor + ?Sized>(
        &self,
        state: OctaveState,
        extractor: &mut E,
        levels: &mut Vec<PyramidLevel>,
        timer: &mut StageTimer,
    ) -> Result<OctaveState, PyramidError> {
        let base_dims = state.base_dims();
        let mut resampled: Option<PlanarImage> = None;

        for interval in 0..self.params.intervals_per_octave {
            let key = LevelKey::new(state.octave, interval);
            let resident = resampled.as_ref().unwrap_or(&state.base);

            let plan = self.plan_for(key, resident.height(), resident.width());
            let descriptor = timer.time("extract", || {
                extractor.extract(resident, self.params.cell_size, plan.geometry)
            });
            let expected = plan.geometry.descriptor_len();
            if descriptor.len() != expected {
                return Err(PyramidError::DescriptorLength {
                    octave: key.octave,
                    interval: key.interval,
                    expected,
                    got: descriptor.len(),
                });
            }
            debug!(
                "level ({}, {}): {}x{} scale {:.4}, cells {}x{}x{}",
                key.octave,
                key.interval,
                plan.height,
                plan.width,
                plan.scale,
                plan.geometry.cells_y,
                plan.geometry.cells_x,
                plan.geometry.depth
            );
            levels.push(PyramidLevel {
                plan,
                descriptor,
                image: self.params.keep_images.then(|| resident.clone()),
            });

            let (h, w) = self.target_dims(base_dims, interval);
            resampled = Some(timer.time("resample", || resize_image(&state.base, h, w))?);
        }

        Ok(OctaveState {
            octave: state.octave + 1,
            base: resampled.unwrap_or(state.base),
        })
    }
}

fn scaled(extent: usize, scale: f64) -> usize {
    ((extent as f64 * scale).round() as usize).max(1)
}
