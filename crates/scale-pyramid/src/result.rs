use scale_pyramid_core::{CellGeometry, PlanarImage, TimingsMs};
use serde::{Deserialize, Serialize};

/// Position of a level in the schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelKey {
    pub octave: usize,
    pub interval: usize,
}

impl LevelKey {
    pub fn new(octave: usize, interval: usize) -> Self {
        Self { octave, interval }
    }
}

/// Resolution and geometry of one level, without pixels or descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelPlan {
    pub key: LevelKey,
    pub height: usize,
    pub width: usize,
    /// Nominal scale relative to the pyramid base, `2^-(octave + interval / n)`.
    pub scale: f64,
    pub geometry: CellGeometry,
}

/// One materialized level: its plan, the descriptor the feature routine
/// returned for it and, if requested, the level image.
#[derive(Clone, Debug)]
pub struct PyramidLevel {
    pub plan: LevelPlan,
    pub descriptor: Vec<f32>,
    pub image: Option<PlanarImage>,
}

impl PyramidLevel {
    #[inline]
    pub fn key(&self) -> LevelKey {
        self.plan.key
    }

    #[inline]
    pub fn geometry(&self) -> CellGeometry {
        self.plan.geometry
    }

    /// Descriptor value for cell `(cy, cx)` and bin `b`, stored bin-major
    /// then column-major over cells.
    pub fn cell_value(&self, cy: usize, cx: usize, b: usize) -> Option<f32> {
        let g = self.plan.geometry;
        if cy >= g.cells_y || cx >= g.cells_x || b >= g.depth {
            return None;
        }
        self.descriptor
            .get(b * g.cells_y * g.cells_x + cx * g.cells_y + cy)
            .copied()
    }
}

/// Fully built pyramid, levels in schedule order.
#[derive(Clone, Debug)]
pub struct Pyramid {
    pub base_height: usize,
    pub base_width: usize,
    pub octaves: usize,
    pub intervals_per_octave: usize,
    pub levels: Vec<PyramidLevel>,
    /// Time spent in the `extract` and `resample` stages of the build.
    pub timings: TimingsMs,
}

impl Pyramid {
    pub fn get(&self, octave: usize, interval: usize) -> Option<&PyramidLevel> {
        if octave >= self.octaves || interval >= self.intervals_per_octave {
            return None;
        }
        self.levels
            .get(octave * self.intervals_per_octave + interval)
            .filter(|lvl| lvl.key() == LevelKey::new(octave, interval))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PyramidLevel> {
        self.levels.iter()
    }

    pub fn summary(&self) -> PyramidSummary {
        PyramidSummary {
            base_height: self.base_height,
            base_width: self.base_width,
            octaves: self.octaves,
            intervals_per_octave: self.intervals_per_octave,
            levels: self
                .levels
                .iter()
                .map(|lvl| LevelSummary {
                    plan: lvl.plan,
                    descriptor_len: lvl.descriptor.len(),
                })
                .collect(),
        }
    }
}

/// Serializable overview of a pyramid, used for JSON reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PyramidSummary {
    pub base_height: usize,
    pub base_width: usize,
    pub octaves: usize,
    pub intervals_per_octave: usize,
    pub levels: Vec<LevelSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    #[serde(flatten)]
    pub plan: LevelPlan,
    pub descriptor_len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_json_keeps_fractional_scales_exact() {
        let plan = |octave, interval, scale| LevelPlan {
            key: LevelKey::new(octave, interval),
            height: 45,
            width: 45,
            scale,
            geometry: CellGeometry::for_resolution(45, 45, 8, 31),
        };
        let summary = PyramidSummary {
            base_height: 64,
            base_width: 64,
            octaves: 2,
            intervals_per_octave: 10,
            levels: (0..10)
                .map(|i| LevelSummary {
                    plan: plan(1, i, 2f64.powf(-(1.0 + i as f64 / 10.0))),
                    descriptor_len: 4 * 4 * 31,
                })
                .collect(),
        };

        let json = serde_json::to_string(&summary).unwrap();
        let back: PyramidSummary = serde_json::from_str(&json).unwrap();
        for (a, b) in back.levels.iter().zip(&summary.levels) {
            assert_eq!(a.plan.scale.to_bits(), b.plan.scale.to_bits());
        }
        assert_eq!(back, summary);
    }
}
