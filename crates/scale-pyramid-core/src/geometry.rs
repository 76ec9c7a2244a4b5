use serde::{Deserialize, Serialize};

/// Cell partition of one pyramid level as seen by the feature routine.
///
/// The routine drops a one-cell border on each side, so a level yields
/// `round(extent / cell_size) - 2` cells per axis, clamped at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub cells_y: usize,
    pub cells_x: usize,
    pub depth: usize,
}

impl CellGeometry {
    pub fn for_resolution(height: usize, width: usize, cell_size: usize, depth: usize) -> Self {
        Self {
            cells_y: interior_cells(height, cell_size),
            cells_x: interior_cells(width, cell_size),
            depth,
        }
    }

    /// Number of `f32` values a descriptor for this geometry holds.
    #[inline]
    pub fn descriptor_len(&self) -> usize {
        self.cells_y * self.cells_x * self.depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptor_len() == 0
    }
}

fn interior_cells(extent: usize, cell_size: usize) -> usize {
    let blocks = (extent as f64 / cell_size as f64).round() as i64;
    (blocks - 2).max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_border_cells() {
        let g = CellGeometry::for_resolution(64, 48, 8, 31);
        assert_eq!((g.cells_y, g.cells_x, g.depth), (6, 4, 31));
        assert_eq!(g.descriptor_len(), 6 * 4 * 31);
    }

    #[test]
    fn rounds_partial_cells() {
        // 45 / 8 = 5.625 -> 6 blocks, 43 / 8 = 5.375 -> 5 blocks
        let g = CellGeometry::for_resolution(45, 43, 8, 31);
        assert_eq!((g.cells_y, g.cells_x), (4, 3));
    }

    #[test]
    fn clamps_small_levels_to_zero() {
        for extent in 1..16 {
            let g = CellGeometry::for_resolution(extent, extent, 8, 31);
            assert_eq!((g.cells_y, g.cells_x), (0, 0), "extent {extent}");
            assert!(g.is_empty());
        }
    }
}
