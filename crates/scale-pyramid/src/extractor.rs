//! The per-cell feature routine seam.

use scale_pyramid_core::{CellGeometry, PlanarImage};

/// Computes a per-cell descriptor for one pyramid level.
///
/// The returned buffer must hold exactly `geometry.descriptor_len()` values;
/// the scheduler rejects anything else. Its contents are opaque to the
/// pyramid.
pub trait CellFeatureExtractor {
    fn extract(
        &mut self,
        level: &PlanarImage,
        cell_size: usize,
        geometry: CellGeometry,
    ) -> Vec<f32>;
}

impl<E: CellFeatureExtractor + ?Sized> CellFeatureExtractor for &mut E {
    fn extract(
        &mut self,
        level: &PlanarImage,
        cell_size: usize,
        geometry: CellGeometry,
    ) -> Vec<f32> {
        (**self).extract(level, cell_size, geometry)
    }
}

impl<E: CellFeatureExtractor + ?Sized> CellFeatureExtractor for Box<E> {
    fn extract(
        &mut self,
        level: &PlanarImage,
        cell_size: usize,
        geometry: CellGeometry,
    ) -> Vec<f32> {
        (**self).extract(level, cell_size, geometry)
    }
}

/// Adapts a closure into a [`CellFeatureExtractor`].
pub struct FnExtractor<F>(pub F);

impl<F> CellFeatureExtractor for FnExtractor<F>
where
    F: FnMut(&PlanarImage, usize, CellGeometry) -> Vec<f32>,
{
    fn extract(
        &mut self,
        level: &PlanarImage,
        cell_size: usize,
        geometry: CellGeometry,
    ) -> Vec<f32> {
        (self.0)(level, cell_size, geometry)
    }
}

/// Returns zero-filled descriptors of the right size.
///
/// Useful to size and schedule a pyramid before a real routine is wired in.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroDescriptors;

impl CellFeatureExtractor for ZeroDescriptors {
    fn extract(&mut self, _: &PlanarImage, _: usize, geometry: CellGeometry) -> Vec<f32> {
        vec![0.0; geometry.descriptor_len()]
    }
}
