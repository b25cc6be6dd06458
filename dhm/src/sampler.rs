use crate::{BandValues, MapView, TileLayer, C};
use geo::geometry::Coord;

/// Something that answers "what are the band values at this map
/// coordinate?".
///
/// `None` means "skip this sample", never a failure.
pub trait PointSampler {
    fn sample_at(&self, coord: Coord<C>) -> Option<BandValues>;
}

impl<F> PointSampler for F
where
    F: Fn(Coord<C>) -> Option<BandValues>,
{
    fn sample_at(&self, coord: Coord<C>) -> Option<BandValues> {
        self(coord)
    }
}

/// Samples the active raster of `layer` as rendered in `map`.
///
/// Every call performs a fresh lookup; nothing is cached.
pub struct RasterSampler<'a, M: ?Sized, L: ?Sized> {
    map: &'a M,
    layer: &'a L,
}

impl<'a, M, L> RasterSampler<'a, M, L>
where
    M: MapView + ?Sized,
    L: TileLayer + ?Sized,
{
    pub fn new(map: &'a M, layer: &'a L) -> Self {
        Self { map, layer }
    }
}

impl<'a, M, L> PointSampler for RasterSampler<'a, M, L>
where
    M: MapView + ?Sized,
    L: TileLayer + ?Sized,
{
    fn sample_at(&self, coord: Coord<C>) -> Option<BandValues> {
        let pixel = self.map.pixel_from_coord(coord)?;
        self.layer
            .data_at(pixel)
            .filter(|values| !values.is_nodata())
    }
}

#[cfg(test)]
mod tests {
    use super::{PointSampler, RasterSampler};
    use crate::{Grid, GridLayer, RasterSource, Viewport};
    use geo::geometry::Coord;

    #[test]
    fn test_sample_at() {
        // 4x4 grid, value = column index, nodata in the top-left cell.
        let samples: Vec<f32> = (0..16)
            .map(|i| if i == 0 { -1.0 } else { (i % 4) as f32 })
            .collect();
        let grid = Grid::new(
            Coord { x: 0.0, y: 4.0 },
            1.0,
            (4, 4),
            Some(-1.0),
            vec![samples.into_boxed_slice()],
        )
        .unwrap();
        let source = RasterSource::new("DHM", "01.01.2023", "dhm.asc", vec![1]).unwrap();
        let mut layer = GridLayer::new(vec![(source, grid)]).unwrap();
        let view = Viewport::new(Coord { x: 2.0, y: 2.0 }, 0.05, (100.0, 100.0));
        layer.render(&view);

        let sampler = RasterSampler::new(&view, &layer);
        let value = sampler.sample_at(Coord { x: 2.5, y: 1.5 }).unwrap();
        assert_eq!(value.band(0), Some(2.0));
        // Nodata.
        assert!(sampler.sample_at(Coord { x: 0.5, y: 3.5 }).is_none());
        // Outside the raster.
        assert!(sampler.sample_at(Coord { x: -0.5, y: 1.0 }).is_none());
        // Outside the rendered frame.
        assert!(sampler.sample_at(Coord { x: 10.0, y: 1.0 }).is_none());
    }
}
