use crate::bounds::BoundingBox;
use crate::error::{Error, Result};
use rand::prelude::*;
use rand::rngs::StdRng;

/// An immutable set of 3D points, each identified by its index.
///
/// Trees built over the cloud refer to points by index and never own them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<[f64; 3]>,
}

impl PointCloud {
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self { points }
    }

    /// Builds a cloud from an interleaved `[x0, y0, z0, x1, ...]` buffer.
    pub fn from_flat(coords: &[f64]) -> Result<Self> {
        if coords.len() % 3 != 0 {
            return Err(Error::FlatLength(coords.len()));
        }
        let points = coords
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Self { points })
    }

    /// `count` points drawn uniformly from `bounds`.
    pub fn random(count: usize, bounds: &BoundingBox<3>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let extent = bounds.extent();
        let points = (0..count)
            .map(|_| {
                let mut p = bounds.min;
                for i in 0..3 {
                    p[i] += rng.r#gen::<f64>() * extent[i];
                }
                p
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tight bounding box of all points, `None` for an empty cloud.
    pub fn bounds(&self) -> Option<BoundingBox<3>> {
        BoundingBox::from_points(&self.points)
    }

    /// Interleaved copy of the coordinates.
    pub fn to_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| p.iter().copied()).collect()
    }
}

impl From<Vec<[f64; 3]>> for PointCloud {
    fn from(points: Vec<[f64; 3]>) -> Self {
        Self::new(points)
    }
}

/// Seed for random clouds: random in the browser, fixed elsewhere so runs repeat.
pub(crate) fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat() {
        let cloud = PointCloud::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points()[1], [4.0, 5.0, 6.0]);
        assert_eq!(cloud.to_flat(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_from_flat_bad_length() {
        assert_eq!(PointCloud::from_flat(&[1.0, 2.0]), Err(Error::FlatLength(2)));
    }

    #[test]
    fn test_random_within_bounds() {
        let bounds = BoundingBox::new([-5.0, 0.0, 10.0], [5.0, 1.0, 20.0]);
        let cloud = PointCloud::random(500, &bounds, 7);
        assert_eq!(cloud.len(), 500);
        assert!(cloud.points().iter().all(|p| bounds.contains(p)));

        let again = PointCloud::random(500, &bounds, 7);
        assert_eq!(cloud, again);
    }

    #[test]
    fn test_empty_bounds() {
        assert!(PointCloud::default().bounds().is_none());
    }
}
