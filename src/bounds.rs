/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// Tight box around `points`, or `None` when there are no points.
    pub fn from_points(points: &[[f64; D]]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            for i in 0..D {
                if p[i] < min[i] { min[i] = p[i]; }
                if p[i] > max[i] { max[i] = p[i]; }
            }
        }
        Some(Self { min, max })
    }

    pub fn center(&self) -> [f64; D] {
        let mut c = [0.0; D];
        for i in 0..D {
            c[i] = 0.5 * (self.min[i] + self.max[i]);
        }
        c
    }

    /// Full edge lengths.
    pub fn extent(&self) -> [f64; D] {
        let mut e = [0.0; D];
        for i in 0..D {
            e[i] = self.max[i] - self.min[i];
        }
        e
    }

    pub fn half_extent(&self) -> [f64; D] {
        let mut e = self.extent();
        for v in e.iter_mut() {
            *v *= 0.5;
        }
        e
    }

    pub fn contains(&self, point: &[f64; D]) -> bool {
        (0..D).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Splits the box at `value` along `axis` into the lower and upper part.
    ///
    /// The value is not clamped, a split outside the box yields an inverted half.
    pub fn split(&self, axis: usize, value: f64) -> (Self, Self) {
        let mut lower = *self;
        let mut upper = *self;
        lower.max[axis] = value;
        upper.min[axis] = value;
        (lower, upper)
    }

    /// The sub-box selected by `code`, halving every axis at the midpoint.
    ///
    /// Bit `i` of `code` picks the upper half of axis `i`.
    pub fn orthant(&self, code: usize) -> Self {
        let mid = self.center();
        let mut child = *self;
        for i in 0..D {
            if code & (1 << i) != 0 {
                child.min[i] = mid[i];
            } else {
                child.max[i] = mid[i];
            }
        }
        child
    }
}

impl BoundingBox<3> {
    /// The eight octants of a 3D box, indexed by octant code.
    pub fn octants(&self) -> [Self; 8] {
        std::array::from_fn(|code| self.orthant(code))
    }
}

/// Octant code of `point` relative to the midpoint `mid`.
///
/// A coordinate strictly above the midpoint sets the bit of its axis.
pub fn octant_code(point: &[f64; 3], mid: &[f64; 3]) -> usize {
    (point[0] > mid[0]) as usize
        | ((point[1] > mid[1]) as usize) << 1
        | ((point[2] > mid[2]) as usize) << 2
}
