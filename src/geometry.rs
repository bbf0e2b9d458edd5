//! Shared UV-space arithmetic for islands and node groups.

use std::cmp::Ordering;

use nalgebra::{Point2, Point3, Vector2};

/// Dimensions at or below this are treated as zero when dividing.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// UV coordinates are compared after rounding to this many decimals.
///
/// Rounding buckets values; it is not a distance tolerance. Two coordinates
/// closer than `1e-6` still get different keys when a rounding boundary
/// falls between them (`4e-7` and `6e-7` round to 0 and 1).
pub const UV_ROUND_DECIMALS: i32 = 6;

/// Integer key of a UV coordinate rounded to [`UV_ROUND_DECIMALS`].
///
/// Never compare raw floats when deciding whether two loops share a UV
/// position; compare these keys. Equal keys mean the coordinates agree to
/// six decimals, which does not hold for every pair within `1e-6`.
#[inline]
pub fn uv_key(uv: &Point2<f64>) -> (i64, i64) {
    let scale = 10f64.powi(UV_ROUND_DECIMALS);
    ((uv.x * scale).round() as i64, (uv.y * scale).round() as i64)
}

/// Whether two UV coordinates coincide after rounding.
#[inline]
pub fn uv_coincident(a: &Point2<f64>, b: &Point2<f64>) -> bool {
    uv_key(a) == uv_key(b)
}

/// Axis-aligned UV bounding box.
///
/// An empty point set yields the degenerate box `(0,0)-(0,0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvBounds {
    /// Lower-left corner.
    pub min: Point2<f64>,
    /// Upper-right corner.
    pub max: Point2<f64>,
}

impl Default for UvBounds {
    fn default() -> Self {
        Self {
            min: Point2::origin(),
            max: Point2::origin(),
        }
    }
}

impl UvBounds {
    /// Bounds of a set of UV points, in a single pass.
    pub fn from_points<It: IntoIterator<Item = Point2<f64>>>(points: It) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        let (mut min, mut max) = (first, first);
        for p in iter {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &UvBounds) -> UvBounds {
        UvBounds {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Box center.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent along U.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along V.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent along an axis.
    #[inline]
    pub fn extent(&self, axis: UvAxis) -> f64 {
        match axis {
            UvAxis::U => self.width(),
            UvAxis::V => self.height(),
        }
    }
}

/// Ratio `target / current`, or 1 when `current` is degenerate.
///
/// Scaling an island whose width or height is zero must never produce NaN
/// or infinity; such an axis is left unscaled.
#[inline]
pub fn safe_scale(target: f64, current: f64) -> f64 {
    if current.abs() <= DEGENERATE_EPSILON || !current.is_finite() {
        1.0
    } else {
        target / current
    }
}

/// Order two sort keys, ascending or descending. NaN always sorts last.
pub(crate) fn cmp_sort_keys(a: f64, b: f64, reverse: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) if reverse => b.total_cmp(&a),
        (false, false) => a.total_cmp(&b),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

/// A UV-space axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UvAxis {
    /// Horizontal.
    #[default]
    U,
    /// Vertical.
    V,
}

impl UvAxis {
    /// Component of a UV point along this axis.
    #[inline]
    pub fn of(self, p: &Point2<f64>) -> f64 {
        match self {
            UvAxis::U => p.x,
            UvAxis::V => p.y,
        }
    }

    /// Unit vector along this axis.
    #[inline]
    pub fn unit(self) -> Vector2<f64> {
        match self {
            UvAxis::U => Vector2::new(1.0, 0.0),
            UvAxis::V => Vector2::new(0.0, 1.0),
        }
    }

    /// Axis with the largest spread over a set of points. Ties favour U.
    pub fn of_largest_spread<It: IntoIterator<Item = Point2<f64>>>(points: It) -> UvAxis {
        let b = UvBounds::from_points(points);
        if b.height() > b.width() {
            UvAxis::V
        } else {
            UvAxis::U
        }
    }
}

/// A 3D axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis3 {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis3 {
    /// Axis with the largest spread over a set of points. Ties favour X, then Y.
    pub fn of_largest_spread<It: IntoIterator<Item = Point3<f64>>>(points: It) -> Axis3 {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Axis3::X;
        };
        let (mut min, mut max) = (first, first);
        for p in iter {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        let d = max - min;
        if d.x >= d.y && d.x >= d.z {
            Axis3::X
        } else if d.y >= d.z {
            Axis3::Y
        } else {
            Axis3::Z
        }
    }
}

/// Space in which a 3D center is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// World space, through the object's transform.
    #[default]
    World,
    /// Object space.
    Local,
}
