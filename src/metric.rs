//! Distance functions used to weight proximity-graph edges.

/// Position in light years (or any consistent unit).
pub type Position = [f64; 3];

/// A distance function over positions of type `P`.
///
/// Implementations must return a non-negative, non-NaN value and be symmetric.
/// Any `Fn(&P, &P) -> f64` closure is a metric.
pub trait Metric<P> {
    fn distance(&self, a: &P, b: &P) -> f64;
}

impl<P, F: Fn(&P, &P) -> f64> Metric<P> for F {
    #[inline] fn distance(&self, a: &P, b: &P) -> f64 { self(a, b) }
}

/// Straight-line distance in 3D.
#[derive(Copy, Clone, Debug, Default)]
pub struct Euclidean;

impl Metric<Position> for Euclidean {
    #[inline] fn distance(&self, a: &Position, b: &Position) -> f64 { euclidean(a, b) }
}

/// Euclidean distance. Falls back to `hypot` when the sum of squares would
/// overflow or underflow. A distance beyond `f64::MAX` saturates to +inf.
#[inline]
pub fn euclidean(a: &Position, b: &Position) -> f64 {
    let (dx, dy, dz) = (a[0] - b[0], a[1] - b[1], a[2] - b[2]);
    if !(dx.is_finite() && dy.is_finite() && dz.is_finite()) {
        // Halved coordinates of finite inputs never overflow when subtracted.
        let (hx, hy, hz) = (a[0] * 0.5 - b[0] * 0.5, a[1] * 0.5 - b[1] * 0.5, a[2] * 0.5 - b[2] * 0.5);
        return 2.0 * hx.hypot(hy).hypot(hz);
    }
    let sq = dx * dx + dy * dy + dz * dz;
    if sq.is_finite() && sq >= f64::MIN_POSITIVE { sq.sqrt() } else { dx.hypot(dy).hypot(dz) }
}
