//! Geometry primitives for the octant scan

/// Gradient between two points.
///
/// With `invert == false` this is horizontal spread per row, `(x1 - x2) / (y1 - y2)`,
/// used by the vertically scanned octants. With `invert == true` it is vertical spread
/// per column, `(y1 - y2) / (x1 - x2)`, used by the horizontally scanned ones.
#[inline]
pub fn slope(x1: f64, y1: f64, x2: f64, y2: f64, invert: bool) -> f64 {
    if invert {
        (y1 - y2) / (x1 - x2)
    } else {
        (x1 - x2) / (y1 - y2)
    }
}

/// Squared Euclidean distance, compared against `range * range` for a round view.
/// Widened to `i64` so any `i32` range squares without overflow.
#[inline]
pub fn squared_distance(x1: i32, y1: i32, x2: i32, y2: i32) -> i64 {
    let dx = i64::from(x1) - i64::from(x2);
    let dy = i64::from(y1) - i64::from(y2);
    dx * dx + dy * dy
}

/// Round to nearest, ties to even (2.5 -> 2, 3.5 -> 4)
#[inline]
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slope_orientation() {
        assert_eq!(slope(1.0, 0.0, 2.0, 2.0, false), 0.5);
        assert_eq!(slope(1.0, 0.0, 2.0, 2.0, true), 2.0);
        assert_eq!(slope(1.5, 1.5, 2.0, 2.0, false), 1.0);
    }

    #[test]
    fn test_slope_on_centerline_is_zero() {
        let s = slope(2.0, 0.0, 2.0, 2.0, false);
        assert!(s >= 0.0 && s <= 0.0);
    }

    #[test]
    fn test_squared_distance() {
        assert_eq!(squared_distance(0, 0, 3, 4), 25);
        assert_eq!(squared_distance(-2, 5, -2, 5), 0);
        assert_eq!(squared_distance(0, 0, 50_000, 0), 2_500_000_000);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.5), 0.0);
        assert_eq!(round_half_even(1.5), 2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(2.6), 3.0);
        assert_eq!(round_half_even(-1.5), -2.0);
    }
}
