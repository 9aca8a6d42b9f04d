use macroquad::math::DVec2;
use std::f64::consts::FRAC_PI_2;

/// Applies the rotation matrix `(cos, -sin; sin, cos)` to `p`.
#[inline]
pub fn rotate(p: DVec2, cos: f64, sin: f64) -> DVec2 {
    DVec2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y)
}

/// Fourth corner of the parallelogram `p1 -> p2 -> p3 -> p4`.
///
/// x is offset from `p1` and y from `p3`; the grouping is fixed so the
/// rounding matches other renderers of the same map bit for bit.
#[inline]
pub fn complete_parallelogram(p1: DVec2, p2: DVec2, p3: DVec2) -> DVec2 {
    DVec2::new(p1.x + (p3.x - p2.x), p3.y - (p2.y - p1.y))
}

#[inline]
pub fn quadrant_radians(quadrant: u8) -> f64 {
    quadrant as f64 * FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_maps_x_axis_onto_y_axis() {
        let (sin, cos) = quadrant_radians(1).sin_cos();
        let p = rotate(DVec2::new(1.0, 0.0), cos, sin);
        assert!((p.x - 0.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn parallelogram_of_axis_aligned_rect_is_missing_corner() {
        let p4 = complete_parallelogram(
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(3.0, 2.0),
        );
        assert_eq!(p4, DVec2::new(3.0, 0.0));
    }

    #[test]
    fn parallelogram_y_is_taken_from_the_third_corner() {
        let (p1, p2, p3) = (
            DVec2::new(-2.2, -2.2),
            DVec2::new(2.1, 2.1),
            DVec2::new(1.6, 1.6),
        );
        let p4 = complete_parallelogram(p1, p2, p3);
        assert_eq!(p4.y.to_bits(), (1.6f64 - (2.1 - -2.2)).to_bits());
        assert_eq!(p4.x.to_bits(), (-2.2f64 + (1.6 - 2.1)).to_bits());
        // the two groupings differ in the last bit for these inputs
        assert_ne!(p4.y.to_bits(), p4.x.to_bits());
    }
}
