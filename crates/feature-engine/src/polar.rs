//! Cartesian to Polar Conversion

/// Radius and angle series derived from paired Cartesian derivatives
#[derive(Debug, Clone, Default)]
pub struct PolarPair {
    /// Euclidean norm of each (dx, dy) pair
    pub radius: Vec<f64>,
    /// Four-quadrant arctangent of each pair, in (-pi, pi]
    pub angle: Vec<f64>,
}

/// Convert paired derivative series to polar coordinates
///
/// Unequal-length inputs are truncated to the shorter series.
pub fn to_polar(dx: &[f64], dy: &[f64]) -> PolarPair {
    let len = dx.len().min(dy.len());
    let mut radius = Vec::with_capacity(len);
    let mut angle = Vec::with_capacity(len);
    for (x, y) in dx.iter().zip(dy.iter()) {
        radius.push(x.hypot(*y));
        angle.push(y.atan2(*x));
    }
    PolarPair { radius, angle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_radius_and_angle() {
        let pair = to_polar(&[3.0, 0.0, 1.0], &[4.0, 2.0, 1.0]);
        assert!((pair.radius[0] - 5.0).abs() < 1e-12);
        assert!((pair.radius[1] - 2.0).abs() < 1e-12);
        assert!((pair.angle[1] - FRAC_PI_2).abs() < 1e-12);
        assert!((pair.angle[2] - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_quadrants() {
        let pair = to_polar(&[-1.0, -1.0], &[0.0, -1.0]);
        // atan2 maps the negative x axis to pi, third quadrant to (-pi, -pi/2)
        assert!((pair.angle[0] - PI).abs() < 1e-12);
        assert!(pair.angle[1] < -FRAC_PI_2 && pair.angle[1] > -PI);
    }

    #[test]
    fn test_truncates_to_shorter() {
        let pair = to_polar(&[1.0, 2.0, 3.0], &[1.0]);
        assert_eq!(pair.radius.len(), 1);
        assert_eq!(pair.angle.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let pair = to_polar(&[], &[1.0, 2.0]);
        assert!(pair.radius.is_empty());
        assert!(pair.angle.is_empty());
    }
}
