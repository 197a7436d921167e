use serde::{Deserialize, Serialize};

use crate::error::OrientError;

/// An absolute pan/tilt command in degrees, in the device convention.
///
/// Pan turns about the vertical axis, positive to the left. Tilt turns about the horizontal
/// axis, positive downwards. Both are measured from the home orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationAngles {
    /// The pan angle in degrees
    pub pan: f64,
    /// The tilt angle in degrees
    pub tilt: f64,
}

impl OrientationAngles {
    /// Create a new orientation from pan and tilt in degrees.
    pub fn new(pan: f64, tilt: f64) -> Self {
        Self { pan, tilt }
    }

    /// Check that both angles are finite numbers.
    pub fn ensure_finite(&self) -> Result<(), OrientError> {
        if self.pan.is_finite() && self.tilt.is_finite() {
            Ok(())
        } else {
            Err(OrientError::NonFiniteOrientation(self.pan, self.tilt))
        }
    }
}

impl std::fmt::Display for OrientationAngles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.pan, self.tilt)
    }
}

/// Euler angles in degrees as extracted from a rotation, before normalization.
///
/// The values follow the device sign convention but not its ranges: tilt may lie past the
/// vertical and pan may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawOrientation {
    /// The pan angle in degrees
    pub pan: f64,
    /// The tilt angle in degrees
    pub tilt: f64,
    /// The roll angle in degrees, which the device cannot command
    pub roll: f64,
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid may round tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        // turns -0.0 into 0.0
        wrapped + 0.0
    }
}

/// The smallest absolute difference between two angles in degrees, in `[0, 180]`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = wrap_degrees(a - b);
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
        assert!(wrap_degrees(-1e-17) < 360.0);
        assert!(wrap_degrees(-0.0).is_sign_positive());
    }

    #[test]
    fn test_angular_distance() {
        assert_relative_eq!(angular_distance(359.0, 1.0), 2.0);
        assert_relative_eq!(angular_distance(1.0, 359.0), 2.0);
        assert_relative_eq!(angular_distance(90.0, 270.0), 180.0);
        assert_relative_eq!(angular_distance(10.0, 10.0), 0.0);
    }

    #[test]
    fn test_ensure_finite() {
        assert!(OrientationAngles::new(10.0, 5.0).ensure_finite().is_ok());
        assert!(matches!(
            OrientationAngles::new(f64::NAN, 5.0).ensure_finite(),
            Err(OrientError::NonFiniteOrientation(..))
        ));
        assert!(OrientationAngles::new(1.0, f64::INFINITY)
            .ensure_finite()
            .is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrientationAngles::new(4.729, -6.283).to_string(), "(4.73, -6.28)");
    }
}
