use serde::{Deserialize, Serialize};

use crate::angles::OrientationAngles;
use crate::error::OrientError;

/// Tilt offset in degrees measured by motor calibration of the Dahua SD series gimbal.
///
/// Pass it as `tilt_shift` to [`GimbalProfile::new`] for devices whose tilt zero does not
/// coincide with the optical horizon.
pub const DAHUA_MOTOR_TILT_SHIFT: f64 = 6.08049 / 2.0;

/// Mechanical description of a pan-tilt head.
///
/// # Fields
///
/// * `tilt_min` - The lowest reachable tilt in degrees
/// * `tilt_max` - The highest reachable tilt in degrees
/// * `tilt_shift` - Device tilt minus geometric tilt, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGimbalProfile", into = "RawGimbalProfile")]
pub struct GimbalProfile {
    tilt_min: f64,
    tilt_max: f64,
    tilt_shift: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGimbalProfile {
    tilt_min: f64,
    tilt_max: f64,
    #[serde(default)]
    tilt_shift: f64,
}

impl TryFrom<RawGimbalProfile> for GimbalProfile {
    type Error = OrientError;

    fn try_from(raw: RawGimbalProfile) -> Result<Self, Self::Error> {
        GimbalProfile::new(raw.tilt_min, raw.tilt_max, raw.tilt_shift)
    }
}

impl From<GimbalProfile> for RawGimbalProfile {
    fn from(profile: GimbalProfile) -> Self {
        Self {
            tilt_min: profile.tilt_min,
            tilt_max: profile.tilt_max,
            tilt_shift: profile.tilt_shift,
        }
    }
}

impl Default for GimbalProfile {
    fn default() -> Self {
        Self {
            tilt_min: -15.0,
            tilt_max: 90.0,
            tilt_shift: 0.0,
        }
    }
}

impl GimbalProfile {
    /// Create a gimbal profile.
    ///
    /// # Errors
    ///
    /// Fails if a value is not finite or if `tilt_min` is not below `tilt_max`.
    pub fn new(tilt_min: f64, tilt_max: f64, tilt_shift: f64) -> Result<Self, OrientError> {
        if !(tilt_min.is_finite() && tilt_max.is_finite() && tilt_shift.is_finite()) {
            return Err(OrientError::InvalidGimbalProfile(format!(
                "non finite value in tilt_min={tilt_min} tilt_max={tilt_max} tilt_shift={tilt_shift}"
            )));
        }
        if tilt_min >= tilt_max {
            return Err(OrientError::InvalidGimbalProfile(format!(
                "tilt_min ({tilt_min}) must be below tilt_max ({tilt_max})"
            )));
        }
        Ok(Self {
            tilt_min,
            tilt_max,
            tilt_shift,
        })
    }

    /// The lowest reachable tilt in degrees.
    pub fn tilt_min(&self) -> f64 {
        self.tilt_min
    }

    /// The highest reachable tilt in degrees.
    pub fn tilt_max(&self) -> f64 {
        self.tilt_max
    }

    /// The calibration offset between device and geometric tilt, in degrees.
    pub fn tilt_shift(&self) -> f64 {
        self.tilt_shift
    }

    /// Check that an orientation is a valid command: pan in `[0, 360)` and tilt within limits.
    pub fn contains(&self, orientation: &OrientationAngles) -> bool {
        (0.0..360.0).contains(&orientation.pan)
            && (self.tilt_min..=self.tilt_max).contains(&orientation.tilt)
    }

    /// Convert a device orientation to the geometric orientation of the optical axis.
    pub fn to_geometric(&self, orientation: &OrientationAngles) -> OrientationAngles {
        OrientationAngles::new(orientation.pan, orientation.tilt - self.tilt_shift)
    }
}
