use crate::angles::{wrap_degrees, OrientationAngles, RawOrientation};
use crate::error::OrientError;
use crate::gimbal::GimbalProfile;

/// Tilt in degrees past the vertical that still counts as vertical.
const VERTICAL_TOLERANCE: f64 = 1e-9;

/// Fold the twin Euler solution with tilt past the vertical back into `[-90, 90]`.
///
/// `(pan, tilt)` and `(pan + 180, 180 - tilt)` point the optical axis the same way, as do
/// `(pan, tilt)` and `(pan - 180, -(180 + tilt))` on the negative side.
fn fold_past_vertical(pan: f64, tilt: f64) -> (f64, f64) {
    // rounding past the vertical is left to the clamp
    if tilt.abs() <= 90.0 + VERTICAL_TOLERANCE {
        return (pan, tilt);
    }
    let tilt = 180f64.copysign(tilt) - tilt;
    let pan = if pan >= 180.0 { pan - 180.0 } else { pan + 180.0 };
    (pan, tilt)
}

/// Convert a raw extracted orientation into a valid device command.
///
/// The steps are: wrap pan into `[0, 360)`, fold a tilt past the vertical, apply the gimbal
/// tilt shift, wrap pan again and clamp tilt into the gimbal limits. Roll is dropped.
///
/// # Arguments
///
/// * `raw` - The geometric orientation as extracted from a rotation.
/// * `profile` - The gimbal limits and tilt calibration.
///
/// # Errors
///
/// Fails with [`OrientError::NonFiniteOrientation`] on NaN input and with
/// [`OrientError::OutOfRange`] if the result violates the limits, which is a defect and
/// panics in debug builds.
pub fn normalize(
    raw: &RawOrientation,
    profile: &GimbalProfile,
) -> Result<OrientationAngles, OrientError> {
    OrientationAngles::new(raw.pan, raw.tilt).ensure_finite()?;

    let (pan, tilt) = fold_past_vertical(wrap_degrees(raw.pan), raw.tilt);
    if tilt != raw.tilt {
        log::debug!("folded tilt past vertical: ({}, {}) -> ({pan}, {tilt})", raw.pan, raw.tilt);
    }

    let pan = wrap_degrees(pan);
    let tilt = (tilt + profile.tilt_shift()).clamp(profile.tilt_min(), profile.tilt_max());
    let angles = OrientationAngles::new(pan, tilt);

    debug_assert!(
        profile.contains(&angles),
        "normalized orientation {angles:?} outside of {profile:?}"
    );
    if !profile.contains(&angles) {
        return Err(OrientError::OutOfRange {
            pan,
            tilt,
            tilt_min: profile.tilt_min(),
            tilt_max: profile.tilt_max(),
        });
    }

    Ok(angles)
}
