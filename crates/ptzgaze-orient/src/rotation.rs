//! Rotation composition and Euler angle extraction for a pan-tilt head.
//!
//! Frames follow the camera optical convention: x right, y down, z forward. The home frame is
//! the optical frame at pan = tilt = 0. A camera at `(pan, tilt)` has
//!
//! ```text
//! R_home_from_camera = Ry(-pan) * Rx(-tilt)
//! ```
//!
//! i.e. pan is the outer axis and tilt the inner one. Extraction uses the same Y-X-Z order.

use std::f64::consts::PI;

use glam::{DMat3, DQuat, DVec3};
use ptzgaze_camera::CameraRay;

use crate::angles::{OrientationAngles, RawOrientation};
use crate::error::OrientError;

/// Below this horizontal length a unit axis is treated as vertical.
const VERTICAL_EPS: f64 = 1e-9;

#[inline]
fn at(m: &DMat3, row: usize, col: usize) -> f64 {
    m.col(col)[row]
}

/// Compute the rotation from the home frame to a camera aimed at `orientation`.
///
/// # Arguments
///
/// * `orientation` - The geometric pan and tilt in degrees.
///
/// # Returns
///
/// The rotation matrix mapping camera frame vectors to home frame vectors.
pub fn rotation_from_pan_tilt(orientation: &OrientationAngles) -> DMat3 {
    let pan = DMat3::from_rotation_y(-orientation.pan.to_radians());
    let tilt = DMat3::from_rotation_x(-orientation.tilt.to_radians());
    pan * tilt
}

/// Extract the angles `(a, b, c)` in radians such that `m = Ry(a) * Rx(b) * Rz(c)`.
///
/// The outer angle `a` is restricted to `[0, pi]`, the other two to `[-pi, pi]`. Every
/// rotation has two such decompositions, `(a, b, c)` and `(a + pi, pi - b, c + pi)`; the
/// restriction on `a` selects one of them, so `b` may come out past the vertical.
///
/// In gimbal lock, when the rotated z axis is vertical, only `a - c` or `a + c` is defined.
/// There `c` is set to zero and `a` spans `(-pi, pi]`.
///
/// PRECONDITION: `m` is a rotation matrix.
pub fn euler_yxz(m: &DMat3) -> DVec3 {
    if at(m, 0, 2).hypot(at(m, 2, 2)) < VERTICAL_EPS {
        let a = (-at(m, 2, 0)).atan2(at(m, 0, 0));
        let b = (-at(m, 1, 2)).atan2(at(m, 0, 2).hypot(at(m, 2, 2)));
        return DVec3::new(a, b, 0.0);
    }

    let mut a = at(m, 0, 2).atan2(at(m, 2, 2));
    if a < 0.0 {
        a += PI;
    }
    let (sa, ca) = a.sin_cos();

    // undo the outer rotation: Ry(a)^T * m = Rx(b) * Rz(c)
    let b = (-at(m, 1, 2)).atan2(sa * at(m, 0, 2) + ca * at(m, 2, 2));
    let c = (sa * at(m, 2, 1) - ca * at(m, 0, 1)).atan2(ca * at(m, 0, 0) - sa * at(m, 2, 0));

    DVec3::new(a, b, c)
}

/// Extract the raw pan, tilt and roll in degrees from a home-from-camera rotation.
pub fn pan_tilt_from_rotation(m: &DMat3) -> RawOrientation {
    let angles = euler_yxz(m);
    RawOrientation {
        pan: -angles.x.to_degrees(),
        tilt: -angles.y.to_degrees(),
        roll: -angles.z.to_degrees(),
    }
}

/// Compute the orientation that brings a camera ray onto the optical axis.
///
/// # Arguments
///
/// * `ray` - The ray in the frame of the camera at `current`.
/// * `current` - The current geometric orientation in degrees.
///
/// # Returns
///
/// The raw orientation, to be normalized with [`crate::normalize::normalize`].
///
/// # Errors
///
/// Fails if the ray has zero length.
pub fn compose_new_orientation(
    ray: &CameraRay,
    current: &OrientationAngles,
) -> Result<RawOrientation, OrientError> {
    let ray_in_camera = ray.normalized()?;

    let home_from_current = rotation_from_pan_tilt(current);
    let ray_in_home = (home_from_current * ray_in_camera).normalize();

    // any pan reaches a vertical axis, keep the current one
    if ray_in_home.x.hypot(ray_in_home.z) < VERTICAL_EPS {
        let raw = RawOrientation {
            pan: current.pan,
            tilt: 90f64.copysign(ray_in_home.y),
            roll: 0.0,
        };
        log::debug!("ray in home {ray_in_home} is vertical, raw orientation: {raw:?}");
        return Ok(raw);
    }

    // the target orientation is the one whose forward axis points along the ray
    let arc = DQuat::from_rotation_arc(DVec3::Z, ray_in_home).normalize();
    let home_from_target = DMat3::from_quat(arc);

    let raw = pan_tilt_from_rotation(&home_from_target);
    log::debug!(
        "ray in camera: {ray_in_camera}, ray in home: {ray_in_home}, raw orientation: {raw:?}"
    );

    Ok(raw)
}
