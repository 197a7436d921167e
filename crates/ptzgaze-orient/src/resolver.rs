use glam::DVec3;
use ptzgaze_camera::{CameraRay, PinholeProjector, Pixel};

use crate::angles::OrientationAngles;
use crate::error::OrientError;
use crate::gimbal::GimbalProfile;
use crate::normalize::normalize;
use crate::rotation::{compose_new_orientation, rotation_from_pan_tilt};

/// Turns a clicked pixel into the absolute orientation that centers it.
///
/// The resolver holds no mutable state; the current orientation is passed in on every call.
///
/// # Example
///
/// ```
/// use ptzgaze_camera::{CameraIntrinsics, PinholeProjector, Pixel, RadTanDistortion};
/// use ptzgaze_orient::{GazeResolver, GimbalProfile, OrientationAngles};
///
/// let intrinsics =
///     CameraIntrinsics::new(1000.0, 1000.0, 640.0, 360.0, RadTanDistortion::none()).unwrap();
/// let resolver = GazeResolver::new(PinholeProjector::new(intrinsics), GimbalProfile::default());
///
/// let target = resolver
///     .resolve(Pixel::new(640, 360), &OrientationAngles::new(30.0, 10.0))
///     .unwrap();
/// assert!((target.pan - 30.0).abs() < 1e-9);
/// assert!((target.tilt - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeResolver {
    projector: PinholeProjector,
    profile: GimbalProfile,
}

impl GazeResolver {
    /// Create a resolver for a camera model and a gimbal.
    pub fn new(projector: PinholeProjector, profile: GimbalProfile) -> Self {
        Self { projector, profile }
    }

    /// The pixel to ray projector.
    pub fn projector(&self) -> &PinholeProjector {
        &self.projector
    }

    /// The gimbal profile.
    pub fn profile(&self) -> &GimbalProfile {
        &self.profile
    }

    /// Compute the orientation that centers `pixel`, starting from `current`.
    ///
    /// # Arguments
    ///
    /// * `pixel` - The clicked pixel in the frame seen at `current`.
    /// * `current` - The last confirmed device orientation.
    ///
    /// # Returns
    ///
    /// The device orientation with pan in `[0, 360)` and tilt within the gimbal limits.
    pub fn resolve(
        &self,
        pixel: Pixel,
        current: &OrientationAngles,
    ) -> Result<OrientationAngles, OrientError> {
        log::debug!("resolving pixel {}x{} from {current}", pixel.x, pixel.y);
        self.resolve_ray(&self.projector.project_pixel(pixel), current)
    }

    /// Same as [`GazeResolver::resolve`] for a sub-pixel image point.
    pub fn resolve_point(
        &self,
        u: f64,
        v: f64,
        current: &OrientationAngles,
    ) -> Result<OrientationAngles, OrientError> {
        self.resolve_ray(&self.projector.pixel_to_ray(u, v), current)
    }

    /// Compute the orientation that puts a camera ray on the optical axis.
    pub fn resolve_ray(
        &self,
        ray: &CameraRay,
        current: &OrientationAngles,
    ) -> Result<OrientationAngles, OrientError> {
        current.ensure_finite()?;

        let geometric = self.profile.to_geometric(current);
        let raw = compose_new_orientation(ray, &geometric)?;
        let target = normalize(&raw, &self.profile)?;

        log::debug!("gaze move: {current} -> {target}");
        Ok(target)
    }

    /// Locate in the image seen at `current` the point the camera would center at `target`.
    ///
    /// Returns `None` if that point lies behind the camera. For `target == current` this is
    /// the principal point.
    pub fn gaze_pixel(
        &self,
        current: &OrientationAngles,
        target: &OrientationAngles,
    ) -> Option<(f64, f64)> {
        let home_from_current = rotation_from_pan_tilt(&self.profile.to_geometric(current));
        let home_from_target = rotation_from_pan_tilt(&self.profile.to_geometric(target));

        let axis_in_home = home_from_target * DVec3::Z;
        let axis_in_current = home_from_current.transpose() * axis_in_home;

        self.projector.ray_to_pixel(&CameraRay(axis_in_current))
    }
}
