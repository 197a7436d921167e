use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::distortion::UndistortMode;
use crate::error::CameraError;
use crate::intrinsics::CameraIntrinsics;

/// An integer pixel coordinate in the displayed frame.
///
/// Values outside the frame are allowed and produce extrapolated rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Pixel {
    /// The column of the pixel
    pub x: i32,
    /// The row of the pixel
    pub y: i32,
}

impl Pixel {
    /// Create a new pixel coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A direction in the camera optical frame: x right, y down, z forward.
///
/// The vector is not normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct CameraRay(pub DVec3);

impl CameraRay {
    /// The optical axis of the camera.
    pub const FORWARD: Self = Self(DVec3::Z);

    /// Create a ray from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Returns the unit vector pointing along the ray.
    ///
    /// # Errors
    ///
    /// Fails if the ray has zero length or non finite components.
    pub fn normalized(&self) -> Result<DVec3, CameraError> {
        let length = self.0.length();
        if !length.is_finite() || length < f64::EPSILON {
            return Err(CameraError::ZeroLengthRay(self.0.x, self.0.y, self.0.z));
        }
        Ok(self.0 / length)
    }
}

impl std::ops::Deref for CameraRay {
    type Target = DVec3;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DVec3> for CameraRay {
    #[inline]
    fn from(v: DVec3) -> Self {
        Self(v)
    }
}

/// Project a pixel to a ray in the camera frame with the inverse pinhole model.
///
/// The pixel is taken as distortion free. Use [`PinholeProjector`] to enable undistortion.
///
/// # Arguments
///
/// * `pixel` - The pixel coordinate
/// * `intrinsics` - The intrinsic parameters of the camera
///
/// # Returns
///
/// The ray `((x - cx) / fx, (y - cy) / fy, 1)`.
pub fn project_pixel_to_ray(pixel: Pixel, intrinsics: &CameraIntrinsics) -> CameraRay {
    CameraRay::new(
        (pixel.x as f64 - intrinsics.cx()) / intrinsics.fx(),
        (pixel.y as f64 - intrinsics.cy()) / intrinsics.fy(),
        1.0,
    )
}

/// Maps pixels to camera rays and back, with optional lens undistortion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeProjector {
    intrinsics: CameraIntrinsics,
    undistort: UndistortMode,
}

impl PinholeProjector {
    /// Create a projector that treats pixels as distortion free.
    pub fn new(intrinsics: CameraIntrinsics) -> Self {
        Self {
            intrinsics,
            undistort: UndistortMode::Disabled,
        }
    }

    /// Set the undistortion strategy.
    pub fn with_undistort(mut self, undistort: UndistortMode) -> Self {
        self.undistort = undistort;
        self
    }

    /// The camera intrinsics.
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// The undistortion strategy.
    pub fn undistort(&self) -> UndistortMode {
        self.undistort
    }

    /// Back-project an integer pixel to a camera ray.
    pub fn project_pixel(&self, pixel: Pixel) -> CameraRay {
        self.pixel_to_ray(pixel.x as f64, pixel.y as f64)
    }

    /// Back-project a sub-pixel image point to a camera ray with `z = 1`.
    pub fn pixel_to_ray(&self, u: f64, v: f64) -> CameraRay {
        let k = &self.intrinsics;
        let x = (u - k.cx()) / k.fx();
        let y = (v - k.cy()) / k.fy();

        let (x, y) = match self.undistort {
            UndistortMode::Disabled => (x, y),
            UndistortMode::Iterative {
                max_iterations,
                tolerance,
            } => k
                .distortion()
                .undistort_normalized(x, y, max_iterations, tolerance),
        };

        CameraRay::new(x, y, 1.0)
    }

    /// Project a camera ray to the image.
    ///
    /// Returns `None` if the ray does not point in front of the camera.
    pub fn ray_to_pixel(&self, ray: &CameraRay) -> Option<(f64, f64)> {
        if !ray.is_finite() || ray.z <= f64::EPSILON {
            return None;
        }
        let (x, y) = (ray.x / ray.z, ray.y / ray.z);

        let (x, y) = match self.undistort {
            UndistortMode::Disabled => (x, y),
            UndistortMode::Iterative { .. } => self.intrinsics.distortion().distort_normalized(x, y),
        };

        let k = &self.intrinsics;
        Some((k.fx() * x + k.cx(), k.fy() * y + k.cy()))
    }
}
