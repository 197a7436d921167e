use std::path::Path;

use ptzgaze_camera::{CameraIntrinsics, PinholeProjector, Pixel, RadTanDistortion, UndistortMode};
use ptzgaze_orient::{GazeResolver, GimbalProfile};
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// The size of the video frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    /// The frame width.
    pub width: u32,
    /// The frame height.
    pub height: u32,
}

impl FrameSize {
    /// Create a new frame size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check whether a pixel lies inside the frame.
    pub fn contains(&self, pixel: Pixel) -> bool {
        u32::try_from(pixel.x).is_ok_and(|x| x < self.width)
            && u32::try_from(pixel.y).is_ok_and(|y| y < self.height)
    }
}

/// Everything needed to resolve clicks for one camera.
///
/// Profiles are stored as JSON:
///
/// ```json
/// {
///   "intrinsics": { "fx": 2338.9, "fy": 2338.5, "cx": 1297.5, "cy": 743.3 },
///   "undistort": { "mode": "disabled" },
///   "gimbal": { "tilt_min": -15.0, "tilt_max": 90.0 },
///   "frame": { "width": 2592, "height": 1520 }
/// }
/// ```
///
/// `undistort` and `gimbal` are optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraProfile {
    /// The calibrated intrinsics.
    pub intrinsics: CameraIntrinsics,
    /// Whether clicks are undistorted before projection.
    #[serde(default)]
    pub undistort: UndistortMode,
    /// The gimbal limits and tilt calibration.
    #[serde(default)]
    pub gimbal: GimbalProfile,
    /// The main stream frame size.
    pub frame: FrameSize,
}

impl CameraProfile {
    /// The calibration of the 2592x1520 reference camera.
    ///
    /// Distortion coefficients are carried but not applied.
    pub fn reference() -> Result<Self, ProfileError> {
        let intrinsics = CameraIntrinsics::new(
            2338.9152623521627,
            2338.5344212108994,
            1297.4678987212778,
            743.3445529777781,
            RadTanDistortion::from_coeffs([
                0.03413359728013275,
                0.20648704610948337,
                -0.0006930691652865927,
                -0.0020291504344734992,
            ]),
        )?;
        Ok(Self {
            intrinsics,
            undistort: UndistortMode::Disabled,
            gimbal: GimbalProfile::default(),
            frame: FrameSize::new(2592, 1520),
        })
    }

    /// Parse a profile from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a profile from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        log::debug!("loading camera profile from {}", path.display());
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Serialize the profile as pretty printed JSON.
    pub fn to_json_string(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the click resolver for this camera.
    pub fn resolver(&self) -> GazeResolver {
        let projector = PinholeProjector::new(self.intrinsics).with_undistort(self.undistort);
        GazeResolver::new(projector, self.gimbal)
    }
}
