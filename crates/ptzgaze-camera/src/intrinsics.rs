use serde::{Deserialize, Serialize};

use crate::distortion::RadTanDistortion;
use crate::error::CameraError;

/// Represents the intrinsic parameters of a pinhole camera.
///
/// The values are validated on construction and cannot be changed afterwards.
///
/// # Fields
///
/// * `fx` - The focal length in the x direction
/// * `fy` - The focal length in the y direction
/// * `cx` - The x coordinate of the principal point
/// * `cy` - The y coordinate of the principal point
/// * `distortion` - The radial-tangential distortion coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawIntrinsics", into = "RawIntrinsics")]
pub struct CameraIntrinsics {
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
    distortion: RadTanDistortion,
}

/// Unvalidated wire form of [`CameraIntrinsics`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawIntrinsics {
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
    #[serde(default)]
    distortion: [f64; 4],
}

impl TryFrom<RawIntrinsics> for CameraIntrinsics {
    type Error = CameraError;

    fn try_from(raw: RawIntrinsics) -> Result<Self, Self::Error> {
        CameraIntrinsics::new(
            raw.fx,
            raw.fy,
            raw.cx,
            raw.cy,
            RadTanDistortion::from_coeffs(raw.distortion),
        )
    }
}

impl From<CameraIntrinsics> for RawIntrinsics {
    fn from(intrinsics: CameraIntrinsics) -> Self {
        Self {
            fx: intrinsics.fx,
            fy: intrinsics.fy,
            cx: intrinsics.cx,
            cy: intrinsics.cy,
            distortion: intrinsics.distortion.coeffs(),
        }
    }
}

impl CameraIntrinsics {
    /// Create camera intrinsics from focal lengths, principal point and distortion.
    ///
    /// # Errors
    ///
    /// Fails if any value is not finite or if a focal length is not strictly positive.
    pub fn new(
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
        distortion: RadTanDistortion,
    ) -> Result<Self, CameraError> {
        for (name, value) in [("fx", fx), ("fy", fy), ("cx", cx), ("cy", cy)] {
            if !value.is_finite() {
                return Err(CameraError::NonFiniteParameter(name));
            }
        }
        if fx <= 0.0 || fy <= 0.0 {
            return Err(CameraError::InvalidFocalLength(fx, fy));
        }
        distortion.validate()?;

        Ok(Self {
            fx,
            fy,
            cx,
            cy,
            distortion,
        })
    }

    /// Create camera intrinsics from a 3x3 camera matrix and the `[k1, k2, p1, p2]` coefficients.
    ///
    /// The matrix must have the form `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`.
    pub fn from_matrix(k: &[[f64; 3]; 3], distortion: [f64; 4]) -> Result<Self, CameraError> {
        if k[0][1] != 0.0 || k[1][0] != 0.0 || k[2][0] != 0.0 || k[2][1] != 0.0 || k[2][2] != 1.0
        {
            return Err(CameraError::InvalidIntrinsicsMatrix(format!(
                "expected [[fx, 0, cx], [0, fy, cy], [0, 0, 1]], got {k:?}"
            )));
        }
        Self::new(
            k[0][0],
            k[1][1],
            k[0][2],
            k[1][2],
            RadTanDistortion::from_coeffs(distortion),
        )
    }

    /// The focal length in the x direction, in pixels.
    pub fn fx(&self) -> f64 {
        self.fx
    }

    /// The focal length in the y direction, in pixels.
    pub fn fy(&self) -> f64 {
        self.fy
    }

    /// The x coordinate of the principal point.
    pub fn cx(&self) -> f64 {
        self.cx
    }

    /// The y coordinate of the principal point.
    pub fn cy(&self) -> f64 {
        self.cy
    }

    /// The lens distortion coefficients.
    pub fn distortion(&self) -> &RadTanDistortion {
        &self.distortion
    }

    /// The optical center `(cx, cy)` in pixels.
    pub fn principal_point(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    /// The mean of the two focal lengths.
    pub fn focal_length(&self) -> f64 {
        (self.fx + self.fy) / 2.0
    }

    /// Horizontal field of view in radians for an image `width` pixels wide.
    pub fn fov_x(&self, width: u32) -> f64 {
        2.0 * (width as f64).atan2(2.0 * self.fx)
    }

    /// Vertical field of view in radians for an image `height` pixels tall.
    pub fn fov_y(&self, height: u32) -> f64 {
        2.0 * (height as f64).atan2(2.0 * self.fy)
    }

    /// Returns the camera matrix as a row-major 3x3 array.
    pub fn camera_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_intrinsics_from_matrix() -> Result<(), CameraError> {
        let k = [[1000.0, 0.0, 640.0], [0.0, 900.0, 480.0], [0.0, 0.0, 1.0]];
        let intrinsics = CameraIntrinsics::from_matrix(&k, [0.1, 0.01, 0.0, 0.0])?;
        assert_eq!(intrinsics.fx(), 1000.0);
        assert_eq!(intrinsics.fy(), 900.0);
        assert_eq!(intrinsics.principal_point(), (640.0, 480.0));
        assert_eq!(intrinsics.distortion().k1, 0.1);
        assert_eq!(intrinsics.camera_matrix(), k);
        Ok(())
    }

    #[test]
    fn test_intrinsics_rejects_skewed_matrix() {
        let k = [[1000.0, 2.0, 640.0], [0.0, 1000.0, 480.0], [0.0, 0.0, 1.0]];
        let res = CameraIntrinsics::from_matrix(&k, [0.0; 4]);
        assert!(matches!(res, Err(CameraError::InvalidIntrinsicsMatrix(_))));
    }

    #[test]
    fn test_intrinsics_rejects_bad_focal_length() {
        let res = CameraIntrinsics::new(0.0, 10.0, 1.0, 1.0, RadTanDistortion::none());
        assert_eq!(res, Err(CameraError::InvalidFocalLength(0.0, 10.0)));

        let res = CameraIntrinsics::new(10.0, -3.0, 1.0, 1.0, RadTanDistortion::none());
        assert_eq!(res, Err(CameraError::InvalidFocalLength(10.0, -3.0)));

        let res = CameraIntrinsics::new(10.0, 10.0, f64::NAN, 1.0, RadTanDistortion::none());
        assert_eq!(res, Err(CameraError::NonFiniteParameter("cx")));
    }

    #[test]
    fn test_fov_and_focal_length() -> Result<(), CameraError> {
        let intrinsics = CameraIntrinsics::new(500.0, 400.0, 320.0, 240.0, RadTanDistortion::none())?;
        assert_relative_eq!(intrinsics.focal_length(), 450.0);
        // a 1000px wide image seen with fx=500 spans 45 degrees on each side
        assert_relative_eq!(intrinsics.fov_x(1000), std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(intrinsics.fov_y(800), std::f64::consts::FRAC_PI_2);
        Ok(())
    }

    #[test]
    fn test_intrinsics_deserialize_validates() {
        let ok = r#"{"fx": 10.0, "fy": 12.0, "cx": 5.0, "cy": 6.0, "distortion": [0.1, 0.2, 0.0, 0.0]}"#;
        let intrinsics: CameraIntrinsics = serde_json::from_str(ok).expect("valid intrinsics");
        assert_eq!(intrinsics.fy(), 12.0);
        assert_eq!(intrinsics.distortion().k2, 0.2);

        let no_distortion = r#"{"fx": 10.0, "fy": 12.0, "cx": 5.0, "cy": 6.0}"#;
        let intrinsics: CameraIntrinsics =
            serde_json::from_str(no_distortion).expect("valid intrinsics");
        assert!(!intrinsics.distortion().has_distortion());

        let bad = r#"{"fx": -10.0, "fy": 12.0, "cx": 5.0, "cy": 6.0}"#;
        assert!(serde_json::from_str::<CameraIntrinsics>(bad).is_err());
    }
}
