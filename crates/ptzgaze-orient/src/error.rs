use ptzgaze_camera::CameraError;

/// An error type for the orientation module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OrientError {
    /// Error coming from the camera model, e.g. a zero length ray.
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// Error when an input orientation contains NaN or infinite angles.
    #[error("Orientation (pan={0}, tilt={1}) is not finite")]
    NonFiniteOrientation(f64, f64),

    /// Error when the normalized orientation violates the gimbal range.
    ///
    /// This indicates a defect in the normalizer, not a runtime condition.
    #[error("Normalized orientation (pan={pan}, tilt={tilt}) outside pan [0, 360) tilt [{tilt_min}, {tilt_max}]")]
    OutOfRange {
        /// The offending pan angle
        pan: f64,
        /// The offending tilt angle
        tilt: f64,
        /// The lower tilt limit
        tilt_min: f64,
        /// The upper tilt limit
        tilt_max: f64,
    },

    /// Error when a gimbal profile is inconsistent.
    #[error("Invalid gimbal profile: {0}")]
    InvalidGimbalProfile(String),
}
