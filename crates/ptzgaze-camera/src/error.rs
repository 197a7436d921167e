/// An error type for the camera module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    /// Error when a focal length is not strictly positive.
    #[error("Focal lengths must be positive, got fx={0} fy={1}")]
    InvalidFocalLength(f64, f64),

    /// Error when a calibration parameter is NaN or infinite.
    #[error("Camera parameter `{0}` is not finite")]
    NonFiniteParameter(&'static str),

    /// Error when the intrinsics matrix does not have the pinhole form.
    #[error("Invalid camera intrinsics matrix: {0}")]
    InvalidIntrinsicsMatrix(String),

    /// Error when a ray cannot be normalized.
    #[error("Cannot normalize a zero length or non finite ray ({0}, {1}, {2})")]
    ZeroLengthRay(f64, f64, f64),
}
