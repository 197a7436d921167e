#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Lens distortion models.
pub mod distortion;

/// Error types for the camera module.
pub mod error;

/// Pinhole camera intrinsic parameters.
pub mod intrinsics;

/// Pixel to ray projection.
pub mod projection;

pub use distortion::{RadTanDistortion, UndistortMode};
pub use error::CameraError;
pub use intrinsics::CameraIntrinsics;
pub use projection::{project_pixel_to_ray, CameraRay, PinholeProjector, Pixel};
