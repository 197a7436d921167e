#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! The data flow for a click is
//!
//! ```text
//! pixel -> camera ray -> ray in the home frame -> target rotation -> raw Euler angles -> command
//! ```
//!
//! where the last step folds the twin Euler solution, wraps pan into `[0, 360)` and clamps tilt
//! into the mechanical range of the gimbal.

/// Orientation value types and angle helpers.
pub mod angles;

/// Error types for the orientation module.
pub mod error;

/// Gimbal limits and calibration.
pub mod gimbal;

/// Normalization of raw Euler angles into device commands.
pub mod normalize;

/// Click to orientation resolver.
pub mod resolver;

/// Rotation composition and Euler angle extraction.
pub mod rotation;

pub use angles::{angular_distance, wrap_degrees, OrientationAngles, RawOrientation};
pub use error::OrientError;
pub use gimbal::{GimbalProfile, DAHUA_MOTOR_TILT_SHIFT};
pub use normalize::normalize;
pub use resolver::GazeResolver;
pub use rotation::{compose_new_orientation, pan_tilt_from_rotation, rotation_from_pan_tilt};
