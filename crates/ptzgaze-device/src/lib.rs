#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// The PTZ camera controller.
pub mod camera;

/// Dahua CGI devices.
pub mod dahua;

/// The device command interface.
pub mod device;

/// Error types for the device module.
pub mod error;

/// Confirmed device positions.
pub mod position;

/// Camera profiles.
pub mod profile;

pub use camera::PtzCamera;
pub use device::PtzDevice;
pub use error::{AimError, DeviceError, ProfileError, TransportError};
pub use position::PtzPosition;
pub use profile::{CameraProfile, FrameSize};
