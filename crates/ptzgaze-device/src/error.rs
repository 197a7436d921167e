use ptzgaze_camera::CameraError;
use ptzgaze_orient::OrientError;

/// An error type for the transport carrying device requests.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The device did not answer in time.
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// The device refused the credentials.
    #[error("Authentication rejected by {0}")]
    Unauthorized(String),

    /// Any other failure to complete the request.
    #[error("Request to {url} failed: {reason}")]
    Request {
        /// The requested url
        url: String,
        /// A description of the failure
        reason: String,
    },
}

/// An error type for device commands and queries.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// The request did not reach the device or got no answer.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The device answered something other than `OK`.
    #[error("Device rejected the command, answered {0:?}")]
    Rejected(String),

    /// A queried option is absent from the device answer.
    #[error("Option `{0}` not found in the device response")]
    MissingOption(String),

    /// A queried option could not be parsed.
    #[error("Option `{option}` has an invalid value {value:?}")]
    InvalidOptionValue {
        /// The option name
        option: String,
        /// The raw value
        value: String,
    },
}

/// An error type for click to aim requests.
///
/// Geometry failures and device failures are kept apart.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AimError {
    /// No device position has been confirmed yet.
    #[error("The camera position is unknown, command an absolute position first")]
    PositionUnknown,

    /// The click could not be turned into an orientation.
    #[error("Failed to resolve the target orientation. {0}")]
    Resolve(#[from] OrientError),

    /// The device did not execute the move.
    #[error("Failed to move the camera. {0}")]
    Device(#[from] DeviceError),
}

/// An error type for loading camera profiles.
#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    /// Error to read the profile file.
    #[error("Failed to read the profile. {0}")]
    Io(#[from] std::io::Error),

    /// Error to parse or validate the profile document.
    #[error("Failed to parse the profile. {0}")]
    Parse(#[from] serde_json::Error),

    /// Error in the calibration values.
    #[error("Invalid camera calibration. {0}")]
    Camera(#[from] CameraError),
}
