use ptzgaze_orient::OrientationAngles;
use serde::{Deserialize, Serialize};

/// A device position confirmed by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PtzPosition {
    /// The absolute pan and tilt in degrees.
    pub orientation: OrientationAngles,
    /// The zoom multiple.
    pub zoom: u16,
}

impl PtzPosition {
    /// Create a new position.
    pub fn new(orientation: OrientationAngles, zoom: u16) -> Self {
        Self { orientation, zoom }
    }
}

impl std::fmt::Display for PtzPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} zoom {}", self.orientation, self.zoom)
    }
}
