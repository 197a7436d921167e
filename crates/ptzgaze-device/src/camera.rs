use ptzgaze_camera::{CameraIntrinsics, Pixel};
use ptzgaze_orient::{GazeResolver, OrientationAngles};

use crate::device::PtzDevice;
use crate::error::{AimError, DeviceError};
use crate::position::PtzPosition;
use crate::profile::{CameraProfile, FrameSize};

/// A PTZ camera that can be aimed by clicking on its video frame.
///
/// The camera only records a position after the device acknowledged it, so every click is
/// resolved against the last confirmed orientation. The position is unknown until the first
/// absolute move succeeds.
pub struct PtzCamera<D> {
    device: D,
    resolver: GazeResolver,
    frame: FrameSize,
    position: Option<PtzPosition>,
}

impl<D: PtzDevice> PtzCamera<D> {
    /// Create a camera from a device and its profile.
    pub fn new(device: D, profile: &CameraProfile) -> Self {
        Self {
            device,
            resolver: profile.resolver(),
            frame: profile.frame,
            position: None,
        }
    }

    /// The underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The underlying device, mutably.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// The last confirmed position, if any.
    pub fn position(&self) -> Option<PtzPosition> {
        self.position
    }

    /// The calibrated intrinsics.
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        self.resolver.projector().intrinsics()
    }

    /// The video frame size.
    pub fn frame(&self) -> FrameSize {
        self.frame
    }

    /// The click resolver.
    pub fn resolver(&self) -> &GazeResolver {
        &self.resolver
    }

    /// Command an absolute position and record it once the device acknowledges.
    pub fn set_absolute_position(
        &mut self,
        orientation: OrientationAngles,
        zoom: u16,
    ) -> Result<PtzPosition, DeviceError> {
        if let Err(err) = self.device.set_absolute_position(&orientation, zoom) {
            log::error!("failed to move to {orientation} zoom {zoom}: {err}");
            return Err(err);
        }
        let position = PtzPosition::new(orientation, zoom);
        self.position = Some(position);
        Ok(position)
    }

    /// Move to a new orientation keeping the current zoom.
    pub fn set_orientation(
        &mut self,
        orientation: OrientationAngles,
    ) -> Result<PtzPosition, AimError> {
        let current = self.position.ok_or(AimError::PositionUnknown)?;
        Ok(self.set_absolute_position(orientation, current.zoom)?)
    }

    /// Change the zoom multiple keeping the current orientation.
    pub fn set_zoom(&mut self, zoom: u16) -> Result<PtzPosition, AimError> {
        let current = self.position.ok_or(AimError::PositionUnknown)?;
        Ok(self.set_absolute_position(current.orientation, zoom)?)
    }

    /// Center the camera on a clicked pixel.
    ///
    /// # Arguments
    ///
    /// * `pixel` - The clicked pixel in the current video frame.
    ///
    /// # Returns
    ///
    /// The new confirmed position. On failure the recorded position is unchanged.
    pub fn aim_at(&mut self, pixel: Pixel) -> Result<PtzPosition, AimError> {
        let current = self.position.ok_or(AimError::PositionUnknown)?;
        if !self.frame.contains(pixel) {
            log::warn!(
                "pixel {}x{} is outside of the {}x{} frame",
                pixel.x,
                pixel.y,
                self.frame.width,
                self.frame.height
            );
        }

        let target = self.resolver.resolve(pixel, &current.orientation)?;
        log::info!("PTZ move: {} -> {}", current.orientation, target);

        Ok(self.set_absolute_position(target, current.zoom)?)
    }

    /// Locate where `target` appears in the current frame, if it is in front of the camera.
    pub fn gaze_pixel(&self, target: &OrientationAngles) -> Option<(f64, f64)> {
        let current = self.position?;
        self.resolver.gaze_pixel(&current.orientation, target)
    }
}
