use ptzgaze_orient::OrientationAngles;

use crate::error::DeviceError;

/// A pan-tilt-zoom device that accepts absolute positioning commands.
///
/// An `Ok` return means the device acknowledged the command. Implementations must not retry.
pub trait PtzDevice {
    /// Command the device to an absolute orientation and zoom multiple.
    ///
    /// # Arguments
    ///
    /// * `orientation` - Pan in `[0, 360)` and tilt in degrees.
    /// * `zoom` - The zoom multiple.
    fn set_absolute_position(
        &mut self,
        orientation: &OrientationAngles,
        zoom: u16,
    ) -> Result<(), DeviceError>;
}

impl<D: PtzDevice + ?Sized> PtzDevice for Box<D> {
    fn set_absolute_position(
        &mut self,
        orientation: &OrientationAngles,
        zoom: u16,
    ) -> Result<(), DeviceError> {
        (**self).set_absolute_position(orientation, zoom)
    }
}
