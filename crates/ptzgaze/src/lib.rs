#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use ptzgaze_camera as camera;

#[doc(inline)]
pub use ptzgaze_device as device;

#[doc(inline)]
pub use ptzgaze_orient as orient;
