use std::time::Duration;

use ptzgaze_orient::OrientationAngles;

use super::cgi::{
    check_ok, find_option, parse_numeric_option, DahuaCgi, DahuaConfig, Focus, MotionAction,
};
use super::transport::CgiTransport;
use crate::device::PtzDevice;
use crate::error::DeviceError;
use crate::profile::FrameSize;

const FOCUS_NAP: Duration = Duration::from_millis(100);

/// A Dahua PTZ camera.
///
/// # Example
///
/// ```
/// use ptzgaze_device::dahua::{DahuaConfig, DahuaPtzDevice, DryRunTransport};
/// use ptzgaze_device::PtzDevice;
/// use ptzgaze_orient::OrientationAngles;
///
/// let config = DahuaConfig::new("192.168.1.108", "admin", "secret");
/// let mut device = DahuaPtzDevice::new(&config, DryRunTransport::new());
/// device
///     .set_absolute_position(&OrientationAngles::new(4.7, -6.3), 1)
///     .unwrap();
/// let url = device.transport().last_request().unwrap();
/// assert!(url.contains("arg1=4.7&arg2=-6.3&arg3=1"));
/// ```
pub struct DahuaPtzDevice<T> {
    cgi: DahuaCgi,
    transport: T,
    focus_nap: Duration,
}

impl<T: CgiTransport> DahuaPtzDevice<T> {
    /// Create a device talking to `config.host` through `transport`.
    pub fn new(config: &DahuaConfig, transport: T) -> Self {
        Self {
            cgi: DahuaCgi::new(config),
            transport,
            focus_nap: FOCUS_NAP,
        }
    }

    /// Set how long a focus motion runs between its start and stop requests.
    pub fn with_focus_nap(mut self, nap: Duration) -> Self {
        self.focus_nap = nap;
        self
    }

    /// The request url builder.
    pub fn cgi(&self) -> &DahuaCgi {
        &self.cgi
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn get(&mut self, url: &str) -> Result<String, DeviceError> {
        log::debug!("GET {url}");
        match self.transport.get(url) {
            Ok(body) => Ok(body.trim().to_string()),
            Err(err) => {
                log::error!("request failed: {err}");
                Err(err.into())
            }
        }
    }

    fn command(&mut self, url: &str) -> Result<(), DeviceError> {
        let body = self.get(url)?;
        check_ok(&body).inspect_err(|err| log::warn!("{err}"))
    }

    fn focus(&mut self, focus: Focus, multiple: u16) -> Result<(), DeviceError> {
        let start = self.cgi.focus_url(focus, MotionAction::Start, multiple);
        let stop = self.cgi.focus_url(focus, MotionAction::Stop, multiple);
        self.command(&start)?;
        std::thread::sleep(self.focus_nap);
        self.command(&stop)
    }

    /// Move the focus closer for one nap.
    pub fn focus_near(&mut self, multiple: u16) -> Result<(), DeviceError> {
        self.focus(Focus::Near, multiple)
    }

    /// Move the focus further for one nap.
    pub fn focus_far(&mut self, multiple: u16) -> Result<(), DeviceError> {
        self.focus(Focus::Far, multiple)
    }

    fn main_video_option(&mut self, option: &str) -> Result<u32, DeviceError> {
        let url = self.cgi.encode_config_url();
        let body = self.get(&url)?;
        let key = self.cgi.main_video_key(option);
        let value = parse_numeric_option(&body, &key)?;
        u32::try_from(value)
            .ok()
            .filter(|v| *v > 0)
            .ok_or(DeviceError::InvalidOptionValue {
                option: key,
                value: value.to_string(),
            })
    }

    /// Query the main stream resolution.
    pub fn resolution(&mut self) -> Result<FrameSize, DeviceError> {
        let width = self.main_video_option("Width")?;
        let height = self.main_video_option("Height")?;
        Ok(FrameSize::new(width, height))
    }

    /// Query the main stream frame rate.
    pub fn frame_rate(&mut self) -> Result<u32, DeviceError> {
        self.main_video_option("FPS")
    }

    /// Query the device model name.
    pub fn device_type(&mut self) -> Result<String, DeviceError> {
        let url = self.cgi.device_type_url();
        let body = self.get(&url)?;
        find_option(&body, "type")
            .map(str::to_string)
            .ok_or_else(|| DeviceError::MissingOption("type".to_string()))
    }
}

impl<T: CgiTransport> PtzDevice for DahuaPtzDevice<T> {
    fn set_absolute_position(
        &mut self,
        orientation: &OrientationAngles,
        zoom: u16,
    ) -> Result<(), DeviceError> {
        let url = self.cgi.position_abs_url(orientation, zoom);
        self.command(&url)
    }
}
